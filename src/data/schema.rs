use bevy::asset::Asset;
use bevy::reflect::TypePath;
use serde::Deserialize;

/// 武器属性块；带这个块的物品才有充能条
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeaponEntry {
    pub atk: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub weapon: Option<WeaponEntry>,
}

#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct ItemCatalog {
    pub items: Vec<ItemEntry>,
}
