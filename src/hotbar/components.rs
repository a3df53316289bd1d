use bevy::prelude::*;
use std::collections::HashMap;

use crate::data::schema::ItemEntry;

/// 快捷栏槽位数，固定
pub const SLOT_COUNT: usize = 9;

/// 运行时物品实例。物品按值语义处理：改元数据要生成新实例，
/// 再整体写回槽位，不做原地修改
#[derive(Debug, Clone)]
pub struct ItemStack {
    pub proto: ItemEntry,
    pub count: u32,
    /// 开放式元数据表，按 key 挂任意值
    pub meta: HashMap<String, serde_json::Value>,
}

impl ItemStack {
    pub fn new(proto: ItemEntry) -> Self {
        Self {
            proto,
            count: 1,
            meta: HashMap::new(),
        }
    }

    /// 带武器块的物品才有充能条
    pub fn is_weapon(&self) -> bool {
        self.proto.weapon.is_some()
    }

    /// 返回写入了 key=value 的新实例，原实例不动
    pub fn with_meta(&self, key: &str, value: f32) -> Self {
        let mut updated = self.clone();
        updated.meta.insert(key.to_string(), serde_json::Value::from(value));
        updated
    }

    pub fn meta_f32(&self, key: &str) -> Option<f32> {
        self.meta.get(key).and_then(|v| v.as_f64()).map(|v| v as f32)
    }
}

/// 玩家快捷栏：固定槽位 + 当前激活的槽位下标
#[derive(Component, Debug)]
pub struct Hotbar {
    pub slots: Vec<Option<ItemStack>>,
    pub active: usize,
}

impl Default for Hotbar {
    fn default() -> Self {
        Self {
            slots: vec![None; SLOT_COUNT],
            active: 0,
        }
    }
}

impl Hotbar {
    pub fn item_at(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    pub fn set_item_at(&mut self, slot: usize, item: Option<ItemStack>) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = item;
        }
    }
}
