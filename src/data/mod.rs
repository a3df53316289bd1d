pub mod loader;
pub mod schema;

use bevy::prelude::*;
use schema::ItemCatalog;

use crate::core::states::AppState;

// --------------------------- 资源 ---------------------------
#[derive(Resource, Default)]
pub struct CatalogAssets {
    pub handle: Option<Handle<ItemCatalog>>,
}

// --------------------------- 插件 ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            // 注册资产类型 & Loader
            .init_asset::<ItemCatalog>()
            .register_asset_loader(loader::RonCatalogLoader)
            .init_resource::<CatalogAssets>()
            // Loading 流程
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(Update, check_loaded.run_if(in_state(AppState::Loading)));
    }
}

// --------------------------- 系统 ---------------------------
fn start_loading(mut catalog_assets: ResMut<CatalogAssets>, asset_server: Res<AssetServer>) {
    let handle: Handle<ItemCatalog> = asset_server.load("data/items.ron");
    catalog_assets.handle = Some(handle);
}

fn check_loaded(
    mut next: ResMut<NextState<AppState>>,
    catalog_assets: Res<CatalogAssets>,
    catalogs: Res<Assets<ItemCatalog>>,
) {
    if let Some(h) = &catalog_assets.handle {
        if let Some(catalog) = catalogs.get(h) {
            println!("✔ Items loaded: {}", catalog.items.len());
            next.set(AppState::InGame);
        }
    }
}
