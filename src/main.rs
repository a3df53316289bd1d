use bevy::prelude::*;
use std::path::Path;

use energy_keeper::character::CharacterPlugin;
use energy_keeper::core::{CorePlugin, config::PreserveConfig, states};
use energy_keeper::data::DataPlugin;
use energy_keeper::hotbar::HotbarPlugin;
use energy_keeper::interface::debug_cli::DebugCliPlugin;
use energy_keeper::preserve::PreservePlugin;

fn main() {
    // 启动前先读配置，文件不存在时写出默认值
    let config = PreserveConfig::load_or_create(Path::new("config.toml")).unwrap_or_else(|e| {
        eprintln!("配置读取失败，使用默认配置: {e}");
        PreserveConfig::default()
    });

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                visible: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(CorePlugin)
        .add_plugins(DebugCliPlugin)
        .add_plugins(DataPlugin)
        .add_plugins(CharacterPlugin)
        .add_plugins(HotbarPlugin)
        .add_plugins(PreservePlugin)
        .insert_resource(config)
        .add_systems(Update, forward_log_event) // 简单打印
        .add_systems(Startup, |mut next: ResMut<NextState<states::AppState>>| {
            next.set(states::AppState::Loading);
        })
        .run();
}

fn forward_log_event(mut reader: EventReader<energy_keeper::core::events::LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}
