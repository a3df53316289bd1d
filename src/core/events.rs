use bevy::prelude::*;

use super::config::PreserveConfig;

/// 面向玩家的日志行，由 main 统一打印
#[derive(Event)]
pub struct LogEvent(pub String);

/// 启动时打印一次当前配置
pub fn startup_banner(config: Res<PreserveConfig>, mut writer: EventWriter<LogEvent>) {
    writer.write(LogEvent(format!(
        "充能保留已加载 (enabled={}, debug={}, restore_delay_ms={})",
        config.enabled, config.debug, config.restore_delay_ms
    )));
}
