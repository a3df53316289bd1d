use anyhow::Context;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 充能保留的配置，对应磁盘上的 config.toml
///
/// 字段缺失时取默认值，方便手工编辑
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreserveConfig {
    /// 总开关，关闭后每帧检测直接跳过
    pub enabled: bool,
    /// 打印内部状态流转，排查问题用
    pub debug: bool,
    /// 槽位切换后延迟多少毫秒回写充能
    pub restore_delay_ms: u64,
}

impl Default for PreserveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debug: false,
            restore_delay_ms: 100,
        }
    }
}

impl PreserveConfig {
    /// 读取配置文件；不存在时写出一份默认配置再返回默认值
    pub fn load_or_create(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            fs::write(path, toml::to_string_pretty(&config)?)
                .with_context(|| format!("无法写出默认配置 {}", path.display()))?;
            return Ok(config);
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("无法读取配置 {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("配置格式错误 {}", path.display()))?;
        Ok(config)
    }
}
