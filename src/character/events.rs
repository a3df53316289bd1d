use bevy::prelude::*;

/// 获得充能事件
#[derive(Event)]
pub struct GainEnergy {
    pub entity: Entity,
    pub amount: f32,
}

/// 显示充能条（用于命令行）
#[derive(Event)]
pub struct ShowEnergy;
