use bevy::prelude::*;

use super::{components::*, events::*};
use crate::core::events::LogEvent;
use crate::hotbar::components::Hotbar;

/// 初始化玩家实体
pub fn spawn_player(mut commands: Commands) {
    commands.spawn((Player, SignatureEnergy::default(), Hotbar::default()));
}

/// 处理获得充能事件
pub fn handle_gain_energy(
    mut ev_gain: EventReader<GainEnergy>,
    mut ev_log: EventWriter<LogEvent>,
    mut player_query: Query<(Entity, &mut SignatureEnergy), With<Player>>,
) {
    for ev in ev_gain.read() {
        // 如果是 PLACEHOLDER，查找玩家实体
        let target_entity = if ev.entity == Entity::PLACEHOLDER {
            if let Ok((player_entity, _)) = player_query.single() {
                player_entity
            } else {
                continue;
            }
        } else {
            ev.entity
        };

        if let Ok((_, mut energy)) = player_query.get_mut(target_entity) {
            energy.gain(ev.amount);
            ev_log.write(LogEvent(format!(
                "充能 +{:.1}，当前 {:.1}/{:.1}",
                ev.amount, energy.value, energy.max
            )));
        }
    }
}

/// 打印当前充能
pub fn show_energy(
    mut ev_show: EventReader<ShowEnergy>,
    mut ev_log: EventWriter<LogEvent>,
    player_query: Query<&SignatureEnergy, With<Player>>,
) {
    if ev_show.is_empty() {
        return;
    }
    ev_show.clear();

    if let Ok(energy) = player_query.single() {
        ev_log.write(LogEvent(format!(
            "充能 {:.1}/{:.1}",
            energy.value, energy.max
        )));
    } else {
        ev_log.write(LogEvent("未找到玩家".to_string()));
    }
}
