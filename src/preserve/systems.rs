use bevy::prelude::*;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::time::Duration;

use super::{components::*, events::*};
use crate::character::components::{Player, SignatureEnergy};
use crate::core::config::PreserveConfig;
use crate::hotbar::components::Hotbar;

/// 每帧对比当前槽位和上一帧记录，发现切换就发事件。
/// 本系统只写追踪表，不碰实体和物品
pub fn track_slot_changes(
    config: Res<PreserveConfig>,
    mut table: ResMut<SlotTrackerTable>,
    mut ev_changed: EventWriter<ActiveSlotChanged>,
    player_query: Query<(Entity, &Hotbar, &SignatureEnergy), With<Player>>,
) {
    if !config.enabled {
        return;
    }

    for (entity, hotbar, energy) in &player_query {
        let current_slot = hotbar.active;
        let current_energy = energy.value;

        let record = match table.0.entry(entity) {
            Entry::Vacant(vacant) => {
                // 第一次见到这个实体，只记录，不动作
                vacant.insert(TrackedSlot {
                    last_slot: current_slot,
                    last_energy: current_energy,
                    generation: 0,
                });
                if config.debug {
                    info!("首次记录 {entity} slot={current_slot} energy={current_energy:.1}");
                }
                continue;
            }
            Entry::Occupied(occupied) => occupied.into_mut(),
        };

        if record.last_slot == current_slot {
            // 没切换，刷新记录值，下一帧检测到切换时就用它
            record.last_energy = current_energy;
            continue;
        }

        // 切换了。要恢复的值取上一帧的记录，当前值可能已被宿主清零
        let old_slot = record.last_slot;
        let energy_before = record.last_energy;
        record.last_slot = current_slot;
        record.last_energy = current_energy;
        record.generation += 1;

        if config.debug {
            info!(
                "检测到槽位切换 {old_slot} -> {current_slot} (重置前充能 {energy_before:.1})"
            );
        }

        ev_changed.write(ActiveSlotChanged {
            entity,
            old_slot,
            new_slot: current_slot,
            energy_before,
            generation: record.generation,
        });
    }
}

/// 槽位切换的善后：把重置前的充能存进旧武器，
/// 新武器里存过充能就立刻清标记并安排延迟恢复
pub fn handle_slot_change(
    config: Res<PreserveConfig>,
    queue: Res<RestoreQueue>,
    mut ev_changed: EventReader<ActiveSlotChanged>,
    mut player_query: Query<&mut Hotbar, With<Player>>,
) {
    for ev in ev_changed.read() {
        let Ok(mut hotbar) = player_query.get_mut(ev.entity) else {
            continue;
        };

        // 保存阶段：旧槽位是武器且重置前充能为正才写入
        if let Some(old_stack) = hotbar.item_at(ev.old_slot).filter(|s| s.is_weapon()) {
            if ev.energy_before > 0.0 {
                let updated = old_stack.with_meta(META_SIG_ENERGY, ev.energy_before);
                hotbar.set_item_at(ev.old_slot, Some(updated));
                if config.debug {
                    info!(
                        "已把充能 {:.1} 存入槽位 {} 的武器",
                        ev.energy_before, ev.old_slot
                    );
                }
            } else if config.debug {
                info!("重置前充能为 0，跳过保存");
            }
        }

        // 恢复阶段：先同步清掉标记再排延迟任务，
        // 快速来回切换时同一份存值不会被读两次
        let Some(new_stack) = hotbar.item_at(ev.new_slot).filter(|s| s.is_weapon()) else {
            continue;
        };
        let saved = new_stack.meta_f32(META_SIG_ENERGY).unwrap_or(0.0);
        if saved <= 0.0 {
            continue;
        }

        let cleared = new_stack.with_meta(META_SIG_ENERGY, 0.0);
        hotbar.set_item_at(ev.new_slot, Some(cleared));

        if config.debug {
            info!(
                "新武器存有充能 {saved:.1}，已清除标记，{}ms 后恢复",
                config.restore_delay_ms
            );
        }

        schedule_restore(
            &queue,
            config.restore_delay_ms,
            PendingRestore {
                entity: ev.entity,
                slot: ev.new_slot,
                energy: saved,
                generation: ev.generation,
            },
        );
    }
}

/// 睡满延迟后把任务投进队列，真正的写入回到主调度里做
fn schedule_restore(queue: &RestoreQueue, delay_ms: u64, task: PendingRestore) {
    let queue = Arc::clone(&queue.0);
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(delay_ms));
        queue.lock().unwrap().push_back(task);
    });
}

/// 取出到点的恢复任务并写充能。实体没了或者槽位又换过代，
/// 任务直接作废，不算错误
pub fn drain_restores(
    config: Res<PreserveConfig>,
    queue: Res<RestoreQueue>,
    table: Res<SlotTrackerTable>,
    mut player_query: Query<&mut SignatureEnergy, With<Player>>,
) {
    let tasks: Vec<PendingRestore> = {
        let mut pending = queue.0.lock().unwrap();
        pending.drain(..).collect()
    };

    for task in tasks {
        let still_current = table
            .0
            .get(&task.entity)
            .is_some_and(|record| record.generation == task.generation);
        if !still_current {
            if config.debug {
                info!("恢复任务作废：记录已失效或槽位又切换过 (slot={})", task.slot);
            }
            continue;
        }

        let Ok(mut energy) = player_query.get_mut(task.entity) else {
            if config.debug {
                info!("恢复任务作废：实体已失效");
            }
            continue;
        };

        energy.set(task.energy);
        if config.debug {
            info!("已恢复充能 {:.1} (槽位 {})", task.energy, task.slot);
        }
    }
}

/// 玩家下线后清掉追踪记录，同一标识再出现按首次处理
pub fn cleanup_disconnected(
    mut removed: RemovedComponents<Player>,
    mut table: ResMut<SlotTrackerTable>,
) {
    for entity in removed.read() {
        table.0.remove(&entity);
    }
}
