//! 充能保留：宿主在切换快捷栏槽位时会把充能清零，
//! 这里通过逐帧对比槽位下标把清掉的值找回来。
//!
//! 流程分两段：track_slot_changes 每帧记录槽位和充能，发现切换就把
//! 上一帧的充能值发给 handle_slot_change；后者把值存进旧武器的元数据，
//! 新武器存过值则清标记并安排延迟恢复。宿主的清零在切换被观察到之后
//! 才完成，所以恢复必须延迟执行，再经主调度写回。

pub mod components;
pub mod events;
pub mod systems;

use bevy::prelude::*;

use crate::core::states::AppState;
use components::*;
use events::*;
use systems::*;

pub struct PreservePlugin;

impl Plugin for PreservePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SlotTrackerTable>()
            .init_resource::<RestoreQueue>()
            .add_event::<ActiveSlotChanged>()
            .add_systems(
                Update,
                (
                    (track_slot_changes, handle_slot_change).chain(),
                    drain_restores,
                    cleanup_disconnected,
                )
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
