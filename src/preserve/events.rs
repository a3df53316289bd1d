use bevy::prelude::*;

/// 激活槽位发生了切换。energy_before 取自上一帧的记录，
/// 不是当前值——当前值可能已经被宿主清零
#[derive(Event)]
pub struct ActiveSlotChanged {
    pub entity: Entity,
    pub old_slot: usize,
    pub new_slot: usize,
    pub energy_before: f32,
    pub generation: u64,
}
