use bevy::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// 物品元数据里存充能用的 key。
/// 清除时写显式的 0，不删 key，避免别处写入的旧值被误读
pub const META_SIG_ENERGY: &str = "saved_signature_energy";

/// 单个实体的逐帧记录
#[derive(Debug, Clone, Copy)]
pub struct TrackedSlot {
    /// 上一帧观察到的激活槽位
    pub last_slot: usize,
    /// 上一帧观察到的充能。检测到切换时宿主可能已经清零，
    /// 所以要恢复的值只能取这里
    pub last_energy: f32,
    /// 每次检测到切换 +1，用来作废迟到的恢复任务
    pub generation: u64,
}

/// 逐实体追踪表，只归 track_slot_changes 写
#[derive(Resource, Default)]
pub struct SlotTrackerTable(pub HashMap<Entity, TrackedSlot>);

/// 延迟恢复任务，定时线程到点后投回主循环执行
#[derive(Debug, Clone, Copy)]
pub struct PendingRestore {
    pub entity: Entity,
    pub slot: usize,
    pub energy: f32,
    pub generation: u64,
}

/// 到点的恢复任务队列。定时线程往里推，
/// drain_restores 系统每帧在主调度里取出执行
#[derive(Resource, Clone, Default)]
pub struct RestoreQueue(pub Arc<Mutex<VecDeque<PendingRestore>>>);
