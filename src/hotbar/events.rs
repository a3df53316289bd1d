use bevy::prelude::*;

/// 切换激活槽位
#[derive(Event)]
pub struct SelectSlotEvent {
    pub slot: usize,
}

/// 往指定槽位放一件物品
#[derive(Event)]
pub struct GiveItemEvent {
    pub id: String,
    pub slot: usize,
}

/// 让 CLI 请求打印快捷栏
#[derive(Event)]
pub struct ListHotbarEvent;
