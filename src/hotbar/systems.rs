use bevy::prelude::*;

use super::{components::*, events::*};
use crate::character::components::{Player, SignatureEnergy};
use crate::core::events::LogEvent;
use crate::data::{CatalogAssets, schema::ItemCatalog};

/// 处理"give"——把目录里的物品放进快捷栏槽位
pub fn give_item(
    mut ev_give: EventReader<GiveItemEvent>,
    mut player_query: Query<&mut Hotbar, With<Player>>,
    mut log_event: EventWriter<LogEvent>,
    catalog_assets: Res<CatalogAssets>,
    catalogs: Res<Assets<ItemCatalog>>,
) {
    let catalog = catalog_assets
        .handle
        .as_ref()
        .and_then(|h| catalogs.get(h))
        .expect("items must be loaded");

    for ev in ev_give.read() {
        if ev.slot >= SLOT_COUNT {
            log_event.write(LogEvent("槽位下标超出范围".to_string()));
            continue;
        }

        let Some(proto) = catalog
            .items
            .iter()
            .find(|e| e.id.eq_ignore_ascii_case(&ev.id))
        else {
            log_event.write(LogEvent(format!("不存在物品 ID {}", ev.id)));
            continue;
        };

        let Ok(mut hotbar) = player_query.single_mut() else {
            continue;
        };

        if hotbar.item_at(ev.slot).is_some() {
            log_event.write(LogEvent(format!("槽位 {} 原有物品被替换", ev.slot)));
        }
        hotbar.set_item_at(ev.slot, Some(ItemStack::new(proto.clone())));
        log_event.write(LogEvent(format!("槽位 {} 放入 {}", ev.slot, proto.name)));
    }
}

/// 切换激活槽位。这里顺带模拟宿主的原版行为：
/// 激活槽位一变，充能立刻清零
pub fn select_slot(
    mut ev_select: EventReader<SelectSlotEvent>,
    mut player_query: Query<(&mut Hotbar, &mut SignatureEnergy), With<Player>>,
    mut log_event: EventWriter<LogEvent>,
) {
    for ev in ev_select.read() {
        if ev.slot >= SLOT_COUNT {
            log_event.write(LogEvent("槽位下标超出范围".to_string()));
            continue;
        }

        let Ok((mut hotbar, mut energy)) = player_query.single_mut() else {
            continue;
        };

        if hotbar.active == ev.slot {
            log_event.write(LogEvent(format!("已经在槽位 {}", ev.slot)));
            continue;
        }

        hotbar.active = ev.slot;
        energy.set(0.0);
        log_event.write(LogEvent(format!("切换到槽位 {}", ev.slot)));
    }
}

/// 打印快捷栏内容
pub fn print_hotbar(
    mut ev_list: EventReader<ListHotbarEvent>,
    player_query: Query<&Hotbar, With<Player>>,
) {
    if ev_list.is_empty() {
        return;
    }
    ev_list.clear();

    let Ok(hotbar) = player_query.single() else {
        return;
    };

    for (idx, slot) in hotbar.slots.iter().enumerate() {
        let marker = if idx == hotbar.active { "*" } else { " " };
        match slot {
            Some(stack) => {
                let mut line = format!(
                    "{marker}[{idx}] {} ×{} (id={})",
                    stack.proto.name, stack.count, stack.proto.id
                );
                for (key, value) in &stack.meta {
                    line.push_str(&format!(" {key}={value}"));
                }
                println!("{line}");
            }
            None => println!("{marker}[{idx}] -"),
        }
    }
}
