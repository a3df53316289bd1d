use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use std::thread::sleep;
use std::time::Duration;

use energy_keeper::character::components::{Player, SignatureEnergy};
use energy_keeper::core::{CorePlugin, config::PreserveConfig, states::AppState};
use energy_keeper::data::schema::{ItemEntry, WeaponEntry};
use energy_keeper::hotbar::components::{Hotbar, ItemStack};
use energy_keeper::preserve::PreservePlugin;
use energy_keeper::preserve::components::{META_SIG_ENERGY, SlotTrackerTable};

const DELAY_MS: u64 = 150;

/// App with the preservation core but no host systems: the tests
/// play the host, switching slots and resetting energy by hand.
fn test_app(config: PreserveConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(StatesPlugin)
        .add_plugins(CorePlugin)
        .add_plugins(PreservePlugin)
        .insert_resource(config);
    app.world_mut()
        .resource_mut::<NextState<AppState>>()
        .set(AppState::InGame);
    app.update();
    app
}

fn fast_config() -> PreserveConfig {
    PreserveConfig {
        enabled: true,
        debug: false,
        restore_delay_ms: DELAY_MS,
    }
}

fn weapon(id: &str) -> ItemStack {
    ItemStack::new(ItemEntry {
        id: id.to_string(),
        name: id.to_string(),
        weapon: Some(WeaponEntry { atk: 5 }),
    })
}

fn plain(id: &str) -> ItemStack {
    ItemStack::new(ItemEntry {
        id: id.to_string(),
        name: id.to_string(),
        weapon: None,
    })
}

fn spawn_player(app: &mut App, active: usize, items: Vec<(usize, ItemStack)>) -> Entity {
    let mut hotbar = Hotbar::default();
    hotbar.active = active;
    for (slot, stack) in items {
        hotbar.slots[slot] = Some(stack);
    }
    app.world_mut()
        .spawn((Player, SignatureEnergy::default(), hotbar))
        .id()
}

fn set_energy(app: &mut App, entity: Entity, value: f32) {
    app.world_mut()
        .get_mut::<SignatureEnergy>(entity)
        .unwrap()
        .set(value);
}

fn energy_of(app: &App, entity: Entity) -> f32 {
    app.world().get::<SignatureEnergy>(entity).unwrap().value
}

fn switch_slot(app: &mut App, entity: Entity, slot: usize) {
    app.world_mut().get_mut::<Hotbar>(entity).unwrap().active = slot;
}

/// What the host does on a slot switch: move the active slot and
/// wipe the energy stat.
fn host_switch_and_reset(app: &mut App, entity: Entity, slot: usize) {
    switch_slot(app, entity, slot);
    set_energy(app, entity, 0.0);
}

fn annotation(app: &App, entity: Entity, slot: usize) -> Option<f32> {
    app.world()
        .get::<Hotbar>(entity)
        .unwrap()
        .item_at(slot)
        .and_then(|stack| stack.meta_f32(META_SIG_ENERGY))
}

fn wait_past_delay() {
    sleep(Duration::from_millis(DELAY_MS * 4));
}

#[test]
fn cold_start_only_initializes_tracking() {
    let mut app = test_app(fast_config());
    let player = spawn_player(&mut app, 0, vec![(0, weapon("arc_blade"))]);
    set_energy(&mut app, player, 40.0);

    app.update();

    let table = app.world().resource::<SlotTrackerTable>();
    let record = table.0.get(&player).expect("first tick should record");
    assert_eq!(record.last_slot, 0);
    assert_eq!(record.last_energy, 40.0);

    assert_eq!(annotation(&app, player, 0), None, "cold start must not save");
    assert_eq!(energy_of(&app, player), 40.0);
}

#[test]
fn constant_slot_only_refreshes_tracked_energy() {
    let mut app = test_app(fast_config());
    let player = spawn_player(&mut app, 0, vec![(0, weapon("arc_blade"))]);

    for value in [10.0, 55.0, 25.0] {
        set_energy(&mut app, player, value);
        app.update();
    }

    let table = app.world().resource::<SlotTrackerTable>();
    assert_eq!(table.0.get(&player).unwrap().last_energy, 25.0);
    assert_eq!(annotation(&app, player, 0), None, "no save without a slot change");
}

#[test]
fn slot_change_saves_previous_tick_energy() {
    let mut app = test_app(fast_config());
    let player = spawn_player(&mut app, 0, vec![(0, weapon("arc_blade"))]);
    set_energy(&mut app, player, 40.0);
    app.update();

    host_switch_and_reset(&mut app, player, 1);
    app.update();

    // The value from before the reset, not the wiped current one.
    assert_eq!(annotation(&app, player, 0), Some(40.0));

    wait_past_delay();
    app.update();
    assert_eq!(energy_of(&app, player), 0.0, "empty new slot restores nothing");
}

#[test]
fn zero_energy_is_not_saved() {
    let mut app = test_app(fast_config());
    let player = spawn_player(&mut app, 0, vec![(0, weapon("arc_blade"))]);
    app.update();

    host_switch_and_reset(&mut app, player, 1);
    app.update();

    assert_eq!(annotation(&app, player, 0), None);
}

#[test]
fn restore_clears_annotation_synchronously_and_applies_after_delay() {
    let mut app = test_app(fast_config());
    let parked = weapon("rail_lance").with_meta(META_SIG_ENERGY, 35.0);
    let player = spawn_player(&mut app, 0, vec![(2, parked)]);
    app.update();

    host_switch_and_reset(&mut app, player, 2);
    app.update();

    // Cleared to an explicit zero right on the swap, before the delay.
    assert_eq!(annotation(&app, player, 2), Some(0.0));
    assert_eq!(energy_of(&app, player), 0.0, "restore must not apply early");

    wait_past_delay();
    app.update();
    assert_eq!(energy_of(&app, player), 35.0);
}

#[test]
fn non_weapon_items_are_never_touched() {
    let mut app = test_app(fast_config());
    let marked = plain("rations").with_meta(META_SIG_ENERGY, 50.0);
    let player = spawn_player(&mut app, 0, vec![(0, plain("torch")), (1, marked)]);
    set_energy(&mut app, player, 40.0);
    app.update();

    host_switch_and_reset(&mut app, player, 1);
    app.update();
    wait_past_delay();
    app.update();

    // Neither the save nor the restore path may read or write them.
    assert_eq!(annotation(&app, player, 0), None);
    assert_eq!(annotation(&app, player, 1), Some(50.0));
    assert_eq!(energy_of(&app, player), 0.0);
}

#[test]
fn cleared_annotation_never_restores() {
    let mut app = test_app(fast_config());
    let cleared = weapon("arc_blade").with_meta(META_SIG_ENERGY, 0.0);
    let player = spawn_player(&mut app, 0, vec![(1, cleared)]);
    app.update();

    host_switch_and_reset(&mut app, player, 1);
    app.update();
    wait_past_delay();
    app.update();

    assert_eq!(energy_of(&app, player), 0.0);
    assert_eq!(annotation(&app, player, 1), Some(0.0));
}

#[test]
fn disconnect_cleanup_forgets_the_entity() {
    let mut app = test_app(fast_config());
    let player = spawn_player(&mut app, 0, vec![(0, weapon("arc_blade"))]);
    app.update();
    assert!(
        app.world()
            .resource::<SlotTrackerTable>()
            .0
            .contains_key(&player)
    );

    app.world_mut().despawn(player);
    app.update();

    assert!(
        app.world().resource::<SlotTrackerTable>().0.is_empty(),
        "despawn must drop the tracking record"
    );

    // A fresh player cold-starts: first tick records, no save.
    let reborn = spawn_player(&mut app, 0, vec![(0, weapon("arc_blade"))]);
    set_energy(&mut app, reborn, 60.0);
    app.update();
    assert_eq!(annotation(&app, reborn, 0), None);
}

#[test]
fn stale_restore_is_dropped_after_another_swap() {
    let mut app = test_app(fast_config());
    let parked = weapon("rail_lance").with_meta(META_SIG_ENERGY, 35.0);
    let player = spawn_player(&mut app, 2, vec![(0, parked), (1, weapon("arc_blade"))]);
    app.update();

    // Swap onto the parked weapon: restore gets scheduled.
    host_switch_and_reset(&mut app, player, 0);
    app.update();
    assert_eq!(annotation(&app, player, 0), Some(0.0));

    // Swap away again before the delay elapses.
    host_switch_and_reset(&mut app, player, 1);
    app.update();

    wait_past_delay();
    app.update();

    assert_eq!(
        energy_of(&app, player),
        0.0,
        "a restore scheduled for an older swap must not apply"
    );
}

#[test]
fn disabled_config_skips_everything() {
    let mut app = test_app(PreserveConfig {
        enabled: false,
        debug: false,
        restore_delay_ms: DELAY_MS,
    });
    let player = spawn_player(&mut app, 0, vec![(0, weapon("arc_blade"))]);
    set_energy(&mut app, player, 40.0);
    app.update();

    host_switch_and_reset(&mut app, player, 1);
    app.update();

    assert!(app.world().resource::<SlotTrackerTable>().0.is_empty());
    assert_eq!(annotation(&app, player, 0), None);
}

/// End-to-end: energy 40 on a weapon, swap to a plain item, swap
/// back, the value comes home after the delay.
#[test]
fn energy_survives_swap_to_plain_item_and_back() {
    let mut app = test_app(fast_config());
    let player = spawn_player(
        &mut app,
        0,
        vec![(0, weapon("plasma_saber")), (1, plain("torch"))],
    );
    set_energy(&mut app, player, 40.0);
    app.update();

    // Away to the torch; the host wipes the stat.
    host_switch_and_reset(&mut app, player, 1);
    app.update();
    assert_eq!(annotation(&app, player, 0), Some(40.0));
    assert_eq!(energy_of(&app, player), 0.0);

    wait_past_delay();
    app.update();
    assert_eq!(energy_of(&app, player), 0.0, "torch is not energy-capable");

    // Back to the saber: annotation is consumed at once, value lands
    // only after the configured delay.
    host_switch_and_reset(&mut app, player, 0);
    app.update();
    assert_eq!(annotation(&app, player, 0), Some(0.0));
    assert_eq!(energy_of(&app, player), 0.0);

    wait_past_delay();
    app.update();
    assert_eq!(energy_of(&app, player), 40.0);
}
