pub mod components;
pub mod events;
mod systems;

use bevy::prelude::*;

use crate::core::states::AppState;
use events::*;
use systems::*;

pub struct HotbarPlugin;
impl Plugin for HotbarPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SelectSlotEvent>()
            .add_event::<GiveItemEvent>()
            .add_event::<ListHotbarEvent>()
            .add_systems(
                Update,
                (give_item, select_slot, print_hotbar).run_if(in_state(AppState::InGame)),
            );
    }
}
