pub mod components;
pub mod events;
pub mod systems;

use bevy::prelude::*;

use crate::core::states::AppState;
use events::*;
use systems::*;

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GainEnergy>()
            .add_event::<ShowEnergy>()
            // 在游戏开始时生成玩家
            .add_systems(OnEnter(AppState::InGame), spawn_player)
            .add_systems(
                Update,
                (handle_gain_energy, show_energy).run_if(in_state(AppState::InGame)),
            );
    }
}
