use serde::{Deserialize, Serialize};

use crate::memory::layout;

/// Static offsets of the root globals, relative to the module base.
///
/// These are guesses for a particular build. The resolver treats them as a
/// starting point and may correct them at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootOffsets {
    pub version: String,
    pub process_name: String,
    pub objects: u64,
    pub names: u64,
    pub world: u64,
}

impl Default for RootOffsets {
    fn default() -> Self {
        Self {
            version: "builtin".to_string(),
            process_name: layout::roots::PROCESS_NAME.to_string(),
            objects: layout::roots::OBJECTS,
            names: layout::roots::NAMES,
            world: layout::roots::WORLD,
        }
    }
}

impl RootOffsets {
    pub fn is_valid(&self) -> bool {
        !self.process_name.is_empty() && self.objects != 0 && self.names != 0 && self.world != 0
    }
}

/// Structural offsets for one engine build.
///
/// Every field defaults to the constant in [`layout`], so an override file
/// only needs to name the offsets that differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineLayout {
    pub world: WorldLayout,
    pub level: LevelLayout,
    pub game_state: GameStateLayout,
    pub game_instance: GameInstanceLayout,
    pub actor: ActorLayout,
    pub pawn: PawnLayout,
    pub player_state: PlayerStateLayout,
    pub scene_component: SceneComponentLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldLayout {
    pub persistent_level: u64,
    pub game_state: u64,
    pub owning_game_instance: u64,
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            persistent_level: layout::world::PERSISTENT_LEVEL,
            game_state: layout::world::GAME_STATE,
            owning_game_instance: layout::world::OWNING_GAME_INSTANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    pub actors: u64,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            actors: layout::level::ACTORS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStateLayout {
    pub player_array: u64,
}

impl Default for GameStateLayout {
    fn default() -> Self {
        Self {
            player_array: layout::game_state::PLAYER_ARRAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameInstanceLayout {
    pub local_players: u64,
}

impl Default for GameInstanceLayout {
    fn default() -> Self {
        Self {
            local_players: layout::game_instance::LOCAL_PLAYERS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorLayout {
    pub root_component: u64,
}

impl Default for ActorLayout {
    fn default() -> Self {
        Self {
            root_component: layout::actor::ROOT_COMPONENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PawnLayout {
    pub controller: u64,
    pub player_state: u64,
}

impl Default for PawnLayout {
    fn default() -> Self {
        Self {
            controller: layout::pawn::CONTROLLER,
            player_state: layout::pawn::PLAYER_STATE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStateLayout {
    pub player_name: u64,
    pub team_id: u64,
}

impl Default for PlayerStateLayout {
    fn default() -> Self {
        Self {
            player_name: layout::player_state::PLAYER_NAME,
            team_id: layout::player_state::TEAM_ID,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneComponentLayout {
    pub physics_volume: u64,
    pub attach_parent: u64,
    pub attach_socket_name: u64,
    pub attach_children: u64,
    pub relative_location: u64,
    pub relative_rotation: u64,
    pub relative_scale: u64,
    pub component_velocity: u64,
    pub component_to_world: u64,
}

impl Default for SceneComponentLayout {
    fn default() -> Self {
        use layout::scene_component as sc;
        Self {
            physics_volume: sc::PHYSICS_VOLUME,
            attach_parent: sc::ATTACH_PARENT,
            attach_socket_name: sc::ATTACH_SOCKET_NAME,
            attach_children: sc::ATTACH_CHILDREN,
            relative_location: sc::RELATIVE_LOCATION,
            relative_rotation: sc::RELATIVE_ROTATION,
            relative_scale: sc::RELATIVE_SCALE,
            component_velocity: sc::COMPONENT_VELOCITY,
            component_to_world: sc::COMPONENT_TO_WORLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_offsets_default_is_valid() {
        let offsets = RootOffsets::default();
        assert!(offsets.is_valid());
        assert_eq!(offsets.world, 0x967_6F30);
    }

    #[test]
    fn test_root_offsets_zero_is_invalid() {
        let offsets = RootOffsets {
            names: 0,
            ..Default::default()
        };
        assert!(!offsets.is_valid());
    }

    #[test]
    fn test_layout_partial_override() {
        let json = r#"{ "world": { "game_state": 352 }, "actor": { "root_component": 400 } }"#;
        let parsed: EngineLayout = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.world.game_state, 352);
        assert_eq!(parsed.world.persistent_level, layout::world::PERSISTENT_LEVEL);
        assert_eq!(parsed.actor.root_component, 400);
        assert_eq!(parsed.scene_component, SceneComponentLayout::default());
    }

    #[test]
    fn test_root_offsets_partial_override() {
        let parsed: RootOffsets = serde_json::from_str(r#"{ "version": "v2", "world": 4096 }"#).unwrap();
        assert_eq!(parsed.version, "v2");
        assert_eq!(parsed.world, 4096);
        assert_eq!(parsed.objects, layout::roots::OBJECTS);
    }
}
