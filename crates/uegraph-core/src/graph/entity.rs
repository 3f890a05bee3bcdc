use serde::Serialize;

use crate::array::{narrow_ascii, read_wide_chars};
use crate::graph::ObjectGraph;
use crate::memory::layout::motion;
use crate::memory::{Address, ByteBuffer, ReadMemory};
use crate::types::{Rotator, Transform, Vector3};

/// Velocity sample of an actor's root component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Movement {
    pub velocity: Vector3,
    pub speed: f32,
    pub moving: bool,
}

impl Movement {
    pub fn from_velocity(velocity: Vector3) -> Self {
        Self {
            velocity,
            speed: velocity.length(),
            moving: velocity.length_squared() > motion::MOVING_SPEED_SQUARED,
        }
    }
}

impl<R: ReadMemory + ?Sized> ObjectGraph<'_, R> {
    fn read_vector(&self, at: Address) -> Option<Vector3> {
        let bytes = self.reader.read_bytes(at.as_u64(), Vector3::SIZE).ok()?;
        Vector3::from_buffer(&ByteBuffer::new(&bytes), 0).ok()
    }

    pub fn root_component(&self, actor: Address) -> Address {
        self.follow(actor, self.layout.actor.root_component)
    }

    /// Component-to-world transform of the actor's root component.
    pub fn actor_world_transform(&self, actor: Address) -> Option<Transform> {
        let component = self.root_component(actor);
        if component.is_null() {
            return None;
        }
        let at = component.field(self.layout.scene_component.component_to_world);
        let bytes = self.reader.read_bytes(at.as_u64(), Transform::SIZE).ok()?;
        Transform::from_bytes(&bytes).ok()
    }

    /// World-space location, or the zero vector when unavailable.
    pub fn actor_position(&self, actor: Address) -> Vector3 {
        self.actor_world_transform(actor)
            .map(|t| t.translation)
            .unwrap_or(Vector3::ZERO)
    }

    /// Location relative to the attach parent, or the zero vector.
    pub fn actor_relative_position(&self, actor: Address) -> Vector3 {
        let component = self.root_component(actor);
        if component.is_null() {
            return Vector3::ZERO;
        }
        self.read_vector(component.field(self.layout.scene_component.relative_location))
            .unwrap_or(Vector3::ZERO)
    }

    pub fn actor_relative_rotation(&self, actor: Address) -> Option<Rotator> {
        let component = self.root_component(actor);
        if component.is_null() {
            return None;
        }
        let at = component.field(self.layout.scene_component.relative_rotation);
        let bytes = self.reader.read_bytes(at.as_u64(), Rotator::SIZE).ok()?;
        Rotator::from_buffer(&ByteBuffer::new(&bytes), 0).ok()
    }

    pub fn actor_relative_scale(&self, actor: Address) -> Option<Vector3> {
        let component = self.root_component(actor);
        if component.is_null() {
            return None;
        }
        self.read_vector(component.field(self.layout.scene_component.relative_scale))
    }

    /// Scene component this actor's root is attached to.
    pub fn attach_parent(&self, actor: Address) -> Address {
        let component = self.root_component(actor);
        self.follow(component, self.layout.scene_component.attach_parent)
    }

    /// Velocity of the root component. `None` when it cannot be read.
    pub fn actor_movement(&self, actor: Address) -> Option<Movement> {
        let component = self.root_component(actor);
        if component.is_null() {
            return None;
        }
        self.read_vector(component.field(self.layout.scene_component.component_velocity))
            .map(Movement::from_velocity)
    }

    /// Squared speed strictly above 1.0. Unreadable actors are not moving.
    pub fn is_actor_moving(&self, actor: Address) -> bool {
        self.actor_movement(actor).is_some_and(|m| m.moving)
    }

    /// Player name as ASCII. Non-ASCII characters are dropped.
    pub fn player_name(&self, player_state: Address) -> String {
        let units = read_wide_chars(
            self.reader,
            player_state,
            self.layout.player_state.player_name,
        );
        narrow_ascii(&units)
    }

    pub fn player_team_id(&self, player_state: Address) -> Option<i32> {
        if player_state.is_null() {
            return None;
        }
        self.reader
            .read_i32(player_state.field(self.layout.player_state.team_id).as_u64())
            .ok()
    }

    pub fn pawn_player_state(&self, pawn: Address) -> Address {
        self.follow(pawn, self.layout.pawn.player_state)
    }

    pub fn pawn_controller(&self, pawn: Address) -> Address {
        self.follow(pawn, self.layout.pawn.controller)
    }
}
