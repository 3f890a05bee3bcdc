use std::fmt;

use serde::Serialize;

use crate::array::ArrayDescriptor;
use crate::graph::{Movement, ObjectGraph};
use crate::memory::{Address, ByteBuffer, ReadMemory};
use crate::types::{FName, Rotator, Transform, Vector3};

/// Everything readable about one actor's root component
#[derive(Debug, Clone, Serialize)]
pub struct ActorReport {
    pub actor: Address,
    pub root_component: Address,
    pub physics_volume: Option<Address>,
    pub attach_parent: Option<Address>,
    pub attach_socket_name: Option<FName>,
    pub attach_children: Option<i32>,
    pub relative_location: Option<Vector3>,
    pub relative_rotation: Option<Rotator>,
    pub relative_scale: Option<Vector3>,
    pub movement: Option<Movement>,
    pub world_transform: Option<Transform>,
}

impl ActorReport {
    pub fn collect<R: ReadMemory + ?Sized>(graph: &ObjectGraph<'_, R>, actor: Address) -> Self {
        let reader = graph.reader();
        let fields = graph.layout().scene_component;
        let component = graph.root_component(actor);

        let mut report = Self {
            actor,
            root_component: component,
            physics_volume: None,
            attach_parent: None,
            attach_socket_name: None,
            attach_children: None,
            relative_location: None,
            relative_rotation: None,
            relative_scale: None,
            movement: None,
            world_transform: None,
        };
        if component.is_null() {
            return report;
        }

        let pointer_at = |offset: u64| {
            reader
                .read_u64(component.field(offset).as_u64())
                .ok()
                .map(Address::new)
        };
        report.physics_volume = pointer_at(fields.physics_volume);
        report.attach_parent = pointer_at(fields.attach_parent);
        report.attach_socket_name = reader
            .read_bytes(component.field(fields.attach_socket_name).as_u64(), FName::SIZE)
            .ok()
            .and_then(|bytes| FName::from_buffer(&ByteBuffer::new(&bytes), 0).ok());
        report.attach_children = ArrayDescriptor::read(reader, component.field(fields.attach_children))
            .map(|descriptor| descriptor.count);

        report.relative_location = reader
            .read_bytes(component.field(fields.relative_location).as_u64(), Vector3::SIZE)
            .ok()
            .and_then(|bytes| Vector3::from_buffer(&ByteBuffer::new(&bytes), 0).ok());
        report.relative_rotation = graph.actor_relative_rotation(actor);
        report.relative_scale = graph.actor_relative_scale(actor);
        report.movement = graph.actor_movement(actor);
        report.world_transform = graph.actor_world_transform(actor);

        report
    }
}

fn field<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "(unreadable)".to_string(),
    }
}

impl fmt::Display for ActorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Actor: {}", self.actor)?;
        if self.root_component.is_null() {
            return writeln!(f, "  Root component: (none)");
        }
        writeln!(f, "  Root component: {}", self.root_component)?;
        writeln!(f, "  Physics volume: {}", field(&self.physics_volume))?;
        writeln!(f, "  Attach parent: {}", field(&self.attach_parent))?;
        match &self.attach_socket_name {
            Some(name) => writeln!(
                f,
                "  Attach socket name: index {} number {}",
                name.comparison_index, name.number
            )?,
            None => writeln!(f, "  Attach socket name: (unreadable)")?,
        }
        writeln!(f, "  Attach children: {}", field(&self.attach_children))?;
        writeln!(f, "  Relative location: {}", field(&self.relative_location))?;
        writeln!(f, "  Relative rotation: {}", field(&self.relative_rotation))?;
        writeln!(f, "  Relative scale: {}", field(&self.relative_scale))?;
        match &self.movement {
            Some(m) => writeln!(
                f,
                "  Velocity: {} (speed {:.2}{})",
                m.velocity,
                m.speed,
                if m.moving { ", moving" } else { "" }
            )?,
            None => writeln!(f, "  Velocity: (unreadable)")?,
        }
        match &self.world_transform {
            Some(t) => {
                writeln!(f, "  World location: {}", t.translation)?;
                writeln!(f, "  World rotation: {}", t.rotation)
            }
            None => writeln!(f, "  World transform: (unreadable)"),
        }
    }
}
