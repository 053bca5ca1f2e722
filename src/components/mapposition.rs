use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World-space position (pivot) of a body. Colliders are centered on it.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    pub fn from_vec(pos: Vec2) -> Self {
        Self { pos }
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }
}
