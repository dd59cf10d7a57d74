//! World-space geometry of gates on the canvas.

use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// A point or offset in world coordinates.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let d = self - other;
        (d.x * d.x + d.y * d.y).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Size of a gate body and its sockets.
///
/// A gate is drawn centred on its position. Inputs sit on the left edge and
/// outputs on the right edge, evenly spaced, so a two-input gate has its
/// inputs at a quarter and three quarters of its height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GateLayout {
    pub width: f32,
    pub height: f32,
    pub socket_radius: f32,
}

impl Default for GateLayout {
    fn default() -> Self {
        Self {
            width: 110.0,
            height: 70.0,
            socket_radius: 12.0,
        }
    }
}

impl GateLayout {
    pub fn body_contains(&self, center: Vec2, point: Vec2) -> bool {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        point.x >= center.x - half_w
            && point.x <= center.x + half_w
            && point.y >= center.y - half_h
            && point.y <= center.y + half_h
    }

    pub fn input_socket_position(&self, center: Vec2, index: usize, count: usize) -> Vec2 {
        center + Vec2::new(-self.width / 2.0, self.edge_offset(index, count))
    }

    pub fn output_socket_position(&self, center: Vec2, index: usize, count: usize) -> Vec2 {
        center + Vec2::new(self.width / 2.0, self.edge_offset(index, count))
    }

    pub fn socket_contains(&self, socket: Vec2, point: Vec2) -> bool {
        socket.distance(point) <= self.socket_radius
    }

    fn edge_offset(&self, index: usize, count: usize) -> f32 {
        let count = count.max(1) as f32;
        -self.height / 2.0 + self.height * (2 * index + 1) as f32 / (2.0 * count)
    }
}
