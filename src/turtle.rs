//! Turtle state and operations for plant interpretation.

use crate::geometry::OrganKind;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The state of the plant turtle.
///
/// A plain value type: `[` stores a copy, `]` restores one, and no two stack
/// slots ever share data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current world-space position of the "cursor".
    pub position: Vec3,

    /// Current world-space orientation. Always a unit quaternion.
    pub rotation: Quat,

    /// Cumulative length multiplier applied to the default `F` length (modified by `"`).
    pub length_scale: f32,

    /// Radius the next branch segment starts with (modified by `!` and by every `F`).
    /// Defaults to `1.0`, the default `init_width`.
    pub radius: f32,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            length_scale: 1.0,
            radius: 1.0,
        }
    }
}

impl TurtleState {
    /// Returns the turtle's heading: its local up direction (Y-axis) in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Returns the turtle's local forward direction (Z-axis) in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Returns the turtle's local right direction (X-axis) in world space.
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Rotates the turtle around its local X axis by `angle` radians (Pitch).
    pub fn rotate_local_x(&mut self, angle: f32) {
        let rot = Quat::from_axis_angle(Vec3::X, angle);
        self.rotation = (self.rotation * rot).normalize();
    }

    /// Rotates the turtle around its local Y axis by `angle` radians (Roll).
    pub fn rotate_local_y(&mut self, angle: f32) {
        let rot = Quat::from_axis_angle(Vec3::Y, angle);
        self.rotation = (self.rotation * rot).normalize();
    }

    /// Rotates the turtle around its local Z axis by `angle` radians (Yaw).
    pub fn rotate_local_z(&mut self, angle: f32) {
        let rot = Quat::from_axis_angle(Vec3::Z, angle);
        self.rotation = (self.rotation * rot).normalize();
    }
}

/// Operations that can be performed by the plant turtle.
///
/// Rotation variants carry a sign multiplier applied to the (jittered) angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TurtleOp {
    // --- Growth ---
    /// Grow a branch segment and advance (`F`). Params: `(length, radius)`.
    Draw,
    /// Place a leaf, flower, or bud without moving. Params: `(scale)`.
    Organ(OrganKind),

    // --- Orientation ---
    /// Rotate around local Z (`+`/`-`). Params: `(degrees)`.
    Yaw(f32),
    /// Rotate around local X (`&`/`^`). Params: `(degrees)`.
    Pitch(f32),
    /// Rotate around local Y (`\` / `/`). Params: `(degrees)`.
    Roll(f32),
    /// Turn 180 degrees around local Z (`|`).
    TurnAround,

    // --- Scaling ---
    /// Multiply the current radius (`!`). Params: `(factor)`.
    ScaleWidth,
    /// Multiply the cumulative length scale (`"`). Params: `(factor)`.
    ScaleLength,

    // --- Flow Control ---
    /// Save the full turtle state onto the stack (`[`).
    Push,
    /// Restore the most recently pushed turtle state (`]`).
    Pop,
    /// No-op: symbol has no registered meaning.
    Ignore,
}
