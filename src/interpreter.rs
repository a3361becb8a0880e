//! Interpreter that converts an L-System symbol string into [`PlantGeometry`].
//!
//! The entry point is [`PlantInterpreter`]. Configure it with [`InterpParams`]
//! (and optionally a [`GravityModel`]), adjust the symbol-to-operation map via
//! [`PlantInterpreter::set_op`] if the grammar uses non-standard symbols, then
//! call [`PlantInterpreter::interpret`] with a [`SeededRng`].

use crate::geometry::{BranchSegment, OrganKind, OrganPoint, PlantGeometry};
use crate::rng::SeededRng;
use crate::tokenizer::{Token, tokenize};
use crate::turtle::{TurtleOp, TurtleState};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Numeric inputs of an interpretation run.
///
/// Lengths and radii are in world units, angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpParams {
    /// Default `F` length before the cumulative length scale is applied.
    pub init_length: f32,
    /// Starting branch radius.
    pub init_width: f32,
    /// Default factor for `!` and `"`.
    pub scale: f32,
    /// Radius multiplier from the bottom to the top of every segment.
    pub width_decay: f32,
    /// Default rotation angle.
    pub angle: f32,
    /// Maximum uniform jitter added to every rotation angle.
    pub angle_variance: f32,
    pub flower_size: f32,
    pub leaf_size: f32,
    pub bud_size: f32,
    /// Signed gravity strength. Negative values bend growth away from the
    /// gravity direction.
    pub gravity: f32,
}

impl Default for InterpParams {
    fn default() -> Self {
        Self {
            init_length: 1.0,
            init_width: 1.0,
            scale: 0.95,
            width_decay: 0.9,
            angle: 28.0,
            angle_variance: 5.0,
            flower_size: 1.0,
            leaf_size: 0.7,
            bud_size: 1.0,
            gravity: 1.0,
        }
    }
}

impl InterpParams {
    /// Default scale for an organ kind.
    pub fn organ_size(&self, kind: OrganKind) -> f32 {
        match kind {
            OrganKind::Flower => self.flower_size,
            OrganKind::Leaf => self.leaf_size,
            OrganKind::Bud => self.bud_size,
        }
    }
}

/// Tuning constants for gravity bending.
///
/// Before each segment is grown, its heading is turned toward
/// `direction * sign(gravity)` by the fraction
/// `min(|gravity| * stiffness / (radius + epsilon)^resistance_exponent, max_turn)`
/// of the remaining angle, so thin branches droop more than thick ones.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityModel {
    /// World-space direction gravity pulls toward.
    pub direction: Vec3,
    /// Overall bending strength per unit of gravity.
    pub stiffness: f32,
    /// Exponent of the thickness resistance term.
    pub resistance_exponent: f32,
    /// Keeps the resistance term finite for vanishing radii.
    pub epsilon: f32,
    /// Upper bound of the turn fraction applied per segment.
    pub max_turn: f32,
}

impl Default for GravityModel {
    fn default() -> Self {
        Self {
            direction: Vec3::NEG_Y,
            stiffness: 0.001,
            resistance_exponent: 3.0,
            epsilon: 0.05,
            max_turn: 0.25,
        }
    }
}

impl GravityModel {
    /// Returns `rotation` with its heading (local +Y) bent toward gravity.
    ///
    /// Zero gravity, or a heading already parallel to the gravity axis, leaves
    /// the rotation untouched.
    pub fn bend(&self, rotation: Quat, radius: f32, gravity: f32) -> Quat {
        if gravity == 0.0 {
            return rotation;
        }
        let target = self.direction.normalize_or_zero() * gravity.signum();
        let heading = rotation * Vec3::Y;
        let axis = heading.cross(target);
        if axis.length_squared() < 1e-12 {
            return rotation;
        }

        let resistance = (radius.abs() + self.epsilon).powf(self.resistance_exponent);
        let fraction = (gravity.abs() * self.stiffness / resistance).min(self.max_turn);
        let turn = heading.angle_between(target) * fraction;

        (Quat::from_axis_angle(axis.normalize(), turn) * rotation).normalize()
    }
}

/// Interprets L-System output to build a [`PlantGeometry`].
pub struct PlantInterpreter {
    op_map: Vec<TurtleOp>,
    params: InterpParams,
    gravity: GravityModel,
    max_stack_depth: usize,
}

impl PlantInterpreter {
    /// Creates an interpreter with the standard symbol map already registered.
    pub fn new(params: InterpParams) -> Self {
        let mut interpreter = Self {
            op_map: Vec::new(),
            params,
            gravity: GravityModel::default(),
            max_stack_depth: usize::MAX,
        };
        interpreter.populate_standard_symbols();
        interpreter
    }

    /// Replaces the gravity tuning constants (builder pattern).
    pub fn with_gravity_model(mut self, gravity: GravityModel) -> Self {
        self.gravity = gravity;
        self
    }

    /// Limits the push/pop stack (builder pattern). Unlimited by default.
    ///
    /// Pushes beyond the limit are dropped, so the matching `]` restores an
    /// outer state. Only set this for untrusted grammars.
    pub fn with_max_stack_depth(mut self, depth: usize) -> Self {
        self.max_stack_depth = depth;
        self
    }

    pub fn params(&self) -> &InterpParams {
        &self.params
    }

    pub fn gravity_model(&self) -> &GravityModel {
        &self.gravity
    }

    /// Assigns a [`TurtleOp`] to an ASCII symbol.
    ///
    /// The map is grown automatically; gaps are filled with [`TurtleOp::Ignore`].
    /// Non-ASCII symbols cannot be mapped and are always ignored.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        if !symbol.is_ascii() {
            tracing::warn!(%symbol, "only ASCII symbols can be mapped");
            return;
        }
        let idx = symbol as usize;
        if idx >= self.op_map.len() {
            self.op_map.resize(idx + 1, TurtleOp::Ignore);
        }
        self.op_map[idx] = op;
    }

    /// Operation currently mapped to `symbol`.
    pub fn op(&self, symbol: char) -> TurtleOp {
        self.op_map
            .get(symbol as usize)
            .copied()
            .unwrap_or(TurtleOp::Ignore)
    }

    /// Registers the conventional symbol-to-operation mappings.
    ///
    /// | Symbol | Operation |
    /// |---|---|
    /// | `F` | grow a segment |
    /// | `K` `L` `M` | flower, leaf, bud |
    /// | `+` `-` | yaw (`+` turns negative) |
    /// | `&` `^` | pitch (`&` turns positive) |
    /// | `\` `/` | roll (`\` turns positive) |
    /// | `\|` | turn around |
    /// | `!` `"` | scale radius, scale length |
    /// | `[` `]` | push, pop |
    pub fn populate_standard_symbols(&mut self) {
        let mappings = [
            // Growth
            ('F', TurtleOp::Draw),
            ('K', TurtleOp::Organ(OrganKind::Flower)),
            ('L', TurtleOp::Organ(OrganKind::Leaf)),
            ('M', TurtleOp::Organ(OrganKind::Bud)),
            // Orientation
            ('+', TurtleOp::Yaw(-1.0)),
            ('-', TurtleOp::Yaw(1.0)),
            ('&', TurtleOp::Pitch(1.0)),
            ('^', TurtleOp::Pitch(-1.0)),
            ('\\', TurtleOp::Roll(1.0)),
            ('/', TurtleOp::Roll(-1.0)),
            ('|', TurtleOp::TurnAround),
            // Scaling
            ('!', TurtleOp::ScaleWidth),
            ('"', TurtleOp::ScaleLength),
            // Flow
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
        ];

        for (sym, op) in mappings {
            self.set_op(sym, op);
        }
    }

    /// Interprets the symbol string `input` and returns the resulting [`PlantGeometry`].
    ///
    /// The turtle starts at the origin heading `+Y` with radius `init_width`.
    /// Every rotation command draws one value from `rng`, in visit order, so
    /// the output is reproducible for a given seed and string.
    pub fn interpret(&self, input: &str, rng: &mut SeededRng) -> PlantGeometry {
        self.interpret_with_state(input, rng).0
    }

    /// Like [`interpret`](Self::interpret), but also returns the turtle state
    /// left after the last symbol.
    pub fn interpret_with_state(
        &self,
        input: &str,
        rng: &mut SeededRng,
    ) -> (PlantGeometry, TurtleState) {
        let mut plant = PlantGeometry::default();
        let mut turtle = TurtleState {
            radius: self.params.init_width,
            ..Default::default()
        };
        let mut stack: Vec<TurtleState> = Vec::new();

        for token in tokenize(input) {
            self.apply(&token, &mut turtle, &mut stack, &mut plant, rng);
        }

        if !stack.is_empty() {
            tracing::debug!(unclosed = stack.len(), "unbalanced '[' left on the stack");
        }
        (plant, turtle)
    }

    fn apply(
        &self,
        token: &Token<'_>,
        turtle: &mut TurtleState,
        stack: &mut Vec<TurtleState>,
        plant: &mut PlantGeometry,
        rng: &mut SeededRng,
    ) {
        let p = &self.params;
        let angle =
            |rng: &mut SeededRng| rng.vary(token.arg(0, p.angle), p.angle_variance).to_radians();

        match self.op(token.symbol) {
            // --- GROWTH ---
            TurtleOp::Draw => {
                let length = token.arg(0, p.init_length * turtle.length_scale);
                let radius_bottom = token.arg(1, turtle.radius);
                let radius_top = radius_bottom * p.width_decay;

                turtle.rotation = self.gravity.bend(turtle.rotation, radius_bottom, p.gravity);

                let start = turtle.position;
                let end = start + turtle.up() * length;
                plant.add_branch(BranchSegment {
                    start,
                    end,
                    rotation: turtle.rotation,
                    radius_bottom,
                    radius_top,
                });

                turtle.position = end;
                turtle.radius = radius_top;
            }
            TurtleOp::Organ(kind) => {
                plant.add_organ(
                    kind,
                    OrganPoint {
                        position: turtle.position,
                        rotation: turtle.rotation,
                        scale: token.arg(0, p.organ_size(kind)),
                        thickness: turtle.radius,
                    },
                );
            }

            // --- ORIENTATION ---
            TurtleOp::Yaw(s) => turtle.rotate_local_z(angle(rng) * s),
            TurtleOp::Pitch(s) => turtle.rotate_local_x(angle(rng) * s),
            TurtleOp::Roll(s) => turtle.rotate_local_y(angle(rng) * s),
            TurtleOp::TurnAround => turtle.rotate_local_z(PI),

            // --- SCALING ---
            TurtleOp::ScaleWidth => turtle.radius *= token.arg(0, p.scale),
            TurtleOp::ScaleLength => turtle.length_scale *= token.arg(0, p.scale),

            // --- FLOW ---
            TurtleOp::Push => {
                if stack.len() < self.max_stack_depth {
                    stack.push(*turtle);
                } else {
                    tracing::warn!(max = self.max_stack_depth, "turtle stack full, push dropped");
                }
            }
            TurtleOp::Pop => {
                if let Some(state) = stack.pop() {
                    *turtle = state;
                }
            }
            TurtleOp::Ignore => {}
        }
    }
}
