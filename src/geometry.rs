use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The complete, engine-agnostic skeleton of a plant.
///
/// Branch segments and organ placements are kept in emission order, ready to be
/// turned into cylinders and instanced quads by a downstream mesh builder.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantGeometry {
    /// One segment per `F`.
    pub branches: Vec<BranchSegment>,
    /// Flower placements (`K`).
    pub flowers: Vec<OrganPoint>,
    /// Leaf placements (`L`).
    pub leaves: Vec<OrganPoint>,
    /// Bud placements (`M`).
    pub buds: Vec<OrganPoint>,
}

impl PlantGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_branch(&mut self, segment: BranchSegment) {
        self.branches.push(segment);
    }

    pub fn add_organ(&mut self, kind: OrganKind, point: OrganPoint) {
        self.organs_mut(kind).push(point);
    }

    /// Placements of one organ kind.
    pub fn organs(&self, kind: OrganKind) -> &[OrganPoint] {
        match kind {
            OrganKind::Flower => &self.flowers,
            OrganKind::Leaf => &self.leaves,
            OrganKind::Bud => &self.buds,
        }
    }

    fn organs_mut(&mut self, kind: OrganKind) -> &mut Vec<OrganPoint> {
        match kind {
            OrganKind::Flower => &mut self.flowers,
            OrganKind::Leaf => &mut self.leaves,
            OrganKind::Bud => &mut self.buds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
            && self.flowers.is_empty()
            && self.leaves.is_empty()
            && self.buds.is_empty()
    }

    /// Axis-aligned bounds `(min, max)` over segment endpoints and organ positions.
    ///
    /// Returns `None` for an empty plant.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let points = self
            .branches
            .iter()
            .flat_map(|b| [b.start, b.end])
            .chain(
                [&self.flowers, &self.leaves, &self.buds]
                    .into_iter()
                    .flatten()
                    .map(|o| o.position),
            );

        points.fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((min, max)) => Some((min.min(p), max.max(p))),
        })
    }
}

/// A tapered branch segment, emitted once per `F`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchSegment {
    /// World-space base of the segment.
    pub start: Vec3,
    /// World-space tip of the segment.
    pub end: Vec3,
    /// Turtle orientation while growing (local +Y points from `start` to `end`).
    pub rotation: Quat,
    /// Radius at `start`.
    pub radius_bottom: f32,
    /// Radius at `end`; carried into the next segment of the chain.
    pub radius_top: f32,
}

impl BranchSegment {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Unit growth direction, or zero for a degenerate segment.
    pub fn direction(&self) -> Vec3 {
        (self.end - self.start).normalize_or_zero()
    }

    /// Linearly interpolated radius at `t` in `[0, 1]` along the segment.
    pub fn radius_at(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        (1.0 - t) * self.radius_bottom + t * self.radius_top
    }
}

/// Placement of a leaf, flower, or bud.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrganPoint {
    pub position: Vec3,
    pub rotation: Quat,
    /// Uniform scale. Zero is allowed and yields a degenerate instance.
    pub scale: f32,
    /// Branch radius at the attachment point, for wind-resistance shading.
    pub thickness: f32,
}

/// Kinds of non-branch plant features.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganKind {
    Flower,
    Leaf,
    Bud,
}
