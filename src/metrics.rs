//! Structural statistics of a generated plant.

use crate::geometry::PlantGeometry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size and shape counters for one regeneration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureMetrics {
    pub generations: usize,
    /// Length of the rewritten symbol string in bytes.
    pub string_length: usize,

    pub branch_segments: usize,
    /// Number of `F` characters in the string.
    pub branch_count_f: usize,

    pub bracket_pushes: usize,
    /// Deepest `[` nesting reached; stray `]` never drive it below zero.
    pub max_branch_depth: usize,

    pub leaves: usize,
    pub flowers: usize,
    pub buds: usize,

    pub bbox_height: f32,
    /// Larger of the X and Z extents.
    pub bbox_width: f32,
    pub bbox_depth: f32,
}

impl StructureMetrics {
    /// Measures the symbol string and the geometry interpreted from it.
    pub fn measure(generations: usize, symbols: &str, plant: &PlantGeometry) -> Self {
        let (bracket_pushes, max_branch_depth) = bracket_depth(symbols);
        let size = plant
            .bounds()
            .map(|(min, max)| max - min)
            .unwrap_or_default();

        Self {
            generations,
            string_length: symbols.len(),
            branch_segments: plant.branches.len(),
            branch_count_f: count_symbol(symbols, 'F'),
            bracket_pushes,
            max_branch_depth,
            leaves: plant.leaves.len(),
            flowers: plant.flowers.len(),
            buds: plant.buds.len(),
            bbox_height: size.y,
            bbox_width: size.x.max(size.z),
            bbox_depth: size.z,
        }
    }
}

impl fmt::Display for StructureMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gen={} | str={} | F={} | branches={} | push=[{}] | depthMax={} | L={} | K={} | M={} | H={:.2} | W={:.2}",
            self.generations,
            self.string_length,
            self.branch_count_f,
            self.branch_segments,
            self.bracket_pushes,
            self.max_branch_depth,
            self.leaves,
            self.flowers,
            self.buds,
            self.bbox_height,
            self.bbox_width,
        )
    }
}

/// Counts occurrences of `symbol` in `symbols`.
pub fn count_symbol(symbols: &str, symbol: char) -> usize {
    symbols.chars().filter(|&c| c == symbol).count()
}

/// Returns `(pushes, max_depth)` for the brackets in `symbols`.
pub fn bracket_depth(symbols: &str) -> (usize, usize) {
    let mut depth = 0usize;
    let mut max_depth = 0;
    let mut pushes = 0;
    for c in symbols.chars() {
        match c {
            '[' => {
                pushes += 1;
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    (pushes, max_depth)
}
