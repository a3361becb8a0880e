//! Serializable plant presets and the one-call regeneration pipeline.

use crate::geometry::PlantGeometry;
use crate::interpreter::{GravityModel, InterpParams, PlantInterpreter};
use crate::metrics::StructureMetrics;
use crate::rewriter::rewrite;
use crate::rng::SeededRng;
use crate::rules::RuleMap;
use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating a preset.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("preset json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("preset asks for {requested} generations, limit is {max}")]
    GenerationLimit { requested: usize, max: usize },
}

/// Generation count at which growth mode reaches full size.
pub const GROWTH_FULL_GENERATIONS: f32 = 10.0;

/// Everything needed to regenerate a plant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantPreset {
    /// Axiom the rewriting starts from.
    pub premise: String,
    /// Editable rule slots (`"A=FFFB"`); blank slots are allowed.
    pub rules: Vec<String>,
    pub generations: usize,
    /// Seed for the angle-jitter generator, reset on every regeneration.
    pub seed: u64,
    /// Derive `init_length` / `init_width` from the generation count.
    pub growth_mode: bool,
    /// Full-grown length used by growth mode.
    pub max_length: f32,
    /// Full-grown width used by growth mode.
    pub max_width: f32,
    pub params: InterpParams,
    pub gravity_model: GravityModel,
}

impl Default for PlantPreset {
    /// The stock flowering tree.
    fn default() -> Self {
        Self {
            premise: "A".to_string(),
            rules: vec![
                "A=FFFB".to_string(),
                "B=FFF\"![C]////[C]////[C]////[&D]".to_string(),
                "C=&F+(15)F-(15)F^(15)F+BL".to_string(),
                "D=\"(0.7)!(0.5)FFBL".to_string(),
            ],
            generations: 7,
            seed: 0,
            growth_mode: true,
            max_length: 1.0,
            max_width: 1.0,
            params: InterpParams::default(),
            gravity_model: GravityModel::default(),
        }
    }
}

/// Output of [`PlantPreset::generate`].
#[derive(Clone, Debug, PartialEq)]
pub struct Plant {
    /// The rewritten symbol string.
    pub symbols: String,
    pub geometry: PlantGeometry,
    pub metrics: StructureMetrics,
}

impl PlantPreset {
    pub fn from_json(json: &str) -> Result<Self, PresetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PresetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn rule_map(&self) -> RuleMap {
        RuleMap::from_slots(&self.rules)
    }

    /// Interpretation parameters after growth mode is applied.
    ///
    /// In growth mode, with `ratio = min(generations / 10, 1)`, the initial
    /// length is `max_length * ratio` and the initial width is
    /// `max_width * ratio^2`, so young plants are short and thin.
    pub fn effective_params(&self) -> InterpParams {
        if !self.growth_mode {
            return self.params;
        }
        let ratio = (self.generations as f32 / GROWTH_FULL_GENERATIONS).min(1.0);
        InterpParams {
            init_length: self.max_length * ratio,
            init_width: self.max_width * ratio * ratio,
            ..self.params
        }
    }

    pub fn interpreter(&self) -> PlantInterpreter {
        PlantInterpreter::new(self.effective_params()).with_gravity_model(self.gravity_model)
    }

    /// Rewrites and interprets the preset from a freshly seeded generator.
    ///
    /// Output size grows geometrically with `generations`; use
    /// [`generate_bounded`](Self::generate_bounded) for presets from untrusted input.
    pub fn generate(&self) -> Plant {
        let symbols = rewrite(&self.premise, &self.rule_map(), self.generations);
        let mut rng = SeededRng::with_seed(self.seed);
        let geometry = self.interpreter().interpret(&symbols, &mut rng);
        let metrics = StructureMetrics::measure(self.generations, &symbols, &geometry);
        tracing::debug!(%metrics, "plant generated");
        Plant {
            symbols,
            geometry,
            metrics,
        }
    }

    /// [`generate`](Self::generate), refusing generation counts above `max_generations`.
    pub fn generate_bounded(&self, max_generations: usize) -> Result<Plant, PresetError> {
        if self.generations > max_generations {
            return Err(PresetError::GenerationLimit {
                requested: self.generations,
                max: max_generations,
            });
        }
        Ok(self.generate())
    }
}
