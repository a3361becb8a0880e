//! # symbios-flora
//!
//! Parametric L-System rewriting and 3D turtle interpretation for procedural plants.
//!
//! A grammar (premise plus `"A=FFFB"` style rules) is rewritten for a number of
//! generations, then walked by a turtle that produces an engine-agnostic
//! [`PlantGeometry`]: tapered branch segments plus leaf, flower, and bud
//! placements, ready for a mesh builder.
//!
//! ```
//! use symbios_flora::{InterpParams, PlantInterpreter, RuleMap, SeededRng, rewrite};
//!
//! let rules = RuleMap::from_slots(["A=F[+AL][-AL]"]);
//! let symbols = rewrite("A", &rules, 3);
//! let plant = PlantInterpreter::new(InterpParams::default())
//!     .interpret(&symbols, &mut SeededRng::with_seed(7));
//! assert_eq!(plant.branches.len(), 7);
//! ```

pub mod geometry;
pub mod interpreter;
pub mod metrics;
pub mod preset;
pub mod rewriter;
pub mod rng;
pub mod rules;
pub mod tokenizer;
pub mod turtle;

pub use geometry::*;
pub use interpreter::*;
pub use metrics::*;
pub use preset::*;
pub use rewriter::*;
pub use rng::*;
pub use rules::*;
pub use tokenizer::*;
pub use turtle::*;
