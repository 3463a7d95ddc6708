//! Dragon Haven Cafe - Simulation Engine
//!
//! An ECS-based headless simulation of a dragon-raising cafe: a companion
//! dragon that grows through life stages, daily cafe service periods with
//! customers and staff, gatherable world resources on respawn timers, an
//! economy, and a branching story - all advanced in lockstep by a single
//! time-driven tick.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) via `hecs`:
//! - **Entities**: the dragon, customers, staff, resource spawn points
//! - **Components**: pure data attached to entities (Dragon, Customer, ...)
//! - **Systems**: logic that queries and updates components, plus singleton
//!   managers (clock, cafe, economy, inventory, recipes, story) owned by
//!   the engine
//!
//! # Example
//!
//! ```rust,no_run
//! use havencafe_core::prelude::*;
//! use havencafe_core::engine::GameConfig;
//!
//! let mut engine = SimulationEngine::new();
//! engine.new_game(GameConfig::default());
//!
//! loop {
//!     for event in engine.update(1.0 / 60.0) {
//!         println!("{:?}", event);
//!     }
//! }
//! ```

pub mod components;
pub mod engine;
pub mod generation;
pub mod persistence;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{SimEvent, SimulationEngine};
}
