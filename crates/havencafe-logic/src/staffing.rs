//! Staff work formulas - efficiency, output quality, and mistake odds.

use crate::constants::{
    STAFF_LOW_MORALE_THRESHOLD, STAFF_MAX_EFFICIENCY, STAFF_MIN_EFFICIENCY,
    STAFF_MISTAKE_BASE_CHANCE, STAFF_MORALE_MAX,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    Server,
    Chef,
    Busser,
}

/// Personality trait shaping a staff member's work style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffTrait {
    /// Works faster but makes more mistakes.
    Enthusiastic,
    /// High quality output, rarely errs, but prideful.
    Skilled,
    /// Slow and quick to lose motivation.
    Lazy,
}

impl StaffTrait {
    /// Morale decay multiplier during service.
    pub fn morale_decay_factor(&self) -> f32 {
        match self {
            StaffTrait::Lazy => 1.5,
            _ => 1.0,
        }
    }
}

/// Work speed multiplier from morale and trait, in [0.5, 1.2].
pub fn efficiency(morale: f32, trait_: StaffTrait) -> f32 {
    let morale_factor = (morale / STAFF_MORALE_MAX).clamp(0.0, 1.0);
    let base = STAFF_MIN_EFFICIENCY + (1.0 - STAFF_MIN_EFFICIENCY) * morale_factor;
    let modified = match trait_ {
        StaffTrait::Enthusiastic => base * 1.1,
        StaffTrait::Skilled => base,
        StaffTrait::Lazy => base * 0.9,
    };
    modified.min(STAFF_MAX_EFFICIENCY)
}

/// Quality multiplier applied to work output.
pub fn quality_bonus(morale: f32, trait_: StaffTrait) -> f32 {
    match trait_ {
        StaffTrait::Skilled => 1.1 + (morale / STAFF_MORALE_MAX).clamp(0.0, 1.0) * 0.1,
        StaffTrait::Enthusiastic => 0.95,
        StaffTrait::Lazy => 1.0,
    }
}

/// Probability of a mistake on a single task update.
pub fn mistake_chance(morale: f32, trait_: StaffTrait) -> f64 {
    let mut chance = STAFF_MISTAKE_BASE_CHANCE;
    if morale < STAFF_LOW_MORALE_THRESHOLD {
        chance *= 2.0;
    }
    match trait_ {
        StaffTrait::Enthusiastic => chance * 1.5,
        StaffTrait::Skilled => chance * 0.5,
        StaffTrait::Lazy => chance,
    }
}
