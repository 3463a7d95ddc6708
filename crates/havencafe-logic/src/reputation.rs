//! Reputation tiers and what they unlock.

use serde::{Deserialize, Serialize};

pub const REPUTATION_MAX: u32 = 1000;

/// Fame tier of the cafe, derived from its reputation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReputationLevel {
    Unknown,
    LocalFavorite,
    TownAttraction,
    RegionalFame,
    Legendary,
}

impl ReputationLevel {
    pub fn from_reputation(reputation: u32) -> Self {
        match reputation {
            0..=49 => ReputationLevel::Unknown,
            50..=149 => ReputationLevel::LocalFavorite,
            150..=299 => ReputationLevel::TownAttraction,
            300..=499 => ReputationLevel::RegionalFame,
            _ => ReputationLevel::Legendary,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReputationLevel::Unknown => "Unknown",
            ReputationLevel::LocalFavorite => "Local Favorite",
            ReputationLevel::TownAttraction => "Town Attraction",
            ReputationLevel::RegionalFame => "Regional Fame",
            ReputationLevel::Legendary => "Legendary",
        }
    }

    /// Expected customers per service period at this tier.
    pub fn customer_range(&self) -> (u32, u32) {
        match self {
            ReputationLevel::Unknown => (1, 2),
            ReputationLevel::LocalFavorite => (2, 4),
            ReputationLevel::TownAttraction => (3, 6),
            ReputationLevel::RegionalFame => (5, 8),
            ReputationLevel::Legendary => (7, 10),
        }
    }

    /// Legendary cafes attract bigger tippers.
    pub fn tip_bonus(&self) -> f32 {
        match self {
            ReputationLevel::Legendary => 0.25,
            _ => 0.0,
        }
    }
}

/// Apply a signed change to a reputation score, clamped to [0, max].
pub fn apply_change(reputation: u32, change: i32) -> u32 {
    if change >= 0 {
        reputation.saturating_add(change as u32).min(REPUTATION_MAX)
    } else {
        reputation.saturating_sub(change.unsigned_abs())
    }
}
