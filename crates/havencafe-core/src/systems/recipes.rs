//! Recipe book - unlocks, cooking, and mastery tracking

use crate::systems::Inventory;
use havencafe_logic::constants::{RECIPE_MASTERY_COOK_COUNT, RECIPE_MASTERY_PERFECT_COUNT};
use havencafe_logic::recipes::{self, RecipeDef, UnlockRule};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mastery progress for one recipe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mastery {
    pub cook_count: u32,
    pub perfect_count: u32,
    pub mastered: bool,
}

impl Mastery {
    /// Record a cook; returns true when this cook achieves mastery.
    pub fn record_cook(&mut self, quality: u8) -> bool {
        self.cook_count += 1;
        if quality >= 5 {
            self.perfect_count += 1;
        }
        if !self.mastered
            && self.cook_count >= RECIPE_MASTERY_COOK_COUNT
            && self.perfect_count >= RECIPE_MASTERY_PERFECT_COUNT
        {
            self.mastered = true;
            return true;
        }
        false
    }
}

/// A finished dish, ready to serve or feed to the dragon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookedDish {
    pub recipe: String,
    pub quality: u8,
    pub color_influence: [f32; 3],
    pub base_price: u32,
}

/// Why cooking failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookError {
    UnknownRecipe(String),
    NotUnlocked(String),
    /// (ingredient, have, need) per shortfall.
    MissingIngredients(Vec<(String, u32, u32)>),
    FestivalNotActive(String),
}

impl std::fmt::Display for CookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CookError::UnknownRecipe(id) => write!(f, "unknown recipe: {}", id),
            CookError::NotUnlocked(id) => write!(f, "recipe not unlocked: {}", id),
            CookError::MissingIngredients(missing) => {
                write!(f, "missing ingredients:")?;
                for (id, have, need) in missing {
                    write!(f, " {} ({}/{})", id, have, need)?;
                }
                Ok(())
            }
            CookError::FestivalNotActive(festival) => {
                write!(f, "seasonal recipe needs the {} festival", festival)
            }
        }
    }
}

impl std::error::Error for CookError {}

/// The player's recipe knowledge: what's unlocked, what's been found, and
/// how practiced each dish is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeBook {
    unlocked: Vec<String>,
    discovered: Vec<String>,
    mastery: HashMap<String, Mastery>,
}

impl Default for RecipeBook {
    fn default() -> Self {
        Self {
            unlocked: recipes::default_unlocked()
                .into_iter()
                .map(String::from)
                .collect(),
            discovered: Vec::new(),
            mastery: HashMap::new(),
        }
    }
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, recipe_id: &str) -> bool {
        self.unlocked.iter().any(|id| id == recipe_id)
    }

    pub fn unlocked(&self) -> &[String] {
        &self.unlocked
    }

    /// Unlock a recipe. Returns true if newly unlocked.
    pub fn unlock(&mut self, recipe_id: &str) -> bool {
        if recipes::get(recipe_id).is_none() || self.is_unlocked(recipe_id) {
            return false;
        }
        self.unlocked.push(recipe_id.to_string());
        self.discovered.retain(|id| id != recipe_id);
        true
    }

    /// Discover a recipe in the world. Discovery recipes unlock on the
    /// spot; anything else is ignored.
    pub fn discover(&mut self, recipe_id: &str) -> bool {
        let Some(def) = recipes::get(recipe_id) else {
            return false;
        };
        if self.is_unlocked(recipe_id) || !matches!(def.unlock, UnlockRule::Discovery) {
            return false;
        }
        self.unlock(recipe_id)
    }

    /// Unlock everything the current reputation allows. Returns the new ids.
    pub fn check_reputation_unlocks(&mut self, reputation: u32) -> Vec<String> {
        let mut newly = Vec::new();
        for def in recipes::all() {
            if let UnlockRule::Reputation(min) = def.unlock {
                if reputation >= min && self.unlock(def.id) {
                    newly.push(def.id.to_string());
                }
            }
        }
        newly
    }

    /// Unlock recipes gated on a just-completed story event.
    pub fn check_story_unlocks(&mut self, completed_event: &str) -> Vec<String> {
        let mut newly = Vec::new();
        for def in recipes::all() {
            if let UnlockRule::Story(event) = def.unlock {
                if event == completed_event && self.unlock(def.id) {
                    newly.push(def.id.to_string());
                }
            }
        }
        newly
    }

    pub fn mastery(&self, recipe_id: &str) -> Option<&Mastery> {
        self.mastery.get(recipe_id)
    }

    pub fn is_mastered(&self, recipe_id: &str) -> bool {
        self.mastery.get(recipe_id).is_some_and(|m| m.mastered)
    }

    /// Verify a recipe is cookable right now from this inventory.
    pub fn can_cook(
        &self,
        recipe_id: &str,
        inventory: &Inventory,
        active_festival: Option<&str>,
    ) -> Result<&'static RecipeDef, CookError> {
        let def = recipes::get(recipe_id)
            .ok_or_else(|| CookError::UnknownRecipe(recipe_id.to_string()))?;

        if let UnlockRule::Seasonal(festival) = def.unlock {
            if active_festival != Some(festival) {
                return Err(CookError::FestivalNotActive(festival.to_string()));
            }
        } else if !self.is_unlocked(recipe_id) {
            return Err(CookError::NotUnlocked(recipe_id.to_string()));
        }

        let missing: Vec<(String, u32, u32)> = def
            .ingredients
            .iter()
            .filter_map(|(ingredient, need, _)| {
                let have = inventory.count(ingredient);
                (have < *need).then(|| (ingredient.to_string(), have, *need))
            })
            .collect();
        if !missing.is_empty() {
            return Err(CookError::MissingIngredients(missing));
        }
        Ok(def)
    }

    /// Cook a recipe: consume ingredients, roll quality, track mastery.
    /// `quality_bonus` is the chef's multiplier (1.0 = unassisted).
    pub fn cook(
        &mut self,
        recipe_id: &str,
        inventory: &mut Inventory,
        quality_bonus: f32,
        active_festival: Option<&str>,
        rng: &mut impl Rng,
    ) -> Result<(CookedDish, bool), CookError> {
        let def = self.can_cook(recipe_id, inventory, active_festival)?;

        for (ingredient, need, _) in def.ingredients {
            inventory.remove(ingredient, *need);
        }

        let mut quality = def.base_quality() as i8;
        if quality_bonus > 1.05 {
            quality += 1;
        }
        if self.is_mastered(recipe_id) {
            quality += 1;
        }
        quality += rng.gen_range(-1i8..=1);
        let quality = quality.clamp(1, 5) as u8;

        let newly_mastered = self
            .mastery
            .entry(recipe_id.to_string())
            .or_default()
            .record_cook(quality);

        Ok((
            CookedDish {
                recipe: recipe_id.to_string(),
                quality,
                color_influence: def.color_influence,
                base_price: def.base_price,
            },
            newly_mastered,
        ))
    }

    pub fn mastered_recipes(&self) -> Vec<&str> {
        self.mastery
            .iter()
            .filter(|(_, m)| m.mastered)
            .map(|(id, _)| id.as_str())
            .collect()
    }
}
