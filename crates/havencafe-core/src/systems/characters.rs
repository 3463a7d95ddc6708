//! Character roster - affinity bookkeeping for story characters

use crate::components::StoryCharacter;
use havencafe_logic::affinity::AffinityLevel;
use havencafe_logic::constants::{
    AFFINITY_DIALOGUE_NEGATIVE, AFFINITY_DIALOGUE_POSITIVE, AFFINITY_GIFT_MAX, AFFINITY_GIFT_MIN,
};
use serde::{Deserialize, Serialize};

/// An affinity change worth surfacing to the player.
#[derive(Debug, Clone)]
pub struct AffinityChange {
    pub character_id: String,
    pub delta: i8,
    pub new_affinity: u8,
    /// Set when the change pushed the relationship to a new level.
    pub new_level: Option<AffinityLevel>,
}

/// All story characters the player can build relationships with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterRoster {
    characters: Vec<StoryCharacter>,
}

impl CharacterRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a character. Replaces any previous entry with the same id.
    pub fn load_character(&mut self, character: StoryCharacter) {
        self.characters.retain(|c| c.id != character.id);
        self.characters.push(character);
    }

    pub fn character(&self, id: &str) -> Option<&StoryCharacter> {
        self.characters.iter().find(|c| c.id == id)
    }

    fn character_mut(&mut self, id: &str) -> Option<&mut StoryCharacter> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    pub fn all(&self) -> &[StoryCharacter] {
        &self.characters
    }

    pub fn met_characters(&self) -> impl Iterator<Item = &StoryCharacter> {
        self.characters.iter().filter(|c| c.met)
    }

    /// First meeting. Returns true the first time.
    pub fn meet(&mut self, id: &str) -> bool {
        match self.character_mut(id) {
            Some(character) if !character.met => {
                character.met = true;
                true
            }
            _ => false,
        }
    }

    /// Apply a raw affinity delta (story outcomes).
    pub fn adjust(&mut self, id: &str, delta: i8) -> Option<AffinityChange> {
        let character = self.character_mut(id)?;
        let new_level = character.add_affinity(delta);
        Some(AffinityChange {
            character_id: id.to_string(),
            delta,
            new_affinity: character.affinity,
            new_level,
        })
    }

    /// Cooking a dish for a character.
    pub fn record_cook(&mut self, id: &str, recipe: &str, quality: u8) -> Option<AffinityChange> {
        let bonus = self.character(id)?.cook_bonus(recipe, quality);
        self.adjust(id, bonus)
    }

    /// Giving an item as a gift. Preferred gifts earn the full bonus.
    pub fn record_gift(&mut self, id: &str, item: &str) -> Option<AffinityChange> {
        let character = self.character(id)?;
        let bonus = if character.favorite_gifts.iter().any(|g| g == item) {
            AFFINITY_GIFT_MAX
        } else {
            AFFINITY_GIFT_MIN
        };
        self.adjust(id, bonus)
    }

    /// A dialogue choice the character liked or disliked.
    pub fn record_dialogue(&mut self, id: &str, positive: bool) -> Option<AffinityChange> {
        let delta = if positive {
            AFFINITY_DIALOGUE_POSITIVE
        } else {
            AFFINITY_DIALOGUE_NEGATIVE
        };
        self.adjust(id, delta)
    }
}
