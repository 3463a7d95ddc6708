//! Save/Load functionality for persisting simulation state
//!
//! Save slots are human-readable JSON. Every top-level section falls back
//! to its default when missing, so partial or hand-edited saves load
//! instead of failing; only malformed JSON or a wrong save version is
//! rejected. Compact bincode snapshots of the same data back in-memory
//! checkpoints.

use hecs::World;
use log::warn;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::components::{Customer, Dragon, SpawnPoint, Staff};
use crate::engine::SimulationEngine;
use crate::systems::{
    CafeManager, CharacterRoster, Clock, Economy, EventCalendar, Inventory, Patronage, RecipeBook,
    StoryDirector, WorldState,
};

/// Version number for the save format (increment when the format changes).
const SAVE_VERSION: u32 = 1;

/// Number of save slots.
pub const NUM_SLOTS: u32 = 3;

fn current_version() -> u32 {
    SAVE_VERSION
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Serializable snapshot of the complete simulation state.
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SaveData {
    /// Save format version. Missing versions are assumed current so that
    /// trimmed saves still load.
    #[serde(default = "current_version")]
    pub version: u32,
    pub saved_at_unix: u64,
    pub playtime_seconds: f64,
    pub clock: Clock,
    pub world_state: WorldState,
    pub cafe: CafeManager,
    pub economy: Economy,
    pub inventory: Inventory,
    pub recipes: RecipeBook,
    pub story: StoryDirector,
    pub characters: CharacterRoster,
    pub calendar: EventCalendar,
    pub patronage: Patronage,
    /// All entities with their components.
    pub entities: Vec<SerializableEntity>,
}

/// All possible components for an entity, serialized as optionals.
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SerializableEntity {
    pub dragon: Option<Dragon>,
    pub customer: Option<Customer>,
    pub staff: Option<Staff>,
    pub spawn_point: Option<SpawnPoint>,
}

/// Extract all entities from a world into serializable form.
fn serialize_entities(world: &World) -> Vec<SerializableEntity> {
    let mut entities = Vec::new();
    for entity_ref in world.iter() {
        let mut se = SerializableEntity::default();
        if let Some(c) = entity_ref.get::<&Dragon>() {
            se.dragon = Some((*c).clone());
        }
        if let Some(c) = entity_ref.get::<&Customer>() {
            se.customer = Some((*c).clone());
        }
        if let Some(c) = entity_ref.get::<&Staff>() {
            se.staff = Some((*c).clone());
        }
        if let Some(c) = entity_ref.get::<&SpawnPoint>() {
            se.spawn_point = Some((*c).clone());
        }
        entities.push(se);
    }
    entities
}

/// Rebuild a world from serialized entities.
fn deserialize_entities(world: &mut World, entities: Vec<SerializableEntity>) {
    for se in entities {
        spawn_entity(world, se);
    }
}

/// Spawn an entity with whichever components the save carried.
fn spawn_entity(world: &mut World, se: SerializableEntity) {
    let entity = world.spawn(());
    if let Some(c) = se.dragon {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.customer {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.staff {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.spawn_point {
        let _ = world.insert_one(entity, c);
    }
}

/// Capture the full engine state as a [`SaveData`].
fn capture(engine: &SimulationEngine) -> SaveData {
    let mut economy = engine.economy.clone();
    economy.trim_history();
    SaveData {
        version: SAVE_VERSION,
        saved_at_unix: unix_now(),
        playtime_seconds: engine.playtime_seconds,
        clock: engine.clock.clone(),
        world_state: engine.world_state.clone(),
        cafe: engine.cafe.clone(),
        economy,
        inventory: engine.inventory.clone(),
        recipes: engine.recipes.clone(),
        story: engine.story.clone(),
        characters: engine.characters.clone(),
        calendar: engine.calendar.clone(),
        patronage: engine.patronage.clone(),
        entities: serialize_entities(&engine.world),
    }
}

fn unpack(save_data: SaveData) -> Result<LoadedSimulation, SaveError> {
    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let mut world = World::new();
    let had_dragon = save_data.entities.iter().any(|se| se.dragon.is_some());
    deserialize_entities(&mut world, save_data.entities);
    if !had_dragon {
        warn!("save contains no dragon entity; loading anyway");
    }

    Ok(LoadedSimulation {
        world,
        playtime_seconds: save_data.playtime_seconds,
        clock: save_data.clock,
        world_state: save_data.world_state,
        cafe: save_data.cafe,
        economy: save_data.economy,
        inventory: save_data.inventory,
        recipes: save_data.recipes,
        story: save_data.story,
        characters: save_data.characters,
        calendar: save_data.calendar,
        patronage: save_data.patronage,
    })
}

/// Save the complete simulation to a writer as JSON.
pub fn save_simulation<W: Write>(writer: W, engine: &SimulationEngine) -> Result<(), SaveError> {
    serde_json::to_writer_pretty(writer, &capture(engine))?;
    Ok(())
}

/// Load a simulation from a JSON reader.
pub fn load_simulation<R: Read>(reader: R) -> Result<LoadedSimulation, SaveError> {
    let save_data: SaveData = serde_json::from_reader(reader)?;
    unpack(save_data)
}

/// Compact binary checkpoint of the full state.
pub fn snapshot_simulation(engine: &SimulationEngine) -> Result<Vec<u8>, SaveError> {
    Ok(bincode::serialize(&capture(engine))?)
}

/// Restore a checkpoint produced by [`snapshot_simulation`].
pub fn restore_simulation(bytes: &[u8]) -> Result<LoadedSimulation, SaveError> {
    let save_data: SaveData = bincode::deserialize(bytes)?;
    unpack(save_data)
}

/// Result of loading a simulation.
pub struct LoadedSimulation {
    pub world: World,
    pub playtime_seconds: f64,
    pub clock: Clock,
    pub world_state: WorldState,
    pub cafe: CafeManager,
    pub economy: Economy,
    pub inventory: Inventory,
    pub recipes: RecipeBook,
    pub story: StoryDirector,
    pub characters: CharacterRoster,
    pub calendar: EventCalendar,
    pub patronage: Patronage,
}

/// Errors that can occur during save/load.
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
    InvalidSlot(u32),
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Json(e) => write!(f, "JSON error: {}", e),
            SaveError::Bincode(e) => write!(f, "serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(f, "save version mismatch: expected {}, found {}", expected, found)
            }
            SaveError::InvalidSlot(slot) => write!(f, "invalid save slot {}", slot),
        }
    }
}

impl std::error::Error for SaveError {}

/// A save slot's headline info, for save/load menus.
#[derive(Debug, Clone, Default)]
pub struct SlotSummary {
    pub slot: u32,
    pub exists: bool,
    pub day: u32,
    pub dragon_name: String,
    pub dragon_stage: String,
    pub gold: u32,
    pub reputation: u32,
    pub playtime_seconds: f64,
    pub saved_at_unix: u64,
}

/// Numbered save slots on disk.
pub struct SaveManager {
    save_dir: PathBuf,
}

impl SaveManager {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
        }
    }

    /// Create the saves directory if needed.
    pub fn initialize(&self) -> Result<(), SaveError> {
        std::fs::create_dir_all(&self.save_dir)?;
        Ok(())
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    fn slot_path(&self, slot: u32) -> PathBuf {
        self.save_dir.join(format!("slot_{}.json", slot))
    }

    fn validate_slot(slot: u32) -> Result<(), SaveError> {
        if (1..=NUM_SLOTS).contains(&slot) {
            Ok(())
        } else {
            Err(SaveError::InvalidSlot(slot))
        }
    }

    pub fn slot_exists(&self, slot: u32) -> bool {
        Self::validate_slot(slot).is_ok() && self.slot_path(slot).exists()
    }

    pub fn save_slot(&self, slot: u32, engine: &SimulationEngine) -> Result<(), SaveError> {
        Self::validate_slot(slot)?;
        let file = std::fs::File::create(self.slot_path(slot))?;
        save_simulation(std::io::BufWriter::new(file), engine)
    }

    pub fn load_slot(&self, slot: u32) -> Result<LoadedSimulation, SaveError> {
        Self::validate_slot(slot)?;
        let file = std::fs::File::open(self.slot_path(slot))?;
        load_simulation(std::io::BufReader::new(file))
    }

    /// Delete a slot. Deleting an empty slot is fine.
    pub fn delete_slot(&self, slot: u32) -> Result<(), SaveError> {
        Self::validate_slot(slot)?;
        let path = self.slot_path(slot);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Headline info for every slot. Unreadable saves report as empty.
    pub fn list_slots(&self) -> Vec<SlotSummary> {
        (1..=NUM_SLOTS).map(|slot| self.summarize_slot(slot)).collect()
    }

    fn summarize_slot(&self, slot: u32) -> SlotSummary {
        let empty = SlotSummary {
            slot,
            ..SlotSummary::default()
        };
        let path = self.slot_path(slot);
        if !path.exists() {
            return empty;
        }
        let file = match std::fs::File::open(&path) {
            Ok(file) => file,
            Err(_) => return empty,
        };
        let save_data: SaveData = match serde_json::from_reader(std::io::BufReader::new(file)) {
            Ok(data) => data,
            Err(error) => {
                warn!("unreadable save in slot {}: {}", slot, error);
                return empty;
            }
        };

        let dragon = save_data
            .entities
            .iter()
            .find_map(|se| se.dragon.as_ref());
        SlotSummary {
            slot,
            exists: true,
            day: save_data.clock.day(),
            dragon_name: dragon.map(|d| d.name.clone()).unwrap_or_default(),
            dragon_stage: dragon
                .map(|d| d.stage.display_name().to_string())
                .unwrap_or_default(),
            gold: save_data.economy.gold(),
            reputation: save_data.cafe.reputation(),
            playtime_seconds: save_data.playtime_seconds,
            saved_at_unix: save_data.saved_at_unix,
        }
    }

    /// The most recently written slot, if any.
    pub fn most_recent_slot(&self) -> Option<u32> {
        self.list_slots()
            .into_iter()
            .filter(|summary| summary.exists)
            .max_by_key(|summary| summary.saved_at_unix)
            .map(|summary| summary.slot)
    }
}
