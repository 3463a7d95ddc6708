//! Components - pure data attached to entities

mod dragon;
mod people;
mod world;

pub use dragon::*;
pub use people::*;
pub use world::*;
