//! Systems - logic that operates on components, plus the singleton
//! managers owned by the engine

mod cafe;
mod characters;
mod clock;
mod customers;
mod economy;
mod festivals;
mod inventory;
mod recipes;
mod resources;
mod staff;
mod story;

pub use cafe::*;
pub use characters::*;
pub use clock::*;
pub use customers::*;
pub use economy::*;
pub use festivals::*;
pub use inventory::*;
pub use recipes::*;
pub use resources::*;
pub use staff::*;
pub use story::*;
