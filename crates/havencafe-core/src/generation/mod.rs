//! Generation - new-game world content and customer creation

mod customers;
mod names;
mod story;
mod world;

pub use customers::*;
pub use names::*;
pub use story::*;
pub use world::*;
