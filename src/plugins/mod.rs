pub mod map_loader;
pub mod scene;
pub mod tactics;

pub use map_loader::*;
pub use scene::*;
pub use tactics::*;
