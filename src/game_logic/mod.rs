pub mod errors;
pub mod movement;
pub mod unit;

pub use errors::*;
pub use movement::*;
pub use unit::*;
