pub mod controller;
pub mod loader;
pub mod scroll;

pub use controller::*;
pub use loader::*;
pub use scroll::*;
