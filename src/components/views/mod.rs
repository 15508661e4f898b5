mod browser;
mod home;
mod library;
mod movies;
mod not_found;
mod shows;

pub use browser::*;
pub use home::*;
pub use library::*;
pub use movies::*;
pub use not_found::*;
pub use shows::*;
