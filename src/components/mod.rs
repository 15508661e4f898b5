//! Shared components: the layout shell, routes, cards, notifications and views.

mod app;
mod app_view;
mod icons;
mod media_card;
mod toast;
pub mod views;

pub use app::*;
pub use app_view::*;
pub use icons::*;
pub use media_card::*;
pub use toast::*;
