pub mod api;
pub mod config;
pub mod error;
pub mod nav;

pub use config::{AppConfig, NavConfig};
pub use error::{Error, Result};
pub use nav::{EasingType, NavIntent, NavigationController, SectionGeometry};
