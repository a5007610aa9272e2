//! Core abstractions for the relationship wheel
//!
//! Data model and catalog, the radial cluster layout, curve bundling, the
//! retained scene and the diagram component that owns it.

mod bundle;
mod canvas;
mod catalog;
mod database;
mod diagram;
mod error;
mod hierarchy;
mod layout;
mod listener;
pub mod logging;
mod renderer;
mod resize;
mod scene;
mod types;
mod viewport;

pub use bundle::*;
pub(crate) use bundle::num;
pub use canvas::*;
pub use catalog::*;
pub use database::*;
pub use diagram::*;
pub use error::*;
pub use hierarchy::*;
pub use layout::*;
pub use listener::*;
pub use logging::*;
pub use renderer::*;
pub use resize::*;
pub use scene::*;
pub use types::*;
pub use viewport::*;
