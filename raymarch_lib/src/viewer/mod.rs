//! Volume and mask selection, background loading and render state

mod bounds;
mod config;
mod loader;
mod messages;
mod orchestrator;
mod state;

pub use bounds::NormalizedBounds;
pub use config::ViewerConfig;
pub use messages::{LoadEvent, Slot};
pub use orchestrator::Viewer;
pub use state::ViewerControls;
