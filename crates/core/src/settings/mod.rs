//! Settings loading and schema definitions
//!
//! The settings file is the whole configuration surface: repository search
//! order, repository policy mode, plugin pins, project layout, and modules.

mod loader;
mod schema;

pub use loader::Settings;
pub use schema::*;
