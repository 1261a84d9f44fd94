pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod tui;

pub use api::{CatalogApi, HttpCatalogApi};
pub use error::{ConsoleError, Result};
pub use logic::{Completion, Console, Driver, Event, Ticket};

// Export all model types
pub use model::*;
