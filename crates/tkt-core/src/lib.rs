//! tkt-core: Core library for the tkt ticket tracker
//!
//! Provides the data model, the file-backed record store, and derived
//! query views over it. No database server, no daemon - just one JSON
//! file, loaded wholesale on open and rewritten wholesale on every
//! mutation.

pub mod config;
pub mod error;
pub mod query;
pub mod store;
pub mod ticket;

pub use config::Config;
pub use error::Error;
pub use query::{PriorityCounts, Stats};
pub use store::{LoadOutcome, Store};
pub use ticket::{NULL_DESCRIPTION, Priority, Ticket};

/// Result type for tkt operations
pub type Result<T> = std::result::Result<T, Error>;
