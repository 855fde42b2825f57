//! Lazy, node-backed event records.
//!
//! An [`Event`] carries its identifiers in memory and leaves the bulky
//! payload in the node store until something actually reads it. For
//! transport between workers only the identifiers and raw payload cross
//! the boundary ([`EventSnapshot`]); resolved references are re-fetched
//! lazily on the other side.

pub mod error;
pub mod event;
pub mod node_data;
pub mod types;

pub use error::{EventError, Result};
pub use event::Event;
pub use node_data::NodeData;
pub use types::{Environment, EventCaches, EventSnapshot, Group, Project};
