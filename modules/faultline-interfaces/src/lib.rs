//! Validation and normalization for event payload sub-fields.
//!
//! Interfaces take untrusted structured data from an inbound payload
//! and produce a canonical value object, or a validation error the
//! pipeline can surface. Only the message interface lives here so far.

pub mod error;
pub mod format;
pub mod message;

pub use error::{InterfaceError, Result};
pub use format::format_params;
pub use message::{Message, MAX_MESSAGE_PARAMS};
