//! Shared type definitions.

pub mod id;

pub use id::{EventId, OwnerId, ParseIdError, ProfileId};
