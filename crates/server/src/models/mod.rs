//! Domain types for profiles and analytics events.

pub mod event;
pub mod profile;

pub use event::{ClientMeta, DailyCount, EventKind, SaveEvent, ScanEvent};
pub use profile::{EmailAddress, NewProfile, Phone, Profile, PublicProfileView, SocialLink, Theme};
