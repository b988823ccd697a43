//! Public profile access.
//!
//! Orchestrates the visitor-facing read paths: fetch a profile, project it
//! through the public allow-list or render it as a vCard, and hand the
//! analytics event to the background writer without awaiting it.

use thiserror::Error;

use trueline_core::ProfileId;

use crate::db::{ProfileStore, RepositoryError};
use crate::models::{ClientMeta, PublicProfileView, SaveEvent, ScanEvent};
use crate::services::event_log::EventLogger;
use crate::vcard;

/// Errors from the primary (visitor-facing) read path.
///
/// Event logging failures never appear here; they are swallowed behind the
/// [`EventLogger`] boundary.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("profile not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] RepositoryError),
}

/// A rendered vCard plus the filename it downloads as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcardFile {
    pub filename: String,
    pub body: String,
}

/// Visitor-facing profile reads with fire-and-forget scan/save logging.
#[derive(Clone)]
pub struct PublicAccessService<P> {
    profiles: P,
    events: EventLogger,
}

impl<P: ProfileStore> PublicAccessService<P> {
    pub const fn new(profiles: P, events: EventLogger) -> Self {
        Self { profiles, events }
    }

    /// Serve a public profile view and log the scan.
    ///
    /// The scan event (profile id, client ip, user-agent, current time) is
    /// enqueued after a successful lookup; the response does not wait for the
    /// write and is unaffected by its outcome.
    ///
    /// # Errors
    ///
    /// `AccessError::NotFound` if no profile has this id;
    /// `AccessError::Store` if the profile read itself fails.
    pub async fn public_profile(
        &self,
        id: ProfileId,
        meta: ClientMeta,
    ) -> Result<PublicProfileView, AccessError> {
        let profile = self.profiles.get(id).await?.ok_or(AccessError::NotFound)?;

        self.events.log_scan(ScanEvent::now(profile.id, meta));

        Ok(PublicProfileView::from(profile))
    }

    /// Render a profile as a downloadable vCard.
    ///
    /// Does not log anything: the frontend reports a completed save through
    /// [`Self::log_save`] separately, so an aborted download is not counted.
    ///
    /// # Errors
    ///
    /// `AccessError::NotFound` if no profile has this id;
    /// `AccessError::Store` if the profile read fails.
    pub async fn vcard(&self, id: ProfileId) -> Result<VcardFile, AccessError> {
        let profile = self.profiles.get(id).await?.ok_or(AccessError::NotFound)?;

        Ok(VcardFile {
            filename: format!("{}.vcf", sanitize_filename(&profile.name)),
            body: vcard::render(&profile),
        })
    }

    /// Record a vCard save, best-effort.
    ///
    /// No existence check: a save for an id not in the store is still
    /// enqueued (and will simply record against a dead id).
    pub fn log_save(&self, id: ProfileId, meta: ClientMeta) {
        self.events.log_save(SaveEvent::now(id, meta));
    }
}

/// Strip characters that would break or abuse a quoted filename.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | '\\' | '/'))
        .collect();

    if cleaned.trim().is_empty() {
        "contact".to_owned()
    } else {
        cleaned
    }
}
