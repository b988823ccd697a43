//! Profile domain types.
//!
//! A profile is a digital business card owned by an administrator and served
//! publicly by id. Wire names are camelCase to match the frontend API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use trueline_core::{OwnerId, ProfileId};

/// A single phone number on a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    /// Label such as "mobile" or "work"; uppercased into the vCard TYPE parameter.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub number: String,
}

/// A single email address on a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub address: String,
}

/// A social media link on a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
}

/// Theme and layout settings embedded in a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub template: String,
    pub show_gallery: bool,
    pub show_socials: bool,
    pub primary_color: String,
    pub accent_color: String,
    pub icon_color: String,
    pub title_text_color: String,
    pub bio_text_color: String,
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            template: "template2".to_owned(),
            show_gallery: true,
            show_socials: true,
            primary_color: "#007A8A".to_owned(),
            accent_color: "#00AEEF".to_owned(),
            icon_color: "#00AEEF".to_owned(),
            title_text_color: "#FFFFFF".to_owned(),
            bio_text_color: "#E5E7EB".to_owned(),
            font_family: "'Inter', sans-serif".to_owned(),
        }
    }
}

/// A profile record (domain type).
///
/// `id` and `owner_id` are immutable after creation. `name` is non-empty.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    /// The administrator who owns this profile. Never exposed publicly.
    pub owner_id: OwnerId,
    pub name: String,
    pub profile_image_url: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub phones: Vec<Phone>,
    pub emails: Vec<EmailAddress>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub address_link: Option<String>,
    pub socials: Vec<SocialLink>,
    pub gallery_images: Vec<String>,
    pub theme: Theme,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub owner_id: OwnerId,
    pub name: String,
    #[serde(default)]
    pub profile_image_url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub phones: Vec<Phone>,
    #[serde(default)]
    pub emails: Vec<EmailAddress>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub address_link: Option<String>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    #[serde(default)]
    pub theme: Theme,
}

/// Public projection of a profile.
///
/// Built from an explicit allow-list of fields rather than by removing
/// forbidden ones: a field added to [`Profile`] later is not served publicly
/// unless it is also added here. Notably excludes `owner_id` and any storage
/// metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfileView {
    pub id: ProfileId,
    pub name: String,
    pub profile_image_url: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub phones: Vec<Phone>,
    pub emails: Vec<EmailAddress>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub address_link: Option<String>,
    pub socials: Vec<SocialLink>,
    pub gallery_images: Vec<String>,
    pub theme: Theme,
}

impl From<Profile> for PublicProfileView {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            name: p.name,
            profile_image_url: p.profile_image_url,
            title: p.title,
            company: p.company,
            job_title: p.job_title,
            phones: p.phones,
            emails: p.emails,
            website: p.website,
            address: p.address,
            address_link: p.address_link,
            socials: p.socials,
            gallery_images: p.gallery_images,
            theme: p.theme,
        }
    }
}
