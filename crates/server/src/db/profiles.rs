//! Profile repository for database operations.
//!
//! Row structs decode JSONB sub-lists (phones, emails, socials, gallery,
//! theme) via `sqlx::types::Json` and convert into the domain [`Profile`].

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use trueline_core::{OwnerId, ProfileId};

use super::{ProfileStore, RepositoryError};
use crate::models::{EmailAddress, NewProfile, Phone, Profile, SocialLink, Theme};

const SELECT_COLUMNS: &str = "id, owner_id, name, profile_image_url, title, company, job_title, \
     phones, emails, website, address, address_link, socials, gallery_images, theme, \
     created_at, updated_at";

/// Database row for a profile record.
#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: ProfileId,
    owner_id: OwnerId,
    name: String,
    profile_image_url: String,
    title: Option<String>,
    company: Option<String>,
    job_title: Option<String>,
    phones: Json<Vec<Phone>>,
    emails: Json<Vec<EmailAddress>>,
    website: Option<String>,
    address: Option<String>,
    address_link: Option<String>,
    socials: Json<Vec<SocialLink>>,
    gallery_images: Json<Vec<String>>,
    theme: Json<Theme>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(r: ProfileRow) -> Self {
        Self {
            id: r.id,
            owner_id: r.owner_id,
            name: r.name,
            profile_image_url: r.profile_image_url,
            title: r.title,
            company: r.company,
            job_title: r.job_title,
            phones: r.phones.0,
            emails: r.emails.0,
            website: r.website,
            address: r.address,
            address_link: r.address_link,
            socials: r.socials.0,
            gallery_images: r.gallery_images.0,
            theme: r.theme.0,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Repository for profile database operations.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a profile by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProfileId) -> Result<Option<Profile>, RepositoryError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM profile WHERE id = $1");
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Profile::from))
    }

    /// Insert a new profile and return the stored record.
    ///
    /// The caller validates that `name` is non-empty; the table carries a
    /// CHECK constraint as a backstop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, new: NewProfile) -> Result<Profile, RepositoryError> {
        let sql = format!(
            "INSERT INTO profile \
                 (id, owner_id, name, profile_image_url, title, company, job_title, \
                  phones, emails, website, address, address_link, socials, \
                  gallery_images, theme) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {SELECT_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(ProfileId::generate())
            .bind(new.owner_id)
            .bind(&new.name)
            .bind(&new.profile_image_url)
            .bind(&new.title)
            .bind(&new.company)
            .bind(&new.job_title)
            .bind(Json(&new.phones))
            .bind(Json(&new.emails))
            .bind(&new.website)
            .bind(&new.address)
            .bind(&new.address_link)
            .bind(Json(&new.socials))
            .bind(Json(&new.gallery_images))
            .bind(Json(&new.theme))
            .fetch_one(&self.pool)
            .await?;

        Ok(Profile::from(row))
    }

    /// Delete a profile by ID.
    ///
    /// Returns `true` if a profile was deleted, `false` if it didn't exist.
    /// The profile's scan/save events are left untouched (weak reference).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProfileId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM profile WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all profiles.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM profile")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Fetch every profile, oldest first (admin export).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Profile>, RepositoryError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM profile ORDER BY created_at ASC");
        let rows = sqlx::query_as::<_, ProfileRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }
}

impl ProfileStore for ProfileRepository {
    async fn get(&self, id: ProfileId) -> Result<Option<Profile>, RepositoryError> {
        self.get_by_id(id).await
    }
}
