//! Storefront content repository: category icons and app labels.

use sqlx::PgPool;

use curbside_core::{CategoryIconId, LabelId};

use super::RepositoryError;
use crate::models::{AppLabel, CategoryIcon};

/// Internal row type for icon queries.
#[derive(Debug, sqlx::FromRow)]
struct IconRow {
    id: i32,
    name: String,
    image_url: String,
}

impl From<IconRow> for CategoryIcon {
    fn from(row: IconRow) -> Self {
        Self {
            id: CategoryIconId::new(row.id),
            name: row.name,
            image_url: row.image_url,
        }
    }
}

/// Internal row type for label queries.
#[derive(Debug, sqlx::FromRow)]
struct LabelRow {
    id: i32,
    key: String,
    value: String,
    description: String,
}

impl From<LabelRow> for AppLabel {
    fn from(row: LabelRow) -> Self {
        Self {
            id: LabelId::new(row.id),
            key: row.key,
            value: row.value,
            description: row.description,
        }
    }
}

/// Repository for icon and label database operations.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List category icons by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_icons(&self) -> Result<Vec<CategoryIcon>, RepositoryError> {
        let rows = sqlx::query_as::<_, IconRow>(
            "SELECT id, name, image_url FROM category_icon ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Update an icon's name and image URL.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the icon doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_icon(
        &self,
        id: CategoryIconId,
        name: &str,
        image_url: &str,
    ) -> Result<CategoryIcon, RepositoryError> {
        let row = sqlx::query_as::<_, IconRow>(
            r"
            UPDATE category_icon
            SET name = $1, image_url = $2
            WHERE id = $3
            RETURNING id, name, image_url
            ",
        )
        .bind(name)
        .bind(image_url)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// List app labels by key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_labels(&self) -> Result<Vec<AppLabel>, RepositoryError> {
        let rows = sqlx::query_as::<_, LabelRow>(
            "SELECT id, key, value, description FROM app_label ORDER BY key",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Update a label's value. Keys and descriptions are fixed at seed time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the label doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_label(
        &self,
        id: LabelId,
        value: &str,
    ) -> Result<AppLabel, RepositoryError> {
        let row = sqlx::query_as::<_, LabelRow>(
            r"
            UPDATE app_label
            SET value = $1
            WHERE id = $2
            RETURNING id, key, value, description
            ",
        )
        .bind(value)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }
}
