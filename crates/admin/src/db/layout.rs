//! Store layout section repository.
//!
//! Positions are kept contiguous from zero: adding appends at the end,
//! deleting resequences, and moving swaps with the neighbor.

use sqlx::PgPool;

use curbside_core::SectionId;

use super::RepositoryError;
use crate::models::LayoutSection;
use crate::models::layout::MoveDirection;

/// Internal row type for section queries.
#[derive(Debug, sqlx::FromRow)]
struct SectionRow {
    id: i32,
    name: String,
    position: i32,
    enabled: bool,
}

impl From<SectionRow> for LayoutSection {
    fn from(row: SectionRow) -> Self {
        Self {
            id: SectionId::new(row.id),
            name: row.name,
            position: row.position,
            enabled: row.enabled,
        }
    }
}

/// Repository for layout section database operations.
pub struct LayoutRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LayoutRepository<'a> {
    /// Create a new layout repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List sections in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<LayoutSection>, RepositoryError> {
        let rows = sqlx::query_as::<_, SectionRow>(
            "SELECT id, name, position, enabled FROM layout_section ORDER BY position",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Append a new enabled section at the end of the layout.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add(&self, name: &str) -> Result<LayoutSection, RepositoryError> {
        let row = sqlx::query_as::<_, SectionRow>(
            r"
            INSERT INTO layout_section (name, position, enabled)
            VALUES ($1, (SELECT COALESCE(MAX(position) + 1, 0) FROM layout_section), TRUE)
            RETURNING id, name, position, enabled
            ",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Delete a section and close the gap in positions.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the section doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: SectionId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let deleted: Option<i32> =
            sqlx::query_scalar("DELETE FROM layout_section WHERE id = $1 RETURNING position")
                .bind(id.as_i32())
                .fetch_optional(&mut *tx)
                .await?;

        let Some(position) = deleted else {
            return Err(RepositoryError::NotFound);
        };

        sqlx::query("UPDATE layout_section SET position = position - 1 WHERE position > $1")
            .bind(position)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Flip a section's enabled flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the section doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn toggle(&self, id: SectionId) -> Result<LayoutSection, RepositoryError> {
        let row = sqlx::query_as::<_, SectionRow>(
            r"
            UPDATE layout_section
            SET enabled = NOT enabled
            WHERE id = $1
            RETURNING id, name, position, enabled
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Swap a section with its neighbor in the given direction.
    ///
    /// Moving the first section up or the last section down is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the section doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn shift(
        &self,
        id: SectionId,
        direction: MoveDirection,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let position: Option<i32> =
            sqlx::query_scalar("SELECT position FROM layout_section WHERE id = $1")
                .bind(id.as_i32())
                .fetch_optional(&mut *tx)
                .await?;

        let Some(position) = position else {
            return Err(RepositoryError::NotFound);
        };

        let neighbor_position = match direction {
            MoveDirection::Up => position - 1,
            MoveDirection::Down => position + 1,
        };

        let neighbor: Option<i32> =
            sqlx::query_scalar("SELECT id FROM layout_section WHERE position = $1")
                .bind(neighbor_position)
                .fetch_optional(&mut *tx)
                .await?;

        // Already at the edge
        let Some(neighbor_id) = neighbor else {
            tx.commit().await?;
            return Ok(());
        };

        sqlx::query("UPDATE layout_section SET position = $1 WHERE id = $2")
            .bind(position)
            .bind(neighbor_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE layout_section SET position = $1 WHERE id = $2")
            .bind(neighbor_position)
            .bind(id.as_i32())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
