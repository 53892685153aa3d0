//! Employee roster repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use curbside_core::{Email, EmployeeId, EmployeeStatus, StoreId};

use super::RepositoryError;
use crate::models::Employee;

/// Internal row type for employee queries.
#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    position: String,
    status: EmployeeStatus,
    store_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = RepositoryError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: EmployeeId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email,
            phone: row.phone,
            position: row.position,
            status: row.status,
            store_id: StoreId::new(row.store_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Fields for creating or updating an employee.
#[derive(Debug, Clone)]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub position: String,
    pub status: EmployeeStatus,
}

/// Repository for employee database operations.
pub struct EmployeeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EmployeeRepository<'a> {
    /// Create a new employee repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List employees at a store, optionally filtered by a search term
    /// matched against name, email, and position.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list(
        &self,
        store_id: StoreId,
        search: Option<&str>,
    ) -> Result<Vec<Employee>, RepositoryError> {
        let pattern = search.map(|s| format!("%{s}%"));

        let rows = sqlx::query_as::<_, EmployeeRow>(
            r"
            SELECT id, first_name, last_name, email, phone, position, status,
                   store_id, created_at, updated_at
            FROM employee
            WHERE store_id = $1
              AND ($2::text IS NULL
                   OR first_name ILIKE $2 OR last_name ILIKE $2
                   OR email ILIKE $2 OR position ILIKE $2)
            ORDER BY last_name, first_name
            ",
        )
        .bind(store_id.as_i32())
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Create a new employee at a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        store_id: StoreId,
        fields: &EmployeeFields,
    ) -> Result<Employee, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r"
            INSERT INTO employee (first_name, last_name, email, phone, position, status, store_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, first_name, last_name, email, phone, position, status,
                      store_id, created_at, updated_at
            ",
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.email.as_str())
        .bind(&fields.phone)
        .bind(&fields.position)
        .bind(fields.status)
        .bind(store_id.as_i32())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("employee email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Update an employee, scoped to the given store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the employee doesn't exist at
    /// this store.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: EmployeeId,
        store_id: StoreId,
        fields: &EmployeeFields,
    ) -> Result<Employee, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r"
            UPDATE employee
            SET first_name = $1, last_name = $2, email = $3, phone = $4,
                position = $5, status = $6, updated_at = now()
            WHERE id = $7 AND store_id = $8
            RETURNING id, first_name, last_name, email, phone, position, status,
                      store_id, created_at, updated_at
            ",
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.email.as_str())
        .bind(&fields.phone)
        .bind(&fields.position)
        .bind(fields.status)
        .bind(id.as_i32())
        .bind(store_id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete an employee, scoped to the given store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the employee doesn't exist at
    /// this store.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: EmployeeId, store_id: StoreId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM employee WHERE id = $1 AND store_id = $2")
            .bind(id.as_i32())
            .bind(store_id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
