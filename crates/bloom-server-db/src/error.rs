// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("Migration error: {0}")]
	Migrate(#[from] sqlx::migrate::MigrateError),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Conflict: {0}")]
	Conflict(String),

	#[error("Storage unavailable: {0}")]
	Unavailable(String),

	#[error("Internal: {0}")]
	Internal(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Maps a foreign-key failure on insert to `NotFound` for the referenced row,
/// so both backends report a missing parent the same way.
pub(crate) fn map_foreign_key_violation(e: sqlx::Error, missing: impl FnOnce() -> String) -> DbError {
	match e {
		sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
			DbError::NotFound(missing())
		}
		other => DbError::Sqlx(other),
	}
}
