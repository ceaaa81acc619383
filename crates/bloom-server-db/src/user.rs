// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User repository for database operations.

use async_trait::async_trait;
use bloom_server_auth::{User, UserId};
use chrono::Utc;
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;
use crate::store::UserStore;
use crate::types::{format_timestamp, parse_timestamp, parse_uuid};

const USER_COLUMNS: &str = "id, username, email, is_admin, created_at, updated_at";

/// Repository for user database operations.
#[derive(Clone)]
pub struct UserRepository {
	pool: SqlitePool,
}

impl UserRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Create a new user.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if the username or email already exists.
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
	pub async fn create_user(&self, user: &User) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO users (id, username, email, is_admin, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(user.id.to_string())
		.bind(&user.username)
		.bind(&user.email)
		.bind(user.is_admin as i32)
		.bind(format_timestamp(&user.created_at))
		.bind(format_timestamp(&user.updated_at))
		.execute(&self.pool)
		.await
		.map_err(map_unique_violation)?;

		tracing::debug!(user_id = %user.id, "user created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, DbError> {
		let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
			.bind(id.to_string())
			.fetch_optional(&self.pool)
			.await?;

		row.map(|r| row_to_user(&r)).transpose()
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		let row = sqlx::query(&format!(
			"SELECT {USER_COLUMNS} FROM users WHERE username = ?"
		))
		.bind(username)
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_user(&r)).transpose()
	}

	/// Search users by username or email substring.
	///
	/// The caller is excluded so that they never appear as a sharing candidate
	/// for their own project.
	#[tracing::instrument(skip(self, query), fields(exclude = %exclude))]
	pub async fn search_users(
		&self,
		query: &str,
		exclude: &UserId,
		limit: u32,
	) -> Result<Vec<User>, DbError> {
		let pattern = format!("%{}%", escape_like(query));
		let rows = sqlx::query(&format!(
			r#"
			SELECT {USER_COLUMNS} FROM users
			WHERE id != ? AND (username LIKE ? ESCAPE '\' OR email LIKE ? ESCAPE '\')
			ORDER BY username
			LIMIT ?
			"#
		))
		.bind(exclude.to_string())
		.bind(&pattern)
		.bind(&pattern)
		.bind(limit as i64)
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_user).collect()
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_users(&self) -> Result<Vec<User>, DbError> {
		let rows = sqlx::query(&format!(
			"SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, username ASC"
		))
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_user).collect()
	}

	/// Update username, email and admin flag.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the user does not exist and
	/// `DbError::Conflict` if the new username or email is taken.
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
	pub async fn update_user(&self, user: &User) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			UPDATE users SET username = ?, email = ?, is_admin = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&user.username)
		.bind(&user.email)
		.bind(user.is_admin as i32)
		.bind(format_timestamp(&Utc::now()))
		.bind(user.id.to_string())
		.execute(&self.pool)
		.await
		.map_err(map_unique_violation)?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("user {}", user.id)));
		}
		tracing::debug!(user_id = %user.id, "user updated");
		Ok(())
	}

	/// Delete a user. Owned projects, their todos and all memberships cascade.
	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn delete_user(&self, id: &UserId) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM users WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		let removed = result.rows_affected() > 0;
		if removed {
			tracing::debug!(user_id = %id, "user deleted");
		}
		Ok(removed)
	}
}

fn map_unique_violation(e: sqlx::Error) -> DbError {
	match e {
		sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
			DbError::Conflict("username or email already exists".to_string())
		}
		other => DbError::Sqlx(other),
	}
}

fn escape_like(query: &str) -> String {
	let mut escaped = String::with_capacity(query.len());
	for c in query.chars() {
		if matches!(c, '%' | '_' | '\\') {
			escaped.push('\\');
		}
		escaped.push(c);
	}
	escaped
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User, DbError> {
	let id: String = row.get("id");
	let is_admin: i64 = row.get("is_admin");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(User {
		id: UserId::new(parse_uuid("user ID", &id)?),
		username: row.get("username"),
		email: row.get("email"),
		is_admin: is_admin != 0,
		created_at: parse_timestamp("created_at", &created_at)?,
		updated_at: parse_timestamp("updated_at", &updated_at)?,
	})
}

#[async_trait]
impl UserStore for UserRepository {
	async fn create_user(&self, user: &User) -> Result<(), DbError> {
		self.create_user(user).await
	}

	async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, DbError> {
		self.get_user_by_id(id).await
	}

	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		self.get_user_by_username(username).await
	}

	async fn search_users(
		&self,
		query: &str,
		exclude: &UserId,
		limit: u32,
	) -> Result<Vec<User>, DbError> {
		self.search_users(query, exclude, limit).await
	}

	async fn list_users(&self) -> Result<Vec<User>, DbError> {
		self.list_users().await
	}

	async fn update_user(&self, user: &User) -> Result<(), DbError> {
		self.update_user(user).await
	}

	async fn delete_user(&self, id: &UserId) -> Result<bool, DbError> {
		self.delete_user(id).await
	}
}
