// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;
use crate::store::StatsStore;
use crate::types::Stats;

/// Aggregate counts for the admin dashboard.
#[derive(Clone)]
pub struct StatsRepository {
	pool: SqlitePool,
}

impl StatsRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_stats(&self) -> Result<Stats, DbError> {
		let row = sqlx::query(
			r#"
			SELECT
				(SELECT COUNT(*) FROM users) AS total_users,
				(SELECT COUNT(*) FROM projects) AS total_projects,
				(SELECT COUNT(*) FROM todos) AS total_todos,
				(SELECT COUNT(*) FROM todos WHERE status = 'completed') AS completed_todos
			"#,
		)
		.fetch_one(&self.pool)
		.await?;

		Ok(Stats {
			total_users: row.get("total_users"),
			total_projects: row.get("total_projects"),
			total_todos: row.get("total_todos"),
			completed_todos: row.get("completed_todos"),
		})
	}
}

#[async_trait]
impl StatsStore for StatsRepository {
	async fn get_stats(&self) -> Result<Stats, DbError> {
		self.get_stats().await
	}
}
