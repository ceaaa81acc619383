// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Membership repository: project ownership lookups and membership rows.
//!
//! Every method is a single statement. Role resolution layered on top of
//! this issues at most one query per call to keep authorization latency
//! bounded.

use async_trait::async_trait;
use bloom_server_auth::{MemberRole, ProjectId, ProjectMember, TodoId, UserId};
use chrono::Utc;
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::{map_foreign_key_violation, DbError};
use crate::store::MembershipStore;
use crate::types::{format_timestamp, parse_uuid};

/// Repository for the project ownership and membership graph.
#[derive(Clone)]
pub struct MembershipRepository {
	pool: SqlitePool,
}

impl MembershipRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self), fields(project_id = %project_id))]
	pub async fn get_project_owner(&self, project_id: &ProjectId) -> Result<Option<UserId>, DbError> {
		let owner: Option<String> = sqlx::query_scalar("SELECT owner_id FROM projects WHERE id = ?")
			.bind(project_id.to_string())
			.fetch_optional(&self.pool)
			.await?;

		owner
			.map(|id| parse_uuid("owner ID", &id).map(UserId::new))
			.transpose()
	}

	#[tracing::instrument(skip(self), fields(project_id = %project_id, user_id = %user_id))]
	pub async fn get_membership_role(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<Option<MemberRole>, DbError> {
		let role: Option<String> = sqlx::query_scalar(
			"SELECT role FROM project_members WHERE project_id = ? AND user_id = ?",
		)
		.bind(project_id.to_string())
		.bind(user_id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		role
			.map(|r| {
				r.parse::<MemberRole>()
					.map_err(|e| DbError::Internal(format!("Invalid stored role: {e}")))
			})
			.transpose()
	}

	/// Insert a membership, or replace the role if the pair already exists.
	///
	/// The (project_id, user_id) primary key makes this a single atomic
	/// upsert; concurrent calls for the same pair resolve last-writer-wins.
	#[tracing::instrument(skip(self), fields(project_id = %project_id, user_id = %user_id, role = %role))]
	pub async fn upsert_membership(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
		role: MemberRole,
	) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO project_members (project_id, user_id, role, created_at)
			VALUES (?, ?, ?, ?)
			ON CONFLICT (project_id, user_id) DO UPDATE SET role = excluded.role
			"#,
		)
		.bind(project_id.to_string())
		.bind(user_id.to_string())
		.bind(role.as_str())
		.bind(format_timestamp(&Utc::now()))
		.execute(&self.pool)
		.await
		.map_err(|e| map_foreign_key_violation(e, || format!("project {project_id} or user {user_id}")))?;

		tracing::debug!(project_id = %project_id, user_id = %user_id, role = %role, "membership upserted");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(project_id = %project_id, user_id = %user_id))]
	pub async fn delete_membership(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM project_members WHERE project_id = ? AND user_id = ?")
			.bind(project_id.to_string())
			.bind(user_id.to_string())
			.execute(&self.pool)
			.await?;

		let removed = result.rows_affected() > 0;
		if removed {
			tracing::debug!(project_id = %project_id, user_id = %user_id, "membership removed");
		}
		Ok(removed)
	}

	#[tracing::instrument(skip(self), fields(project_id = %project_id))]
	pub async fn list_memberships(&self, project_id: &ProjectId) -> Result<Vec<ProjectMember>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT pm.project_id, pm.user_id, u.username, pm.role
			FROM project_members pm
			INNER JOIN users u ON pm.user_id = u.id
			WHERE pm.project_id = ?
			ORDER BY u.username ASC
			"#,
		)
		.bind(project_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		let mut members = Vec::with_capacity(rows.len());
		for row in &rows {
			members.push(row_to_member(row)?);
		}
		tracing::debug!(project_id = %project_id, count = members.len(), "listed project members");
		Ok(members)
	}

	#[tracing::instrument(skip(self), fields(todo_id = %todo_id))]
	pub async fn get_todo_parent_project(&self, todo_id: &TodoId) -> Result<Option<ProjectId>, DbError> {
		let project: Option<String> = sqlx::query_scalar("SELECT project_id FROM todos WHERE id = ?")
			.bind(todo_id.to_string())
			.fetch_optional(&self.pool)
			.await?;

		project
			.map(|id| parse_uuid("project ID", &id).map(ProjectId::new))
			.transpose()
	}
}

fn row_to_member(row: &sqlx::sqlite::SqliteRow) -> Result<ProjectMember, DbError> {
	let project_id: String = row.get("project_id");
	let user_id: String = row.get("user_id");
	let role: String = row.get("role");

	Ok(ProjectMember {
		project_id: ProjectId::new(parse_uuid("project ID", &project_id)?),
		user_id: UserId::new(parse_uuid("user ID", &user_id)?),
		username: row.get("username"),
		role: role
			.parse()
			.map_err(|e| DbError::Internal(format!("Invalid stored role: {e}")))?,
	})
}

#[async_trait]
impl MembershipStore for MembershipRepository {
	async fn get_project_owner(&self, project_id: &ProjectId) -> Result<Option<UserId>, DbError> {
		self.get_project_owner(project_id).await
	}

	async fn get_membership_role(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<Option<MemberRole>, DbError> {
		self.get_membership_role(project_id, user_id).await
	}

	async fn upsert_membership(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
		role: MemberRole,
	) -> Result<(), DbError> {
		self.upsert_membership(project_id, user_id, role).await
	}

	async fn delete_membership(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<bool, DbError> {
		self.delete_membership(project_id, user_id).await
	}

	async fn list_memberships(&self, project_id: &ProjectId) -> Result<Vec<ProjectMember>, DbError> {
		self.list_memberships(project_id).await
	}

	async fn get_todo_parent_project(&self, todo_id: &TodoId) -> Result<Option<ProjectId>, DbError> {
		self.get_todo_parent_project(todo_id).await
	}
}
