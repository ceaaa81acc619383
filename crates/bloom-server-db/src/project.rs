// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project repository for database operations.

use async_trait::async_trait;
use bloom_server_auth::{Project, ProjectId, UserId};
use chrono::Utc;
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::{map_foreign_key_violation, DbError};
use crate::store::ProjectStore;
use crate::types::{format_timestamp, parse_timestamp, parse_uuid};

/// Repository for project database operations.
///
/// Membership rows are handled by [`crate::MembershipRepository`].
#[derive(Clone)]
pub struct ProjectRepository {
	pool: SqlitePool,
}

impl ProjectRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Create a new project.
	///
	/// # Errors
	/// Returns `DbError::Sqlx` if the owner does not exist.
	#[tracing::instrument(skip(self, project), fields(project_id = %project.id, owner_id = %project.owner_id))]
	pub async fn create_project(&self, project: &Project) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO projects (id, name, description, owner_id, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(project.id.to_string())
		.bind(&project.name)
		.bind(&project.description)
		.bind(project.owner_id.to_string())
		.bind(format_timestamp(&project.created_at))
		.bind(format_timestamp(&project.updated_at))
		.execute(&self.pool)
		.await
		.map_err(|e| map_foreign_key_violation(e, || format!("user {}", project.owner_id)))?;

		tracing::debug!(project_id = %project.id, "project created");
		Ok(())
	}

	/// Get a project by ID, with the owner's username filled in.
	#[tracing::instrument(skip(self), fields(project_id = %id))]
	pub async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT p.id, p.name, p.description, p.owner_id, u.username AS owner_name,
				p.created_at, p.updated_at
			FROM projects p
			INNER JOIN users u ON p.owner_id = u.id
			WHERE p.id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_project(&r)).transpose()
	}

	/// List projects the user owns or is a member of.
	///
	/// Ordered by most recently updated first.
	#[tracing::instrument(skip(self), fields(user_id = %user_id))]
	pub async fn list_projects_for_user(&self, user_id: &UserId) -> Result<Vec<Project>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT DISTINCT p.id, p.name, p.description, p.owner_id, u.username AS owner_name,
				p.created_at, p.updated_at
			FROM projects p
			INNER JOIN users u ON p.owner_id = u.id
			LEFT JOIN project_members pm ON p.id = pm.project_id
			WHERE p.owner_id = ? OR pm.user_id = ?
			ORDER BY p.updated_at DESC, p.id DESC
			"#,
		)
		.bind(user_id.to_string())
		.bind(user_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		let projects = rows
			.iter()
			.map(row_to_project)
			.collect::<Result<Vec<_>, _>>()?;
		tracing::debug!(user_id = %user_id, count = projects.len(), "listed projects for user");
		Ok(projects)
	}

	/// Update name and description. The owner is never changed.
	#[tracing::instrument(skip(self, project), fields(project_id = %project.id))]
	pub async fn update_project(&self, project: &Project) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			UPDATE projects SET name = ?, description = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&project.name)
		.bind(&project.description)
		.bind(format_timestamp(&Utc::now()))
		.bind(project.id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("project {}", project.id)));
		}
		tracing::debug!(project_id = %project.id, "project updated");
		Ok(())
	}

	/// Delete a project. Todos and memberships cascade.
	#[tracing::instrument(skip(self), fields(project_id = %id))]
	pub async fn delete_project(&self, id: &ProjectId) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM projects WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		let removed = result.rows_affected() > 0;
		if removed {
			tracing::debug!(project_id = %id, "project deleted");
		}
		Ok(removed)
	}
}

fn row_to_project(row: &sqlx::sqlite::SqliteRow) -> Result<Project, DbError> {
	let id: String = row.get("id");
	let owner_id: String = row.get("owner_id");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(Project {
		id: ProjectId::new(parse_uuid("project ID", &id)?),
		name: row.get("name"),
		description: row.get("description"),
		owner_id: UserId::new(parse_uuid("owner ID", &owner_id)?),
		owner_name: row.get("owner_name"),
		created_at: parse_timestamp("created_at", &created_at)?,
		updated_at: parse_timestamp("updated_at", &updated_at)?,
	})
}

#[async_trait]
impl ProjectStore for ProjectRepository {
	async fn create_project(&self, project: &Project) -> Result<(), DbError> {
		self.create_project(project).await
	}

	async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, DbError> {
		self.get_project(id).await
	}

	async fn list_projects_for_user(&self, user_id: &UserId) -> Result<Vec<Project>, DbError> {
		self.list_projects_for_user(user_id).await
	}

	async fn update_project(&self, project: &Project) -> Result<(), DbError> {
		self.update_project(project).await
	}

	async fn delete_project(&self, id: &ProjectId) -> Result<bool, DbError> {
		self.delete_project(id).await
	}
}
