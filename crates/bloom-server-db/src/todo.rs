// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Todo repository for database operations.

use async_trait::async_trait;
use bloom_server_auth::{ProjectId, Todo, TodoId};
use chrono::Utc;
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::{map_foreign_key_violation, DbError};
use crate::store::TodoStore;
use crate::types::{format_timestamp, parse_timestamp, parse_uuid};

const TODO_COLUMNS: &str =
	"id, project_id, title, description, status, priority, deadline, created_at, updated_at";

/// Repository for todo database operations.
#[derive(Clone)]
pub struct TodoRepository {
	pool: SqlitePool,
}

impl TodoRepository {
	/// Create a new repository with the given pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Create a new todo.
	///
	/// # Errors
	/// Returns `DbError::Sqlx` if the parent project does not exist.
	#[tracing::instrument(skip(self, todo), fields(todo_id = %todo.id, project_id = %todo.project_id))]
	pub async fn create_todo(&self, todo: &Todo) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO todos (id, project_id, title, description, status, priority, deadline, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(todo.id.to_string())
		.bind(todo.project_id.to_string())
		.bind(&todo.title)
		.bind(&todo.description)
		.bind(todo.status.as_str())
		.bind(todo.priority.as_str())
		.bind(todo.deadline.as_ref().map(format_timestamp))
		.bind(format_timestamp(&todo.created_at))
		.bind(format_timestamp(&todo.updated_at))
		.execute(&self.pool)
		.await
		.map_err(|e| map_foreign_key_violation(e, || format!("project {}", todo.project_id)))?;

		tracing::debug!(todo_id = %todo.id, "todo created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(todo_id = %id))]
	pub async fn get_todo(&self, id: &TodoId) -> Result<Option<Todo>, DbError> {
		let row = sqlx::query(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?"))
			.bind(id.to_string())
			.fetch_optional(&self.pool)
			.await?;

		row.map(|r| row_to_todo(&r)).transpose()
	}

	/// List the todos of a project, newest first.
	#[tracing::instrument(skip(self), fields(project_id = %project_id))]
	pub async fn list_todos_for_project(&self, project_id: &ProjectId) -> Result<Vec<Todo>, DbError> {
		let rows = sqlx::query(&format!(
			"SELECT {TODO_COLUMNS} FROM todos WHERE project_id = ? ORDER BY created_at DESC, id DESC"
		))
		.bind(project_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		let todos = rows.iter().map(row_to_todo).collect::<Result<Vec<_>, _>>()?;
		tracing::debug!(project_id = %project_id, count = todos.len(), "listed todos");
		Ok(todos)
	}

	/// Overwrite the mutable fields of a todo. The parent project never changes.
	#[tracing::instrument(skip(self, todo), fields(todo_id = %todo.id))]
	pub async fn update_todo(&self, todo: &Todo) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			UPDATE todos
			SET title = ?, description = ?, status = ?, priority = ?, deadline = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&todo.title)
		.bind(&todo.description)
		.bind(todo.status.as_str())
		.bind(todo.priority.as_str())
		.bind(todo.deadline.as_ref().map(format_timestamp))
		.bind(format_timestamp(&Utc::now()))
		.bind(todo.id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("todo {}", todo.id)));
		}
		tracing::debug!(todo_id = %todo.id, "todo updated");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(todo_id = %id))]
	pub async fn delete_todo(&self, id: &TodoId) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM todos WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}
}

fn row_to_todo(row: &sqlx::sqlite::SqliteRow) -> Result<Todo, DbError> {
	let id: String = row.get("id");
	let project_id: String = row.get("project_id");
	let status: String = row.get("status");
	let priority: String = row.get("priority");
	let deadline: Option<String> = row.get("deadline");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(Todo {
		id: TodoId::new(parse_uuid("todo ID", &id)?),
		project_id: ProjectId::new(parse_uuid("project ID", &project_id)?),
		title: row.get("title"),
		description: row.get("description"),
		status: status
			.parse()
			.map_err(|e| DbError::Internal(format!("Invalid stored status: {e}")))?,
		priority: priority
			.parse()
			.map_err(|e| DbError::Internal(format!("Invalid stored priority: {e}")))?,
		deadline: deadline
			.map(|d| parse_timestamp("deadline", &d))
			.transpose()?,
		created_at: parse_timestamp("created_at", &created_at)?,
		updated_at: parse_timestamp("updated_at", &updated_at)?,
	})
}

#[async_trait]
impl TodoStore for TodoRepository {
	async fn create_todo(&self, todo: &Todo) -> Result<(), DbError> {
		self.create_todo(todo).await
	}

	async fn get_todo(&self, id: &TodoId) -> Result<Option<Todo>, DbError> {
		self.get_todo(id).await
	}

	async fn list_todos_for_project(&self, project_id: &ProjectId) -> Result<Vec<Todo>, DbError> {
		self.list_todos_for_project(project_id).await
	}

	async fn update_todo(&self, todo: &Todo) -> Result<(), DbError> {
		self.update_todo(todo).await
	}

	async fn delete_todo(&self, id: &TodoId) -> Result<bool, DbError> {
		self.delete_todo(id).await
	}
}
