// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Todo operations. Access is always resolved through the parent project.

use bloom_server_auth::{Action, ProjectId, Todo, TodoId, TodoPriority, TodoStatus, UserId};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use crate::access::AccessControl;
use crate::error::{AccessError, Result, ServiceError};
use crate::state::Stores;

/// Empty `status` and `priority` take their defaults. `deadline` is RFC 3339.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodoRequest {
	pub title: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub status: Option<String>,
	#[serde(default)]
	pub priority: Option<String>,
	#[serde(default)]
	pub deadline: Option<String>,
}

/// Partial update. Absent fields are left alone; an empty `deadline`
/// clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoRequest {
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub status: Option<String>,
	#[serde(default)]
	pub priority: Option<String>,
	#[serde(default)]
	pub deadline: Option<String>,
}

#[derive(Clone)]
pub struct TodoHandler {
	stores: Stores,
	access: AccessControl,
}

impl TodoHandler {
	pub fn new(stores: Stores, access: AccessControl) -> Self {
		Self { stores, access }
	}

	/// Todos of a project, newest first.
	#[instrument(skip(self), fields(caller = %caller, project_id = %project_id))]
	pub async fn list(&self, caller: &UserId, project_id: &ProjectId) -> Result<Vec<Todo>> {
		self.access.require(project_id, caller, Action::ListTodos).await?;
		Ok(self.stores.todos.list_todos_for_project(project_id).await?)
	}

	#[instrument(skip(self, req), fields(caller = %caller, project_id = %project_id))]
	pub async fn create(
		&self,
		caller: &UserId,
		project_id: &ProjectId,
		req: CreateTodoRequest,
	) -> Result<Todo> {
		self.access.require(project_id, caller, Action::CreateTodo).await?;

		let title = req.title.trim();
		if title.is_empty() {
			return Err(ServiceError::validation("title is required"));
		}

		let mut todo = Todo::new(*project_id, title);
		todo.description = req.description;
		if let Some(status) = non_empty(req.status.as_deref()) {
			todo.status = status.parse::<TodoStatus>()?;
		}
		if let Some(priority) = non_empty(req.priority.as_deref()) {
			todo.priority = priority.parse::<TodoPriority>()?;
		}
		todo.deadline = non_empty(req.deadline.as_deref())
			.map(parse_deadline)
			.transpose()?;

		self.stores.todos.create_todo(&todo).await?;
		tracing::info!(todo_id = %todo.id, project_id = %project_id, "todo created");
		self.fetch(&todo.id).await
	}

	#[instrument(skip(self), fields(caller = %caller, todo_id = %todo_id))]
	pub async fn get(&self, caller: &UserId, todo_id: &TodoId) -> Result<Todo> {
		self.access.require_for_todo(todo_id, caller, Action::ReadTodo).await?;
		self.fetch(todo_id).await
	}

	#[instrument(skip(self, req), fields(caller = %caller, todo_id = %todo_id))]
	pub async fn update(
		&self,
		caller: &UserId,
		todo_id: &TodoId,
		req: UpdateTodoRequest,
	) -> Result<Todo> {
		self.access.require_for_todo(todo_id, caller, Action::UpdateTodo).await?;

		let mut todo = self.fetch(todo_id).await?;
		if let Some(title) = req.title {
			let title = title.trim();
			if title.is_empty() {
				return Err(ServiceError::validation("title cannot be empty"));
			}
			todo.title = title.to_string();
		}
		if let Some(description) = req.description {
			todo.description = description;
		}
		if let Some(status) = req.status {
			todo.status = status.trim().parse()?;
		}
		if let Some(priority) = req.priority {
			todo.priority = priority.trim().parse()?;
		}
		if let Some(deadline) = req.deadline {
			todo.deadline = non_empty(Some(deadline.as_str())).map(parse_deadline).transpose()?;
		}

		self.stores.todos.update_todo(&todo).await?;
		tracing::info!(todo_id = %todo_id, "todo updated");
		self.fetch(todo_id).await
	}

	#[instrument(skip(self), fields(caller = %caller, todo_id = %todo_id))]
	pub async fn delete(&self, caller: &UserId, todo_id: &TodoId) -> Result<()> {
		self.access.require_for_todo(todo_id, caller, Action::DeleteTodo).await?;

		if !self.stores.todos.delete_todo(todo_id).await? {
			return Err(AccessError::ResourceNotFound(format!("todo {todo_id}")).into());
		}
		tracing::info!(todo_id = %todo_id, "todo deleted");
		Ok(())
	}

	async fn fetch(&self, todo_id: &TodoId) -> Result<Todo> {
		self
			.stores
			.todos
			.get_todo(todo_id)
			.await?
			.ok_or_else(|| AccessError::ResourceNotFound(format!("todo {todo_id}")).into())
	}
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_deadline(raw: &str) -> Result<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(raw)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| ServiceError::validation(format!("invalid deadline '{raw}': {e}")))
}
