// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory implementation of every store trait.
//!
//! Used by tests and by embedders that want the authorization core without a
//! database. All maps sit behind one lock so cascading deletes and upserts are
//! atomic with respect to each other. Orderings match the SQLite repositories.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bloom_server_auth::{
	MemberRole, Project, ProjectId, ProjectMember, Todo, TodoId, User, UserId,
};
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::DbError;
use crate::store::{MembershipStore, ProjectStore, StatsStore, TodoStore, UserStore};
use crate::types::Stats;

#[derive(Default)]
struct Tables {
	users: HashMap<UserId, User>,
	projects: HashMap<ProjectId, Project>,
	todos: HashMap<TodoId, Todo>,
	members: BTreeMap<(ProjectId, UserId), MemberRole>,
}

impl Tables {
	fn username_or_email_taken(&self, user: &User) -> bool {
		self.users.values().any(|u| {
			u.id != user.id && (u.username == user.username || u.email == user.email)
		})
	}

	fn remove_project(&mut self, id: &ProjectId) -> bool {
		if self.projects.remove(id).is_none() {
			return false;
		}
		self.todos.retain(|_, t| t.project_id != *id);
		self.members.retain(|(pid, _), _| pid != id);
		true
	}

	fn with_owner_name(&self, project: &Project) -> Project {
		let mut project = project.clone();
		project.owner_name = self
			.users
			.get(&project.owner_id)
			.map(|u| u.username.clone());
		project
	}
}

/// Store backed by process memory.
#[derive(Default)]
pub struct InMemoryStore {
	tables: RwLock<Tables>,
	unavailable: AtomicBool,
}

impl InMemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// When set, every operation fails with [`DbError::Unavailable`].
	pub fn set_unavailable(&self, unavailable: bool) {
		self.unavailable.store(unavailable, Ordering::SeqCst);
	}

	fn check_available(&self) -> Result<(), DbError> {
		if self.unavailable.load(Ordering::SeqCst) {
			return Err(DbError::Unavailable("in-memory store marked unavailable".to_string()));
		}
		Ok(())
	}
}

#[async_trait]
impl MembershipStore for InMemoryStore {
	async fn get_project_owner(&self, project_id: &ProjectId) -> Result<Option<UserId>, DbError> {
		self.check_available()?;
		let tables = self.tables.read().await;
		Ok(tables.projects.get(project_id).map(|p| p.owner_id))
	}

	async fn get_membership_role(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<Option<MemberRole>, DbError> {
		self.check_available()?;
		let tables = self.tables.read().await;
		Ok(tables.members.get(&(*project_id, *user_id)).copied())
	}

	async fn upsert_membership(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
		role: MemberRole,
	) -> Result<(), DbError> {
		self.check_available()?;
		let mut tables = self.tables.write().await;
		if !tables.projects.contains_key(project_id) {
			return Err(DbError::NotFound(format!("project {project_id}")));
		}
		if !tables.users.contains_key(user_id) {
			return Err(DbError::NotFound(format!("user {user_id}")));
		}
		tables.members.insert((*project_id, *user_id), role);
		Ok(())
	}

	async fn delete_membership(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<bool, DbError> {
		self.check_available()?;
		let mut tables = self.tables.write().await;
		Ok(tables.members.remove(&(*project_id, *user_id)).is_some())
	}

	async fn list_memberships(&self, project_id: &ProjectId) -> Result<Vec<ProjectMember>, DbError> {
		self.check_available()?;
		let tables = self.tables.read().await;
		let mut members: Vec<ProjectMember> = tables
			.members
			.iter()
			.filter(|((pid, _), _)| pid == project_id)
			.filter_map(|((pid, uid), role)| {
				tables.users.get(uid).map(|u| ProjectMember {
					project_id: *pid,
					user_id: *uid,
					username: u.username.clone(),
					role: *role,
				})
			})
			.collect();
		members.sort_by(|a, b| a.username.cmp(&b.username));
		Ok(members)
	}

	async fn get_todo_parent_project(&self, todo_id: &TodoId) -> Result<Option<ProjectId>, DbError> {
		self.check_available()?;
		let tables = self.tables.read().await;
		Ok(tables.todos.get(todo_id).map(|t| t.project_id))
	}
}

#[async_trait]
impl ProjectStore for InMemoryStore {
	async fn create_project(&self, project: &Project) -> Result<(), DbError> {
		self.check_available()?;
		let mut tables = self.tables.write().await;
		if !tables.users.contains_key(&project.owner_id) {
			return Err(DbError::NotFound(format!("user {}", project.owner_id)));
		}
		if tables.projects.contains_key(&project.id) {
			return Err(DbError::Conflict(format!("project {} already exists", project.id)));
		}
		let mut stored = project.clone();
		stored.owner_name = None;
		tables.projects.insert(project.id, stored);
		Ok(())
	}

	async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, DbError> {
		self.check_available()?;
		let tables = self.tables.read().await;
		Ok(tables.projects.get(id).map(|p| tables.with_owner_name(p)))
	}

	async fn list_projects_for_user(&self, user_id: &UserId) -> Result<Vec<Project>, DbError> {
		self.check_available()?;
		let tables = self.tables.read().await;
		let mut projects: Vec<Project> = tables
			.projects
			.values()
			.filter(|p| p.is_owned_by(user_id) || tables.members.contains_key(&(p.id, *user_id)))
			.map(|p| tables.with_owner_name(p))
			.collect();
		projects.sort_by_key(|p| (Reverse(p.updated_at), Reverse(p.id)));
		Ok(projects)
	}

	async fn update_project(&self, project: &Project) -> Result<(), DbError> {
		self.check_available()?;
		let mut tables = self.tables.write().await;
		let stored = tables
			.projects
			.get_mut(&project.id)
			.ok_or_else(|| DbError::NotFound(format!("project {}", project.id)))?;
		stored.name = project.name.clone();
		stored.description = project.description.clone();
		stored.updated_at = Utc::now();
		Ok(())
	}

	async fn delete_project(&self, id: &ProjectId) -> Result<bool, DbError> {
		self.check_available()?;
		let mut tables = self.tables.write().await;
		Ok(tables.remove_project(id))
	}
}

#[async_trait]
impl TodoStore for InMemoryStore {
	async fn create_todo(&self, todo: &Todo) -> Result<(), DbError> {
		self.check_available()?;
		let mut tables = self.tables.write().await;
		if !tables.projects.contains_key(&todo.project_id) {
			return Err(DbError::NotFound(format!("project {}", todo.project_id)));
		}
		tables.todos.insert(todo.id, todo.clone());
		Ok(())
	}

	async fn get_todo(&self, id: &TodoId) -> Result<Option<Todo>, DbError> {
		self.check_available()?;
		let tables = self.tables.read().await;
		Ok(tables.todos.get(id).cloned())
	}

	async fn list_todos_for_project(&self, project_id: &ProjectId) -> Result<Vec<Todo>, DbError> {
		self.check_available()?;
		let tables = self.tables.read().await;
		let mut todos: Vec<Todo> = tables
			.todos
			.values()
			.filter(|t| t.project_id == *project_id)
			.cloned()
			.collect();
		todos.sort_by_key(|t| (Reverse(t.created_at), Reverse(t.id)));
		Ok(todos)
	}

	async fn update_todo(&self, todo: &Todo) -> Result<(), DbError> {
		self.check_available()?;
		let mut tables = self.tables.write().await;
		let stored = tables
			.todos
			.get_mut(&todo.id)
			.ok_or_else(|| DbError::NotFound(format!("todo {}", todo.id)))?;
		stored.title = todo.title.clone();
		stored.description = todo.description.clone();
		stored.status = todo.status;
		stored.priority = todo.priority;
		stored.deadline = todo.deadline;
		stored.updated_at = Utc::now();
		Ok(())
	}

	async fn delete_todo(&self, id: &TodoId) -> Result<bool, DbError> {
		self.check_available()?;
		let mut tables = self.tables.write().await;
		Ok(tables.todos.remove(id).is_some())
	}
}

#[async_trait]
impl UserStore for InMemoryStore {
	async fn create_user(&self, user: &User) -> Result<(), DbError> {
		self.check_available()?;
		let mut tables = self.tables.write().await;
		if tables.users.contains_key(&user.id) || tables.username_or_email_taken(user) {
			return Err(DbError::Conflict("username or email already exists".to_string()));
		}
		tables.users.insert(user.id, user.clone());
		Ok(())
	}

	async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, DbError> {
		self.check_available()?;
		let tables = self.tables.read().await;
		Ok(tables.users.get(id).cloned())
	}

	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		self.check_available()?;
		let tables = self.tables.read().await;
		Ok(tables.users.values().find(|u| u.username == username).cloned())
	}

	async fn search_users(
		&self,
		query: &str,
		exclude: &UserId,
		limit: u32,
	) -> Result<Vec<User>, DbError> {
		self.check_available()?;
		let needle = query.to_ascii_lowercase();
		let tables = self.tables.read().await;
		let mut found: Vec<User> = tables
			.users
			.values()
			.filter(|u| u.id != *exclude)
			.filter(|u| {
				u.username.to_ascii_lowercase().contains(&needle)
					|| u.email.to_ascii_lowercase().contains(&needle)
			})
			.cloned()
			.collect();
		found.sort_by(|a, b| a.username.cmp(&b.username));
		found.truncate(limit as usize);
		Ok(found)
	}

	async fn list_users(&self) -> Result<Vec<User>, DbError> {
		self.check_available()?;
		let tables = self.tables.read().await;
		let mut users: Vec<User> = tables.users.values().cloned().collect();
		users.sort_by(|a, b| {
			a.created_at
				.cmp(&b.created_at)
				.then_with(|| a.username.cmp(&b.username))
		});
		Ok(users)
	}

	async fn update_user(&self, user: &User) -> Result<(), DbError> {
		self.check_available()?;
		let mut tables = self.tables.write().await;
		if !tables.users.contains_key(&user.id) {
			return Err(DbError::NotFound(format!("user {}", user.id)));
		}
		if tables.username_or_email_taken(user) {
			return Err(DbError::Conflict("username or email already exists".to_string()));
		}
		if let Some(stored) = tables.users.get_mut(&user.id) {
			stored.username = user.username.clone();
			stored.email = user.email.clone();
			stored.is_admin = user.is_admin;
			stored.updated_at = Utc::now();
		}
		Ok(())
	}

	async fn delete_user(&self, id: &UserId) -> Result<bool, DbError> {
		self.check_available()?;
		let mut tables = self.tables.write().await;
		if tables.users.remove(id).is_none() {
			return Ok(false);
		}
		let owned: Vec<ProjectId> = tables
			.projects
			.values()
			.filter(|p| p.is_owned_by(id))
			.map(|p| p.id)
			.collect();
		for project_id in &owned {
			tables.remove_project(project_id);
		}
		tables.members.retain(|(_, uid), _| uid != id);
		Ok(true)
	}
}

#[async_trait]
impl StatsStore for InMemoryStore {
	async fn get_stats(&self) -> Result<Stats, DbError> {
		self.check_available()?;
		let tables = self.tables.read().await;
		Ok(Stats {
			total_users: tables.users.len() as i64,
			total_projects: tables.projects.len() as i64,
			total_todos: tables.todos.len() as i64,
			completed_todos: tables
				.todos
				.values()
				.filter(|t| t.is_completed())
				.count() as i64,
		})
	}
}
