// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Storage traits consumed by the access-control engine and the handlers.

use async_trait::async_trait;
use bloom_server_auth::{
	MemberRole, Project, ProjectId, ProjectMember, Todo, TodoId, User, UserId,
};

use crate::error::DbError;
use crate::types::Stats;

/// Ownership and membership graph of projects.
///
/// This is everything role resolution needs. Implementations must serialize
/// concurrent upserts for the same (project, user) pair so that at most one
/// row ever exists for it.
#[async_trait]
pub trait MembershipStore: Send + Sync {
	/// Returns the owner of the project, or `None` if the project does not exist.
	async fn get_project_owner(&self, project_id: &ProjectId) -> Result<Option<UserId>, DbError>;

	/// Returns the stored membership role, or `None` if there is no row.
	async fn get_membership_role(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<Option<MemberRole>, DbError>;

	/// Inserts the membership, or replaces the role of an existing one.
	async fn upsert_membership(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
		role: MemberRole,
	) -> Result<(), DbError>;

	/// Deletes the membership. Returns whether a row was removed; an absent
	/// row is not an error.
	async fn delete_membership(&self, project_id: &ProjectId, user_id: &UserId)
		-> Result<bool, DbError>;

	/// Lists members of the project ordered by username.
	async fn list_memberships(&self, project_id: &ProjectId) -> Result<Vec<ProjectMember>, DbError>;

	/// Returns the project a todo belongs to, or `None` if the todo does not exist.
	async fn get_todo_parent_project(&self, todo_id: &TodoId) -> Result<Option<ProjectId>, DbError>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
	async fn create_project(&self, project: &Project) -> Result<(), DbError>;
	async fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, DbError>;
	/// Projects the user owns or is a member of, most recently updated first.
	async fn list_projects_for_user(&self, user_id: &UserId) -> Result<Vec<Project>, DbError>;
	async fn update_project(&self, project: &Project) -> Result<(), DbError>;
	/// Deletes the project together with its todos and memberships.
	async fn delete_project(&self, id: &ProjectId) -> Result<bool, DbError>;
}

#[async_trait]
pub trait TodoStore: Send + Sync {
	async fn create_todo(&self, todo: &Todo) -> Result<(), DbError>;
	async fn get_todo(&self, id: &TodoId) -> Result<Option<Todo>, DbError>;
	/// Todos of a project, newest first.
	async fn list_todos_for_project(&self, project_id: &ProjectId) -> Result<Vec<Todo>, DbError>;
	async fn update_todo(&self, todo: &Todo) -> Result<(), DbError>;
	async fn delete_todo(&self, id: &TodoId) -> Result<bool, DbError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
	/// Returns `DbError::Conflict` if the username or email is taken.
	async fn create_user(&self, user: &User) -> Result<(), DbError>;
	async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, DbError>;
	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError>;
	/// Substring match on username or email, excluding `exclude`, ordered by username.
	async fn search_users(
		&self,
		query: &str,
		exclude: &UserId,
		limit: u32,
	) -> Result<Vec<User>, DbError>;
	async fn list_users(&self) -> Result<Vec<User>, DbError>;
	/// Returns `DbError::Conflict` if the new username or email is taken.
	async fn update_user(&self, user: &User) -> Result<(), DbError>;
	/// Deletes the user together with owned projects and memberships.
	async fn delete_user(&self, id: &UserId) -> Result<bool, DbError>;
}

#[async_trait]
pub trait StatsStore: Send + Sync {
	async fn get_stats(&self) -> Result<Stats, DbError>;
}
