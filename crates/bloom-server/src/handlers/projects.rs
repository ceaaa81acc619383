// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project and membership operations.

use bloom_server_auth::{Action, MemberRole, Project, ProjectId, ProjectMember, Role, UserId};
use serde::Deserialize;
use tracing::instrument;

use crate::access::AccessControl;
use crate::error::{AccessError, Result, ServiceError};
use crate::state::Stores;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProjectRequest {
	pub name: String,
	#[serde(default)]
	pub description: String,
}

/// An empty `name` keeps the current name; `description` is always replaced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectRequest {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub description: String,
}

/// Adds a member by username. An empty role means `viewer`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddMemberRequest {
	pub username: String,
	#[serde(default)]
	pub role: String,
}

#[derive(Clone)]
pub struct ProjectHandler {
	stores: Stores,
	access: AccessControl,
}

impl ProjectHandler {
	pub fn new(stores: Stores, access: AccessControl) -> Self {
		Self { stores, access }
	}

	/// Projects the caller owns or is a member of.
	#[instrument(skip(self), fields(caller = %caller))]
	pub async fn list(&self, caller: &UserId) -> Result<Vec<Project>> {
		Ok(self.stores.projects.list_projects_for_user(caller).await?)
	}

	/// Creates a project owned by the caller.
	#[instrument(skip(self, req), fields(caller = %caller))]
	pub async fn create(&self, caller: &UserId, req: CreateProjectRequest) -> Result<Project> {
		let name = req.name.trim();
		if name.is_empty() {
			return Err(ServiceError::validation("project name is required"));
		}

		let project = Project::new(*caller, name, req.description);
		self.stores.projects.create_project(&project).await?;
		tracing::info!(project_id = %project.id, owner_id = %caller, "project created");

		self.fetch(&project.id).await
	}

	#[instrument(skip(self), fields(caller = %caller, project_id = %project_id))]
	pub async fn get(&self, caller: &UserId, project_id: &ProjectId) -> Result<Project> {
		self.access.require(project_id, caller, Action::ReadProject).await?;
		self.fetch(project_id).await
	}

	/// The caller's own role. A caller without access is denied rather than
	/// told `none`.
	#[instrument(skip(self), fields(caller = %caller, project_id = %project_id))]
	pub async fn role(&self, caller: &UserId, project_id: &ProjectId) -> Result<Role> {
		Ok(self.access.require(project_id, caller, Action::ViewRole).await?)
	}

	#[instrument(skip(self, req), fields(caller = %caller, project_id = %project_id))]
	pub async fn update(
		&self,
		caller: &UserId,
		project_id: &ProjectId,
		req: UpdateProjectRequest,
	) -> Result<Project> {
		self.access.require(project_id, caller, Action::UpdateProject).await?;

		let mut project = self.fetch(project_id).await?;
		let name = req.name.trim();
		if !name.is_empty() {
			project.name = name.to_string();
		}
		project.description = req.description;

		self.stores.projects.update_project(&project).await?;
		tracing::info!(project_id = %project_id, "project updated");
		self.fetch(project_id).await
	}

	/// Deletes the project along with its todos and memberships.
	#[instrument(skip(self), fields(caller = %caller, project_id = %project_id))]
	pub async fn delete(&self, caller: &UserId, project_id: &ProjectId) -> Result<()> {
		self.access.require(project_id, caller, Action::DeleteProject).await?;

		if !self.stores.projects.delete_project(project_id).await? {
			return Err(AccessError::ResourceNotFound(format!("project {project_id}")).into());
		}
		tracing::info!(project_id = %project_id, "project deleted");
		Ok(())
	}

	#[instrument(skip(self), fields(caller = %caller, project_id = %project_id))]
	pub async fn list_members(
		&self,
		caller: &UserId,
		project_id: &ProjectId,
	) -> Result<Vec<ProjectMember>> {
		self.access.require(project_id, caller, Action::ListMembers).await?;
		Ok(self.stores.memberships.list_memberships(project_id).await?)
	}

	/// Adds or re-roles a member.
	///
	/// Checked in order: the caller owns the project, the role is `viewer` or
	/// `editor`, the username exists, and it is not the owner's own. Nothing
	/// is written unless all pass.
	#[instrument(skip(self, req), fields(caller = %caller, project_id = %project_id))]
	pub async fn add_member(
		&self,
		caller: &UserId,
		project_id: &ProjectId,
		req: AddMemberRequest,
	) -> Result<ProjectMember> {
		self.access.require(project_id, caller, Action::AddMember).await?;

		let role = parse_member_role(&req.role)?;

		let username = req.username.trim();
		if username.is_empty() {
			return Err(ServiceError::validation("username is required"));
		}
		let target = self
			.stores
			.users
			.get_user_by_username(username)
			.await?
			.ok_or_else(|| AccessError::ResourceNotFound(format!("user {username}")))?;

		if target.id == *caller {
			return Err(AccessError::SelfMembershipRejected.into());
		}

		self
			.stores
			.memberships
			.upsert_membership(project_id, &target.id, role)
			.await?;
		tracing::info!(
			project_id = %project_id,
			user_id = %target.id,
			role = %role,
			"member added"
		);

		Ok(ProjectMember {
			project_id: *project_id,
			user_id: target.id,
			username: target.username,
			role,
		})
	}

	/// Removes a member. Removing someone who is not a member succeeds.
	#[instrument(skip(self), fields(caller = %caller, project_id = %project_id, user_id = %user_id))]
	pub async fn remove_member(
		&self,
		caller: &UserId,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<()> {
		self.access.require(project_id, caller, Action::RemoveMember).await?;

		let removed = self
			.stores
			.memberships
			.delete_membership(project_id, user_id)
			.await?;
		tracing::info!(project_id = %project_id, user_id = %user_id, removed, "member removed");
		Ok(())
	}

	async fn fetch(&self, project_id: &ProjectId) -> Result<Project> {
		self
			.stores
			.projects
			.get_project(project_id)
			.await?
			.ok_or_else(|| AccessError::ResourceNotFound(format!("project {project_id}")).into())
	}
}

fn parse_member_role(raw: &str) -> Result<MemberRole> {
	let raw = raw.trim();
	if raw.is_empty() {
		return Ok(MemberRole::default());
	}
	Ok(raw.parse::<MemberRole>()?)
}
