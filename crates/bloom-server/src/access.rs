// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access-control engine.
//!
//! [`AccessControl`] is the single authority consulted by every protected
//! operation. It resolves a caller's effective role on a project from the
//! [`MembershipStore`] and applies the permission table from
//! `bloom_server_auth::access`.
//!
//! # Effective role
//!
//! 1. If the project does not exist: [`AccessError::ResourceNotFound`].
//! 2. If the caller is the project's owner: [`Role::Owner`]. This wins over
//!    any membership row stored for the same pair.
//! 3. If a membership row exists: its role.
//! 4. Otherwise [`Role::None`].
//!
//! Each lookup is attempted once. Storage failures surface immediately as
//! [`AccessError::StorageUnavailable`]; retry policy belongs to the caller.

use std::sync::Arc;

use bloom_server_auth::access::authorize;
use bloom_server_auth::{Action, ProjectId, Role, TodoId, UserId, Verdict};
use bloom_server_db::MembershipStore;
use tracing::instrument;

use crate::error::AccessError;

#[derive(Clone)]
pub struct AccessControl {
	memberships: Arc<dyn MembershipStore>,
	conceal_existence: bool,
}

impl AccessControl {
	pub fn new(memberships: Arc<dyn MembershipStore>) -> Self {
		Self {
			memberships,
			conceal_existence: false,
		}
	}

	/// Report callers without any role as "not found" rather than "denied".
	pub fn with_conceal_existence(mut self, conceal: bool) -> Self {
		self.conceal_existence = conceal;
		self
	}

	/// Resolves the caller's effective role on a project.
	#[instrument(skip(self), fields(project_id = %project_id, user_id = %user_id), err)]
	pub async fn resolve_role(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<Role, AccessError> {
		let owner = self
			.memberships
			.get_project_owner(project_id)
			.await
			.map_err(|e| storage_failure(e, "get_project_owner"))?
			.ok_or_else(|| AccessError::ResourceNotFound(format!("project {project_id}")))?;

		if owner == *user_id {
			return Ok(Role::Owner);
		}

		let role = self
			.memberships
			.get_membership_role(project_id, user_id)
			.await
			.map_err(|e| storage_failure(e, "get_membership_role"))?
			.map(Role::from)
			.unwrap_or(Role::None);

		tracing::debug!(project_id = %project_id, user_id = %user_id, role = %role, "resolved role");
		Ok(role)
	}

	/// Resolves the project a todo belongs to.
	#[instrument(skip(self), fields(todo_id = %todo_id), err)]
	pub async fn resolve_todo_project(&self, todo_id: &TodoId) -> Result<ProjectId, AccessError> {
		self
			.memberships
			.get_todo_parent_project(todo_id)
			.await
			.map_err(|e| storage_failure(e, "get_todo_parent_project"))?
			.ok_or_else(|| AccessError::ResourceNotFound(format!("todo {todo_id}")))
	}

	/// Resolves the caller's role and evaluates `action` against it.
	///
	/// A denial is a successful call returning a non-permitting verdict.
	pub async fn authorize(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
		action: Action,
	) -> Result<Verdict, AccessError> {
		let role = self.resolve_role(project_id, user_id).await?;
		Ok(authorize(role, action))
	}

	/// True iff the caller holds any role on the project.
	pub async fn is_member(&self, project_id: &ProjectId, user_id: &UserId) -> Result<bool, AccessError> {
		Ok(self.resolve_role(project_id, user_id).await?.is_member())
	}

	/// Like [`authorize`](Self::authorize), but turns a denial into an error.
	///
	/// Returns the caller's role on success.
	pub async fn require(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
		action: Action,
	) -> Result<Role, AccessError> {
		let verdict = self.authorize(project_id, user_id, action).await?;
		self.enforce(verdict, project_id, user_id, action, || format!("project {project_id}"))
	}

	/// Resolves a todo to its parent project, then requires `action` there.
	///
	/// A todo whose project has vanished reports the project as not found.
	/// When concealing, a caller without a role sees the todo itself as not
	/// found, so neither its existence nor its parent project is revealed.
	pub async fn require_for_todo(
		&self,
		todo_id: &TodoId,
		user_id: &UserId,
		action: Action,
	) -> Result<(ProjectId, Role), AccessError> {
		let project_id = self.resolve_todo_project(todo_id).await?;
		let verdict = self.authorize(&project_id, user_id, action).await?;
		let role = self.enforce(verdict, &project_id, user_id, action, || format!("todo {todo_id}"))?;
		Ok((project_id, role))
	}

	fn enforce(
		&self,
		verdict: Verdict,
		project_id: &ProjectId,
		user_id: &UserId,
		action: Action,
		concealed: impl FnOnce() -> String,
	) -> Result<Role, AccessError> {
		if verdict.permitted {
			return Ok(verdict.role);
		}

		tracing::warn!(
			project_id = %project_id,
			user_id = %user_id,
			action = %action,
			role = %verdict.role,
			"access denied"
		);

		if self.conceal_existence && !verdict.role.is_member() {
			return Err(AccessError::ResourceNotFound(concealed()));
		}
		Err(AccessError::AccessDenied {
			action,
			role: verdict.role,
		})
	}
}

fn storage_failure(e: bloom_server_db::DbError, operation: &'static str) -> AccessError {
	tracing::error!(error = %e, operation, "membership store failed");
	AccessError::from(e)
}
