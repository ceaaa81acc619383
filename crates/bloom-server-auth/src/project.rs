// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project types.
//!
//! This module provides:
//! - [`Project`] - a collection of todos with exactly one owner
//! - [`ProjectMember`] - links a user to a project with a viewer or editor role

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{MemberRole, ProjectId, UserId};

/// A project owned by a single user.
///
/// Ownership is not transferable. The owner is never represented as a
/// [`ProjectMember`] row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
	/// Unique identifier for this project.
	pub id: ProjectId,

	/// Display name of the project.
	pub name: String,

	/// Free-form description; may be empty.
	pub description: String,

	/// The user who owns this project.
	pub owner_id: UserId,

	/// Owner's username, populated on reads that join the users table.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub owner_name: Option<String>,

	/// When the project was created.
	pub created_at: DateTime<Utc>,

	/// When the project was last updated.
	pub updated_at: DateTime<Utc>,
}

impl Project {
	/// Creates a new project owned by `owner_id`.
	///
	/// Generates a new project ID and sets timestamps to now.
	pub fn new(owner_id: UserId, name: impl Into<String>, description: impl Into<String>) -> Self {
		let now = Utc::now();
		Self {
			id: ProjectId::generate(),
			name: name.into(),
			description: description.into(),
			owner_id,
			owner_name: None,
			created_at: now,
			updated_at: now,
		}
	}

	/// Returns true if `user_id` is this project's owner.
	pub fn is_owned_by(&self, user_id: &UserId) -> bool {
		self.owner_id == *user_id
	}
}

/// A user's membership in a project.
///
/// At most one row exists per (project, user) pair; re-adding a user
/// replaces the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
	pub project_id: ProjectId,
	pub user_id: UserId,
	pub username: String,
	pub role: MemberRole,
}
