// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for identity and authorization.
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs ([`UserId`], [`ProjectId`],
//!   [`TodoId`]) preventing accidental mixing
//! - **Roles**: the effective project role ([`Role`]) with a total order, and the
//!   subset that can be stored on a membership row ([`MemberRole`])
//! - **Todo enums**: [`TodoStatus`] and [`TodoPriority`]
//!
//! All ID types implement transparent serde serialization (as UUID strings) and
//! provide conversion to/from [`uuid::Uuid`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ParseError;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl FromStr for $name {
			type Err = uuid::Error;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Uuid::parse_str(s).map(Self)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(ProjectId, "Unique identifier for a project.");
define_id_type!(TodoId, "Unique identifier for a todo.");

// =============================================================================
// Roles
// =============================================================================

/// A caller's effective role on a project.
///
/// Variants are declared lowest first so the derived ordering is
/// `None < Viewer < Editor < Owner`.
#[derive(
	Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	/// No access to the project.
	#[default]
	None,
	/// Read-only access to the project and its todos.
	Viewer,
	/// Read-write access to todos.
	Editor,
	/// The project's single owner. Never stored on a membership row.
	Owner,
}

impl Role {
	/// Returns all roles, lowest first.
	pub fn all() -> &'static [Role] {
		&[Role::None, Role::Viewer, Role::Editor, Role::Owner]
	}

	/// Returns true if this role grants any access at all.
	pub fn is_member(&self) -> bool {
		*self != Role::None
	}

	/// Returns true if this role has at least the permissions of the given role.
	pub fn has_permission_of(&self, other: Role) -> bool {
		self.is_member() && *self >= other
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::None => write!(f, "none"),
			Role::Viewer => write!(f, "viewer"),
			Role::Editor => write!(f, "editor"),
			Role::Owner => write!(f, "owner"),
		}
	}
}

impl From<MemberRole> for Role {
	fn from(role: MemberRole) -> Self {
		match role {
			MemberRole::Viewer => Role::Viewer,
			MemberRole::Editor => Role::Editor,
		}
	}
}

/// Roles that can be assigned through a membership row.
///
/// Ownership is tracked on the project itself, so there is no `owner` variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
	#[default]
	Viewer,
	Editor,
}

impl MemberRole {
	/// Returns all assignable membership roles.
	pub fn all() -> &'static [MemberRole] {
		&[MemberRole::Viewer, MemberRole::Editor]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			MemberRole::Viewer => "viewer",
			MemberRole::Editor => "editor",
		}
	}
}

impl fmt::Display for MemberRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for MemberRole {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"viewer" => Ok(MemberRole::Viewer),
			"editor" => Ok(MemberRole::Editor),
			other => Err(ParseError::InvalidRole(other.to_string())),
		}
	}
}

// =============================================================================
// Todo status and priority
// =============================================================================

/// Progress state of a todo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
	#[default]
	Pending,
	InProgress,
	Completed,
}

impl TodoStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			TodoStatus::Pending => "pending",
			TodoStatus::InProgress => "in_progress",
			TodoStatus::Completed => "completed",
		}
	}
}

impl fmt::Display for TodoStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for TodoStatus {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"pending" => Ok(TodoStatus::Pending),
			"in_progress" => Ok(TodoStatus::InProgress),
			"completed" => Ok(TodoStatus::Completed),
			other => Err(ParseError::InvalidStatus(other.to_string())),
		}
	}
}

/// Priority of a todo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoPriority {
	Low,
	#[default]
	Medium,
	High,
}

impl TodoPriority {
	pub fn as_str(&self) -> &'static str {
		match self {
			TodoPriority::Low => "low",
			TodoPriority::Medium => "medium",
			TodoPriority::High => "high",
		}
	}
}

impl fmt::Display for TodoPriority {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for TodoPriority {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"low" => Ok(TodoPriority::Low),
			"medium" => Ok(TodoPriority::Medium),
			"high" => Ok(TodoPriority::High),
			other => Err(ParseError::InvalidPriority(other.to_string())),
		}
	}
}
