// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error taxonomy of the access-control engine and the resource handlers.

use bloom_server_auth::{Action, ParseError, Role};
use bloom_server_db::DbError;

/// Errors produced while resolving or enforcing access to a project.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
	/// The target project or todo does not exist.
	#[error("{0} not found")]
	ResourceNotFound(String),

	/// The caller's role is insufficient for the action.
	#[error("{role} role may not perform {action}")]
	AccessDenied { action: Action, role: Role },

	/// A membership role outside `viewer`/`editor` was requested.
	#[error("invalid role '{0}': must be 'viewer' or 'editor'")]
	InvalidRole(String),

	/// The owner tried to add themselves as a member.
	#[error("you are already the owner of this project")]
	SelfMembershipRejected,

	/// The storage collaborator failed. Never retried here.
	#[error("storage unavailable: {0}")]
	StorageUnavailable(#[source] DbError),
}

impl From<DbError> for AccessError {
	fn from(e: DbError) -> Self {
		match e {
			DbError::NotFound(what) => AccessError::ResourceNotFound(what),
			other => AccessError::StorageUnavailable(other),
		}
	}
}

/// Errors returned by the resource handlers.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
	#[error(transparent)]
	Access(#[from] AccessError),

	/// Malformed input, rejected before any storage write.
	#[error("validation error: {0}")]
	Validation(String),

	/// A uniqueness constraint was violated.
	#[error("conflict: {0}")]
	Conflict(String),

	/// The operation is reserved for administrators.
	#[error("admin access required")]
	AdminRequired,
}

impl ServiceError {
	pub fn validation(msg: impl Into<String>) -> Self {
		Self::Validation(msg.into())
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self, ServiceError::Access(AccessError::ResourceNotFound(_)))
	}

	pub fn is_access_denied(&self) -> bool {
		matches!(self, ServiceError::Access(AccessError::AccessDenied { .. }))
	}
}

impl From<DbError> for ServiceError {
	fn from(e: DbError) -> Self {
		match e {
			DbError::Conflict(msg) => ServiceError::Conflict(msg),
			other => ServiceError::Access(other.into()),
		}
	}
}

impl From<ParseError> for ServiceError {
	fn from(e: ParseError) -> Self {
		match e {
			ParseError::InvalidRole(role) => ServiceError::Access(AccessError::InvalidRole(role)),
			other => ServiceError::Validation(other.to_string()),
		}
	}
}

pub type Result<T> = std::result::Result<T, ServiceError>;
