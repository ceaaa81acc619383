// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Errors from parsing the string forms of the closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
	#[error("role must be 'viewer' or 'editor', got '{0}'")]
	InvalidRole(String),

	#[error("status must be 'pending', 'in_progress', or 'completed', got '{0}'")]
	InvalidStatus(String),

	#[error("priority must be 'low', 'medium', or 'high', got '{0}'")]
	InvalidPriority(String),
}
