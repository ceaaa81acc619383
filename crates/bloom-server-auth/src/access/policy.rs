// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission table evaluation.
//!
//! Both functions here are pure: the role has already been resolved, so a
//! decision is a single comparison against [`Action::required_role`].

use tracing::instrument;

use super::types::{Action, Verdict};
use crate::types::Role;

/// Evaluates whether `role` is allowed to perform `action`.
///
/// `Role::None` is denied everything, and any role at or above the action's
/// required role is allowed.
#[instrument(level = "debug", ret)]
pub fn is_allowed(role: Role, action: Action) -> bool {
	role.has_permission_of(action.required_role())
}

/// Like [`is_allowed`], but returns a [`Verdict`] carrying the role.
pub fn authorize(role: Role, action: Action) -> Verdict {
	if is_allowed(role, action) {
		Verdict::permit(role)
	} else {
		Verdict::deny(role)
	}
}
