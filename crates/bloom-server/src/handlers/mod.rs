// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resource handlers.
//!
//! Every protected operation asks [`crate::access::AccessControl`] first, in
//! this order: the target exists, the caller's role is resolved, the role is
//! checked against the action. Storage is touched only after all three.

pub mod admin;
pub mod projects;
pub mod todos;

pub use admin::{AdminHandler, UpdateUserRequest};
pub use projects::{AddMemberRequest, CreateProjectRequest, ProjectHandler, UpdateProjectRequest};
pub use todos::{CreateTodoRequest, TodoHandler, UpdateTodoRequest};
