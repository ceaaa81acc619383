// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bloom server: access control over projects and todos.
//!
//! - [`access`]: role resolution and enforcement
//! - [`handlers`]: project, member, todo and admin operations
//! - [`state`]: wiring storage backends into both

pub mod access;
pub mod error;
pub mod handlers;
pub mod state;

pub use access::AccessControl;
pub use error::{AccessError, Result, ServiceError};
pub use handlers::{
	AddMemberRequest, AdminHandler, CreateProjectRequest, CreateTodoRequest, ProjectHandler,
	TodoHandler, UpdateProjectRequest, UpdateTodoRequest, UpdateUserRequest,
};
pub use state::{AppState, Stores};

pub use bloom_server_config::ServerConfig;
pub use bloom_server_db as db;
