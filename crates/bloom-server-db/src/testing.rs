// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pools and fixtures for tests.

use bloom_server_auth::{Project, User};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::pool::run_migrations;
use crate::project::ProjectRepository;
use crate::user::UserRepository;

/// A migrated in-memory database.
///
/// The pool is pinned to one connection that never expires, since every
/// `:memory:` connection is its own database.
pub async fn create_test_pool() -> SqlitePool {
	let options = SqliteConnectOptions::from_str(":memory:")
		.expect("valid in-memory url")
		.foreign_keys(true);

	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect_with(options)
		.await
		.expect("Failed to create test pool");

	run_migrations(&pool).await.expect("Failed to migrate test pool");
	pool
}

pub async fn insert_user(pool: &SqlitePool, username: &str) -> User {
	let user = User::new(username, format!("{username}@example.com"));
	UserRepository::new(pool.clone())
		.create_user(&user)
		.await
		.expect("Failed to insert test user");
	user
}

pub async fn insert_project(pool: &SqlitePool, owner: &User, name: &str) -> Project {
	let project = Project::new(owner.id, name, "");
	ProjectRepository::new(pool.clone())
		.create_project(&project)
		.await
		.expect("Failed to insert test project");
	project
}
