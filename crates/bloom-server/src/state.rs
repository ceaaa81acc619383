// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Explicit wiring of storage backends into the engine and the handlers.

use std::sync::Arc;

use bloom_server_config::AccessConfig;
use bloom_server_db::{
	InMemoryStore, MembershipRepository, MembershipStore, ProjectRepository, ProjectStore,
	StatsRepository, StatsStore, TodoRepository, TodoStore, UserRepository, UserStore,
};
use sqlx::sqlite::SqlitePool;

use crate::access::AccessControl;
use crate::handlers::{AdminHandler, ProjectHandler, TodoHandler};

/// One handle per storage concern.
#[derive(Clone)]
pub struct Stores {
	pub users: Arc<dyn UserStore>,
	pub projects: Arc<dyn ProjectStore>,
	pub todos: Arc<dyn TodoStore>,
	pub memberships: Arc<dyn MembershipStore>,
	pub stats: Arc<dyn StatsStore>,
}

impl Stores {
	/// SQLite repositories sharing one pool.
	pub fn sqlite(pool: SqlitePool) -> Self {
		Self {
			users: Arc::new(UserRepository::new(pool.clone())),
			projects: Arc::new(ProjectRepository::new(pool.clone())),
			todos: Arc::new(TodoRepository::new(pool.clone())),
			memberships: Arc::new(MembershipRepository::new(pool.clone())),
			stats: Arc::new(StatsRepository::new(pool)),
		}
	}

	/// Every concern served by the same in-memory store.
	pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
		Self {
			users: store.clone(),
			projects: store.clone(),
			todos: store.clone(),
			memberships: store.clone(),
			stats: store,
		}
	}
}

/// The engine and the three handler groups, built from one set of stores.
#[derive(Clone)]
pub struct AppState {
	pub access: AccessControl,
	pub projects: ProjectHandler,
	pub todos: TodoHandler,
	pub admin: AdminHandler,
}

impl AppState {
	pub fn new(stores: Stores, config: &AccessConfig) -> Self {
		let access = AccessControl::new(stores.memberships.clone())
			.with_conceal_existence(config.conceal_existence);

		Self {
			projects: ProjectHandler::new(stores.clone(), access.clone()),
			todos: TodoHandler::new(stores.clone(), access.clone()),
			admin: AdminHandler::new(stores, config.user_search_limit),
			access,
		}
	}
}
