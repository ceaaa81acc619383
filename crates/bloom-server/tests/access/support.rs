// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use bloom_server::{AppState, CreateProjectRequest, Stores};
use bloom_server_auth::{MemberRole, Project, User};
use bloom_server_config::AccessConfig;
use bloom_server_db::testing::create_test_pool;
use bloom_server_db::InMemoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
	Sqlite,
	Memory,
}

pub struct Fixtures {
	pub alice: User,
	pub bob: User,
	pub carol: User,
	pub dave: User,
	pub admin: User,
	/// Owned by alice, no members.
	pub project: Project,
}

pub struct TestApp {
	pub backend: Backend,
	pub state: AppState,
	pub stores: Stores,
	/// Set only for the in-memory backend.
	pub memory: Option<Arc<InMemoryStore>>,
	pub fixtures: Fixtures,
}

impl TestApp {
	pub async fn new(backend: Backend) -> Self {
		Self::with_config(backend, AccessConfig::default()).await
	}

	pub async fn with_config(backend: Backend, config: AccessConfig) -> Self {
		let (stores, memory) = match backend {
			Backend::Sqlite => (Stores::sqlite(create_test_pool().await), None),
			Backend::Memory => {
				let store = Arc::new(InMemoryStore::new());
				(Stores::in_memory(store.clone()), Some(store))
			}
		};

		let alice = create_user(&stores, "alice", false).await;
		let bob = create_user(&stores, "bob", false).await;
		let carol = create_user(&stores, "carol", false).await;
		let dave = create_user(&stores, "dave", false).await;
		let admin = create_user(&stores, "admin", true).await;

		let state = AppState::new(stores.clone(), &config);
		let project = state
			.projects
			.create(
				&alice.id,
				CreateProjectRequest {
					name: "Garden".to_string(),
					description: "vegetable beds".to_string(),
				},
			)
			.await
			.expect("create fixture project");

		Self {
			backend,
			state,
			stores,
			memory,
			fixtures: Fixtures {
				alice,
				bob,
				carol,
				dave,
				admin,
				project,
			},
		}
	}

	/// One app per backend.
	pub async fn all() -> Vec<TestApp> {
		vec![
			TestApp::new(Backend::Sqlite).await,
			TestApp::new(Backend::Memory).await,
		]
	}

	pub async fn add_member(&self, user: &User, role: MemberRole) {
		self.stores
			.memberships
			.upsert_membership(&self.fixtures.project.id, &user.id, role)
			.await
			.expect("upsert fixture membership");
	}
}

async fn create_user(stores: &Stores, username: &str, is_admin: bool) -> User {
	let user = User::new(username, format!("{username}@example.com")).with_admin(is_admin);
	stores
		.users
		.create_user(&user)
		.await
		.expect("create fixture user");
	user
}
