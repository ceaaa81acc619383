// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database layer for Bloom server.
//!
//! The store traits in [`store`] are the only thing the access-control engine
//! and the handlers depend on. Two backends implement them:
//!
//! - SQLite repositories ([`UserRepository`], [`ProjectRepository`],
//!   [`MembershipRepository`], [`TodoRepository`], [`StatsRepository`])
//! - [`InMemoryStore`], a single value implementing every trait, for tests

pub mod error;
pub mod memory;
pub mod membership;
pub mod pool;
pub mod project;
pub mod stats;
pub mod store;
pub mod todo;
pub mod types;
pub mod user;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{DbError, Result};
pub use memory::InMemoryStore;
pub use membership::MembershipRepository;
pub use pool::{create_pool, run_migrations};
pub use project::ProjectRepository;
pub use stats::StatsRepository;
pub use store::{MembershipStore, ProjectStore, StatsStore, TodoStore, UserStore};
pub use todo::TodoRepository;
pub use types::Stats;
pub use user::UserRepository;
