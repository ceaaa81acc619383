// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity, role and permission types for Bloom.
//!
//! This crate holds everything the access-control engine reasons over that
//! does not require I/O:
//!
//! - [`types`]: ID newtypes and the closed role/status/priority enumerations
//! - [`user`], [`project`], [`todo`]: the entities
//! - [`access`]: the action set and the permission table
//!
//! Role resolution against storage lives in `bloom-server`; this crate only
//! answers "given this role, is this action allowed".

pub mod access;
pub mod error;
pub mod project;
pub mod todo;
pub mod types;
pub mod user;

pub use access::{is_allowed, Action, Verdict};
pub use error::ParseError;
pub use project::{Project, ProjectMember};
pub use todo::Todo;
pub use types::{MemberRole, ProjectId, Role, TodoId, TodoPriority, TodoStatus, UserId};
pub use user::User;
