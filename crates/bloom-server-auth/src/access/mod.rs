// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project-scoped permission table.
//!
//! [`Action`] enumerates everything a caller can do to a project or its
//! todos, and [`is_allowed`] decides it from an already-resolved [`Role`].
//! Resolving that role needs storage and lives in `bloom-server`.
//!
//! [`Role`]: crate::Role

mod policy;
mod types;

pub use policy::{authorize, is_allowed};
pub use types::{Action, Verdict};
