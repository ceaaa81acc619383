// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod access;
mod database;
mod logging;
mod runtime;

pub use access::{
	AccessConfig, AccessConfigLayer, DEFAULT_USER_SEARCH_LIMIT, MAX_USER_SEARCH_LIMIT,
};
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use runtime::{RuntimeConfig, RuntimeConfigLayer};
