// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access-control configuration.

use serde::Deserialize;

pub const DEFAULT_USER_SEARCH_LIMIT: u32 = 10;
pub const MAX_USER_SEARCH_LIMIT: u32 = 100;

/// Access-control configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct AccessConfig {
	/// Report "not found" instead of "forbidden" to callers with no role on
	/// the project, so project IDs cannot be probed for existence.
	pub conceal_existence: bool,
	/// Maximum number of results returned by user search.
	pub user_search_limit: u32,
}

impl Default for AccessConfig {
	fn default() -> Self {
		Self {
			conceal_existence: false,
			user_search_limit: DEFAULT_USER_SEARCH_LIMIT,
		}
	}
}

/// Access-control configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfigLayer {
	#[serde(default)]
	pub conceal_existence: Option<bool>,
	#[serde(default)]
	pub user_search_limit: Option<u32>,
}

impl AccessConfigLayer {
	pub fn merge(&mut self, other: AccessConfigLayer) {
		if other.conceal_existence.is_some() {
			self.conceal_existence = other.conceal_existence;
		}
		if other.user_search_limit.is_some() {
			self.user_search_limit = other.user_search_limit;
		}
	}

	pub fn finalize(self) -> AccessConfig {
		AccessConfig {
			conceal_existence: self.conceal_existence.unwrap_or(false),
			user_search_limit: self.user_search_limit.unwrap_or(DEFAULT_USER_SEARCH_LIMIT),
		}
	}
}
