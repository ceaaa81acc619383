// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::Deserialize;

/// Deployment environment settings.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
	/// Free-form environment name, e.g. `development` or `production`.
	pub environment: String,
}

impl Default for RuntimeConfig {
	fn default() -> Self {
		Self {
			environment: "development".to_string(),
		}
	}
}

impl RuntimeConfig {
	pub fn is_production(&self) -> bool {
		self.environment.eq_ignore_ascii_case("production")
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeConfigLayer {
	#[serde(default)]
	pub environment: Option<String>,
}

impl RuntimeConfigLayer {
	pub fn merge(&mut self, other: RuntimeConfigLayer) {
		if other.environment.is_some() {
			self.environment = other.environment;
		}
	}

	pub fn finalize(self) -> RuntimeConfig {
		RuntimeConfig {
			environment: self
				.environment
				.unwrap_or_else(|| RuntimeConfig::default().environment),
		}
	}
}
