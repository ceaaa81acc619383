// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration produced by each source.

use serde::Deserialize;

use crate::sections::{AccessConfigLayer, DatabaseConfigLayer, LoggingConfigLayer, RuntimeConfigLayer};

/// One source's view of the configuration. Unset sections and fields are
/// `None` and leave lower-precedence values in place when merged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
	#[serde(default)]
	pub access: Option<AccessConfigLayer>,
	#[serde(default)]
	pub runtime: Option<RuntimeConfigLayer>,
}

fn merge_section<T, F>(target: &mut Option<T>, other: Option<T>, merge: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), other) {
		(Some(existing), Some(incoming)) => merge(existing, incoming),
		(None, Some(incoming)) => *target = Some(incoming),
		(_, None) => {}
	}
}

impl ServerConfigLayer {
	/// Merge `other` on top of `self`.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_section(&mut self.database, other.database, DatabaseConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
		merge_section(&mut self.access, other.access, AccessConfigLayer::merge);
		merge_section(&mut self.runtime, other.runtime, RuntimeConfigLayer::merge);
	}
}
