// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Todo entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ProjectId, TodoId, TodoPriority, TodoStatus};

/// A single task within a project.
///
/// A todo carries no ACL of its own; access is always resolved through
/// `project_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
	pub id: TodoId,
	pub project_id: ProjectId,
	pub title: String,
	pub description: String,
	pub status: TodoStatus,
	pub priority: TodoPriority,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub deadline: Option<DateTime<Utc>>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Todo {
	/// Creates a pending, medium-priority todo in `project_id`.
	pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
		let now = Utc::now();
		Self {
			id: TodoId::generate(),
			project_id,
			title: title.into(),
			description: String::new(),
			status: TodoStatus::default(),
			priority: TodoPriority::default(),
			deadline: None,
			created_at: now,
			updated_at: now,
		}
	}

	pub fn is_completed(&self) -> bool {
		self.status == TodoStatus::Completed
	}
}
