// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Role;

/// Operations that can be performed on a project or its todos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	ReadProject,
	ReadTodo,
	ListTodos,
	ListMembers,
	/// Ask for one's own role on the project.
	ViewRole,
	CreateTodo,
	UpdateTodo,
	DeleteTodo,
	UpdateProject,
	DeleteProject,
	AddMember,
	RemoveMember,
}

impl Action {
	/// Returns every action.
	pub fn all() -> &'static [Action] {
		&[
			Action::ReadProject,
			Action::ReadTodo,
			Action::ListTodos,
			Action::ListMembers,
			Action::ViewRole,
			Action::CreateTodo,
			Action::UpdateTodo,
			Action::DeleteTodo,
			Action::UpdateProject,
			Action::DeleteProject,
			Action::AddMember,
			Action::RemoveMember,
		]
	}

	/// The minimum role that permits this action.
	pub fn required_role(&self) -> Role {
		match self {
			Action::ReadProject
			| Action::ReadTodo
			| Action::ListTodos
			| Action::ListMembers
			| Action::ViewRole => Role::Viewer,
			Action::CreateTodo | Action::UpdateTodo | Action::DeleteTodo => Role::Editor,
			Action::UpdateProject
			| Action::DeleteProject
			| Action::AddMember
			| Action::RemoveMember => Role::Owner,
		}
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Action::ReadProject => "read_project",
			Action::ReadTodo => "read_todo",
			Action::ListTodos => "list_todos",
			Action::ListMembers => "list_members",
			Action::ViewRole => "view_role",
			Action::CreateTodo => "create_todo",
			Action::UpdateTodo => "update_todo",
			Action::DeleteTodo => "delete_todo",
			Action::UpdateProject => "update_project",
			Action::DeleteProject => "delete_project",
			Action::AddMember => "add_member",
			Action::RemoveMember => "remove_member",
		};
		f.write_str(s)
	}
}

/// Outcome of an authorization check, paired with the role it was decided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
	pub permitted: bool,
	pub role: Role,
}

impl Verdict {
	pub fn permit(role: Role) -> Self {
		Self {
			permitted: true,
			role,
		}
	}

	pub fn deny(role: Role) -> Self {
		Self {
			permitted: false,
			role,
		}
	}
}
