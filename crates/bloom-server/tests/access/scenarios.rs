// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end authorization scenarios for shared projects.

use bloom_server::{AccessError, AddMemberRequest, CreateTodoRequest, ServiceError};
use bloom_server_auth::{Action, MemberRole, Role};

use super::support::TestApp;

#[tokio::test]
async fn editor_can_update_todos_but_not_delete_project() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let access = &app.state.access;

		let verdict = access
			.authorize(&f.project.id, &f.bob.id, Action::UpdateProject)
			.await
			.unwrap();
		assert!(!verdict.permitted, "{:?}", app.backend);
		assert_eq!(verdict.role, Role::None);

		app.add_member(&f.bob, MemberRole::Editor).await;

		let verdict = access
			.authorize(&f.project.id, &f.bob.id, Action::UpdateTodo)
			.await
			.unwrap();
		assert!(verdict.permitted, "{:?}", app.backend);
		assert_eq!(verdict.role, Role::Editor);

		let verdict = access
			.authorize(&f.project.id, &f.bob.id, Action::DeleteProject)
			.await
			.unwrap();
		assert!(!verdict.permitted, "{:?}", app.backend);
	}
}

#[tokio::test]
async fn viewer_can_read_but_not_create_todos() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		app.state
			.projects
			.add_member(
				&f.alice.id,
				&f.project.id,
				AddMemberRequest {
					username: "carol".to_string(),
					role: "viewer".to_string(),
				},
			)
			.await
			.unwrap();

		let access = &app.state.access;
		assert!(!access
			.authorize(&f.project.id, &f.carol.id, Action::CreateTodo)
			.await
			.unwrap()
			.permitted);
		assert!(access
			.authorize(&f.project.id, &f.carol.id, Action::ReadTodo)
			.await
			.unwrap()
			.permitted);

		let err = app
			.state
			.todos
			.create(
				&f.carol.id,
				&f.project.id,
				CreateTodoRequest {
					title: "sneaky".to_string(),
					..Default::default()
				},
			)
			.await
			.unwrap_err();
		assert!(err.is_access_denied(), "{:?}: {err}", app.backend);
	}
}

#[tokio::test]
async fn owner_cannot_add_themselves() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let err = app
			.state
			.projects
			.add_member(
				&f.alice.id,
				&f.project.id,
				AddMemberRequest {
					username: "alice".to_string(),
					role: "editor".to_string(),
				},
			)
			.await
			.unwrap_err();
		assert!(matches!(
			err,
			ServiceError::Access(AccessError::SelfMembershipRejected)
		));

		let members = app
			.state
			.projects
			.list_members(&f.alice.id, &f.project.id)
			.await
			.unwrap();
		assert!(members.is_empty(), "{:?}", app.backend);
	}
}

#[tokio::test]
async fn owner_role_is_rejected_before_any_write() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let err = app
			.state
			.projects
			.add_member(
				&f.alice.id,
				&f.project.id,
				AddMemberRequest {
					username: "dave".to_string(),
					role: "owner".to_string(),
				},
			)
			.await
			.unwrap_err();
		assert!(matches!(
			err,
			ServiceError::Access(AccessError::InvalidRole(_))
		));

		let role = app
			.state
			.access
			.resolve_role(&f.project.id, &f.dave.id)
			.await
			.unwrap();
		assert_eq!(role, Role::None, "{:?}", app.backend);
	}
}

#[tokio::test]
async fn todo_access_is_inherited_from_parent_project() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let todo = app
			.state
			.todos
			.create(
				&f.alice.id,
				&f.project.id,
				CreateTodoRequest {
					title: "water tomatoes".to_string(),
					..Default::default()
				},
			)
			.await
			.unwrap();
		app.add_member(&f.bob, MemberRole::Editor).await;

		let (project_id, role) = app
			.state
			.access
			.require_for_todo(&todo.id, &f.bob.id, Action::UpdateTodo)
			.await
			.unwrap();
		assert_eq!(project_id, f.project.id);
		assert_eq!(role, Role::Editor, "{:?}", app.backend);
	}
}

#[tokio::test]
async fn repeated_upsert_is_idempotent_and_absent_delete_succeeds() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		app.add_member(&f.bob, MemberRole::Editor).await;
		app.add_member(&f.bob, MemberRole::Editor).await;

		let role = app
			.state
			.access
			.resolve_role(&f.project.id, &f.bob.id)
			.await
			.unwrap();
		assert_eq!(role, Role::Editor);

		let removed = app
			.stores
			.memberships
			.delete_membership(&f.project.id, &f.carol.id)
			.await
			.unwrap();
		assert!(!removed, "{:?}", app.backend);
	}
}

#[tokio::test]
async fn unavailable_storage_surfaces_as_typed_error() {
	let app = TestApp::new(super::support::Backend::Memory).await;
	let f = &app.fixtures;
	app.memory.as_ref().unwrap().set_unavailable(true);

	let err = app
		.state
		.projects
		.get(&f.alice.id, &f.project.id)
		.await
		.unwrap_err();
	assert!(matches!(
		err,
		ServiceError::Access(AccessError::StorageUnavailable(_))
	));
}
