// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use bloom_server::{AccessError, AddMemberRequest, ServiceError};
use bloom_server_auth::{MemberRole, ProjectId, Role, Todo, UserId};
use bloom_server_db::DbError;

use super::support::TestApp;

fn request(username: &str, role: &str) -> AddMemberRequest {
	AddMemberRequest {
		username: username.to_string(),
		role: role.to_string(),
	}
}

#[tokio::test]
async fn test_add_member_defaults_to_viewer() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let member = app
			.state
			.projects
			.add_member(&f.alice.id, &f.project.id, request("bob", ""))
			.await
			.unwrap();
		assert_eq!(member.role, MemberRole::Viewer);
		assert_eq!(member.username, "bob");
		assert_eq!(member.user_id, f.bob.id);
	}
}

#[tokio::test]
async fn test_re_adding_member_changes_role() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let projects = &app.state.projects;
		projects
			.add_member(&f.alice.id, &f.project.id, request("bob", "viewer"))
			.await
			.unwrap();
		projects
			.add_member(&f.alice.id, &f.project.id, request("bob", "editor"))
			.await
			.unwrap();

		let members = projects.list_members(&f.alice.id, &f.project.id).await.unwrap();
		assert_eq!(members.len(), 1, "{:?}", app.backend);
		assert_eq!(members[0].role, MemberRole::Editor);
	}
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let err = app
			.state
			.projects
			.add_member(&f.alice.id, &f.project.id, request("mallory", "viewer"))
			.await
			.unwrap_err();
		assert!(err.is_not_found());
	}
}

#[tokio::test]
async fn test_only_owner_manages_members() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		app.add_member(&f.bob, MemberRole::Editor).await;

		let err = app
			.state
			.projects
			.add_member(&f.bob.id, &f.project.id, request("carol", "viewer"))
			.await
			.unwrap_err();
		assert!(matches!(
			err,
			ServiceError::Access(AccessError::AccessDenied {
				role: Role::Editor,
				..
			})
		));

		let err = app
			.state
			.projects
			.remove_member(&f.bob.id, &f.project.id, &f.bob.id)
			.await
			.unwrap_err();
		assert!(err.is_access_denied());
	}
}

#[tokio::test]
async fn test_remove_member_revokes_access_and_is_idempotent() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		app.add_member(&f.bob, MemberRole::Editor).await;
		let projects = &app.state.projects;

		projects
			.remove_member(&f.alice.id, &f.project.id, &f.bob.id)
			.await
			.unwrap();
		projects
			.remove_member(&f.alice.id, &f.project.id, &f.bob.id)
			.await
			.unwrap();

		let role = app
			.state
			.access
			.resolve_role(&f.project.id, &f.bob.id)
			.await
			.unwrap();
		assert_eq!(role, Role::None, "{:?}", app.backend);
	}
}

#[tokio::test]
async fn test_members_listed_by_username() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		app.add_member(&f.dave, MemberRole::Viewer).await;
		app.add_member(&f.bob, MemberRole::Editor).await;
		app.add_member(&f.carol, MemberRole::Viewer).await;

		let names: Vec<_> = app
			.state
			.projects
			.list_members(&f.carol.id, &f.project.id)
			.await
			.unwrap()
			.into_iter()
			.map(|m| m.username)
			.collect();
		assert_eq!(names, vec!["bob", "carol", "dave"], "{:?}", app.backend);
	}
}

#[tokio::test]
async fn test_writes_against_missing_rows_are_not_found_on_every_backend() {
	for app in TestApp::all().await {
		let f = &app.fixtures;

		let result = app
			.stores
			.memberships
			.upsert_membership(&f.project.id, &UserId::generate(), MemberRole::Viewer)
			.await;
		assert!(matches!(result, Err(DbError::NotFound(_))), "{:?}: {result:?}", app.backend);

		let result = app
			.stores
			.memberships
			.upsert_membership(&ProjectId::generate(), &f.bob.id, MemberRole::Editor)
			.await;
		assert!(matches!(result, Err(DbError::NotFound(_))), "{:?}: {result:?}", app.backend);

		let result = app
			.stores
			.todos
			.create_todo(&Todo::new(ProjectId::generate(), "orphan"))
			.await;
		assert!(matches!(result, Err(DbError::NotFound(_))), "{:?}: {result:?}", app.backend);

		// Surfaces as a permanent not-found, never as retryable unavailability.
		let err = ServiceError::from(DbError::NotFound("user".to_string()));
		assert!(err.is_not_found());
	}
}
