// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use bloom_server::{CreateTodoRequest, ServiceError, UpdateTodoRequest, UpdateUserRequest};
use bloom_server_auth::UserId;
use bloom_server_config::AccessConfig;

use super::support::{Backend, TestApp};

#[tokio::test]
async fn test_non_admin_is_refused() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let admin = &app.state.admin;

		assert!(matches!(admin.stats(&f.alice.id).await, Err(ServiceError::AdminRequired)));
		assert!(matches!(admin.list_users(&f.alice.id).await, Err(ServiceError::AdminRequired)));
		assert!(matches!(
			admin.delete_user(&f.alice.id, &f.bob.id).await,
			Err(ServiceError::AdminRequired)
		));
		assert!(matches!(
			admin
				.update_user(&f.alice.id, &f.alice.id, UpdateUserRequest {
					is_admin: Some(true),
					..Default::default()
				})
				.await,
			Err(ServiceError::AdminRequired)
		));
		// Unknown callers are treated as non-admins.
		assert!(matches!(admin.stats(&UserId::generate()).await, Err(ServiceError::AdminRequired)));
	}
}

#[tokio::test]
async fn test_stats_counts() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		for title in ["a", "b", "c"] {
			app.state
				.todos
				.create(&f.alice.id, &f.project.id, CreateTodoRequest {
					title: title.to_string(),
					..Default::default()
				})
				.await
				.unwrap();
		}
		let todo = app
			.state
			.todos
			.list(&f.alice.id, &f.project.id)
			.await
			.unwrap()
			.remove(0);
		app.state
			.todos
			.update(&f.alice.id, &todo.id, UpdateTodoRequest {
				status: Some("completed".to_string()),
				..Default::default()
			})
			.await
			.unwrap();

		let stats = app.state.admin.stats(&f.admin.id).await.unwrap();
		assert_eq!(stats.total_users, 5, "{:?}", app.backend);
		assert_eq!(stats.total_projects, 1);
		assert_eq!(stats.total_todos, 3);
		assert_eq!(stats.completed_todos, 1);
	}
}

#[tokio::test]
async fn test_list_and_update_users() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let admin = &app.state.admin;

		let users = admin.list_users(&f.admin.id).await.unwrap();
		assert_eq!(users.len(), 5);

		let promoted = admin
			.update_user(&f.admin.id, &f.bob.id, UpdateUserRequest {
				email: Some("robert@example.com".to_string()),
				is_admin: Some(true),
				..Default::default()
			})
			.await
			.unwrap();
		assert!(promoted.is_admin);
		assert_eq!(promoted.username, "bob");
		assert_eq!(promoted.email, "robert@example.com");

		// The new flag takes effect on the next call.
		assert!(admin.stats(&f.bob.id).await.is_ok(), "{:?}", app.backend);
	}
}

#[tokio::test]
async fn test_update_user_rejects_taken_username() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let err = app
			.state
			.admin
			.update_user(&f.admin.id, &f.bob.id, UpdateUserRequest {
				username: Some("carol".to_string()),
				..Default::default()
			})
			.await
			.unwrap_err();
		assert!(matches!(err, ServiceError::Conflict(_)), "{:?}: {err}", app.backend);
	}
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let err = app
			.state
			.admin
			.delete_user(&f.admin.id, &f.admin.id)
			.await
			.unwrap_err();
		assert!(matches!(err, ServiceError::Validation(_)));

		let err = app
			.state
			.admin
			.delete_user(&f.admin.id, &UserId::generate())
			.await
			.unwrap_err();
		assert!(err.is_not_found());
	}
}

#[tokio::test]
async fn test_delete_user_removes_owned_projects() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		app.state
			.admin
			.delete_user(&f.admin.id, &f.alice.id)
			.await
			.unwrap();

		let stats = app.state.admin.stats(&f.admin.id).await.unwrap();
		assert_eq!(stats.total_users, 4, "{:?}", app.backend);
		assert_eq!(stats.total_projects, 0);

		let err = app
			.state
			.access
			.resolve_role(&f.project.id, &f.bob.id)
			.await
			.unwrap_err();
		assert!(matches!(err, bloom_server::AccessError::ResourceNotFound(_)));
	}
}

#[tokio::test]
async fn test_search_users_excludes_caller() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let admin = &app.state.admin;

		let found = admin.search_users(&f.alice.id, "example.com").await.unwrap();
		let names: Vec<_> = found.iter().map(|u| u.username.as_str()).collect();
		assert_eq!(names, vec!["admin", "bob", "carol", "dave"], "{:?}", app.backend);

		let found = admin.search_users(&f.alice.id, "DAVE").await.unwrap();
		assert_eq!(found.len(), 1);
		assert_eq!(found[0].id, f.dave.id);

		assert!(admin.search_users(&f.alice.id, "alice").await.unwrap().is_empty());
		assert!(admin.search_users(&f.alice.id, "   ").await.unwrap().is_empty());
	}
}

#[tokio::test]
async fn test_search_users_respects_limit() {
	for backend in [Backend::Sqlite, Backend::Memory] {
		let app = TestApp::with_config(
			backend,
			AccessConfig {
				user_search_limit: 2,
				..Default::default()
			},
		)
		.await;
		let found = app
			.state
			.admin
			.search_users(&app.fixtures.alice.id, "example.com")
			.await
			.unwrap();
		assert_eq!(found.len(), 2, "{backend:?}");
	}
}
