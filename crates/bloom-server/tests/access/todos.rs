// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::time::Duration;

use bloom_server::{AccessError, CreateTodoRequest, ServiceError, UpdateTodoRequest};
use bloom_server_auth::{MemberRole, TodoId, TodoPriority, TodoStatus};
use bloom_server_config::AccessConfig;

use super::support::{Backend, TestApp};

fn titled(title: &str) -> CreateTodoRequest {
	CreateTodoRequest {
		title: title.to_string(),
		..Default::default()
	}
}

#[tokio::test]
async fn test_create_applies_defaults() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let todo = app
			.state
			.todos
			.create(&f.alice.id, &f.project.id, titled("  sow beans  "))
			.await
			.unwrap();
		assert_eq!(todo.title, "sow beans");
		assert_eq!(todo.status, TodoStatus::Pending);
		assert_eq!(todo.priority, TodoPriority::Medium);
		assert_eq!(todo.deadline, None);
		assert_eq!(todo.project_id, f.project.id);

		let fetched = app.state.todos.get(&f.alice.id, &todo.id).await.unwrap();
		assert_eq!(fetched, todo, "{:?}", app.backend);
	}
}

#[tokio::test]
async fn test_create_rejects_bad_input() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let todos = &app.state.todos;

		let cases = [
			("empty title", titled("   ")),
			(
				"unknown status",
				CreateTodoRequest {
					status: Some("someday".to_string()),
					..titled("a")
				},
			),
			(
				"unknown priority",
				CreateTodoRequest {
					priority: Some("urgent".to_string()),
					..titled("a")
				},
			),
			(
				"date without time",
				CreateTodoRequest {
					deadline: Some("2026-05-01".to_string()),
					..titled("a")
				},
			),
		];

		for (name, req) in cases {
			let err = todos.create(&f.alice.id, &f.project.id, req).await.unwrap_err();
			assert!(matches!(err, ServiceError::Validation(_)), "{name}: {err}");
		}
		assert!(todos.list(&f.alice.id, &f.project.id).await.unwrap().is_empty());
	}
}

#[tokio::test]
async fn test_list_is_newest_first() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		for title in ["first", "second", "third"] {
			app.state
				.todos
				.create(&f.alice.id, &f.project.id, titled(title))
				.await
				.unwrap();
			tokio::time::sleep(Duration::from_millis(5)).await;
		}

		let titles: Vec<_> = app
			.state
			.todos
			.list(&f.alice.id, &f.project.id)
			.await
			.unwrap()
			.into_iter()
			.map(|t| t.title)
			.collect();
		assert_eq!(titles, vec!["third", "second", "first"], "{:?}", app.backend);
	}
}

#[tokio::test]
async fn test_partial_update_and_deadline_clearing() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		app.add_member(&f.bob, MemberRole::Editor).await;
		let todo = app
			.state
			.todos
			.create(
				&f.alice.id,
				&f.project.id,
				CreateTodoRequest {
					description: "north bed".to_string(),
					deadline: Some("2026-05-01T09:00:00Z".to_string()),
					..titled("mulch")
				},
			)
			.await
			.unwrap();
		assert!(todo.deadline.is_some());

		let updated = app
			.state
			.todos
			.update(
				&f.bob.id,
				&todo.id,
				UpdateTodoRequest {
					status: Some("completed".to_string()),
					..Default::default()
				},
			)
			.await
			.unwrap();
		assert_eq!(updated.status, TodoStatus::Completed);
		assert_eq!(updated.title, "mulch");
		assert_eq!(updated.description, "north bed");
		assert_eq!(updated.deadline, todo.deadline);

		let cleared = app
			.state
			.todos
			.update(
				&f.bob.id,
				&todo.id,
				UpdateTodoRequest {
					deadline: Some(String::new()),
					..Default::default()
				},
			)
			.await
			.unwrap();
		assert_eq!(cleared.deadline, None, "{:?}", app.backend);
		assert_eq!(cleared.status, TodoStatus::Completed);
	}
}

#[tokio::test]
async fn test_viewer_cannot_change_todos() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		app.add_member(&f.carol, MemberRole::Viewer).await;
		let todo = app
			.state
			.todos
			.create(&f.alice.id, &f.project.id, titled("prune"))
			.await
			.unwrap();

		let err = app
			.state
			.todos
			.update(
				&f.carol.id,
				&todo.id,
				UpdateTodoRequest {
					title: Some("hack".to_string()),
					..Default::default()
				},
			)
			.await
			.unwrap_err();
		assert!(err.is_access_denied());

		let err = app.state.todos.delete(&f.carol.id, &todo.id).await.unwrap_err();
		assert!(err.is_access_denied());

		let unchanged = app.state.todos.get(&f.carol.id, &todo.id).await.unwrap();
		assert_eq!(unchanged.title, "prune");
	}
}

#[tokio::test]
async fn test_editor_deletes_todo() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		app.add_member(&f.bob, MemberRole::Editor).await;
		let todo = app
			.state
			.todos
			.create(&f.bob.id, &f.project.id, titled("compost"))
			.await
			.unwrap();

		app.state.todos.delete(&f.bob.id, &todo.id).await.unwrap();
		let err = app.state.todos.get(&f.bob.id, &todo.id).await.unwrap_err();
		assert!(err.is_not_found(), "{:?}", app.backend);
	}
}

#[tokio::test]
async fn test_missing_todo_is_not_found() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let missing = TodoId::generate();
		assert!(app.state.todos.get(&f.alice.id, &missing).await.unwrap_err().is_not_found());
		assert!(app
			.state
			.todos
			.delete(&f.alice.id, &missing)
			.await
			.unwrap_err()
			.is_not_found());
	}
}

#[tokio::test]
async fn test_stranger_cannot_see_todos() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let todo = app
			.state
			.todos
			.create(&f.alice.id, &f.project.id, titled("harvest"))
			.await
			.unwrap();

		assert!(app.state.todos.get(&f.dave.id, &todo.id).await.unwrap_err().is_access_denied());
		assert!(app
			.state
			.todos
			.list(&f.dave.id, &f.project.id)
			.await
			.unwrap_err()
			.is_access_denied());
	}
}

#[tokio::test]
async fn test_update_trims_status_and_priority() {
	for app in TestApp::all().await {
		let f = &app.fixtures;
		let todo = app
			.state
			.todos
			.create(
				&f.alice.id,
				&f.project.id,
				CreateTodoRequest {
					priority: Some(" high ".to_string()),
					..titled("stake tomatoes")
				},
			)
			.await
			.unwrap();
		assert_eq!(todo.priority, TodoPriority::High);

		let updated = app
			.state
			.todos
			.update(
				&f.alice.id,
				&todo.id,
				UpdateTodoRequest {
					status: Some(" in_progress ".to_string()),
					priority: Some(" low ".to_string()),
					..Default::default()
				},
			)
			.await
			.unwrap();
		assert_eq!(updated.status, TodoStatus::InProgress, "{:?}", app.backend);
		assert_eq!(updated.priority, TodoPriority::Low);
	}
}

#[tokio::test]
async fn test_conceal_existence_hides_todos_from_strangers() {
	for backend in [Backend::Sqlite, Backend::Memory] {
		let app = TestApp::with_config(
			backend,
			AccessConfig {
				conceal_existence: true,
				..Default::default()
			},
		)
		.await;
		let f = &app.fixtures;
		app.add_member(&f.carol, MemberRole::Viewer).await;
		let todo = app
			.state
			.todos
			.create(&f.alice.id, &f.project.id, titled("net the brassicas"))
			.await
			.unwrap();
		let missing = TodoId::generate();

		let existing_err = app.state.todos.get(&f.dave.id, &todo.id).await.unwrap_err();
		let missing_err = app.state.todos.get(&f.dave.id, &missing).await.unwrap_err();
		assert!(
			matches!(
				existing_err,
				ServiceError::Access(AccessError::ResourceNotFound(ref what)) if *what == format!("todo {}", todo.id)
			),
			"{backend:?}: {existing_err}"
		);
		assert_eq!(missing_err.to_string(), format!("todo {missing} not found"));
		assert!(!existing_err.to_string().contains(&f.project.id.to_string()));

		let err = app.state.todos.delete(&f.dave.id, &todo.id).await.unwrap_err();
		assert!(err.is_not_found(), "{backend:?}: {err}");

		// Members with too low a role are still told they were denied.
		let err = app.state.todos.delete(&f.carol.id, &todo.id).await.unwrap_err();
		assert!(err.is_access_denied(), "{backend:?}: {err}");
	}
}
