// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User administration and user search.

use bloom_server_auth::{User, UserId};
use bloom_server_db::Stats;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AccessError, Result, ServiceError};
use crate::state::Stores;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
	#[serde(default)]
	pub username: Option<String>,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub is_admin: Option<bool>,
}

#[derive(Clone)]
pub struct AdminHandler {
	stores: Stores,
	search_limit: u32,
}

impl AdminHandler {
	pub fn new(stores: Stores, search_limit: u32) -> Self {
		Self {
			stores,
			search_limit,
		}
	}

	/// Finds sharing candidates by username or email. Open to every caller;
	/// the caller is never in the result.
	#[instrument(skip(self, query), fields(caller = %caller))]
	pub async fn search_users(&self, caller: &UserId, query: &str) -> Result<Vec<User>> {
		let query = query.trim();
		if query.is_empty() {
			return Ok(Vec::new());
		}
		Ok(self
			.stores
			.users
			.search_users(query, caller, self.search_limit)
			.await?)
	}

	#[instrument(skip(self), fields(caller = %caller))]
	pub async fn stats(&self, caller: &UserId) -> Result<Stats> {
		self.require_admin(caller).await?;
		Ok(self.stores.stats.get_stats().await?)
	}

	#[instrument(skip(self), fields(caller = %caller))]
	pub async fn list_users(&self, caller: &UserId) -> Result<Vec<User>> {
		self.require_admin(caller).await?;
		Ok(self.stores.users.list_users().await?)
	}

	#[instrument(skip(self, req), fields(caller = %caller, user_id = %user_id))]
	pub async fn update_user(
		&self,
		caller: &UserId,
		user_id: &UserId,
		req: UpdateUserRequest,
	) -> Result<User> {
		self.require_admin(caller).await?;

		let mut user = self.fetch(user_id).await?;
		if let Some(username) = req.username {
			let username = username.trim();
			if username.is_empty() {
				return Err(ServiceError::validation("username cannot be empty"));
			}
			user.username = username.to_string();
		}
		if let Some(email) = req.email {
			let email = email.trim();
			if email.is_empty() {
				return Err(ServiceError::validation("email cannot be empty"));
			}
			user.email = email.to_string();
		}
		if let Some(is_admin) = req.is_admin {
			user.is_admin = is_admin;
		}

		self.stores.users.update_user(&user).await?;
		tracing::info!(user_id = %user_id, is_admin = user.is_admin, "user updated by admin");
		self.fetch(user_id).await
	}

	/// Deletes a user along with their projects and memberships. Admins
	/// cannot delete themselves.
	#[instrument(skip(self), fields(caller = %caller, user_id = %user_id))]
	pub async fn delete_user(&self, caller: &UserId, user_id: &UserId) -> Result<()> {
		self.require_admin(caller).await?;

		if user_id == caller {
			return Err(ServiceError::validation("you cannot delete yourself"));
		}
		if !self.stores.users.delete_user(user_id).await? {
			return Err(AccessError::ResourceNotFound(format!("user {user_id}")).into());
		}
		tracing::info!(user_id = %user_id, "user deleted by admin");
		Ok(())
	}

	/// The admin flag is read from storage, not trusted from the caller.
	async fn require_admin(&self, caller: &UserId) -> Result<()> {
		match self.stores.users.get_user_by_id(caller).await? {
			Some(user) if user.is_admin => Ok(()),
			_ => {
				tracing::warn!(caller = %caller, "admin operation refused");
				Err(ServiceError::AdminRequired)
			}
		}
	}

	async fn fetch(&self, user_id: &UserId) -> Result<User> {
		self
			.stores
			.users
			.get_user_by_id(user_id)
			.await?
			.ok_or_else(|| AccessError::ResourceNotFound(format!("user {user_id}")).into())
	}
}
