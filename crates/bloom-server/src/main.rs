// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bloom operator binary.

use std::path::PathBuf;
use std::sync::Arc;

use bloom_server::AccessControl;
use bloom_server_auth::{ProjectId, UserId};
use bloom_server_config::{LogFormat, LoggingConfig, ServerConfig};
use bloom_server_db::{MembershipRepository, StatsRepository, UserRepository};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod version;

/// Bloom server - access control for shared todo projects.
#[derive(Parser, Debug)]
#[command(name = "bloom-server", about = "Bloom todo service operator tool", version)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/bloom/server.toml)
	#[arg(long, global = true, env = "BLOOM_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
	/// Apply pending database migrations
	Migrate,
	/// Print user, project and todo totals as JSON
	Stats,
	/// Print a user's effective role on a project
	Role {
		#[arg(long)]
		project: ProjectId,
		#[arg(long)]
		user: UserId,
	},
	/// List all users
	Users,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Command::Version = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => bloom_server_config::load_config_with_file(path)?,
		None => bloom_server_config::load_config()?,
	};

	init_tracing(&config.logging);

	run(args.command, &config).await
}

fn init_tracing(logging: &LoggingConfig) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.level.clone().into());
	let registry = tracing_subscriber::registry().with(filter);

	// Command output owns stdout.
	match logging.format {
		LogFormat::Json => registry
			.with(
				tracing_subscriber::fmt::layer()
					.json()
					.with_writer(std::io::stderr),
			)
			.init(),
		LogFormat::Text => registry
			.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
			.init(),
	}
}

async fn run(command: Command, config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
	tracing::info!(database = %config.database.url, command = ?command, "starting bloom-server");

	let pool =
		bloom_server_db::create_pool(&config.database.url, config.database.max_connections).await?;
	bloom_server_db::run_migrations(&pool).await?;

	match command {
		Command::Version => {}
		Command::Migrate => {
			tracing::info!("migrations applied");
		}
		Command::Stats => {
			let stats = StatsRepository::new(pool).get_stats().await?;
			println!("{}", serde_json::to_string_pretty(&stats)?);
		}
		Command::Role { project, user } => {
			let access = AccessControl::new(Arc::new(MembershipRepository::new(pool)))
				.with_conceal_existence(config.access.conceal_existence);
			let role = access.resolve_role(&project, &user).await?;
			println!("{role}");
		}
		Command::Users => {
			for user in UserRepository::new(pool).list_users().await? {
				let admin = if user.is_admin { " (admin)" } else { "" };
				println!("{}\t{}\t{}{}", user.id, user.username, user.email, admin);
			}
		}
	}

	Ok(())
}
