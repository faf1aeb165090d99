//! Command-line interface.

pub mod commands;
pub mod output;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::sqlite::{all_embedded_migrations, create_pool, Migrator, PoolConfig};
use crate::adapters::{
    KeyedRateLimiter, MokaClassificationCache, SqliteTaskRepository, StaticIdentityProvider,
};
use crate::domain::models::Config;
use crate::infrastructure::classifier::{
    ClassifierClient, ClassifierClientConfig, ClassifierGateway,
};
use crate::services::TaskService;
use self::commands::AppTaskService;

#[derive(Parser)]
#[command(name = "taskwise", version, about = "AI-assisted personal task management")]
pub struct Cli {
    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a task; the classifier and scorer set its priority
    Add {
        /// Task title
        title: String,
        /// Optional longer description
        #[arg(short, long)]
        description: Option<String>,
        /// Requested priority (low|medium|high|urgent); feeds the score
        /// multiplier, the stored label is AI-derived
        #[arg(short, long)]
        priority: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// List your tasks, newest first
    List {
        /// Filter by status (todo|in_progress|completed|cancelled)
        #[arg(short, long)]
        status: Option<String>,
        /// Filter by priority (low|medium|high|urgent)
        #[arg(short, long)]
        priority: Option<String>,
        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<i64>,
    },
    /// Show the 3x3 impact/effort matrix
    Matrix,
    /// Show one task in full
    Show { id: String },
    /// Toggle a task between completed and todo
    Done { id: String },
    /// Update fields on a task (score is not recomputed)
    Update {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        priority: Option<String>,
        #[arg(short, long)]
        status: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },
    /// Delete a task
    Rm { id: String },
    /// Recompute scores for all your tasks
    Rescore,
}

/// Wire the task service from configuration.
pub async fn build_service(config: &Config) -> Result<AppTaskService> {
    let database_url = format!("sqlite:{}", config.database.path);
    let pool = create_pool(
        &database_url,
        Some(PoolConfig {
            max_connections: config.database.max_connections,
            ..Default::default()
        }),
    )
    .await
    .context("Failed to open database")?;

    Migrator::new(pool.clone())
        .run_embedded_migrations(all_embedded_migrations())
        .await
        .context("Failed to run migrations")?;

    let repo = Arc::new(SqliteTaskRepository::new(pool));

    let client = ClassifierClient::new(ClassifierClientConfig::from_config(&config.classifier))
        .context("Failed to build classifier client")?;
    let gateway = Arc::new(ClassifierGateway::new(client, config.classifier.model.clone()));

    let identity = Arc::new(StaticIdentityProvider::from_config(&config.actor));
    let cache = Arc::new(MokaClassificationCache::with_ttl(
        Duration::from_secs(config.cache.ttl_secs),
        config.cache.capacity,
    ));
    let rate_limiter = Arc::new(KeyedRateLimiter::from_config(&config.rate_limit));

    Ok(TaskService::new(repo, gateway, identity, cache, rate_limiter))
}

/// Dispatch a parsed command against the service.
pub async fn run(cli: Cli, config: &Config) -> Result<()> {
    let service = build_service(config).await?;
    let json = cli.json;

    match cli.command {
        Commands::Add {
            title,
            description,
            priority,
            due,
        } => commands::handle_add(&service, title, description, priority, due, json).await,
        Commands::List {
            status,
            priority,
            limit,
        } => commands::handle_list(&service, status, priority, limit, json).await,
        Commands::Matrix => commands::handle_matrix(&service, json).await,
        Commands::Show { id } => commands::handle_show(&service, id, json).await,
        Commands::Done { id } => commands::handle_done(&service, id, json).await,
        Commands::Update {
            id,
            title,
            description,
            priority,
            status,
            due,
        } => {
            commands::handle_update(&service, id, title, description, priority, status, due, json)
                .await
        }
        Commands::Rm { id } => commands::handle_rm(&service, id, json).await,
        Commands::Rescore => commands::handle_rescore(&service, json).await,
    }
}

/// Print an error and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        eprintln!("{}", serde_json::json!({ "error": err.to_string() }));
    } else {
        eprintln!("Error: {err}");
    }
    std::process::exit(1);
}
