//! CLI administration tool for snaplink.
//!
//! Provides commands for managing accounts, inspecting links, viewing
//! statistics, and performing database operations without HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (password is prompted)
//! cargo run --bin admin -- user create --username alice
//!
//! # List links, optionally for one owner
//! cargo run --bin admin -- links list --owner 1
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` (required): PostgreSQL connection
//! - `TOKEN_SIGNING_SECRET` (optional): unused by these commands but accepted

use snaplink::application::services::{AuthService, LinkService};
use snaplink::config::{Config, mask_connection_string};
use snaplink::infrastructure::persistence::{
    PgLinkRepository, PgTokenRepository, PgUserRepository,
};
use snaplink::utils::code_generator::CodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Inspect short links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new account
    Create {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List links in creation order
    List {
        /// Only links owned by this user id
        #[arg(short, long)]
        owner: Option<i64>,

        /// Maximum number of links to show
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Links { action } => handle_links_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches account commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let auth = AuthService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgTokenRepository::new(pool)),
        std::env::var("TOKEN_SIGNING_SECRET").unwrap_or_default(),
    );

    match action {
        UserAction::Create { username, yes } => create_user(&auth, username, yes).await,
    }
}

/// Creates an account with interactive prompts.
///
/// The password is read without echo and confirmed; only its Argon2id hash
/// is stored.
async fn create_user(auth: &AuthService, username: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.chars().count() >= 8 {
                Ok(())
            } else {
                Err("Password must be at least 8 characters")
            }
        })
        .interact()?;

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create user '{}'?", username))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = auth
        .register(&username, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!("  ID:       {}", user.id.to_string().bright_white());
    println!("  Username: {}", user.username.cyan());
    println!();
    println!("{}", "Log in with:".bright_white());
    println!(
        "  curl -X POST -H 'Content-Type: application/json' -d '{{\"username\":\"{}\",\"password\":\"...\"}}' http://localhost:3000/auth/login",
        user.username
    );
    println!();

    Ok(())
}

/// Dispatches link commands.
async fn handle_links_action(action: LinksAction, pool: &PgPool) -> Result<()> {
    let service = LinkService::new(
        Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))),
        CodeGenerator::default(),
        1,
    );

    match action {
        LinksAction::List { owner, limit } => list_links(&service, owner, limit).await,
    }
}

/// Lists links with click counts.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   ID    Code       Owner  Clicks   URL
///   ──────────────────────────────────────────────────────────────
///   1     aB3xY9     -      0        https://example.com
///   2     Qz81Lm     3      17       https://docs.rs
/// ```
async fn list_links(service: &LinkService, owner: Option<i64>, limit: i64) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let (links, total) = tokio::try_join!(
        service.list_for_owner(owner, 0, limit.max(1)),
        service.count_for_owner(owner)
    )
    .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<10} {:<6} {:<8} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Owner".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        let owner = link
            .owner_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:<5} {:<10} {:<6} {:<8} {}",
            link.id.to_string().bright_black(),
            link.short_code.cyan(),
            owner,
            link.click_count.to_string().bright_green(),
            link.original_url
        );
    }

    println!();
    println!(
        "  Showing {} of {}",
        links.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of links (public and owned)
/// - Total number of counted clicks
/// - Number of users and active API tokens
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let public_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE owner_id IS NULL")
            .fetch_one(pool)
            .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(click_count), 0)::BIGINT FROM links")
        .fetch_one(pool)
        .await?;

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let tokens_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:         {} ({} public)",
        links_count.to_string().bright_green().bold(),
        public_count.to_string().bright_white()
    );
    println!(
        "  Clicks:        {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!(
        "  Users:         {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Active tokens: {}",
        tokens_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
