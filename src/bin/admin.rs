//! CLI administration tool for blog-app.
//!
//! Manages accounts and sessions directly in the database, without going
//! through the web interface.
//!
//! # Usage
//!
//! ```bash
//! # List accounts
//! cargo run --bin admin -- user list
//!
//! # Grant / revoke the admin role
//! cargo run --bin admin -- user promote alice@example.com
//! cargo run --bin admin -- user demote alice@example.com --yes
//!
//! # Remove expired sessions now instead of waiting for the sweeper
//! cargo run --bin admin -- session purge
//!
//! # Content statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`
//!
//! Roles changed here only matter with `ADMIN_POLICY=role` (the default);
//! under `ADMIN_POLICY=emails` the allowlist decides.

use blog_app::config::Config;
use blog_app::domain::entities::{Role, User};
use blog_app::domain::repositories::{SessionRepository, UserRepository};
use blog_app::infrastructure::persistence::{PgSessionRepository, PgUserRepository};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing blog-app.
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

    /// Manage login sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Show content statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all accounts
    List,

    /// Give an account the admin role
    Promote {
        /// Account email
        email: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Take the admin role away from an account
    Demote {
        /// Account email
        email: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Delete expired sessions
    Purge,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Session { action } => handle_session_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::List => list_users(&repo).await?,
        UserAction::Promote { email, yes } => change_role(&repo, &email, Role::Admin, yes).await?,
        UserAction::Demote { email, yes } => change_role(&repo, &email, Role::Member, yes).await?,
    }

    Ok(())
}

/// Lists all accounts.
///
/// # Output Format
///
/// ```text
/// Users
///
///   ID  Name                      Email                           Role     Joined
///   ------------------------------------------------------------------------------------
///   1   Alice                     alice@example.com               admin    2024-03-01 10:30
/// ```
async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!("  Register one at {}", "/users/register".bright_cyan());
        return Ok(());
    }

    println!(
        "  {:<4} {:<25} {:<31} {:<8} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Role".bright_white().bold(),
        "Joined".bright_white().bold()
    );
    println!("  {}", "-".repeat(84).bright_black());

    for user in &users {
        let role = match user.role {
            Role::Admin => "admin".green(),
            Role::Member => "member".normal(),
        };

        println!(
            "  {:<4} {:<25} {:<31} {:<8} {}",
            user.id.to_string().bright_black(),
            user.name.cyan(),
            user.email,
            role,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Sets the stored role of the account with `email`, after confirmation.
async fn change_role(repo: &PgUserRepository, email: &str, role: Role, skip_confirm: bool) -> Result<()> {
    let email = email.trim().to_lowercase();

    let user: User = repo
        .find_by_email(&email)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No user with email {email}"))?;

    if user.role == role {
        println!(
            "{}",
            format!("{} already has role {}", user.email, role).yellow()
        );
        return Ok(());
    }

    println!("  User: {} <{}>", user.name.cyan(), user.email);
    println!("  Role: {} -> {}", user.role, role.to_string().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Change role?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    repo.set_role(user.id, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to change role: {}", e))?;

    println!("{}", "Role updated".green().bold());
    println!(
        "{}",
        "Active sessions pick up the new role on their next request.".bright_black()
    );

    Ok(())
}

async fn handle_session_action(action: SessionAction, pool: &PgPool) -> Result<()> {
    let repo = PgSessionRepository::new(Arc::new(pool.clone()));

    match action {
        SessionAction::Purge => {
            let removed = repo
                .delete_expired(Utc::now())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to purge sessions: {}", e))?;

            println!(
                "{} {}",
                "Expired sessions removed:".green(),
                removed.to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

/// Displays user, post, comment and live session counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let posts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await?;

    let comments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(pool)
        .await?;

    let sessions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE expires_at > NOW()")
        .fetch_one(pool)
        .await?;

    println!("  Users:           {}", users.to_string().bright_green().bold());
    println!("  Posts:           {}", posts.to_string().bright_green().bold());
    println!("  Comments:        {}", comments.to_string().bright_green().bold());
    println!("  Active sessions: {}", sessions.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
