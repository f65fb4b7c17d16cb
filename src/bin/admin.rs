//! CLI administration tool for linktally.
//!
//! Inspects and deletes links, shows totals and checks the database without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List every link with its recent click IPs
//! cargo run --bin admin -- links list
//!
//! # Describe one link by short id or alias
//! cargo run --bin admin -- links info ex1
//!
//! # Delete a link and its clicks
//! cargo run --bin admin -- links delete ex1 --yes
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components) and `BASE_URL`.

use linktally::config::{self, Config};
use linktally::infrastructure::persistence::{self, PgClickRepository, PgLinkRepository};
use linktally::state::{AppSettings, AppState};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing linktally.
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
    /// Inspect and delete links
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

#[derive(Subcommand)]
enum LinksAction {
    /// List all links
    List,

    /// Show one link
    Info {
        /// Short id or alias
        key: String,
    },

    /// Delete a link and its click history
    Delete {
        /// Short id or alias
        key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
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

    let config = config::load_from_env()?;
    let pool = persistence::connect(&config).await?;
    let state = build_state(&pool, &config);

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &state).await?,
        Commands::Stats => handle_stats(&state).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;

    Ok(())
}

fn build_state(pool: &PgPool, config: &Config) -> AppState {
    let pool = Arc::new(pool.clone());

    AppState::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgClickRepository::new(pool)),
        AppSettings::from(config),
    )
}

/// Dispatches link commands.
async fn handle_links_action(action: LinksAction, state: &AppState) -> Result<()> {
    match action {
        LinksAction::List => list_links(state).await,
        LinksAction::Info { key } => show_link(state, &key).await,
        LinksAction::Delete { key, yes } => delete_link(state, &key, yes).await,
    }
}

/// Prints every link as a table.
///
/// # Output Format
///
/// ```text
/// Links
///
///   Short id              Clicks  Created           Target
///   ---------------------------------------------------------------------------
///   ex1                   7       2024-05-01 12:00  https://example.com
///                                 last IPs: 10.0.0.7, 10.0.0.6
/// ```
async fn list_links(state: &AppState) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let links = state.stats_service.list_all().await?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<21} {:<7} {:<17} {}",
        "Short id".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for activity in &links {
        let link = &activity.link;
        let key = if link.is_expired() {
            link.short_id.red()
        } else {
            link.short_id.cyan()
        };

        println!(
            "  {:<21} {:<7} {:<17} {}",
            key,
            link.click_count.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );

        if !activity.recent_ips.is_empty() {
            println!(
                "  {:<46} {}",
                "",
                format!("last IPs: {}", activity.recent_ips.join(", ")).bright_black()
            );
        }
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Prints the info projection of one link.
async fn show_link(state: &AppState, key: &str) -> Result<()> {
    let info = state.link_service.get_info(key).await?;
    let analytics = state.stats_service.get_analytics(key).await?;

    println!("{}", "ℹ️  Link".bright_blue().bold());
    println!();
    println!("  Key:      {}", key.cyan());
    println!("  Target:   {}", info.original_url);
    println!(
        "  Created:  {}",
        info.created_at.to_rfc3339().bright_black()
    );
    println!(
        "  Clicks:   {}",
        info.click_count.to_string().bright_green().bold()
    );
    if analytics.last_five_ips.is_empty() {
        println!("  Last IPs: {}", "none".bright_black());
    } else {
        println!("  Last IPs: {}", analytics.last_five_ips.join(", "));
    }
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(state: &AppState, key: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let info = state.link_service.get_info(key).await?;

    println!("  Key:    {}", key.cyan());
    println!("  Target: {}", info.original_url);
    println!(
        "  Clicks: {} (will be deleted too)",
        info.click_count.to_string().yellow()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    state.link_service.delete_link(key).await?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Displays total links and clicks.
async fn handle_stats(state: &AppState) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let summary = state.stats_service.summary().await?;

    println!(
        "  Links:  {}",
        summary.links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        summary.clicks.to_string().bright_green().bold()
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

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
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
