//! Command-line front end for the member roster.

use std::env;
use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use dotenvy::dotenv;
use serde::Serialize;

use member_roster::db::{DbPool, establish_connection_pool, run_pending_migrations};
use member_roster::domain::search::{MemberSearchCondition, MemberTeamRow};
use member_roster::domain::types::TeamName;
use member_roster::models::config::AppConfig;
use member_roster::pagination::{Page, PageRequest};
use member_roster::repository::{DieselRepository, TeamReader};
use member_roster::services::roster::{
    bump_ages, find_member, purge_older_than, roster_report, seed_demo_roster,
};
use member_roster::services::search::{CountStrategy, search_members};

#[derive(Parser)]
#[command(name = "member-roster")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Database location; overrides `database_url` from the configuration.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending schema migrations
    Migrate,
    /// Insert two demo teams with two members each
    Seed,
    /// Search members joined with their teams
    Search {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        team: Option<String>,
        /// Minimum age, inclusive
        #[arg(long)]
        age_goe: Option<i32>,
        /// Maximum age, inclusive
        #[arg(long)]
        age_loe: Option<i32>,
        /// Zero-based page number
        #[arg(long, default_value_t = 0)]
        page: usize,
        /// Page size; defaults to `default_page_size` from the configuration
        #[arg(long)]
        size: Option<usize>,
        #[arg(long, value_enum, default_value_t = CountMode::SkipWhenShort)]
        count: CountMode,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Show the first member with the given username
    Find { username: String },
    /// List teams with their members
    Teams,
    /// Print age statistics
    Stats,
    /// Add years to every member's age
    BumpAges {
        #[arg(default_value_t = 1)]
        delta: i32,
    },
    /// Delete members strictly older than AGE
    PurgeOlderThan { age: i32 },
}

#[derive(Clone, Copy, ValueEnum)]
enum CountMode {
    Always,
    SkipWhenShort,
}

impl From<CountMode> for CountStrategy {
    fn from(mode: CountMode) -> Self {
        match mode {
            CountMode::Always => CountStrategy::Always,
            CountMode::SkipWhenShort => CountStrategy::SkipWhenShort,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn load_config() -> Result<AppConfig, config::ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<AppConfig>()
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_page_text(page: &Page<MemberTeamRow>) {
    for row in &page.content {
        let team = row
            .team_name
            .as_ref()
            .map(TeamName::as_str)
            .unwrap_or("-");
        println!(
            "{:>5}  {:<16} {:>4}  {}",
            row.member_id.get(),
            row.username.as_str(),
            row.age.get(),
            team
        );
    }

    let links = page
        .page_links()
        .into_iter()
        .map(|link| match link {
            Some(n) if n == page.page_number + 1 => format!("[{n}]"),
            Some(n) => n.to_string(),
            None => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("total {}  pages {links}", page.total);
}

fn run(command: Command, pool: DbPool, config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let repo = &DieselRepository::new(pool.clone());

    match command {
        Command::Migrate => {
            let applied = run_pending_migrations(&pool)?;
            log::info!("Applied {applied} migrations");
            Ok(())
        }
        Command::Seed => print_json(&seed_demo_roster(repo)?),
        Command::Search {
            username,
            team,
            age_goe,
            age_loe,
            page,
            size,
            count,
            format,
        } => {
            let condition = MemberSearchCondition {
                username,
                team_name: team,
                age_goe,
                age_loe,
            };
            let request = PageRequest::new(page, size.unwrap_or(config.default_page_size))?;
            let result = search_members(repo, &condition, request, count.into())?;
            match format {
                OutputFormat::Json => print_json(&result),
                OutputFormat::Text => {
                    print_page_text(&result);
                    Ok(())
                }
            }
        }
        Command::Find { username } => print_json(&find_member(repo, &username)?),
        Command::Teams => {
            let mut listing = Vec::new();
            for team in repo.list_teams()? {
                let members = repo.list_team_members(&team.name)?;
                listing.push((team, members));
            }
            print_json(&listing)
        }
        Command::Stats => print_json(&roster_report(repo)?),
        Command::BumpAges { delta } => {
            let affected = bump_ages(repo, delta)?;
            log::info!("Updated {affected} members");
            Ok(())
        }
        Command::PurgeOlderThan { age } => {
            let removed = purge_older_than(repo, age)?;
            log::info!("Removed {removed} members");
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let mut app_config = match load_config() {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading config: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(database_url) = cli.database_url {
        app_config.database_url = database_url;
    }

    let pool = match establish_connection_pool(&app_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, pool, &app_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
