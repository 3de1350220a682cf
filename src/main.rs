use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod fetch;
mod lessons;
mod progress;
mod provision;
mod storage;

use cli::commands;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "sqlcoach")]
#[command(version)]
#[command(about = "Learn SQL in your terminal against a bundled sample database")]
#[command(long_about = "Sqlcoach teaches introductory SQL - SELECT, WHERE, JOIN -\n\
    through short lessons run against a small sample database,\n\
    with room to explore on your own through the query command.")]
#[command(after_help = "EXAMPLES:\n    \
    sqlcoach setup           Provision browser and companion tools\n    \
    sqlcoach fetch           Download the sample database\n    \
    sqlcoach lesson 1        Run the first lesson\n    \
    sqlcoach query \"SELECT * FROM products LIMIT 5\"\n    \
    sqlcoach tables          List sample tables\n    \
    sqlcoach schema orders   Show a table's columns\n\n\
    For more information about a command, run 'sqlcoach <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Provision the environment (browser install + companion tools)
    #[command(long_about = "Runs the provisioning sequence: installs the configured browser\n\
        through the system package manager, fetches the latest companion\n\
        tools release, downloads the matching archive, unpacks it into the\n\
        bin directory, and removes the downloaded archive. The first\n\
        failing step aborts the run.")]
    Setup(commands::setup::Args),

    /// Download or seed the sample database
    #[command(long_about = "Downloads the sample database to ~/.sqlcoach/sample.db if it is\n\
        not already present. With --seed the database is built locally\n\
        from the bundled dataset instead of downloaded.")]
    Fetch(commands::fetch::Args),

    /// Execute a SQL query against the sample database
    #[command(long_about = "Runs one query and prints the full result set as an aligned\n\
        table. Errors from the engine (bad syntax, unknown tables) are\n\
        shown as-is.\n\
        \n\
        Supports multiple output formats:\n\
        - text: aligned table (default)\n\
        - json: array of objects keyed by column\n\
        - csv: header row plus records")]
    Query(commands::query::Args),

    /// List bundled lessons and completion state
    Lessons(commands::lessons::Args),

    /// Run a single lesson
    #[command(long_about = "Runs one lesson: prints each step's prose and, for query steps,\n\
        the SQL and its result table. Completion is recorded when the\n\
        lesson runs through.")]
    Lesson(commands::lesson::Args),

    /// List tables in the sample database
    Tables(commands::tables::Args),

    /// Show a table's declared schema
    Schema(commands::schema::Args),

    /// Open the SQL reference in the browser
    Docs(commands::docs::Args),

    /// Show sample database and lesson progress overview
    Status,

    /// Diagnose installation and database health
    #[command(long_about = "Runs health checks on the app home, configuration, sample\n\
        database, bin directory, and browser, and exits non-zero when\n\
        any check fails.")]
    Doctor(commands::doctor::Args),

    /// View and manage configuration settings
    Config(commands::config::Args),

    /// Generate shell completion scripts
    Completions(commands::completions::Args),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "sqlcoach=debug"
    } else {
        "sqlcoach=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Setup(args) => commands::setup::run(args),
        Commands::Fetch(args) => commands::fetch::run(args),
        Commands::Query(args) => commands::query::run(args),
        Commands::Lessons(args) => commands::lessons::run(args),
        Commands::Lesson(args) => commands::lesson::run(args),
        Commands::Tables(args) => commands::tables::run(args),
        Commands::Schema(args) => commands::schema::run(args),
        Commands::Docs(args) => commands::docs::run(args),
        Commands::Status => commands::status::run(),
        Commands::Doctor(args) => commands::doctor::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Completions(args) => {
            commands::completions::generate_completions(&mut Cli::command(), args.shell);
            Ok(())
        }
    }
}
