//! complaintdesk CLI — complaint intake with summarization and categorization.
//!
//! Usage:
//!   complaintdesk [ui] [--db path] [--config path]
//!   complaintdesk submit [TEXT]
//!   complaintdesk history [--expand]

use clap::{ArgAction, Parser, Subcommand};
use complaintdesk::ui::{render, Session};
use complaintdesk::{
    ClassifierBackend, DeskConfig, IntakeError, IntakeService, OpenStore, SqliteStore,
};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "complaintdesk",
    version,
    about = "Submit customer complaints and review past ones"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Path to SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Path to YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Classifier backend: llm-orc or embedding
    #[arg(long, global = true)]
    classifier: Option<ClassifierBackend>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session with the Submit and Past Complaints pages (default)
    Ui,
    /// Submit one complaint
    Submit {
        /// Complaint text; read from stdin when omitted
        text: Option<String>,
    },
    /// List past complaints, most recent first
    History {
        /// Show summary and category for every entry
        #[arg(long)]
        expand: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<DeskConfig, String> {
    let mut config = match &cli.config {
        Some(path) => DeskConfig::load(path)
            .map_err(|e| format!("Failed to load config '{}': {}", path.display(), e))?,
        None => DeskConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.database = Some(db.clone());
    }
    if let Some(classifier) = cli.classifier {
        config.classifier = classifier;
    }
    Ok(config)
}

/// Open storage and construct the analysis backends, once.
fn open_intake(config: &DeskConfig) -> Result<Arc<IntakeService>, String> {
    let db_path = config.database_path();
    let store = SqliteStore::open(&db_path)
        .map_err(|e| format!("Failed to open database '{}': {}", db_path.display(), e))?;
    let analyzer = config
        .build_analyzer()
        .map_err(|e| format!("Failed to initialize analysis: {}", e))?;
    tracing::info!(db = %db_path.display(), "complaint desk ready");
    Ok(Arc::new(IntakeService::new(
        Arc::new(store),
        Arc::new(analyzer),
    )))
}

async fn cmd_ui(intake: Arc<IntakeService>) -> i32 {
    let stdin = std::io::stdin();
    let mut session = Session::new(intake, stdin.lock(), std::io::stdout());
    match session.run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_submit(intake: &IntakeService, text: Option<String>) -> i32 {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("Error: cannot read complaint from stdin: {}", e);
                return 1;
            }
            buf
        }
    };

    match intake.submit(&text).await {
        Ok(submission) => {
            print!("{}", render::submission(&submission));
            0
        }
        Err(IntakeError::Validation(e)) => {
            eprint!("{}", render::validation_error(&e));
            1
        }
        Err(e) => {
            eprint!("{}", render::error(&e));
            1
        }
    }
}

fn cmd_history(intake: &IntakeService, expand: bool) -> i32 {
    match intake.history() {
        Ok(records) => {
            print!("{}", render::heading("Past Complaints"));
            if expand {
                print!("{}", render::history_expanded(&records));
            } else {
                print!("{}", render::history_headers(&records));
            }
            if !records.is_empty() {
                match intake.count() {
                    Ok(count) => print!("{}", render::status_line(count)),
                    Err(e) => tracing::warn!(error = %e, "complaint count unavailable"),
                }
            }
            0
        }
        Err(e) => {
            eprint!("{}", render::error(&e));
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let intake = match open_intake(&config) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    let code = rt.block_on(async {
        match cli.command.unwrap_or(Commands::Ui) {
            Commands::Ui => cmd_ui(intake).await,
            Commands::Submit { text } => cmd_submit(&intake, text).await,
            Commands::History { expand } => cmd_history(&intake, expand),
        }
    });
    std::process::exit(code);
}
