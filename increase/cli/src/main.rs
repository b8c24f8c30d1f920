use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use futures::TryStreamExt;
use increase::codec::FileUpload;
use increase::pagination::MAX_LIMIT;
use increase::resources::accounts::{AccountListParams, AccountStatus};
use increase::resources::documents::DocumentListParams;
use increase::resources::files::{FileCreateParams, FilePurpose};
use increase::{ConfigError, Increase, IncreaseError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "increase")]
#[command(about = "Query and update an Increase group from the terminal", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the group the API key belongs to
    Group,

    /// Work with accounts
    Accounts {
        #[command(subcommand)]
        command: AccountsCommand,
    },

    /// Work with documents
    Documents {
        #[command(subcommand)]
        command: DocumentsCommand,
    },

    /// Work with files
    Files {
        #[command(subcommand)]
        command: FilesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AccountsCommand {
    /// List accounts
    List {
        /// Page size (at most 100)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_LIMIT)))]
        limit: Option<u32>,

        /// Follow cursors and print every account instead of the first page
        #[arg(long)]
        all: bool,

        /// Only accounts with this status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Show one account
    Get {
        #[arg(value_name = "ACCOUNT_ID")]
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum DocumentsCommand {
    /// List documents
    List {
        /// Only documents about this entity
        #[arg(long, value_name = "ID")]
        entity_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum FilesCommand {
    /// Upload a file
    Upload {
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// What the file is for, e.g. identity_document
        #[arg(long)]
        purpose: String,

        #[arg(long, value_name = "TEXT")]
        description: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StatusArg {
    Open,
    Closed,
}

impl From<StatusArg> for AccountStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Open => AccountStatus::Open,
            StatusArg::Closed => AccountStatus::Closed,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] IncreaseError),

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,increase=info,increase_core=info".to_string(),
            2 => "info,increase=debug,increase_core=debug".to_string(),
            _ => "debug,increase=trace,increase_core=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn print_json<V: Serialize + ?Sized>(value: &V) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: Commands) -> Result<(), CliError> {
    let increase = Increase::from_env()?;

    match command {
        Commands::Group => print_json(&increase.groups().retrieve_details().await?),

        Commands::Accounts {
            command: AccountsCommand::List { limit, all, status },
        } => {
            let params = AccountListParams {
                limit,
                status: status.map(AccountStatus::from),
                ..Default::default()
            };
            if all {
                let accounts: Vec<_> = increase
                    .accounts()
                    .list_auto_paging(&params)?
                    .into_stream()
                    .try_collect()
                    .await?;
                info!(count = accounts.len(), "listed all accounts");
                print_json(&accounts)
            } else {
                let page = increase.accounts().list(&params).await?;
                if let Some(cursor) = page.next_cursor() {
                    debug!(cursor, "more accounts available");
                }
                print_json(page.data())
            }
        }

        Commands::Accounts {
            command: AccountsCommand::Get { id },
        } => print_json(&increase.accounts().retrieve(&id).await?),

        Commands::Documents {
            command: DocumentsCommand::List { entity_id },
        } => {
            let params = DocumentListParams {
                entity_id,
                ..Default::default()
            };
            let page = increase.documents().list(&params).await?;
            print_json(page.data())
        }

        Commands::Files {
            command:
                FilesCommand::Upload {
                    path,
                    purpose,
                    description,
                },
        } => {
            let mut params =
                FileCreateParams::new(FileUpload::from_path(&path), FilePurpose::from(purpose.as_str()));
            if let Some(description) = description {
                params = params.description(description);
            }
            print_json(&increase.files().create(params).await?)
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json_logs);

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
