//! User Service - command-line access to the user store.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::AppResult;
use domain::{PageRequest, UserDetails, UserId};
use user_service_lib::config::UserServiceConfig;
use user_service_lib::Command;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User record store")]
struct Cli {
    /// Database URL (overrides USER_SERVICE_DATABASE_URL / DATABASE_URL)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user
    Create(DetailsArgs),
    /// Show a user by id
    Get { id: UserId },
    /// Show a user by identity number
    Find { identity_number: String },
    /// List users page by page
    List {
        /// Zero-based page number
        #[arg(long, default_value_t = 0)]
        page: u64,
        /// Records per page (defaults to USER_SERVICE_DEFAULT_PAGE_SIZE)
        #[arg(long)]
        size: Option<u64>,
    },
    /// Replace every field of a user
    Update {
        id: UserId,
        #[command(flatten)]
        details: DetailsArgs,
    },
    /// Delete a user by id
    Delete { id: UserId },
    /// Check database connectivity
    Ping,
}

#[derive(Args)]
struct DetailsArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    phone_number: Option<String>,
    #[arg(long)]
    identity_number: Option<String>,
    #[arg(long)]
    region: String,
    #[arg(long, allow_negative_numbers = true)]
    amount: i64,
}

impl From<DetailsArgs> for UserDetails {
    fn from(args: DetailsArgs) -> Self {
        UserDetails {
            name: args.name,
            phone_number: args.phone_number,
            identity_number: args.identity_number,
            region: args.region.into(),
            amount: args.amount,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", user_service_lib::failure_report(&err));
            ExitCode::from(user_service_lib::exit_code(&err))
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut config = UserServiceConfig::from_env();
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    let command = match cli.command {
        Commands::Create(details) => Command::Create(details.into()),
        Commands::Get { id } => Command::Get(id),
        Commands::Find { identity_number } => Command::Find(identity_number),
        Commands::List { page, size } => {
            let size = size.unwrap_or(config.default_page_size);
            Command::List(PageRequest::new(page, size)?)
        }
        Commands::Update { id, details } => Command::Update(id, details.into()),
        Commands::Delete { id } => Command::Delete(id),
        Commands::Ping => Command::Ping,
    };

    user_service_lib::run_command(config, command).await
}
