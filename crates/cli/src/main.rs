//! Curbside CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run admin database migrations
//! cb-cli migrate
//!
//! # Create a console user
//! cb-cli users create -e admin@example.com -f Dana -l Reyes -r admin -s 1 -p "pass"
//!
//! # Seed the database with demo data
//! cb-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `users create` - Create console users
//! - `seed` - Seed database with demo data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cb-cli")]
#[command(author, version, about = "Curbside CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run admin database migrations
    Migrate,
    /// Manage console users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Seed the database with demo data
    Seed,
}

#[derive(Subcommand)]
enum UsersAction {
    /// Create a new console user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// First name
        #[arg(short, long)]
        first_name: String,

        /// Last name
        #[arg(short, long)]
        last_name: String,

        /// Role (`sysadmin`, `admin`, `employee`)
        #[arg(short, long, default_value = "admin")]
        role: String,

        /// Store ID (required for `admin` and `employee` roles)
        #[arg(short, long)]
        store: Option<i32>,

        /// Password (reads the `CB_CLI_PASSWORD` env var if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::admin().await?,
        Commands::Users { action } => match action {
            UsersAction::Create {
                email,
                first_name,
                last_name,
                role,
                store,
                password,
            } => {
                commands::users::create_user(
                    &email,
                    &first_name,
                    &last_name,
                    &role,
                    store,
                    password.as_deref(),
                )
                .await?;
            }
        },
        Commands::Seed => commands::seed::demo_data().await?,
    }
    Ok(())
}
