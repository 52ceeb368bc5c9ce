//! Limeleaf CLI - Account management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create a regular user
//! lime-cli user create -e user@example.com -p "a strong password"
//!
//! # Create a superuser
//! lime-cli user create-superuser -e admin@example.com -p "a strong password"
//!
//! # Deactivate an account (soft delete)
//! lime-cli user deactivate -e user@example.com
//! ```
//!
//! # Commands
//!
//! - `user create` - Create a regular user (optionally seeding the profile)
//! - `user create-superuser` - Create a superuser
//! - `user deactivate` - Soft-delete a user account

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lime-cli")]
#[command(author, version, about = "Limeleaf CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Email address (unique account identifier)
        #[arg(short, long)]
        email: String,

        /// Password (min 8 characters)
        #[arg(short, long)]
        password: String,

        /// Initial profile display name
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Initial profile phone number
        #[arg(long)]
        phone: Option<String>,

        /// Grant administrative access
        #[arg(long)]
        staff: bool,
    },
    /// Create a new superuser
    CreateSuperuser {
        /// Email address (unique account identifier)
        #[arg(short, long)]
        email: String,

        /// Password (min 8 characters)
        #[arg(short, long)]
        password: String,
    },
    /// Deactivate a user account (soft delete)
    Deactivate {
        /// Email address of the account
        #[arg(short, long)]
        email: String,
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
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                password,
                full_name,
                phone,
                staff,
            } => {
                commands::user::create(&email, &password, full_name, phone, staff).await?;
            }
            UserAction::CreateSuperuser { email, password } => {
                commands::user::create_superuser(&email, &password).await?;
            }
            UserAction::Deactivate { email } => {
                commands::user::deactivate(&email).await?;
            }
        },
    }
    Ok(())
}
