use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coursepad::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coursepad=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::HashPassword { password, legacy } => {
            cli::commands::hash_password(password, legacy).await
        }
        Commands::VerifyPassword { hash, password } => {
            cli::commands::verify_password(&hash, password).await
        }
        Commands::CheckPassword { password } => cli::commands::check_password(password).await,
        Commands::Demo { format } => cli::commands::demo(format).await,
    }
}
