use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use school_manager::cli::{self, commands, Cli, Commands};
use school_manager::models::Exec;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "school_manager=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Init => commands::init(config).await,
        Commands::Migrate => commands::migrate(config).await,
        Commands::CreateExec {
            first_name,
            last_name,
            email,
            username,
            password,
            role,
        } => {
            let exec = Exec {
                first_name,
                last_name,
                email,
                username,
                password,
                role,
                ..Default::default()
            };
            commands::create_exec(config, exec).await
        }
        Commands::HashPassword { password } => commands::hash(&password).await,
        Commands::Serve { host, port } => commands::serve(config, host, port).await,
    };

    if let Err(e) = &result {
        cli::error(&e.to_string());
    }
    result
}
