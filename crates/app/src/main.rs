use clap::Parser;
use engine::SplitOptions;

mod settings;

/// Shared-expense balance service.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file, without extension.
    #[arg(short, long, env = "DIVVY_CONFIG", default_value = "settings")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "divvy={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let engine = engine::Engine::builder()
        .split_options(
            SplitOptions::default().duplicates(settings.splits.duplicate_participants),
        )
        .build();
    tracing::info!(
        duplicates = ?settings.splits.duplicate_participants,
        "engine ready"
    );

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.inspect_err(|err| {
        tracing::error!("failed to bind server listener on {addr}: {err}");
    })?;

    server::run_with_listener(engine, listener).await?;
    Ok(())
}
