use registry_export::cli::Args;
use registry_export::config::AppConfig;
use registry_export::server;
use registry_export::shared::error::ExitCode;
use registry_export::shared::Result;
use std::io::IsTerminal;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

async fn run() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    let args = Args::parse_args();
    init_tracing(args.debug);

    let working_dir = std::env::current_dir()?;
    let config = AppConfig::load(&args, &working_dir)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        debug = config.debug,
        "Starting registry-export"
    );

    server::serve(config).await
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "registry_export=debug,tower_http=debug"
    } else {
        "registry_export=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();
}
