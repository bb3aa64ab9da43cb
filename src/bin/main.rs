use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "movielens-server")]
#[command(about = "Movie ranking and calculator web service", long_about = None)]
struct Args {
    /// YAML configuration file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<String>,
    #[arg(short, long)]
    debug: bool,
    /// Emit log lines as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_filter = if args.debug {
        "movielens_rs=debug,tower_http=debug"
    } else {
        "movielens_rs=info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    if let Err(e) = movielens_rs::run(args.config.as_deref(), args.debug).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
