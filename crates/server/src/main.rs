use std::process::ExitCode;

use clap::Parser;
use reachard::Config;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(config.log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install the log subscriber: {e}");
        return ExitCode::FAILURE;
    }

    match reachard::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(cause = %e, "reachard stopped");
            ExitCode::FAILURE
        }
    }
}
