use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use wilma_schedules::cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "Failed to build the async runtime");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(cli::run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Run failed");
            ExitCode::FAILURE
        }
    }
}
