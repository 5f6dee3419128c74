use ito_iplist::logging::{init_logging, LOG_CONFIG_FILE};
use ito_iplist::{output, run, Config};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    if let Err(e) = init_logging(LOG_CONFIG_FILE) {
        eprintln!("logging disabled: {e}");
    }
    dotenv::dotenv().ok();
    //
    log::info!("Starting...");

    let result = match Config::from_env() {
        Ok(config) => run(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(summary) => {
            output::print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::debug!("run failed: {e:?}");
            output::print_failure(&e);
            ExitCode::from(e.exit_code())
        }
    }
}
