// src/main.rs

use urldl::logging;

mod cli;

#[tokio::main]
async fn main() {
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    match cli::run_from_args().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("urldl error: {:#}", err);
            std::process::exit(1);
        }
    }
}
