// src/main.rs

use std::process::ExitCode;

use observe::errors::fatal_line;
use observe::{cli, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("{}", fatal_line(&err));
        return ExitCode::FAILURE;
    }

    match observe::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", fatal_line(&err));
            ExitCode::FAILURE
        }
    }
}
