use audl_core::logging;
use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    // Initialize logging as early as possible.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    match cli::run_from_args() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("audl error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
