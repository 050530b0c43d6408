use std::process::ExitCode;

use nexus_plan::{cli, logging};

fn main() -> ExitCode {
    let args = cli::parse();
    logging::init_logging(args.log_level);

    match nexus_plan::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "nexus-plan failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
