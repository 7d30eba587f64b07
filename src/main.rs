//! Kiosk CLI

use std::process::ExitCode;

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    kiosk::config::load_dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = kiosk::observability::init_subscriber(&cli.config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            #[expect(clippy::print_stderr, reason = "user-facing command error")]
            {
                eprintln!("{error}");
            }

            ExitCode::FAILURE
        }
    }
}
