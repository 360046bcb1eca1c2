use std::{fmt::Display, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use twistscan::{
    app::{ProcessEnvironment, ScanPipeline, ScanRequest},
    domain::{image_reference::ImageReference, policy::ScanPolicy},
    infra::ConcreteComponentFactory,
};

#[derive(Parser)]
#[command(
    name = "twistscan",
    version,
    about = "Scan a docker image with twistcli and fail on critical or high vulnerabilities.",
    after_help = "example: twistscan -i alpine:latest"
)]
struct Cli {
    /// docker image name, eg. "alpine:latest"
    #[arg(short = 'i', value_name = "IMAGE")]
    image: String,

    /// critical vulnerabilities only
    #[arg(short = 'c')]
    critical_only: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let pipeline = ScanPipeline::new(ConcreteComponentFactory, ProcessEnvironment);
    let request = ScanRequest {
        image: ImageReference::from(cli.image),
        policy: ScanPolicy::new(cli.critical_only),
    };

    match pipeline.run(&request).await {
        Ok(outcome) => {
            println!("{}", outcome.summary());
            if let Some(violation) = outcome.violation {
                return fatal(violation);
            }
            println!(" * twistlock scan complete.");
            println!();
            ExitCode::SUCCESS
        }
        Err(err) => fatal(err),
    }
}

fn fatal(message: impl Display) -> ExitCode {
    eprintln!("error: {message}");
    eprintln!("Aborting.");
    ExitCode::FAILURE
}
