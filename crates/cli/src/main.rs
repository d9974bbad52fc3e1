use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    match stac_factory_cli::StacFactory::parse().run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("ERROR: {error}");
            ExitCode::FAILURE
        }
    }
}
