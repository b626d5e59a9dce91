#![deny(missing_docs)]

//! # Induce CLI
//!
//! Generates an OpenAPI document for one operation from example request and
//! response bodies.
//!
//! ```text
//! induce POST /employees 201 --request new_employee.json --response created.json -o openapi.yaml
//! ```

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod error;
mod generate;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Generate OpenAPI documentation by supplying request/response bodies",
    override_usage = "induce METHOD PATH CODE [OPTIONS]"
)]
struct Cli {
    #[clap(flatten)]
    generate: generate::GenerateArgs,

    /// Log build steps to stderr.
    #[clap(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match generate::execute(&cli.generate) {
        Ok(Some(rendered)) => {
            print!("{}", rendered);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_original_style_flags() {
        let cli = Cli::try_parse_from([
            "induce",
            "post",
            "/employees",
            "201",
            "--req",
            "req.json",
            "--resp",
            "resp.json",
            "--mt",
            "application/yaml",
            "--ne",
        ])
        .unwrap();
        assert_eq!(cli.generate.method, generate::MethodArg::Post);
        assert_eq!(cli.generate.code, 201);
        assert_eq!(cli.generate.media_type, "application/yaml");
        assert!(cli.generate.no_example);
        assert!(cli.generate.request.is_some());
    }

    #[test]
    fn rejects_unknown_method() {
        assert!(Cli::try_parse_from(["induce", "TRACE", "/employees", "200"]).is_err());
    }
}
