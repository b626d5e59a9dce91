#![deny(missing_docs)]

//! # Generate Command
//!
//! Reads the example payload files, builds the OpenAPI document and writes it
//! as YAML (or JSON) to a file or stdout.

use crate::error::{CliError, CliResult};
use clap::ValueEnum;
use induce_core::{build_openapi, BuildOptions, HttpMethod, PayloadRole, DEFAULT_MEDIA_TYPE};
use std::fs;
use std::path::{Path, PathBuf};

/// HTTP methods accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "UPPER")]
pub enum MethodArg {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl From<MethodArg> for HttpMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Get => HttpMethod::Get,
            MethodArg::Post => HttpMethod::Post,
            MethodArg::Put => HttpMethod::Put,
            MethodArg::Patch => HttpMethod::Patch,
            MethodArg::Delete => HttpMethod::Delete,
        }
    }
}

/// Output serialization format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// YAML, 2-space indentation.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Arguments for document generation.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// HTTP request method.
    #[clap(value_enum, value_name = "METHOD", ignore_case = true)]
    pub method: MethodArg,

    /// URI path (e.g. /employees/{id}).
    #[clap(value_name = "PATH")]
    pub path: String,

    /// HTTP response code.
    #[clap(value_name = "CODE")]
    pub code: u16,

    /// Path to file containing request body.
    #[clap(long, visible_alias = "req", value_name = "PATH")]
    pub request: Option<PathBuf>,

    /// Path to file containing response body.
    #[clap(long, visible_alias = "resp", value_name = "PATH")]
    pub response: Option<PathBuf>,

    /// Path to output file (stdout when omitted).
    #[clap(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Desired media type to be used.
    #[clap(long, visible_alias = "mt", value_name = "STR", env = "INDUCE_MEDIA_TYPE", default_value = DEFAULT_MEDIA_TYPE)]
    pub media_type: String,

    /// Do not generate schema examples.
    #[clap(long, visible_alias = "ne", env = "INDUCE_NO_EXAMPLE")]
    pub no_example: bool,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Override info.title.
    #[clap(long, value_name = "STR")]
    pub title: Option<String>,

    /// Override info.version.
    #[clap(long, value_name = "STR")]
    pub api_version: Option<String>,
}

impl GenerateArgs {
    /// Maps the command line onto build options.
    pub fn build_options(&self) -> BuildOptions {
        let mut options = BuildOptions::new(self.method.into(), self.path.clone(), self.code)
            .with_media_type(self.media_type.clone())
            .with_examples(!self.no_example);
        if let Some(title) = &self.title {
            options = options.with_title(title.clone());
        }
        if let Some(version) = &self.api_version {
            options = options.with_api_version(version.clone());
        }
        options
    }
}

/// Executes generation and returns the rendered document.
///
/// The document is written to `args.output` when set; otherwise it is returned
/// for the caller to print.
pub fn execute(args: &GenerateArgs) -> CliResult<Option<String>> {
    let request = read_payload(args.request.as_deref(), PayloadRole::Request)?;
    let response = read_payload(args.response.as_deref(), PayloadRole::Response)?;

    let outcome = build_openapi(&args.build_options(), request.as_deref(), response.as_deref())?;
    for warning in &outcome.warnings {
        eprintln!("{}", warning);
    }
    eprintln!("OpenAPI looks valid");

    let rendered = match args.format {
        OutputFormat::Yaml => outcome.document.to_yaml()?,
        OutputFormat::Json => outcome.document.to_json()? + "\n",
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered).map_err(|source| CliError::WriteOutput {
                path: path.clone(),
                source,
            })?;
            println!("Output written to {}", path.display());
            Ok(None)
        }
        None => Ok(Some(rendered)),
    }
}

fn read_payload(path: Option<&Path>, role: PayloadRole) -> CliResult<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };
    fs::read_to_string(path)
        .map(Some)
        .map_err(|source| CliError::ReadInput {
            role,
            path: path.to_path_buf(),
            source,
        })
}
