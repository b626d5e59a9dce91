#![deny(missing_docs)]

//! # Document Builder
//!
//! Assembles a single-operation OpenAPI document from example payloads.
//!
//! 1. **Skeleton**: `info`, the path, the operation and a response whose only
//!    field is an empty `description`.
//! 2. **Request**: decode the request example, infer its schema and attach it
//!    under `requestBody.content.<media type>.schema`.
//! 3. **Response**: same procedure under `responses.<code>.content.<media type>.schema`.
//! 4. **Validation**: the whole document is validated once.
//!
//! A payload that cannot be decoded only drops its own schema and yields a
//! [`BuildWarning`]. A validation failure aborts the build.

use crate::document::{
    content_for, DocumentInfo, HttpMethod, OpenApiDocument, Operation, RequestBody, Response,
};
use crate::error::AppResult;
use crate::payload::decode_payload;
use crate::schema::{infer_schema, SchemaNode};
use crate::validation::validate_document;
use std::fmt::Display;
use tracing::{debug, warn};

/// The media type payload schemas are keyed under unless overridden.
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// Parameters for a build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// HTTP method of the operation.
    pub method: HttpMethod,
    /// URI path template (e.g. `/employees/{id}`).
    pub path: String,
    /// Status code of the documented response.
    pub response_code: u16,
    /// Media type the schemas are keyed under.
    pub media_type: String,
    /// Whether schema leaves carry `example` values.
    pub generate_example: bool,
    /// Document `info` metadata.
    pub info: DocumentInfo,
}

impl BuildOptions {
    /// Creates options with the default media type, examples enabled and
    /// placeholder info.
    pub fn new(method: HttpMethod, path: impl Into<String>, response_code: u16) -> Self {
        Self {
            method,
            path: path.into(),
            response_code,
            media_type: DEFAULT_MEDIA_TYPE.to_string(),
            generate_example: true,
            info: DocumentInfo::default(),
        }
    }

    /// Sets the media type.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    /// Enables or disables example generation.
    pub fn with_examples(mut self, generate_example: bool) -> Self {
        self.generate_example = generate_example;
        self
    }

    /// Overrides `info.title`.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.info.title = title.into();
        self
    }

    /// Overrides `info.version`.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.info.version = version.into();
        self
    }

    /// The response code as an OpenAPI Responses key.
    pub fn response_key(&self) -> String {
        self.response_code.to_string()
    }
}

/// Which example payload a warning concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadRole {
    /// The request body example.
    Request,
    /// The response body example.
    Response,
}

impl Display for PayloadRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadRole::Request => write!(f, "request"),
            PayloadRole::Response => write!(f, "response"),
        }
    }
}

/// A non-fatal problem met during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildWarning {
    /// The payload concerned.
    pub role: PayloadRole,
    /// Human readable description.
    pub message: String,
}

impl Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "warning: {}", self.message)
    }
}

/// A validated document plus the warnings raised while assembling it.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutcome {
    /// The assembled, validated document.
    pub document: OpenApiDocument,
    /// Payloads that were skipped.
    pub warnings: Vec<BuildWarning>,
}

/// Builds and validates an OpenAPI document for one operation.
///
/// # Arguments
///
/// * `options` - Method, path, response code and rendering options.
/// * `request` - Request body example text (JSON or YAML), if any.
/// * `response` - Response body example text (JSON or YAML), if any.
///
/// # Errors
///
/// Returns `AppError::Validation` when the assembled document is not valid
/// OpenAPI. Undecodable payloads are reported through `BuildOutcome::warnings`.
pub fn build_openapi(
    options: &BuildOptions,
    request: Option<&str>,
    response: Option<&str>,
) -> AppResult<BuildOutcome> {
    let response_key = options.response_key();
    let mut warnings = Vec::new();

    let mut operation = Operation::default();
    operation
        .responses
        .insert(response_key.clone(), Response::default());

    if let Some(text) = request {
        if let Some(schema) = payload_schema(text, PayloadRole::Request, options, &mut warnings) {
            operation.request_body = Some(RequestBody {
                content: content_for(&options.media_type, schema),
            });
        }
    }

    if let Some(text) = response {
        if let Some(schema) = payload_schema(text, PayloadRole::Response, options, &mut warnings) {
            if let Some(entry) = operation.responses.get_mut(&response_key) {
                entry.content = Some(content_for(&options.media_type, schema));
            }
        }
    }

    let document = OpenApiDocument::single_operation(
        options.info.clone(),
        &options.path,
        options.method,
        operation,
    );

    validate_document(&document.to_value()?)?;
    debug!(
        method = %options.method,
        path = %options.path,
        code = options.response_code,
        "OpenAPI looks valid"
    );

    Ok(BuildOutcome { document, warnings })
}

fn payload_schema(
    text: &str,
    role: PayloadRole,
    options: &BuildOptions,
    warnings: &mut Vec<BuildWarning>,
) -> Option<SchemaNode> {
    match decode_payload(text) {
        Some(decoded) => {
            debug!(%role, format = ?decoded.format, "inferring payload schema");
            Some(infer_schema(&decoded.value, options.generate_example))
        }
        None => {
            let warning = BuildWarning {
                role,
                message: format!("{} body looks not valid, skip {} generation", role, role),
            };
            warn!(%role, "{}", warning.message);
            warnings.push(warning);
            None
        }
    }
}
