#![deny(missing_docs)]

//! # Induce Core
//!
//! Infers OpenAPI schemas from example request/response payloads and splices
//! them into a minimal, validated OpenAPI 3.0 document.

/// Shared error types.
pub mod error;

/// JSON-then-YAML payload decoding.
pub mod payload;

/// Schema inference from decoded payloads.
pub mod schema;

/// OpenAPI document model and rendering.
pub mod document;

/// OpenAPI validation.
pub mod validation;

/// Document assembly.
pub mod builder;

pub use builder::{
    build_openapi, BuildOptions, BuildOutcome, BuildWarning, PayloadRole, DEFAULT_MEDIA_TYPE,
};
pub use document::{DocumentInfo, HttpMethod, OpenApiDocument};
pub use error::{AppError, AppResult};
pub use payload::{decode_payload, DecodedPayload, PayloadFormat};
pub use schema::{infer_schema, SchemaNode, SchemaType};
pub use validation::{validate_document, validate_openapi_str};
