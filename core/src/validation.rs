#![deny(missing_docs)]

//! # OpenAPI Validation
//!
//! Checks an assembled document against the OpenAPI 3.0 specification before
//! it is handed back to the caller.
//!
//! Validation runs in two passes:
//! - **Semantic**: rules walked over the raw value, so that unknown keys are
//!   seen rather than silently dropped by a typed model:
//!   - `openapi` must be a 3.0.x version.
//!   - `info.title` and `info.version` must be non-empty.
//!   - Path keys must start with `/` and use well-formed `{param}` templates.
//!   - Path Item keys must be HTTP methods, Path Item fields or extensions.
//!   - Response keys must be status codes (100-599), ranges (`2XX`) or `default`.
//!   - Content keys must be media type ranges; each entry needs a schema.
//!   - Schema `type` must be a known type word; arrays need `items`.
//! - **Structural**: the document must deserialize into `openapiv3::OpenAPI`.

use crate::error::{AppError, AppResult};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

const OPERATION_KEYS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];
const PATH_ITEM_FIELDS: [&str; 5] = ["$ref", "summary", "description", "servers", "parameters"];
const SCHEMA_TYPES: [&str; 7] = ["", "object", "array", "string", "integer", "number", "boolean"];

fn version_re() -> &'static Regex {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    VERSION_RE.get_or_init(|| Regex::new(r"^3\.0\.\d+$").expect("Invalid regex constant"))
}

fn status_re() -> &'static Regex {
    static STATUS_RE: OnceLock<Regex> = OnceLock::new();
    STATUS_RE.get_or_init(|| Regex::new(r"^[1-5][0-9]{2}$").expect("Invalid regex constant"))
}

fn range_re() -> &'static Regex {
    static RANGE_RE: OnceLock<Regex> = OnceLock::new();
    RANGE_RE.get_or_init(|| Regex::new(r"^[1-5][xX]{2}$").expect("Invalid regex constant"))
}

fn media_type_re() -> &'static Regex {
    static MEDIA_TYPE_RE: OnceLock<Regex> = OnceLock::new();
    MEDIA_TYPE_RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*|\*)/([A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*|\*)(\s*;\s*[^;=\s]+=[^;]+)*$")
            .expect("Invalid regex constant")
    })
}

/// Validates a complete OpenAPI document.
///
/// Returns `AppError::Validation` with a message locating the first violation.
pub fn validate_document(document: &Value) -> AppResult<()> {
    let root = document
        .as_object()
        .ok_or_else(|| AppError::Validation("OpenAPI document must be an object".into()))?;

    validate_version(root)?;
    validate_info(root)?;
    validate_paths(root)?;

    serde_json::from_value::<openapiv3::OpenAPI>(document.clone()).map_err(|e| {
        AppError::Validation(format!("Document is not a valid OpenAPI object: {}", e))
    })?;

    Ok(())
}

/// Parses JSON or YAML text and validates it as an OpenAPI document.
pub fn validate_openapi_str(text: &str) -> AppResult<()> {
    let document: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => serde_yaml::from_str(text).map_err(|e| {
            AppError::Validation(format!("Failed to parse OpenAPI document: {}", e))
        })?,
    };
    validate_document(&document)
}

fn validate_version(root: &Map<String, Value>) -> AppResult<()> {
    let version = root.get("openapi").and_then(Value::as_str).unwrap_or("");
    if !version_re().is_match(version) {
        return Err(AppError::Validation(format!(
            "Unsupported OpenAPI version '{}' (expected 3.0.x)",
            version
        )));
    }
    Ok(())
}

fn validate_info(root: &Map<String, Value>) -> AppResult<()> {
    let info = root
        .get("info")
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::Validation("OpenAPI document missing required 'info' object".into()))?;

    for field in ["title", "version"] {
        let present = info
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty());
        if !present {
            return Err(AppError::Validation(format!(
                "Info.{} must be a non-empty string",
                field
            )));
        }
    }
    Ok(())
}

fn validate_paths(root: &Map<String, Value>) -> AppResult<()> {
    let paths = root
        .get("paths")
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::Validation("OpenAPI document missing required 'paths' object".into()))?;

    if paths.keys().all(|key| is_extension(key)) {
        return Err(AppError::Validation(
            "OpenAPI document must define at least one path".into(),
        ));
    }

    for (path, item) in paths {
        if is_extension(path) {
            continue;
        }
        validate_path_template(path)?;
        let context = format!("paths.{}", path);
        let item = item.as_object().ok_or_else(|| {
            AppError::Validation(format!("{} must be a Path Item object", context))
        })?;
        validate_path_item(item, &context)?;
    }
    Ok(())
}

/// Path keys must be absolute and every `{` must close before the next opens.
fn validate_path_template(path: &str) -> AppResult<()> {
    if !path.starts_with('/') {
        return Err(AppError::Validation(format!(
            "Path '{}' must begin with '/'",
            path
        )));
    }

    let mut param: Option<String> = None;
    for ch in path.chars() {
        match (ch, param.as_mut()) {
            ('{', None) => param = Some(String::new()),
            ('}', Some(name)) => {
                if name.is_empty() {
                    return Err(AppError::Validation(format!(
                        "Path '{}' contains an empty template parameter",
                        path
                    )));
                }
                param = None;
            }
            ('{', Some(_)) | ('}', None) => {
                return Err(AppError::Validation(format!(
                    "Path '{}' contains unbalanced template braces",
                    path
                )));
            }
            (c, Some(name)) => name.push(c),
            (_, None) => {}
        }
    }

    if param.is_some() {
        return Err(AppError::Validation(format!(
            "Path '{}' contains an unterminated template parameter",
            path
        )));
    }
    Ok(())
}

fn validate_path_item(item: &Map<String, Value>, context: &str) -> AppResult<()> {
    for (key, value) in item {
        if is_extension(key) || PATH_ITEM_FIELDS.contains(&key.as_str()) {
            continue;
        }
        if !OPERATION_KEYS.contains(&key.as_str()) {
            return Err(AppError::Validation(format!(
                "'{}' in {} is not a valid HTTP method",
                key, context
            )));
        }
        let op_context = format!("{}.{}", context, key);
        let operation = value.as_object().ok_or_else(|| {
            AppError::Validation(format!("{} must be an Operation object", op_context))
        })?;
        validate_operation(operation, &op_context)?;
    }
    Ok(())
}

fn validate_operation(operation: &Map<String, Value>, context: &str) -> AppResult<()> {
    if let Some(body) = operation.get("requestBody") {
        let body_context = format!("{}.requestBody", context);
        let body = body.as_object().ok_or_else(|| {
            AppError::Validation(format!("{} must be a Request Body object", body_context))
        })?;
        if !body.contains_key("$ref") {
            let content = body.get("content").ok_or_else(|| {
                AppError::Validation(format!("{} must define 'content'", body_context))
            })?;
            validate_content(content, &format!("{}.content", body_context), true)?;
        }
    }

    let responses = operation
        .get("responses")
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::Validation(format!("{} must define 'responses'", context)))?;
    validate_responses(responses, &format!("{}.responses", context))
}

fn validate_responses(responses: &Map<String, Value>, context: &str) -> AppResult<()> {
    if responses.keys().all(|key| is_extension(key)) {
        return Err(AppError::Validation(format!(
            "{} must define at least one response",
            context
        )));
    }

    for (code, response) in responses {
        if is_extension(code) {
            continue;
        }
        if code != "default" && !status_re().is_match(code) && !range_re().is_match(code) {
            return Err(AppError::Validation(format!(
                "Response key '{}' in {} must be an HTTP status code or range",
                code, context
            )));
        }

        let resp_context = format!("{}.{}", context, code);
        let response = response.as_object().ok_or_else(|| {
            AppError::Validation(format!("{} must be a Response object", resp_context))
        })?;
        if response.contains_key("$ref") {
            continue;
        }
        if !response.get("description").is_some_and(Value::is_string) {
            return Err(AppError::Validation(format!(
                "{} must define a 'description' string",
                resp_context
            )));
        }
        if let Some(content) = response.get("content") {
            validate_content(content, &format!("{}.content", resp_context), false)?;
        }
    }
    Ok(())
}

fn validate_content(content: &Value, context: &str, required: bool) -> AppResult<()> {
    let content = content
        .as_object()
        .ok_or_else(|| AppError::Validation(format!("{} must be an object", context)))?;

    if required && content.is_empty() {
        return Err(AppError::Validation(format!(
            "{} must define at least one media type",
            context
        )));
    }

    for (media_type, entry) in content {
        if !media_type_re().is_match(media_type) {
            return Err(AppError::Validation(format!(
                "'{}' in {} is not a valid media type",
                media_type, context
            )));
        }
        let entry_context = format!("{}.{}", context, media_type);
        let schema = entry
            .as_object()
            .and_then(|entry| entry.get("schema"))
            .ok_or_else(|| {
                AppError::Validation(format!("{} must define a 'schema'", entry_context))
            })?;
        validate_schema(schema, &format!("{}.schema", entry_context))?;
    }
    Ok(())
}

fn validate_schema(schema: &Value, context: &str) -> AppResult<()> {
    let schema = schema
        .as_object()
        .ok_or_else(|| AppError::Validation(format!("{} must be a Schema object", context)))?;

    if schema.contains_key("$ref") {
        return Ok(());
    }

    let schema_type = match schema.get("type") {
        None => None,
        Some(Value::String(t)) if SCHEMA_TYPES.contains(&t.as_str()) => Some(t.as_str()),
        Some(other) => {
            return Err(AppError::Validation(format!(
                "{}.type has unsupported value {}",
                context, other
            )));
        }
    };

    if let Some(properties) = schema.get("properties") {
        let properties = properties.as_object().ok_or_else(|| {
            AppError::Validation(format!("{}.properties must be an object", context))
        })?;
        for (name, property) in properties {
            validate_schema(property, &format!("{}.properties.{}", context, name))?;
        }
    }

    match (schema_type, schema.get("items")) {
        (Some("array"), None) => Err(AppError::Validation(format!(
            "{} is an array schema without 'items'",
            context
        ))),
        (_, Some(items)) => validate_schema(items, &format!("{}.items", context)),
        _ => Ok(()),
    }
}

fn is_extension(key: &str) -> bool {
    key.starts_with("x-")
}
