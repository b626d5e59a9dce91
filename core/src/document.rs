#![deny(missing_docs)]

//! # OpenAPI Document Model
//!
//! The minimal slice of an OpenAPI 3.0 document the builder produces: `info`,
//! one path, one operation and its responses.
//!
//! Every map is an `IndexMap`, so serialization reproduces insertion order.
//! Identical sub-schemas are separate owned values and are always emitted in
//! full; YAML output never contains anchors or aliases.

use crate::error::{AppError, AppResult};
use crate::schema::SchemaNode;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

/// The OpenAPI version written to generated documents.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// The placeholder `info.title`.
pub const DEFAULT_TITLE: &str = "Generated by inducoapi";

/// The placeholder `info.version`.
pub const DEFAULT_API_VERSION: &str = "v1";

/// The HTTP methods an operation can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
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

impl HttpMethod {
    /// All supported methods.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    /// The lower-case key used inside a Path Item Object.
    pub fn as_key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key().to_ascii_uppercase())
    }
}

impl FromStr for HttpMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_key().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                AppError::General(format!(
                    "Unsupported HTTP method '{}' (expected one of GET, POST, PUT, PATCH, DELETE)",
                    s
                ))
            })
    }
}

/// The Info Object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentInfo {
    /// API title.
    pub title: String,
    /// API document version.
    pub version: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

/// A Media Type Object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaTypeObject {
    /// Payload schema.
    pub schema: SchemaNode,
}

/// Content keyed by media type.
pub type Content = IndexMap<String, MediaTypeObject>;

/// Builds a single-entry content map.
pub fn content_for(media_type: &str, schema: SchemaNode) -> Content {
    let mut content = IndexMap::new();
    content.insert(media_type.to_string(), MediaTypeObject { schema });
    content
}

/// A Request Body Object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    /// Payload content.
    pub content: Content,
}

/// A Response Object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    /// Required by OpenAPI; generated responses leave it empty.
    pub description: String,
    /// Payload content, when a response example was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

/// An Operation Object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Operation {
    /// Request payload, when a request example was supplied.
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code string.
    pub responses: IndexMap<String, Response>,
}

/// A Path Item Object: operations keyed by lower-case method.
pub type PathItem = IndexMap<String, Operation>;

/// The root OpenAPI Object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenApiDocument {
    /// OpenAPI version string.
    pub openapi: String,
    /// API metadata.
    pub info: DocumentInfo,
    /// Paths keyed by path template.
    pub paths: IndexMap<String, PathItem>,
}

impl OpenApiDocument {
    /// Creates a document with one path holding one operation.
    pub fn single_operation(
        info: DocumentInfo,
        path: &str,
        method: HttpMethod,
        operation: Operation,
    ) -> Self {
        let mut item = PathItem::new();
        item.insert(method.as_key().to_string(), operation);
        let mut paths = IndexMap::new();
        paths.insert(path.to_string(), item);
        Self {
            openapi: OPENAPI_VERSION.to_string(),
            info,
            paths,
        }
    }

    /// Looks up an operation.
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.paths.get(path)?.get(method.as_key())
    }

    /// Mutable operation lookup.
    pub fn operation_mut(&mut self, path: &str, method: HttpMethod) -> Option<&mut Operation> {
        self.paths.get_mut(path)?.get_mut(method.as_key())
    }

    /// Converts the document into an ordered JSON value.
    pub fn to_value(&self) -> AppResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| AppError::Serialization(e.to_string()))
    }

    /// Renders the document as YAML with 2-space indentation.
    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Serialization(e.to_string()))
    }

    /// Renders the document as pretty-printed JSON.
    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| AppError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaType;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn skeleton() -> OpenApiDocument {
        let mut operation = Operation::default();
        operation
            .responses
            .insert("200".to_string(), Response::default());
        OpenApiDocument::single_operation(
            DocumentInfo::default(),
            "/employees",
            HttpMethod::Get,
            operation,
        )
    }

    #[test]
    fn test_method_parsing_is_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("DELETE".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert_eq!("Patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert!("TRACE".parse::<HttpMethod>().is_err());
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn test_skeleton_value() {
        assert_eq!(
            skeleton().to_value().unwrap(),
            json!({
                "openapi": "3.0.0",
                "info": {"title": "Generated by inducoapi", "version": "v1"},
                "paths": {
                    "/employees": {
                        "get": {"responses": {"200": {"description": ""}}}
                    }
                }
            })
        );
    }

    #[test]
    fn test_request_body_precedes_responses() {
        let mut doc = skeleton();
        let op = doc.operation_mut("/employees", HttpMethod::Get).unwrap();
        op.request_body = Some(RequestBody {
            content: content_for("application/json", SchemaNode::leaf(SchemaType::String)),
        });
        let value = doc.to_value().unwrap();
        let keys: Vec<&String> = value["paths"]["/employees"]["get"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, vec!["requestBody", "responses"]);
    }

    #[test]
    fn test_yaml_rendering() {
        let expected = "\
openapi: 3.0.0
info:
  title: Generated by inducoapi
  version: v1
paths:
  /employees:
    get:
      responses:
        '200':
          description: ''
";
        assert_eq!(skeleton().to_yaml().unwrap(), expected);
    }

    #[test]
    fn test_repeated_schemas_have_no_aliases() {
        let mut doc = skeleton();
        let schema = SchemaNode::leaf(SchemaType::Integer);
        let op = doc.operation_mut("/employees", HttpMethod::Get).unwrap();
        op.request_body = Some(RequestBody {
            content: content_for("application/json", schema.clone()),
        });
        op.responses["200"].content = Some(content_for("application/json", schema));
        let yaml = doc.to_yaml().unwrap();
        assert!(!yaml.contains('&'));
        assert!(!yaml.contains('*'));
        assert_eq!(yaml.matches("type: integer").count(), 2);
    }
}
