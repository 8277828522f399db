pub mod config_path;
pub mod members;
pub mod operation;
pub mod primitive;
pub mod security;
pub mod version;

use crate::DEFAULT_OPENAPI_VERSION;
use crate::types::members::Members;
use crate::types::operation::Operation;
use crate::types::security::SecurityScheme;
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Info {
    pub(crate) title: String,
    pub(crate) version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub(crate) description: String,
    #[serde(flatten)]
    pub(crate) members: Members,
}

impl Info {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub(crate) url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(flatten)]
    pub(crate) members: Members,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
            members: Members::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The shared component registry of a document. Component kinds other than schemas and
/// security schemes (`responses`, `parameters`, `requestBodies`, ...) are kept as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) schemas: BTreeMap<String, Value>,
    #[serde(
        rename = "securitySchemes",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub(crate) security_schemes: BTreeMap<String, SecurityScheme>,
    #[serde(flatten)]
    pub(crate) members: Members,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty() && self.security_schemes.is_empty() && self.members.is_empty()
    }

    /// Component definitions of kinds not modelled here, e.g. `responses`.
    pub fn component_kind(&self, kind: &str) -> Option<&Value> {
        self.members.get(kind)
    }

    pub fn security_scheme(&self, name: &str) -> Option<&SecurityScheme> {
        self.security_schemes.get(name)
    }

    pub fn security_schemes(&self) -> &BTreeMap<String, SecurityScheme> {
        &self.security_schemes
    }

    pub fn schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Registers `scheme` under `name`, replacing any scheme already registered there.
    pub(crate) fn register_security_scheme(&mut self, name: &str, scheme: SecurityScheme) {
        self.security_schemes.insert(name.to_string(), scheme);
    }
}

/// The operations available on one path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) get: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) put: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) post: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) delete: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) options: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) head: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) patch: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) trace: Option<Operation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) parameters: Vec<Value>,
    #[serde(flatten)]
    pub(crate) members: Members,
}

impl PathItem {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, method: &Method) -> Option<&Option<Operation>> {
        match *method {
            Method::GET => Some(&self.get),
            Method::PUT => Some(&self.put),
            Method::POST => Some(&self.post),
            Method::DELETE => Some(&self.delete),
            Method::OPTIONS => Some(&self.options),
            Method::HEAD => Some(&self.head),
            Method::PATCH => Some(&self.patch),
            Method::TRACE => Some(&self.trace),
            _ => None,
        }
    }

    fn slot_mut(&mut self, method: &Method) -> Option<&mut Option<Operation>> {
        match *method {
            Method::GET => Some(&mut self.get),
            Method::PUT => Some(&mut self.put),
            Method::POST => Some(&mut self.post),
            Method::DELETE => Some(&mut self.delete),
            Method::OPTIONS => Some(&mut self.options),
            Method::HEAD => Some(&mut self.head),
            Method::PATCH => Some(&mut self.patch),
            Method::TRACE => Some(&mut self.trace),
            _ => None,
        }
    }

    pub fn operation(&self, method: &Method) -> Option<&Operation> {
        self.slot(method).and_then(Option::as_ref)
    }

    /// Sets the operation for `method`. Methods OpenAPI cannot describe (e.g. `CONNECT`)
    /// are rejected and `false` is returned.
    pub fn set_operation(&mut self, method: &Method, operation: Operation) -> bool {
        match self.slot_mut(method) {
            Some(slot) => {
                *slot = Some(operation);
                true
            }
            None => {
                log::warn!("Method {} cannot be documented on a path item", method);
                false
            }
        }
    }

    /// Every documented operation, in OpenAPI field order.
    pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
        [
            (Method::GET, &self.get),
            (Method::PUT, &self.put),
            (Method::POST, &self.post),
            (Method::DELETE, &self.delete),
            (Method::OPTIONS, &self.options),
            (Method::HEAD, &self.head),
            (Method::PATCH, &self.patch),
            (Method::TRACE, &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, slot)| slot.as_ref().map(|operation| (method, operation)))
    }

    pub(crate) fn operations_mut(&mut self) -> impl Iterator<Item = (Method, &mut Operation)> {
        [
            (Method::GET, &mut self.get),
            (Method::PUT, &mut self.put),
            (Method::POST, &mut self.post),
            (Method::DELETE, &mut self.delete),
            (Method::OPTIONS, &mut self.options),
            (Method::HEAD, &mut self.head),
            (Method::PATCH, &mut self.patch),
            (Method::TRACE, &mut self.trace),
        ]
        .into_iter()
        .filter_map(|(method, slot)| slot.as_mut().map(|operation| (method, operation)))
    }
}

/// One generated OpenAPI document for a single API version.
///
/// Documents handed out by [`crate::cache::DocumentCollection`] are shared behind an `Arc`
/// and are only readable; every mutation happens while the document is being assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub(crate) openapi: String,
    pub(crate) info: Info,
    #[serde(default)]
    pub(crate) servers: Vec<Server>,
    #[serde(default)]
    pub(crate) paths: BTreeMap<String, PathItem>,
    #[serde(default, skip_serializing_if = "Components::is_empty")]
    pub(crate) components: Components,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) tags: Vec<Value>,
    #[serde(flatten)]
    pub(crate) members: Members,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            openapi: DEFAULT_OPENAPI_VERSION.to_string(),
            info: Info::default(),
            servers: Vec::new(),
            paths: BTreeMap::new(),
            components: Components::default(),
            tags: Vec::new(),
            members: Members::new(),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_openapi_version(mut self, version: impl Into<String>) -> Self {
        self.openapi = version.into();
        self
    }

    pub fn with_server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    pub fn with_schema(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.components.schemas.insert(name.into(), schema);
        self
    }

    pub fn with_security_scheme(mut self, name: &str, scheme: SecurityScheme) -> Self {
        self.components.register_security_scheme(name, scheme);
        self
    }

    /// Adds an operation on `path`. Returns `false` when the method cannot be documented.
    pub fn add_operation(&mut self, path: &str, method: &Method, operation: Operation) -> bool {
        self.paths
            .entry(path.to_string())
            .or_default()
            .set_operation(method, operation)
    }

    pub fn openapi(&self) -> &str {
        &self.openapi
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn paths(&self) -> &BTreeMap<String, PathItem> {
        &self.paths
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    /// Top-level members not modelled here, e.g. `security` or `externalDocs`.
    pub fn members(&self) -> &Members {
        &self.members
    }

    pub fn operation(&self, path: &str, method: &Method) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.operation(method))
    }

    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|item| item.operations().count()).sum()
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod test {
    use crate::types::operation::{Operation, Response};
    use crate::types::{Document, PathItem, Server};
    use http::Method;
    use serde_json::json;

    #[test]
    fn test_default_document_shape() {
        let document = Document::new();
        assert_eq!(
            document.to_json().unwrap(),
            json!({
                "openapi": "3.0.1",
                "info": { "title": "", "version": "" },
                "servers": [],
                "paths": {}
            })
        );
    }

    #[test]
    fn test_add_operation_groups_by_path() {
        let mut document = Document::new();
        assert!(document.add_operation("/items", &Method::GET, Operation::new()));
        assert!(document.add_operation("/items", &Method::POST, Operation::new()));
        assert!(document.add_operation("/items/{id}", &Method::DELETE, Operation::new()));
        assert!(!document.add_operation("/items", &Method::CONNECT, Operation::new()));
        assert_eq!(document.paths().len(), 2);
        assert_eq!(document.operation_count(), 3);
    }

    #[test]
    fn test_operations_iterate_in_field_order() {
        let mut item = PathItem::new();
        item.set_operation(&Method::PATCH, Operation::new().with_operation_id("patch"));
        item.set_operation(&Method::GET, Operation::new().with_operation_id("get"));
        item.set_operation(&Method::DELETE, Operation::new().with_operation_id("delete"));
        let ids: Vec<&str> = item
            .operations()
            .filter_map(|(_, op)| op.operation_id())
            .collect();
        assert_eq!(ids, vec!["get", "delete", "patch"]);
    }

    #[test]
    fn test_operations_mut_touches_every_operation() {
        let mut item = PathItem::new();
        item.set_operation(&Method::GET, Operation::new());
        item.set_operation(&Method::PUT, Operation::new());
        for (_, operation) in item.operations_mut() {
            operation.merge_deprecated(true);
        }
        assert!(item.operations().all(|(_, op)| op.is_deprecated()));
    }

    #[test]
    fn test_deserialize_document() {
        let document: Document = serde_json::from_value(json!({
            "openapi": "3.0.1",
            "info": { "title": "Catalog", "version": "1.0" },
            "servers": [{ "url": "http://localhost:5222" }],
            "paths": {
                "/api/catalog/items": {
                    "get": {
                        "operationId": "ListItems",
                        "responses": { "200": { "description": "OK" } }
                    }
                }
            }
        }))
        .unwrap();
        assert_eq!(document.servers(), &[Server::new("http://localhost:5222")]);
        let operation = document
            .operation("/api/catalog/items", &Method::GET)
            .unwrap();
        assert_eq!(operation.operation_id(), Some("ListItems"));
        assert_eq!(operation.response("200"), Some(&Response::new("OK")));
    }

    #[test]
    fn test_unmodelled_members_round_trip() {
        let source = json!({
            "openapi": "3.0.1",
            "info": {
                "title": "Catalog",
                "version": "1.0",
                "contact": { "name": "Catalog team" }
            },
            "servers": [{ "url": "http://localhost:5222", "variables": {} }],
            "security": [{ "apiKey": [] }],
            "externalDocs": { "url": "https://example.com/docs" },
            "paths": {
                "/items": {
                    "servers": [{ "url": "https://items.example.com" }],
                    "get": {
                        "externalDocs": { "url": "https://example.com/docs/items" },
                        "callbacks": {},
                        "responses": {
                            "200": {
                                "description": "OK",
                                "links": { "next": { "operationId": "ListItems" } }
                            },
                            "404": { "$ref": "#/components/responses/NotFound" }
                        }
                    }
                }
            },
            "components": {
                "responses": { "NotFound": { "description": "Not found" } },
                "parameters": { "PageSize": { "name": "pageSize", "in": "query" } }
            }
        });
        let document: Document = serde_json::from_value(source.clone()).unwrap();

        assert!(document.members().contains_key("externalDocs"));
        assert!(document.components().component_kind("responses").is_some());
        assert_eq!(document.to_json().unwrap(), source);
    }
}
