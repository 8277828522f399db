use crate::types::members::{self, Members};
use crate::types::primitive::PrimitiveValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Scheme name to the scopes required from it.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    pub(crate) description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) headers: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) content: Option<Value>,
    #[serde(flatten)]
    pub(crate) members: Members,
}

impl Response {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            headers: None,
            content: None,
            members: Members::new(),
        }
    }

    pub fn with_content(mut self, content: Value) -> Self {
        self.content = Some(content);
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn members(&self) -> &Members {
        &self.members
    }
}

/// A `$ref` to a definition elsewhere, e.g. `#/components/responses/NotFound`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub(crate) reference: String,
    #[serde(flatten)]
    pub(crate) members: Members,
}

impl Reference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            members: Members::new(),
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }
}

/// A documented response, either referenced or written inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseEntry {
    Reference(Reference),
    Inline(Response),
}

impl ResponseEntry {
    pub fn as_inline(&self) -> Option<&Response> {
        match self {
            ResponseEntry::Reference(_) => None,
            ResponseEntry::Inline(response) => Some(response),
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            ResponseEntry::Reference(reference) => Some(reference),
            ResponseEntry::Inline(_) => None,
        }
    }
}

impl From<Response> for ResponseEntry {
    fn from(value: Response) -> Self {
        ResponseEntry::Inline(value)
    }
}

impl From<Reference> for ResponseEntry {
    fn from(value: Reference) -> Self {
        ResponseEntry::Reference(value)
    }
}

/// One documented HTTP action.
///
/// Only the members generation touches are typed. Everything else (`externalDocs`,
/// `callbacks`, `servers`, extensions) is kept in [`Operation::members`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(rename = "operationId", default, skip_serializing_if = "Option::is_none")]
    pub(crate) operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) parameters: Vec<Value>,
    #[serde(rename = "requestBody", default, skip_serializing_if = "Option::is_none")]
    pub(crate) request_body: Option<Value>,
    #[serde(default)]
    pub(crate) responses: BTreeMap<String, ResponseEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) deprecated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) security: Option<Vec<SecurityRequirement>>,
    #[serde(flatten)]
    pub(crate) members: Members,
}

impl Operation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_response(
        mut self,
        status: impl Into<String>,
        response: impl Into<ResponseEntry>,
    ) -> Self {
        self.responses.insert(status.into(), response.into());
        self
    }

    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = Some(deprecated);
        self
    }

    pub fn with_security(mut self, security: Vec<SecurityRequirement>) -> Self {
        self.security = Some(security);
        self
    }

    /// Adds a specification extension. Names without the `x-` prefix and values that are
    /// not plain scalars are ignored.
    pub fn with_extension(mut self, name: impl Into<String>, value: PrimitiveValue) -> Self {
        let name = name.into();
        if !members::is_extension(&name) {
            log::warn!("Ignoring extension '{}' without the x- prefix", name);
            return self;
        }
        match value.to_json() {
            Some(value) => {
                self.members.insert(name, value);
            }
            None => log::warn!("Ignoring extension '{}' with an unsupported value", name),
        }
        self
    }

    /// Sets an unmodelled member such as `externalDocs` or `callbacks`.
    pub fn with_member(mut self, name: impl Into<String>, value: Value) -> Self {
        self.members.insert(name.into(), value);
        self
    }

    pub fn operation_id(&self) -> Option<&str> {
        self.operation_id.as_deref()
    }

    pub fn responses(&self) -> &BTreeMap<String, ResponseEntry> {
        &self.responses
    }

    /// The inline response documented for `status`. References are not resolved.
    pub fn response(&self, status: &str) -> Option<&Response> {
        self.responses.get(status).and_then(ResponseEntry::as_inline)
    }

    pub fn response_entry(&self, status: &str) -> Option<&ResponseEntry> {
        self.responses.get(status)
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated.unwrap_or(false)
    }

    pub fn security(&self) -> Option<&[SecurityRequirement]> {
        self.security.as_deref()
    }

    pub fn extension(&self, name: &str) -> Option<PrimitiveValue> {
        if !members::is_extension(name) {
            return None;
        }
        self.members.get(name).map(PrimitiveValue::from_json)
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    /// Adds a response unless one is already documented for `status`, inline or by
    /// reference. Returns whether the response was added.
    pub(crate) fn add_response_if_absent(&mut self, status: &str, description: &str) -> bool {
        if self.responses.contains_key(status) {
            return false;
        }
        self.responses
            .insert(status.to_string(), Response::new(description).into());
        true
    }

    /// Marks the operation deprecated when `deprecated` is set. Never clears the flag.
    pub(crate) fn merge_deprecated(&mut self, deprecated: bool) {
        if deprecated {
            self.deprecated = Some(true);
        }
    }
}
