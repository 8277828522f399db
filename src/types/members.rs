//! Members of OpenAPI objects that are carried through generation without being modelled.
//!
//! Base documents come from the routing layer and may use any part of OpenAPI
//! (`externalDocs`, `callbacks`, `components/responses`, ...). Whatever a typed struct does
//! not name is kept here as JSON and written back unchanged. Specification extensions are
//! the `x-` prefixed subset.

use crate::EXTENSION_PREFIX;
use serde_json::Value;
use std::collections::BTreeMap;

/// Unmodelled members of one OpenAPI object, by member name.
pub type Members = BTreeMap<String, Value>;

pub fn is_extension(name: &str) -> bool {
    name.starts_with(EXTENSION_PREFIX)
}

/// The `x-` members only.
pub fn extensions(members: &Members) -> impl Iterator<Item = (&str, &Value)> {
    members
        .iter()
        .filter(|(name, _)| is_extension(name))
        .map(|(name, value)| (name.as_str(), value))
}
