use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Formatter;

/// Scope name to description, kept in the order the scopes were declared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScopeMap(Vec<(String, String)>);

impl ScopeMap {
    pub fn new() -> Self {
        ScopeMap(Vec::new())
    }

    /// Inserts a scope. Re-inserting a known scope replaces its description in place.
    pub fn insert(&mut self, scope: impl Into<String>, description: impl Into<String>) {
        let scope = scope.into();
        let description = description.into();
        match self.0.iter_mut().find(|(name, _)| *name == scope) {
            Some(existing) => existing.1 = description,
            None => self.0.push((scope, description)),
        }
    }

    pub fn get(&self, scope: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == scope)
            .map(|(_, description)| description.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, description)| (name.as_str(), description.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ScopeMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut scopes = ScopeMap::new();
        for (scope, description) in iter {
            scopes.insert(scope, description);
        }
        scopes
    }
}

impl Serialize for ScopeMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (scope, description) in &self.0 {
            map.serialize_entry(scope, description)?;
        }
        map.end()
    }
}

struct ScopeMapVisitor;

impl<'de> Visitor<'de> for ScopeMapVisitor {
    type Value = ScopeMap;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a map of scope names to descriptions")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut scopes = ScopeMap::new();
        while let Some((scope, description)) = access.next_entry::<String, String>()? {
            scopes.insert(scope, description);
        }
        Ok(scopes)
    }
}

impl<'de> Deserialize<'de> for ScopeMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ScopeMapVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecuritySchemeType {
    #[serde(rename = "oauth2")]
    OAuth2,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthFlow {
    #[serde(rename = "authorizationUrl")]
    pub(crate) authorization_url: String,
    #[serde(rename = "tokenUrl", skip_serializing_if = "Option::is_none")]
    pub(crate) token_url: Option<String>,
    pub(crate) scopes: ScopeMap,
}

impl OAuthFlow {
    pub fn authorization_url(&self) -> &str {
        &self.authorization_url
    }

    pub fn token_url(&self) -> Option<&str> {
        self.token_url.as_deref()
    }

    pub fn scopes(&self) -> &ScopeMap {
        &self.scopes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OAuthFlows {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) implicit: Option<OAuthFlow>,
}

impl OAuthFlows {
    pub fn implicit(&self) -> Option<&OAuthFlow> {
        self.implicit.as_ref()
    }
}

/// A named credential flow description registered under `components.securitySchemes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub(crate) scheme_type: SecuritySchemeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    pub(crate) flows: OAuthFlows,
}

impl SecurityScheme {
    /// An OAuth2 scheme using the implicit flow.
    pub fn oauth2_implicit(
        authorization_url: impl Into<String>,
        token_url: impl Into<String>,
        scopes: ScopeMap,
    ) -> Self {
        Self {
            scheme_type: SecuritySchemeType::OAuth2,
            description: None,
            flows: OAuthFlows {
                implicit: Some(OAuthFlow {
                    authorization_url: authorization_url.into(),
                    token_url: Some(token_url.into()),
                    scopes,
                }),
            },
        }
    }

    pub fn scheme_type(&self) -> SecuritySchemeType {
        self.scheme_type
    }

    pub fn flows(&self) -> &OAuthFlows {
        &self.flows
    }

    /// Every scope advertised by any of the scheme's flows, in declaration order.
    pub fn scope_names(&self) -> Vec<String> {
        match &self.flows.implicit {
            Some(flow) => flow.scopes.names().map(str::to_string).collect(),
            None => Vec::new(),
        }
    }
}
