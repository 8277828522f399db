use crate::error::DocumentError;
use crate::types::config_path::ConfigPath;
use crate::types::primitive::PrimitiveValue;
use crate::OPENAPI_SECTION;
use serde_json::Value;
use std::path::Path;

/// Read-only hierarchical configuration, addressed with colon separated paths
/// (`OpenApi:Document:Title`). Keys are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    root: Value,
}

impl Configuration {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json_str(content: &str) -> Result<Self, DocumentError> {
        match serde_json::from_str(content) {
            Ok(root) => Ok(Self::new(root)),
            Err(e) => Err(DocumentError::configuration_load(&e)),
        }
    }

    pub fn from_file_path<P>(file_path: P) -> Result<Self, DocumentError>
    where
        P: AsRef<Path>,
    {
        let path = file_path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                return Err(DocumentError::configuration_load(&format!(
                    "{}: {}",
                    path.display(),
                    e
                )));
            }
        };
        log::debug!("Loaded configuration from {}", path.display());
        Self::from_json_str(&content)
    }

    fn root_section(&self) -> ConfigSection<'_> {
        ConfigSection {
            path: ConfigPath::new(),
            value: &self.root,
        }
    }

    /// Returns the section at `name`, or `None` when it is not present at all.
    pub fn section(&self, name: &str) -> Option<ConfigSection<'_>> {
        self.root_section().section(name)
    }

    /// True if the named subtree is present, even if it is empty.
    pub fn section_exists(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub fn required_section(&self, name: &str) -> Result<ConfigSection<'_>, DocumentError> {
        self.root_section().required_section(name)
    }

    /// Resolves `section:key` to its text. Fails with `ConfigurationMissing` carrying the
    /// full path when the value is absent or is not a scalar.
    pub fn required_value(&self, section: &str, key: &str) -> Result<String, DocumentError> {
        let full_path = ConfigPath::parse(section).child(key);
        match self.section(section) {
            Some(found) => found.required_value(key),
            None => Err(DocumentError::configuration_missing(&full_path)),
        }
    }

    /// Resolves `path` to its text, or `None` when absent or not a scalar.
    pub fn value(&self, path: &str) -> Option<String> {
        self.root_section().value(path)
    }
}

/// A borrowed view of one configuration subtree.
#[derive(Debug, Clone)]
pub struct ConfigSection<'a> {
    path: ConfigPath,
    value: &'a Value,
}

impl<'a> ConfigSection<'a> {
    pub fn path(&self) -> &ConfigPath {
        &self.path
    }

    pub fn raw(&self) -> &'a Value {
        self.value
    }

    /// Case-insensitive lookup of a single key. `null` counts as absent.
    fn child(value: &'a Value, key: &str) -> Option<&'a Value> {
        let object = value.as_object()?;
        let found = match object.get(key) {
            Some(found) => found,
            None => {
                object
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(key))?
                    .1
            }
        };
        if found.is_null() { None } else { Some(found) }
    }

    pub fn section(&self, name: &str) -> Option<ConfigSection<'a>> {
        let relative = ConfigPath::parse(name);
        let mut current = self.value;
        for segment in relative.segments() {
            current = Self::child(current, segment)?;
        }
        let mut path = self.path.clone();
        for segment in relative.segments() {
            path.add(segment);
        }
        Some(ConfigSection {
            path,
            value: current,
        })
    }

    pub fn exists(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub fn required_section(&self, name: &str) -> Result<ConfigSection<'a>, DocumentError> {
        match self.section(name) {
            Some(section) => Ok(section),
            None => Err(DocumentError::configuration_missing(&self.path.child(name))),
        }
    }

    /// The section's own value rendered as text, if it is a scalar.
    pub fn as_text(&self) -> Option<String> {
        PrimitiveValue::from_json(self.value).as_text()
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.section(key).and_then(|section| section.as_text())
    }

    pub fn required_value(&self, key: &str) -> Result<String, DocumentError> {
        match self.value(key) {
            Some(value) => Ok(value),
            None => Err(DocumentError::configuration_missing(&self.path.child(key))),
        }
    }

    /// The section's direct children as `(key, text)` pairs, in declaration order.
    /// Fails when the section is not an object or when any child is not a scalar.
    pub fn children(&self) -> Result<Vec<(String, String)>, DocumentError> {
        let object = match self.value.as_object() {
            Some(object) => object,
            None => return Err(DocumentError::configuration_missing(&self.path)),
        };
        let mut children = Vec::with_capacity(object.len());
        for (key, value) in object {
            match PrimitiveValue::from_json(value).as_text() {
                Some(text) => children.push((key.clone(), text)),
                None => {
                    return Err(DocumentError::configuration_missing(&self.path.child(key)));
                }
            }
        }
        Ok(children)
    }
}

/// Whether documentation generation is switched on for this process.
///
/// Resolved once from the presence of the `OpenApi` section; when disabled nothing in
/// this crate does any work and no documentation routes exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentationFeature {
    Enabled,
    Disabled,
}

impl DocumentationFeature {
    pub fn resolve(configuration: &Configuration) -> Self {
        if configuration.section_exists(OPENAPI_SECTION) {
            DocumentationFeature::Enabled
        } else {
            log::info!(
                "No '{}' configuration section, API documentation is disabled",
                OPENAPI_SECTION
            );
            DocumentationFeature::Disabled
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, DocumentationFeature::Enabled)
    }
}

#[cfg(test)]
mod test {
    use crate::config::{Configuration, DocumentationFeature};
    use crate::error::DocumentError;
    use serde_json::json;

    fn configuration() -> Configuration {
        Configuration::new(json!({
            "OpenApi": {
                "Document": {
                    "Title": "eShop - Catalog HTTP API",
                    "Description": "The Catalog Microservice HTTP API."
                }
            },
            "Identity": {
                "Url": "http://localhost:5223",
                "Scopes": {
                    "orders": "Ordering API",
                    "basket": "Basket API"
                }
            },
            "Empty": {},
            "Nothing": null,
            "Retries": 3,
            "Verbose": true
        }))
    }

    #[test]
    fn test_required_value_present() {
        let config = configuration();
        assert_eq!(
            config.required_value("OpenApi", "Document:Title").unwrap(),
            "eShop - Catalog HTTP API"
        );
        assert_eq!(
            config.required_value("Identity", "Url").unwrap(),
            "http://localhost:5223"
        );
    }

    #[test]
    fn test_required_value_missing_reports_full_path() {
        let config = configuration();
        let err = config.required_value("OpenApi", "Document:Version").unwrap_err();
        assert_eq!(
            err,
            DocumentError::ConfigurationMissing("OpenApi:Document:Version".to_string())
        );

        let err = config.required_value("Missing:Section", "Key").unwrap_err();
        assert_eq!(err.missing_path(), Some("Missing:Section:Key"));
    }

    #[test]
    fn test_required_value_rejects_structures() {
        let config = configuration();
        let err = config.required_value("OpenApi", "Document").unwrap_err();
        assert_eq!(err.missing_path(), Some("OpenApi:Document"));
    }

    #[test]
    fn test_scalars_render_as_text() {
        let config = configuration();
        assert_eq!(config.value("Retries").as_deref(), Some("3"));
        assert_eq!(config.value("Verbose").as_deref(), Some("true"));
    }

    #[test]
    fn test_section_exists_distinguishes_empty_from_absent() {
        let config = configuration();
        assert!(config.section_exists("Empty"));
        assert!(config.section_exists("Identity:Scopes"));
        assert!(!config.section_exists("Nothing"));
        assert!(!config.section_exists("Absent"));
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let config = configuration();
        assert!(config.section_exists("openapi"));
        assert_eq!(
            config.required_value("IDENTITY", "url").unwrap(),
            "http://localhost:5223"
        );
    }

    #[test]
    fn test_section_path_keeps_parent() {
        let config = configuration();
        let identity = config.required_section("Identity").unwrap();
        let scopes = identity.required_section("Scopes").unwrap();
        assert_eq!(scopes.path().format_path(), "Identity:Scopes");
        let err = identity.required_section("Audience").unwrap_err();
        assert_eq!(err.missing_path(), Some("Identity:Audience"));
    }

    #[test]
    fn test_children_keep_declaration_order() {
        let config = configuration();
        let scopes = config.required_section("Identity:Scopes").unwrap();
        assert_eq!(
            scopes.children().unwrap(),
            vec![
                ("orders".to_string(), "Ordering API".to_string()),
                ("basket".to_string(), "Basket API".to_string()),
            ]
        );
    }

    #[test]
    fn test_children_reject_malformed_sections() {
        let config = Configuration::new(json!({
            "Identity": { "Scopes": ["orders"], "Nested": { "a": { "b": 1 } } }
        }));
        let scopes = config.required_section("Identity:Scopes").unwrap();
        assert_eq!(scopes.children().unwrap_err().missing_path(), Some("Identity:Scopes"));
        let nested = config.required_section("Identity:Nested").unwrap();
        assert_eq!(nested.children().unwrap_err().missing_path(), Some("Identity:Nested:a"));
    }

    #[test]
    fn test_from_json_str() {
        let config = Configuration::from_json_str(r#"{"OpenApi": {}}"#).unwrap();
        assert!(config.section_exists("OpenApi"));
        assert!(matches!(
            Configuration::from_json_str("{ not json"),
            Err(DocumentError::ConfigurationLoad(_))
        ));
    }

    #[test]
    fn test_from_missing_file() {
        let result = Configuration::from_file_path("does/not/exist/appsettings.json");
        assert!(matches!(result, Err(DocumentError::ConfigurationLoad(_))));
    }

    #[test]
    fn test_feature_resolution() {
        assert_eq!(
            DocumentationFeature::resolve(&configuration()),
            DocumentationFeature::Enabled
        );
        let disabled = DocumentationFeature::resolve(&Configuration::new(json!({})));
        assert_eq!(disabled, DocumentationFeature::Disabled);
        assert!(!disabled.is_enabled());
    }
}
