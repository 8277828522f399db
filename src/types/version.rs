use crate::HTML_MEDIA_TYPE;
use chrono::NaiveDate;
use jsonschema::Draft;
use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use url::Url;

/// The OpenAPI format version a document is written in.
pub enum OpenApiVersion {
    V30x,
    V31x,
}

impl FromStr for OpenApiVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("3.1") {
            Ok(OpenApiVersion::V31x)
        } else if s.starts_with("3.0") {
            Ok(OpenApiVersion::V30x)
        } else {
            Err(VersionError::unsupported_version(s))
        }
    }
}

impl OpenApiVersion {
    pub(crate) fn get_draft(&self) -> Draft {
        match self {
            OpenApiVersion::V30x => Draft::Draft4,
            OpenApiVersion::V31x => Draft::Draft202012,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    UnsupportedVersion(String),
    InvalidApiVersion(String),
    InvalidLinkTarget(String),
}

impl VersionError {
    pub(crate) fn unsupported_version<T>(version: &T) -> Self
    where
        T: ToString + ?Sized,
    {
        VersionError::UnsupportedVersion(version.to_string())
    }

    pub(crate) fn invalid_api_version<T>(version: &T) -> Self
    where
        T: ToString + ?Sized,
    {
        VersionError::InvalidApiVersion(version.to_string())
    }
}

impl Display for VersionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionError::UnsupportedVersion(version) => {
                write!(f, "Unsupported version: {}", version)
            }
            VersionError::InvalidApiVersion(version) => {
                write!(f, "Invalid API version: {}", version)
            }
            VersionError::InvalidLinkTarget(target) => {
                write!(f, "Invalid link target: {}", target)
            }
        }
    }
}

impl std::error::Error for VersionError {}

/// A `major.minor` API version. Ordering compares the major number first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl Display for ApiVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches(['v', 'V']);
        let (major, minor) = match trimmed.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (trimmed, "0"),
        };
        match (major.parse::<u32>(), minor.parse::<u32>()) {
            (Ok(major), Ok(minor)) => Ok(ApiVersion::new(major, minor)),
            _ => Err(VersionError::invalid_api_version(s)),
        }
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ApiVersion::from_str(&value)
    }
}

impl From<ApiVersion> for String {
    fn from(value: ApiVersion) -> Self {
        value.to_string()
    }
}

/// A link published alongside a sunset policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(deserialize_with = "deserialize_link_target")]
    target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    media_type: Option<String>,
}

impl Link {
    /// Creates a link after checking that `target` is a valid URI. The configured text is
    /// kept as-is so it renders exactly as configured.
    pub fn new(target: impl Into<String>) -> Result<Self, VersionError> {
        let target = target.into();
        if let Err(e) = parse_link_target(&target) {
            log::warn!("Rejecting link target '{}': {}", target, e);
            return Err(VersionError::InvalidLinkTarget(target));
        }
        Ok(Self {
            target,
            title: None,
            media_type: None,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    /// The title, or the raw target when no (non-empty) title is set.
    pub fn display_text(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.target,
        }
    }

    /// Whether the link points at a page meant for people rather than machines.
    pub fn is_human_readable(&self) -> bool {
        self.media_type
            .as_deref()
            .and_then(|media_type| media_type.split(';').next())
            .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(HTML_MEDIA_TYPE))
    }
}

/// Link targets are absolute URIs or IRIs of any scheme (`https:`, `urn:`, `mailto:` ...).
fn parse_link_target(target: &str) -> Result<Url, url::ParseError> {
    Url::parse(target.trim())
}

fn deserialize_link_target<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let target = String::deserialize(deserializer)?;
    match parse_link_target(&target) {
        Ok(_) => Ok(target),
        Err(e) => Err(DeError::custom(format!(
            "invalid link target '{}': {}",
            target, e
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SunsetPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    links: Vec<Link>,
}

impl SunsetPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    pub fn human_readable_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|link| link.is_human_readable())
    }
}

/// Metadata describing one API version, as supplied by the routing layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDescriptor {
    #[serde(rename = "groupName")]
    name: String,
    version: ApiVersion,
    #[serde(default)]
    deprecated: bool,
    #[serde(rename = "sunsetPolicy", default, skip_serializing_if = "Option::is_none")]
    sunset_policy: Option<SunsetPolicy>,
}

impl VersionDescriptor {
    pub fn new(name: impl Into<String>, version: ApiVersion) -> Self {
        Self {
            name: name.into(),
            version,
            deprecated: false,
            sunset_policy: None,
        }
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn with_sunset_policy(mut self, policy: SunsetPolicy) -> Self {
        self.sunset_policy = Some(policy);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn sunset_policy(&self) -> Option<&SunsetPolicy> {
        self.sunset_policy.as_ref()
    }
}

#[cfg(test)]
mod test {
    use crate::types::version::{
        ApiVersion, Link, OpenApiVersion, SunsetPolicy, VersionDescriptor, VersionError,
    };
    use chrono::NaiveDate;
    use jsonschema::Draft;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_openapi_version_draft() {
        let v30 = OpenApiVersion::from_str("3.0.1").unwrap();
        let v31 = OpenApiVersion::from_str("3.1.0").unwrap();
        assert_eq!(v30.get_draft(), Draft::Draft4);
        assert_eq!(v31.get_draft(), Draft::Draft202012);
        assert!(OpenApiVersion::from_str("2.0").is_err());
    }

    #[test]
    fn test_api_version_parse_and_display() {
        assert_eq!(ApiVersion::from_str("1.0").unwrap(), ApiVersion::new(1, 0));
        assert_eq!(ApiVersion::from_str("v2").unwrap(), ApiVersion::new(2, 0));
        assert_eq!(ApiVersion::new(2, 1).to_string(), "2.1");
        assert_eq!(
            ApiVersion::from_str("one"),
            Err(VersionError::InvalidApiVersion("one".to_string()))
        );
    }

    #[test]
    fn test_api_version_ordering() {
        let mut versions = vec![
            ApiVersion::new(2, 0),
            ApiVersion::new(1, 10),
            ApiVersion::new(1, 2),
        ];
        versions.sort();
        assert_eq!(
            versions,
            vec![
                ApiVersion::new(1, 2),
                ApiVersion::new(1, 10),
                ApiVersion::new(2, 0)
            ]
        );
    }

    #[test]
    fn test_link_rejects_invalid_target() {
        assert!(Link::new("https://example.com/policy").is_ok());
        assert!(matches!(
            Link::new("not a uri"),
            Err(VersionError::InvalidLinkTarget(_))
        ));
    }

    #[test]
    fn test_link_accepts_non_http_targets() {
        assert!(Link::new("urn:isbn:0451450523").is_ok());
        assert!(Link::new("mailto:api-team@example.com").is_ok());
        let iri = Link::new("https://例え.jp/sunset").unwrap();
        assert_eq!(iri.target(), "https://例え.jp/sunset");
    }

    #[test]
    fn test_deserialize_link_targets() {
        let policy: SunsetPolicy = serde_json::from_value(json!({
            "links": [
                { "target": "urn:isbn:0451450523", "title": "Retirement plan" },
                { "target": "https://例え.jp/sunset", "type": "text/html" }
            ]
        }))
        .unwrap();
        assert_eq!(policy.links().len(), 2);
        assert_eq!(policy.human_readable_links().count(), 1);

        let invalid = serde_json::from_value::<SunsetPolicy>(json!({
            "links": [{ "target": "no scheme here" }]
        }));
        assert!(invalid.is_err());
    }

    #[test]
    fn test_link_display_text_falls_back_to_target() {
        let untitled = Link::new("https://example.com").unwrap();
        assert_eq!(untitled.display_text(), "https://example.com");
        let empty_title = Link::new("https://example.com").unwrap().with_title("");
        assert_eq!(empty_title.display_text(), "https://example.com");
        let titled = Link::new("https://example.com").unwrap().with_title("Policy");
        assert_eq!(titled.display_text(), "Policy");
    }

    #[test]
    fn test_link_human_readable() {
        let html = Link::new("https://example.com")
            .unwrap()
            .with_media_type("text/html; charset=utf-8");
        let json = Link::new("https://example.com")
            .unwrap()
            .with_media_type("application/json");
        let untyped = Link::new("https://example.com").unwrap();
        assert!(html.is_human_readable());
        assert!(!json.is_human_readable());
        assert!(!untyped.is_human_readable());
    }

    #[test]
    fn test_descriptor_deserialize() {
        let descriptor: VersionDescriptor = serde_json::from_value(json!({
            "groupName": "v1",
            "version": "1.0",
            "deprecated": true,
            "sunsetPolicy": {
                "date": "2026-03-01",
                "links": [
                    { "target": "https://example.com/sunset", "title": "Sunset", "type": "text/html" }
                ]
            }
        }))
        .unwrap();
        assert_eq!(descriptor.name(), "v1");
        assert_eq!(descriptor.version(), ApiVersion::new(1, 0));
        assert!(descriptor.is_deprecated());
        let policy = descriptor.sunset_policy().unwrap();
        assert_eq!(policy.date(), NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(policy.human_readable_links().count(), 1);
    }

    #[test]
    fn test_sunset_policy_builder() {
        let policy = SunsetPolicy::new()
            .with_link(Link::new("https://example.com/a").unwrap())
            .with_link(
                Link::new("https://example.com/b")
                    .unwrap()
                    .with_media_type("text/html"),
            );
        assert!(policy.has_links());
        assert!(policy.date().is_none());
        let readable: Vec<&str> = policy.human_readable_links().map(|l| l.target()).collect();
        assert_eq!(readable, vec!["https://example.com/b"]);
    }
}
