use crate::CONFIG_KEY_DELIMITER;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// A fully qualified configuration path such as `OpenApi:Document:Title`.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ConfigPath(pub Vec<String>);

impl ConfigPath {
    pub fn new() -> Self {
        ConfigPath(Vec::new())
    }

    /// Parses a colon separated path. Empty segments are dropped.
    pub fn parse(path: &str) -> Self {
        let mut config_path = ConfigPath::new();
        for segment in Self::split_segments(path) {
            config_path.add(segment);
        }
        config_path
    }

    pub fn add(&mut self, segment: impl AsRef<str>) -> &mut Self {
        let segment = segment.as_ref();
        if segment.contains(CONFIG_KEY_DELIMITER) {
            for inner in Self::split_segments(segment) {
                self.0.push(inner.to_owned());
            }
        } else if !segment.is_empty() {
            self.0.push(segment.to_owned());
        }

        self
    }

    /// Returns a new path with `segment` appended, leaving `self` untouched.
    pub fn child(&self, segment: impl AsRef<str>) -> Self {
        let mut child = self.clone();
        child.add(segment);
        child
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn format_path(&self) -> String {
        self.0.join(CONFIG_KEY_DELIMITER)
    }

    fn split_segments(path: &str) -> impl Iterator<Item = &str> {
        path.split(CONFIG_KEY_DELIMITER).filter(|s| !s.is_empty())
    }
}

impl Display for ConfigPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format_path())
    }
}
