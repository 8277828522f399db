pub mod cache;
pub mod config;
pub mod error;
pub mod generator;
pub mod provider;
pub mod serve;
pub mod transform;
pub mod types;
mod validator;

pub use crate::cache::DocumentCollection;
pub use crate::config::{Configuration, DocumentationFeature};
pub use crate::error::DocumentError;
pub use crate::generator::DocumentGenerator;
pub use crate::provider::{EndpointCatalog, StaticEndpointCatalog, VersionDescriptorProvider};
pub use crate::serve::{DocumentRoutes, Environment};

const CONFIG_KEY_DELIMITER: &'static str = ":";
const OPENAPI_SECTION: &'static str = "OpenApi";
const DOCUMENT_TITLE_KEY: &'static str = "Document:Title";
const DOCUMENT_DESCRIPTION_KEY: &'static str = "Document:Description";
const IDENTITY_SECTION: &'static str = "Identity";
const IDENTITY_URL_KEY: &'static str = "Url";
const IDENTITY_SCOPES_KEY: &'static str = "Scopes";
const AUTHORIZE_ENDPOINT: &'static str = "/connect/authorize";
const TOKEN_ENDPOINT: &'static str = "/connect/token";
const OAUTH2_SCHEME_NAME: &'static str = "oauth2";
const UNAUTHORIZED_STATUS: (&'static str, &'static str) = ("401", "Unauthorized");
const FORBIDDEN_STATUS: (&'static str, &'static str) = ("403", "Forbidden");
const DEPRECATION_NOTICE: &'static str = "This API version has been deprecated.";
const SUNSET_NOTICE_PREFIX: &'static str = "The API will be sunset on ";
const SHORT_DATE_FORMAT: &'static str = "%-m/%-d/%Y";
const HTML_MEDIA_TYPE: &'static str = "text/html";
const EXTENSION_PREFIX: &'static str = "x-";
const DEFAULT_OPENAPI_VERSION: &'static str = "3.0.1";
const DEFAULT_DOCUMENT_PREFIX: &'static str = "/openapi";
const DEFAULT_VIEWER_PATH: &'static str = "/scalar/v1";
const DOCUMENT_EXTENSION: &'static str = ".json";
