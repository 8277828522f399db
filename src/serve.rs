use crate::cache::DocumentCollection;
use crate::{DEFAULT_DOCUMENT_PREFIX, DEFAULT_VIEWER_PATH, DOCUMENT_EXTENSION};
use bytes::Bytes;
use http::header::{ALLOW, CONTENT_TYPE, LOCATION};
use http::{HeaderValue, Method, Request, Response, StatusCode};
use http_body_util::Full;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// The hosting environment the service runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
    Other(String),
}

impl Environment {
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("development") {
            Environment::Development
        } else if name.eq_ignore_ascii_case("staging") {
            Environment::Staging
        } else if name.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Other(name.to_string())
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "Development"),
            Environment::Staging => write!(f, "Staging"),
            Environment::Production => write!(f, "Production"),
            Environment::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Maps `/<prefix>/<name>.json` requests onto published documents.
pub struct DocumentRoutes {
    collection: Arc<DocumentCollection>,
    prefix: String,
    environment: Environment,
    viewer_path: String,
}

impl DocumentRoutes {
    pub fn new(collection: Arc<DocumentCollection>) -> Self {
        Self {
            collection,
            prefix: DEFAULT_DOCUMENT_PREFIX.to_string(),
            environment: Environment::Production,
            viewer_path: DEFAULT_VIEWER_PATH.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_viewer_path(mut self, viewer_path: impl Into<String>) -> Self {
        self.viewer_path = viewer_path.into();
        self
    }

    /// Extracts the document name from a request path, e.g. `v1` from `/openapi/v1.json`.
    pub fn document_name<'p>(&self, path: &'p str) -> Option<&'p str> {
        let name = path
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix('/')?
            .strip_suffix(DOCUMENT_EXTENSION)?;
        if name.is_empty() || name.contains('/') {
            return None;
        }
        Some(name)
    }

    pub fn respond<B>(&self, request: &Request<B>) -> Response<Full<Bytes>> {
        let path = request.uri().path();

        if path == "/" && self.environment.is_development() {
            return self.redirect_to_viewer();
        }

        let document_name = match self.document_name(path) {
            Some(name) => name,
            None => return text_response(StatusCode::NOT_FOUND, "Not Found"),
        };

        if request.method() != Method::GET && request.method() != Method::HEAD {
            let mut response = text_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static("GET, HEAD"));
            return response;
        }

        match self.collection.get_or_generate(document_name) {
            Ok(Some(document)) => match serde_json::to_vec(document.as_ref()) {
                Ok(body) => {
                    let mut response = Response::new(Full::new(Bytes::from(body)));
                    response
                        .headers_mut()
                        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                    response
                }
                Err(e) => {
                    log::error!("Serializing document '{}' failed: {}", document_name, e);
                    text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                }
            },
            Ok(None) => text_response(StatusCode::NOT_FOUND, "Not Found"),
            Err(e) => {
                log::error!("Generating document '{}' failed: {}", document_name, e);
                text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }

    fn redirect_to_viewer(&self) -> Response<Full<Bytes>> {
        let location = match HeaderValue::from_str(&self.viewer_path) {
            Ok(location) => location,
            Err(_) => {
                log::warn!("Viewer path '{}' is not a valid header", self.viewer_path);
                return text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
            }
        };
        let mut response = Response::new(Full::new(Bytes::new()));
        *response.status_mut() = StatusCode::FOUND;
        response.headers_mut().insert(LOCATION, location);
        response
    }
}

fn text_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(message.to_string())));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

#[cfg(test)]
mod test {
    use crate::cache::DocumentCollection;
    use crate::config::Configuration;
    use crate::provider::StaticEndpointCatalog;
    use crate::serve::{DocumentRoutes, Environment};
    use crate::types::operation::Operation;
    use crate::types::version::{ApiVersion, VersionDescriptor};
    use bytes::Bytes;
    use http::header::{CONTENT_TYPE, LOCATION};
    use http::{Method, Request, Response, StatusCode};
    use http_body_util::{BodyExt, Full};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn routes(settings: Value) -> DocumentRoutes {
        let collection = DocumentCollection::for_configuration(
            Arc::new(Configuration::new(settings)),
            vec![VersionDescriptor::new("v1", ApiVersion::new(1, 0))],
            StaticEndpointCatalog::new().endpoint("v1", "/items", Method::GET, Operation::new()),
        )
        .unwrap();
        DocumentRoutes::new(Arc::new(collection))
    }

    fn settings() -> Value {
        json!({ "OpenApi": { "Document": { "Title": "Catalog", "Description": "" } } })
    }

    fn get(path: &str) -> Request<()> {
        Request::builder().uri(path).body(()).unwrap()
    }

    async fn body_bytes(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[test]
    fn test_document_name_extraction() {
        let routes = routes(settings());
        assert_eq!(routes.document_name("/openapi/v1.json"), Some("v1"));
        assert_eq!(routes.document_name("/openapi/.json"), None);
        assert_eq!(routes.document_name("/openapi/a/b.json"), None);
        assert_eq!(routes.document_name("/other/v1.json"), None);
        let custom = routes.with_prefix("/docs/");
        assert_eq!(custom.document_name("/docs/v2.json"), Some("v2"));
    }

    #[tokio::test]
    async fn test_serves_document() {
        let routes = routes(settings());
        let response = routes.respond(&get("/openapi/v1.json"));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["info"]["title"], json!("Catalog"));
        assert_eq!(json["servers"], json!([]));
    }

    #[test]
    fn test_unknown_document_is_not_found() {
        let routes = routes(settings());
        assert_eq!(
            routes.respond(&get("/openapi/v7.json")).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_generation_failure_is_server_error() {
        let routes = routes(json!({ "OpenApi": {} }));
        let response = routes.respond(&get("/openapi/v1.json"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_bytes(response).await;
        assert_eq!(body, Bytes::from_static(b"Internal Server Error"));
        assert!(!String::from_utf8_lossy(&body).contains("OpenApi"));
    }

    #[test]
    fn test_rejects_other_methods() {
        let routes = routes(settings());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/openapi/v1.json")
            .body(())
            .unwrap();
        assert_eq!(
            routes.respond(&request).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn test_root_redirect_only_in_development() {
        let production = routes(settings());
        assert_eq!(production.respond(&get("/")).status(), StatusCode::NOT_FOUND);

        let development = routes(settings()).with_environment(Environment::from_name("Development"));
        let response = development.respond(&get("/"));
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/scalar/v1");
    }

    #[test]
    fn test_environment_names() {
        assert!(Environment::from_name("development").is_development());
        assert_eq!(Environment::from_name("PRODUCTION"), Environment::Production);
        assert_eq!(
            Environment::from_name("Testing").to_string(),
            "Testing".to_string()
        );
    }
}
