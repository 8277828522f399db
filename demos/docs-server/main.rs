use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use oasdoc::types::operation::{Operation, Response as OperationResponse};
use oasdoc::types::version::VersionDescriptor;
use oasdoc::{Configuration, DocumentCollection, DocumentRoutes, Environment, StaticEndpointCatalog};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpListener;

fn catalog() -> StaticEndpointCatalog {
    let list_items = Operation::new()
        .with_operation_id("ListItems")
        .with_tag("Catalog")
        .with_response("200", OperationResponse::new("OK"));
    let create_item = Operation::new()
        .with_operation_id("CreateItem")
        .with_tag("Catalog")
        .with_response("201", OperationResponse::new("Created"));
    let delete_item = Operation::new()
        .with_operation_id("DeleteItem")
        .with_tag("Catalog")
        .with_response("204", OperationResponse::new("No Content"));

    StaticEndpointCatalog::new()
        .endpoint("v1", "/api/catalog/items", Method::GET, list_items.clone())
        .authorized_endpoint("v1", "/api/catalog/items", Method::POST, create_item.clone())
        .endpoint("v2", "/api/catalog/items", Method::GET, list_items)
        .authorized_endpoint("v2", "/api/catalog/items", Method::POST, create_item)
        .authorized_endpoint("v2", "/api/catalog/items/{id}", Method::DELETE, delete_item)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));

    let configuration = Arc::new(Configuration::from_file_path(
        "demos/docs-server/appsettings.json",
    )?);
    let versions_file = std::fs::read_to_string("demos/docs-server/versions.json")?;
    let versions: Vec<VersionDescriptor> = serde_json::from_str(&versions_file)?;

    let collection = match DocumentCollection::for_configuration(configuration, versions, catalog())
    {
        Some(collection) => Arc::new(collection),
        None => {
            println!("OpenApi section is missing, documentation is disabled");
            return Ok(());
        }
    };
    let published = collection.generate_all()?;
    println!("Published {} document(s)", published.len());

    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "Development".to_string());
    let routes = Arc::new(
        DocumentRoutes::new(collection).with_environment(Environment::from_name(&environment)),
    );
    let docs_service = DocsService { routes };

    let listener = TcpListener::bind(addr).await?;
    println!("Listening on http://{}/openapi/v1.json", addr);
    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);

        let docs_service_clone = docs_service.clone();
        tokio::task::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(io, docs_service_clone)
                .await
            {
                println!("Error serving connection: {:?}", err);
            }
        });
    }
}

#[derive(Clone)]
pub struct DocsService {
    pub routes: Arc<DocumentRoutes>,
}

impl Service<Request<Incoming>> for DocsService {
    type Response = Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let docs_service = self.clone();
        Box::pin(async move { Ok(docs_service.routes.respond(&req)) })
    }
}
