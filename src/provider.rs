use crate::types::operation::Operation;
use crate::types::version::VersionDescriptor;
use crate::types::{Document, Server};
use http::Method;
use std::collections::{HashMap, HashSet};

/// Supplies the API versions known to the routing layer.
pub trait VersionDescriptorProvider: Send + Sync {
    fn descriptions(&self) -> Vec<VersionDescriptor>;

    /// The descriptor whose name matches `document_name`, if any.
    fn find(&self, document_name: &str) -> Option<VersionDescriptor> {
        self.descriptions()
            .into_iter()
            .find(|descriptor| descriptor.name() == document_name)
    }
}

impl VersionDescriptorProvider for Vec<VersionDescriptor> {
    fn descriptions(&self) -> Vec<VersionDescriptor> {
        self.clone()
    }

    fn find(&self, document_name: &str) -> Option<VersionDescriptor> {
        self.iter()
            .find(|descriptor| descriptor.name() == document_name)
            .cloned()
    }
}

/// Describes the endpoints the routing layer registered for each document.
pub trait EndpointCatalog: Send + Sync {
    /// The base document for `document_name`: registered paths and operations, any schemas
    /// and whatever default servers the routing layer adds. Every call returns a fresh copy.
    fn describe(&self, document_name: &str) -> Document;

    /// Whether the handler behind `method path` carries an authorization requirement.
    fn requires_authorization(&self, document_name: &str, path: &str, method: &Method) -> bool;
}

type EndpointKey = (String, String, Method);

/// An in-memory [`EndpointCatalog`], filled in up front.
#[derive(Debug, Default, Clone)]
pub struct StaticEndpointCatalog {
    documents: HashMap<String, Document>,
    authorized: HashSet<EndpointKey>,
}

impl StaticEndpointCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn document_mut(&mut self, document_name: &str) -> &mut Document {
        self.documents
            .entry(document_name.to_string())
            .or_default()
    }

    /// Registers an anonymous endpoint.
    pub fn endpoint(
        mut self,
        document_name: &str,
        path: &str,
        method: Method,
        operation: Operation,
    ) -> Self {
        self.document_mut(document_name)
            .add_operation(path, &method, operation);
        self
    }

    /// Registers an endpoint whose handler requires an authenticated caller.
    pub fn authorized_endpoint(
        mut self,
        document_name: &str,
        path: &str,
        method: Method,
        operation: Operation,
    ) -> Self {
        if self
            .document_mut(document_name)
            .add_operation(path, &method, operation)
        {
            self.authorized
                .insert((document_name.to_string(), path.to_string(), method));
        }
        self
    }

    pub fn server(mut self, document_name: &str, server: Server) -> Self {
        self.document_mut(document_name).servers.push(server);
        self
    }

    /// Replaces the base document for `document_name` wholesale.
    pub fn document(mut self, document_name: &str, document: Document) -> Self {
        self.documents.insert(document_name.to_string(), document);
        self
    }

    /// Marks an endpoint of a document supplied through [`Self::document`] as requiring
    /// authorization.
    pub fn require_authorization(mut self, document_name: &str, path: &str, method: Method) -> Self {
        self.authorized
            .insert((document_name.to_string(), path.to_string(), method));
        self
    }
}

impl EndpointCatalog for StaticEndpointCatalog {
    fn describe(&self, document_name: &str) -> Document {
        self.documents
            .get(document_name)
            .cloned()
            .unwrap_or_default()
    }

    fn requires_authorization(&self, document_name: &str, path: &str, method: &Method) -> bool {
        self.authorized.contains(&(
            document_name.to_string(),
            path.to_string(),
            method.clone(),
        ))
    }
}
