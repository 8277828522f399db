//! The fixed chain of document and operation transformations.
//!
//! Document steps run once per document, in [`DOCUMENT_STEPS`] order. Operation steps then
//! run over every operation, in [`OPERATION_STEPS`] order. The set of steps is closed.

pub mod authorization;
pub mod description;
pub mod security;

use crate::config::ConfigSection;
use crate::error::DocumentError;
use crate::provider::EndpointCatalog;
use crate::transform::security::SchemeOutcome;
use crate::types::Document;
use crate::types::operation::Operation;
use crate::types::version::VersionDescriptor;
use http::Method;
use std::fmt::{Display, Formatter};

/// Inputs shared by every step while one document is assembled.
pub(crate) struct StepContext<'a> {
    pub(crate) document_name: &'a str,
    pub(crate) descriptor: &'a VersionDescriptor,
    pub(crate) title: &'a str,
    pub(crate) description: &'a str,
    pub(crate) identity: Option<ConfigSection<'a>>,
    pub(crate) catalog: &'a dyn EndpointCatalog,
    pub(crate) scheme: SchemeOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStep {
    /// Title, version and description.
    ApiVersionInfo,
    /// The `oauth2` scheme in the component registry.
    SecuritySchemes,
    /// Servers are deployment specific and are filled in downstream.
    ClearServers,
}

pub const DOCUMENT_STEPS: [DocumentStep; 3] = [
    DocumentStep::ApiVersionInfo,
    DocumentStep::SecuritySchemes,
    DocumentStep::ClearServers,
];

impl Display for DocumentStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStep::ApiVersionInfo => write!(f, "api version info"),
            DocumentStep::SecuritySchemes => write!(f, "security schemes"),
            DocumentStep::ClearServers => write!(f, "clear servers"),
        }
    }
}

impl DocumentStep {
    pub(crate) fn apply(
        &self,
        document: &mut Document,
        context: &mut StepContext<'_>,
    ) -> Result<(), DocumentError> {
        log::debug!(
            "Applying document step '{}' to '{}'",
            self,
            context.document_name
        );
        match self {
            DocumentStep::ApiVersionInfo => {
                document.info.title = context.title.to_string();
                document.info.version = context.descriptor.version().to_string();
                document.info.description = context.description.to_string();
            }
            DocumentStep::SecuritySchemes => {
                context.scheme =
                    security::apply_security_scheme(document, context.identity.as_ref())?;
            }
            DocumentStep::ClearServers => document.servers.clear(),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStep {
    AuthorizationChecks,
    DeprecatedStatus,
}

pub const OPERATION_STEPS: [OperationStep; 2] = [
    OperationStep::AuthorizationChecks,
    OperationStep::DeprecatedStatus,
];

impl Display for OperationStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationStep::AuthorizationChecks => write!(f, "authorization checks"),
            OperationStep::DeprecatedStatus => write!(f, "deprecated status"),
        }
    }
}

impl OperationStep {
    pub(crate) fn apply(
        &self,
        path: &str,
        method: &Method,
        operation: &mut Operation,
        context: &StepContext<'_>,
    ) {
        match self {
            OperationStep::AuthorizationChecks => {
                let requires_authorization =
                    context
                        .catalog
                        .requires_authorization(context.document_name, path, method);
                authorization::annotate_authorization(
                    operation,
                    requires_authorization,
                    &context.scheme,
                );
            }
            OperationStep::DeprecatedStatus => {
                description::flag_deprecated(operation, context.descriptor)
            }
        }
    }
}

/// Runs every operation step over every operation in the document.
pub(crate) fn apply_operation_steps(document: &mut Document, context: &StepContext<'_>) {
    for (path, item) in document.paths.iter_mut() {
        for (method, operation) in item.operations_mut() {
            for step in OPERATION_STEPS {
                step.apply(path, &method, operation, context);
            }
        }
    }
}
