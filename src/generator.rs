use crate::config::Configuration;
use crate::error::DocumentError;
use crate::provider::{EndpointCatalog, VersionDescriptorProvider};
use crate::transform::description::describe_version;
use crate::transform::security::SchemeOutcome;
use crate::transform::{DOCUMENT_STEPS, StepContext, apply_operation_steps};
use crate::types::Document;
use crate::types::version::VersionDescriptor;
use crate::validator::check_document;
use crate::{DOCUMENT_DESCRIPTION_KEY, DOCUMENT_TITLE_KEY, IDENTITY_SECTION, OPENAPI_SECTION};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// The stages a document passes through while it is assembled.
enum AssemblyState {
    NotStarted,
    VersionResolved(VersionDescriptor),
    DescriptionComposed {
        descriptor: VersionDescriptor,
        title: String,
        description: String,
    },
    ComponentsInjected {
        descriptor: VersionDescriptor,
        title: String,
        description: String,
        document: Document,
        scheme: SchemeOutcome,
    },
    OperationsAnnotated(Document),
    Finalized(Document),
}

impl Display for AssemblyState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AssemblyState::NotStarted => write!(f, "not started"),
            AssemblyState::VersionResolved(_) => write!(f, "version resolved"),
            AssemblyState::DescriptionComposed { .. } => write!(f, "description composed"),
            AssemblyState::ComponentsInjected { .. } => write!(f, "components injected"),
            AssemblyState::OperationsAnnotated(_) => write!(f, "operations annotated"),
            AssemblyState::Finalized(_) => write!(f, "finalized"),
        }
    }
}

/// Builds the OpenAPI document for one API version at a time.
///
/// Every call starts from a fresh base document supplied by the [`EndpointCatalog`], so a
/// failure part way through never leaves a half transformed document behind.
#[derive(Clone)]
pub struct DocumentGenerator {
    configuration: Arc<Configuration>,
    versions: Arc<dyn VersionDescriptorProvider>,
    catalog: Arc<dyn EndpointCatalog>,
}

impl DocumentGenerator {
    pub fn new<V, C>(configuration: Arc<Configuration>, versions: V, catalog: C) -> Self
    where
        V: VersionDescriptorProvider + 'static,
        C: EndpointCatalog + 'static,
    {
        Self {
            configuration,
            versions: Arc::new(versions),
            catalog: Arc::new(catalog),
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Names of every document the version provider knows about.
    pub fn document_names(&self) -> Vec<String> {
        self.versions
            .descriptions()
            .iter()
            .map(|descriptor| descriptor.name().to_string())
            .collect()
    }

    /// Assembles the document named `document_name`.
    ///
    /// Returns `Ok(None)` when no API version matches the name. Missing required
    /// configuration fails with [`DocumentError::ConfigurationMissing`].
    pub fn generate(&self, document_name: &str) -> Result<Option<Document>, DocumentError> {
        let mut state = AssemblyState::NotStarted;
        loop {
            let previous = state.to_string();
            state = match self.advance(document_name, state)? {
                Some(AssemblyState::Finalized(document)) => {
                    log::debug!("Document '{}' finalized", document_name);
                    return Ok(Some(document));
                }
                Some(next) => next,
                None => return Ok(None),
            };
            log::trace!("Document '{}': {} -> {}", document_name, previous, state);
        }
    }

    fn context<'a>(
        &'a self,
        document_name: &'a str,
        descriptor: &'a VersionDescriptor,
        title: &'a str,
        description: &'a str,
        scheme: SchemeOutcome,
    ) -> StepContext<'a> {
        StepContext {
            document_name,
            descriptor,
            title,
            description,
            identity: self.configuration.section(IDENTITY_SECTION),
            catalog: self.catalog.as_ref(),
            scheme,
        }
    }

    fn advance(
        &self,
        document_name: &str,
        state: AssemblyState,
    ) -> Result<Option<AssemblyState>, DocumentError> {
        let next = match state {
            AssemblyState::NotStarted => match self.versions.find(document_name) {
                Some(descriptor) => AssemblyState::VersionResolved(descriptor),
                None => {
                    log::debug!("No API version matches document '{}'", document_name);
                    return Ok(None);
                }
            },
            AssemblyState::VersionResolved(descriptor) => {
                let title = self
                    .configuration
                    .required_value(OPENAPI_SECTION, DOCUMENT_TITLE_KEY)?;
                let base = self
                    .configuration
                    .required_value(OPENAPI_SECTION, DOCUMENT_DESCRIPTION_KEY)?;
                let description = describe_version(&base, &descriptor);
                AssemblyState::DescriptionComposed {
                    descriptor,
                    title,
                    description,
                }
            }
            AssemblyState::DescriptionComposed {
                descriptor,
                title,
                description,
            } => {
                let mut document = self.catalog.describe(document_name);
                let mut context = self.context(
                    document_name,
                    &descriptor,
                    &title,
                    &description,
                    SchemeOutcome::NotApplicable,
                );
                for step in DOCUMENT_STEPS {
                    step.apply(&mut document, &mut context)?;
                }
                let scheme = context.scheme;
                AssemblyState::ComponentsInjected {
                    descriptor,
                    title,
                    description,
                    document,
                    scheme,
                }
            }
            AssemblyState::ComponentsInjected {
                descriptor,
                title,
                description,
                mut document,
                scheme,
            } => {
                let context =
                    self.context(document_name, &descriptor, &title, &description, scheme);
                apply_operation_steps(&mut document, &context);
                AssemblyState::OperationsAnnotated(document)
            }
            AssemblyState::OperationsAnnotated(document) => {
                check_document(&document, document_name)?;
                AssemblyState::Finalized(document)
            }
            AssemblyState::Finalized(document) => AssemblyState::Finalized(document),
        };
        Ok(Some(next))
    }
}
