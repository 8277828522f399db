use crate::config::{Configuration, DocumentationFeature};
use crate::error::DocumentError;
use crate::generator::DocumentGenerator;
use crate::provider::{EndpointCatalog, VersionDescriptorProvider};
use crate::types::Document;
use dashmap::DashMap;
use std::sync::{Arc, Mutex};

/// Published documents, addressed by document name.
///
/// A document is generated the first time it is asked for and shared from then on. While
/// one name is being generated, other requests for that name wait on that name's build
/// guard and then receive the published result. No map lock is held during generation, so
/// other names and plain lookups are not affected.
pub struct DocumentCollection {
    generator: DocumentGenerator,
    documents: DashMap<String, Arc<Document>>,
    building: DashMap<String, Arc<Mutex<()>>>,
}

impl DocumentCollection {
    pub fn new(generator: DocumentGenerator) -> Self {
        DocumentCollection {
            generator,
            documents: DashMap::new(),
            building: DashMap::new(),
        }
    }

    /// Builds a collection when the documentation feature is enabled by `configuration`.
    /// Returns `None` when the `OpenApi` section is absent.
    pub fn for_configuration<V, C>(
        configuration: Arc<Configuration>,
        versions: V,
        catalog: C,
    ) -> Option<Self>
    where
        V: VersionDescriptorProvider + 'static,
        C: EndpointCatalog + 'static,
    {
        match DocumentationFeature::resolve(&configuration) {
            DocumentationFeature::Enabled => Some(Self::new(DocumentGenerator::new(
                configuration,
                versions,
                catalog,
            ))),
            DocumentationFeature::Disabled => None,
        }
    }

    pub fn generator(&self) -> &DocumentGenerator {
        &self.generator
    }

    /// Returns the published document for `document_name`, generating it on first use.
    ///
    /// `Ok(None)` means no API version matches the name; nothing is cached in that case.
    /// A failed generation publishes nothing, so the next call tries again.
    pub fn get_or_generate(
        &self,
        document_name: &str,
    ) -> Result<Option<Arc<Document>>, DocumentError> {
        if let Some(document) = self.get(document_name) {
            return Ok(Some(document));
        }

        let guard = Arc::clone(
            self.building
                .entry(document_name.to_string())
                .or_default()
                .value(),
        );
        let result = {
            let _building = match guard.lock() {
                Ok(building) => building,
                Err(poisoned) => poisoned.into_inner(),
            };
            self.build(document_name)
        };
        self.building
            .remove_if(document_name, |_, current| Arc::ptr_eq(current, &guard));
        result
    }

    /// Runs under the name's build guard. A waiter that was queued behind a successful build
    /// finds the published document and returns it.
    fn build(&self, document_name: &str) -> Result<Option<Arc<Document>>, DocumentError> {
        if let Some(document) = self.get(document_name) {
            return Ok(Some(document));
        }
        match self.generator.generate(document_name)? {
            Some(document) => {
                let document = Arc::new(document);
                self.documents
                    .insert(document_name.to_string(), Arc::clone(&document));
                log::debug!("Published document '{}'", document_name);
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    /// Generates every document the version provider knows about. Stops at the first
    /// failure.
    pub fn generate_all(&self) -> Result<Vec<Arc<Document>>, DocumentError> {
        let mut documents = Vec::new();
        for document_name in self.generator.document_names() {
            if let Some(document) = self.get_or_generate(&document_name)? {
                documents.push(document);
            }
        }
        log::info!("Generated {} API document(s)", documents.len());
        Ok(documents)
    }

    /// Returns an already published document without generating it.
    pub fn get(&self, document_name: &str) -> Option<Arc<Document>> {
        self.documents
            .get(document_name)
            .map(|document| Arc::clone(document.value()))
    }

    pub fn remove(&self, document_name: &str) -> Option<Arc<Document>> {
        self.documents
            .remove(document_name)
            .map(|(_, document)| document)
    }

    pub fn contains(&self, document_name: &str) -> bool {
        self.documents.contains_key(document_name)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn clear(&self) {
        self.documents.clear();
        log::debug!("Cleared document cache");
    }
}
