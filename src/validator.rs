use crate::error::DocumentError;
use crate::types::Document;
use crate::types::version::OpenApiVersion;
use jsonschema::Validator as JsonValidator;
use serde_json::{Value, json};
use std::str::FromStr;

/// The parts of the OpenAPI document shape this crate is responsible for.
fn document_shape() -> Value {
    json!({
        "type": "object",
        "required": ["openapi", "info", "paths"],
        "properties": {
            "openapi": { "type": "string" },
            "info": {
                "type": "object",
                "required": ["title", "version"],
                "properties": {
                    "title": { "type": "string", "minLength": 1 },
                    "version": { "type": "string", "minLength": 1 },
                    "description": { "type": "string" }
                }
            },
            "servers": {
                "type": "array",
                "items": { "type": "object", "required": ["url"] }
            },
            "paths": { "type": "object" },
            "components": {
                "type": "object",
                "properties": {
                    "securitySchemes": {
                        "type": "object",
                        "additionalProperties": {
                            "type": "object",
                            "required": ["type"],
                            "properties": {
                                "type": { "type": "string" },
                                "flows": {
                                    "type": "object",
                                    "properties": {
                                        "implicit": {
                                            "type": "object",
                                            "required": ["authorizationUrl", "scopes"],
                                            "properties": {
                                                "authorizationUrl": { "type": "string", "minLength": 1 },
                                                "scopes": { "type": "object" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Checks an assembled document before it is published.
///
/// The JSON schema draft follows the document's `openapi` version: Draft 4 for 3.0.x and
/// Draft 2020-12 for 3.1.x.
pub(crate) fn check_document(
    document: &Document,
    document_name: &str,
) -> Result<(), DocumentError> {
    let draft = OpenApiVersion::from_str(document.openapi())?.get_draft();

    let instance = match document.to_json() {
        Ok(instance) => instance,
        Err(e) => return Err(DocumentError::serialization(&e)),
    };

    let validator = match JsonValidator::options()
        .with_draft(draft)
        .build(&document_shape())
    {
        Ok(validator) => validator,
        Err(e) => return Err(DocumentError::invalid_document(e, document_name)),
    };

    match validator.validate(&instance) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::warn!("Document '{}' failed structural validation: {}", document_name, e);
            Err(DocumentError::invalid_document(e, document_name))
        }
    }
}
