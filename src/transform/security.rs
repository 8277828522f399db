use crate::config::ConfigSection;
use crate::error::DocumentError;
use crate::types::Document;
use crate::types::security::{ScopeMap, SecurityScheme};
use crate::{
    AUTHORIZE_ENDPOINT, IDENTITY_SCOPES_KEY, IDENTITY_URL_KEY, OAUTH2_SCHEME_NAME, TOKEN_ENDPOINT,
};

/// What the security scheme step left behind for the operation steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeOutcome {
    /// No identity configuration; nothing was registered.
    NotApplicable,
    /// The `oauth2` scheme was registered, advertising these scopes.
    Registered(Vec<String>),
}

impl SchemeOutcome {
    pub fn scopes(&self) -> Option<&[String]> {
        match self {
            SchemeOutcome::NotApplicable => None,
            SchemeOutcome::Registered(scopes) => Some(scopes),
        }
    }
}

/// Builds the OAuth2 implicit-flow scheme from the identity section.
///
/// `Url` and `Scopes` are both required once the section exists. A `Scopes` subtree that
/// is not a flat map of scalars is rejected instead of producing an empty scope map.
pub fn synthesize_security_scheme(
    identity: Option<&ConfigSection<'_>>,
) -> Result<Option<SecurityScheme>, DocumentError> {
    let identity = match identity {
        Some(identity) => identity,
        None => return Ok(None),
    };

    let identity_url = identity.required_value(IDENTITY_URL_KEY)?;
    let identity_url = identity_url.trim_end_matches('/');
    let scopes: ScopeMap = identity
        .required_section(IDENTITY_SCOPES_KEY)?
        .children()?
        .into_iter()
        .collect();

    let scheme = SecurityScheme::oauth2_implicit(
        format!("{}{}", identity_url, AUTHORIZE_ENDPOINT),
        format!("{}{}", identity_url, TOKEN_ENDPOINT),
        scopes,
    );
    Ok(Some(scheme))
}

/// Synthesizes the scheme and registers it in the document's components under `oauth2`.
/// Running it again for the same document replaces the entry with identical content.
pub fn apply_security_scheme(
    document: &mut Document,
    identity: Option<&ConfigSection<'_>>,
) -> Result<SchemeOutcome, DocumentError> {
    match synthesize_security_scheme(identity)? {
        None => {
            log::debug!("No identity configuration, skipping security scheme");
            Ok(SchemeOutcome::NotApplicable)
        }
        Some(scheme) => {
            let scopes = scheme.scope_names();
            document
                .components
                .register_security_scheme(OAUTH2_SCHEME_NAME, scheme);
            Ok(SchemeOutcome::Registered(scopes))
        }
    }
}
