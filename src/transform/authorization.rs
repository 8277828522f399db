use crate::transform::security::SchemeOutcome;
use crate::types::operation::{Operation, SecurityRequirement};
use crate::{FORBIDDEN_STATUS, OAUTH2_SCHEME_NAME, UNAUTHORIZED_STATUS};

/// Annotates an operation whose handler requires authorization.
///
/// Nothing changes unless the handler requires authorization and a scheme was registered
/// for the document. When both hold, `401` and `403` responses are added if absent and the
/// operation's security requirement is replaced by one on `oauth2` with every scope.
pub fn annotate_authorization(
    operation: &mut Operation,
    requires_authorization: bool,
    scheme: &SchemeOutcome,
) {
    if !requires_authorization {
        return;
    }
    let scopes = match scheme.scopes() {
        Some(scopes) => scopes,
        None => return,
    };

    operation.add_response_if_absent(UNAUTHORIZED_STATUS.0, UNAUTHORIZED_STATUS.1);
    operation.add_response_if_absent(FORBIDDEN_STATUS.0, FORBIDDEN_STATUS.1);

    let mut requirement = SecurityRequirement::new();
    requirement.insert(OAUTH2_SCHEME_NAME.to_string(), scopes.to_vec());
    operation.security = Some(vec![requirement]);
}
