use crate::types::operation::Operation;
use crate::types::version::{SunsetPolicy, VersionDescriptor};
use crate::{DEPRECATION_NOTICE, SHORT_DATE_FORMAT, SUNSET_NOTICE_PREFIX};

/// Composes the description of a version's document from the configured base text.
///
/// The deprecation notice, the sunset date sentence and the list of human-readable sunset
/// links are appended in that order, each only when it applies. A version that is neither
/// deprecated nor has a sunset policy gets `base` back unchanged.
pub fn describe_version(base: &str, descriptor: &VersionDescriptor) -> String {
    let mut text = String::from(base);

    if descriptor.is_deprecated() {
        if !text.is_empty() {
            if !text.ends_with('.') {
                text.push('.');
            }
            text.push(' ');
        }
        text.push_str(DEPRECATION_NOTICE);
    }

    if let Some(policy) = descriptor.sunset_policy() {
        append_sunset_date(&mut text, policy);
        append_sunset_links(&mut text, policy);
    }

    text
}

fn append_sunset_date(text: &mut String, policy: &SunsetPolicy) {
    let date = match policy.date() {
        Some(date) => date,
        None => return,
    };
    if !text.is_empty() {
        text.push(' ');
    }
    text.push_str(SUNSET_NOTICE_PREFIX);
    text.push_str(&date.format(SHORT_DATE_FORMAT).to_string());
    text.push('.');
}

fn append_sunset_links(text: &mut String, policy: &SunsetPolicy) {
    let mut links = policy.human_readable_links().peekable();
    if links.peek().is_none() {
        return;
    }

    text.push('\n');
    text.push_str("<h4>Links</h4><ul>");
    for link in links {
        text.push_str("<li><a href=\"");
        text.push_str(link.target());
        text.push_str("\">");
        text.push_str(link.display_text());
        text.push_str("</a></li>");
    }
    text.push_str("</ul>");
}

/// Marks the operation deprecated when its version is. An operation that is already
/// deprecated stays deprecated.
pub fn flag_deprecated(operation: &mut Operation, descriptor: &VersionDescriptor) {
    operation.merge_deprecated(descriptor.is_deprecated());
}
