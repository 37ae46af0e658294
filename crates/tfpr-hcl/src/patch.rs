//! The list patch operation

use crate::error::{HclResult, PatchError};
use crate::items::{append_unique, parse_items, Mutation};
use crate::locate::locate_list;
use crate::render::{render_items, splice};

/// Result of patching a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchResult {
    /// The patched document, or the input verbatim when nothing changed
    pub text: String,
    /// Whether a value was added
    pub changed: bool,
}

/// Validate a value before it is written as a quoted list item
///
/// Values must be non-empty and must not contain `,`, `"`, `[`, `]`, a
/// backslash, or control characters. Any of those would either be split
/// apart again by the item parser or change meaning inside a quoted string.
pub fn validate_value(value: &str) -> HclResult<()> {
    let invalid = |reason| {
        Err(PatchError::InvalidValue {
            value: value.to_string(),
            reason,
        })
    };

    if value.is_empty() {
        return invalid("value cannot be empty");
    }

    if value.contains(',') {
        return invalid("value cannot contain ','");
    }

    if value.contains('"') {
        return invalid("value cannot contain '\"'");
    }

    if value.contains('[') || value.contains(']') {
        return invalid("value cannot contain brackets");
    }

    if value.contains('\\') {
        return invalid("value cannot contain '\\'");
    }

    if value.chars().any(char::is_control) {
        return invalid("value cannot contain control characters");
    }

    Ok(())
}

/// Add `value` to the list assignment named `list_name`
///
/// Returns the document with the value appended to the first matching
/// list, re-rendered in the standard list layout. When the value is
/// already present the original text is returned unchanged with
/// `changed == false`, so applying the same patch twice is a no-op.
///
/// # Errors
/// - [`PatchError::InvalidValue`] if the value fails [`validate_value`]
/// - [`PatchError::InvalidListName`] if the list name is not an identifier
/// - [`PatchError::ListNotFound`] if the document has no such list
pub fn patch(document: &str, list_name: &str, value: &str) -> HclResult<PatchResult> {
    validate_value(value)?;

    let assignment = locate_list(document, list_name)?;
    let mut items = parse_items(assignment.body);

    if append_unique(&mut items, value) == Mutation::AlreadyPresent {
        return Ok(PatchResult {
            text: document.to_string(),
            changed: false,
        });
    }

    let body = render_items(&items);
    Ok(PatchResult {
        text: splice(document, &assignment, &body),
        changed: true,
    })
}
