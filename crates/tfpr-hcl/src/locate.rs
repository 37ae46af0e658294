//! Locating a named list assignment
//!
//! Only the first `name = [ ... ]` occurrence is found. A document that
//! declares the same list twice has its second declaration left alone.

use std::ops::Range;

use regex::Regex;

use crate::error::{HclResult, PatchError};

/// A `name = [ body ]` assignment found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAssignment<'a> {
    /// Everything from the list name up to and including `[`
    pub opening: &'a str,
    /// Raw text between the brackets
    pub body: &'a str,
    /// The closing `]`
    pub closing: &'a str,
    /// Byte span of the whole assignment in the document
    pub span: Range<usize>,
}

/// Validate a list name
///
/// Names must look like a configuration identifier: a letter or `_`
/// followed by letters, digits, `_` or `-`.
pub fn validate_list_name(name: &str) -> HclResult<()> {
    let invalid = |reason| {
        Err(PatchError::InvalidListName {
            name: name.to_string(),
            reason,
        })
    };

    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return invalid("name cannot be empty");
    };

    if !(first.is_ascii_alphabetic() || first == '_') {
        return invalid("name must start with a letter or '_'");
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return invalid("name may only contain letters, digits, '_' and '-'");
    }

    Ok(())
}

/// Find the first assignment of `list_name` in `document`
///
/// The name must start at an identifier boundary, so looking for
/// `mysql_list` never matches `legacy_mysql_list`. Inside the body a
/// backslash escapes the next character, which lets `\]` through without
/// closing the list.
pub fn locate_list<'a>(document: &'a str, list_name: &str) -> HclResult<ListAssignment<'a>> {
    validate_list_name(list_name)?;

    let pattern = format!(
        r"(?s)(?:^|[^A-Za-z0-9_\-])({}\s*=\s*\[)((?:[^\]\\]|\\.)*)(\])",
        regex::escape(list_name)
    );
    let re = Regex::new(&pattern).map_err(|_| PatchError::InvalidListName {
        name: list_name.to_string(),
        reason: "name cannot be matched",
    })?;

    let not_found = || PatchError::ListNotFound {
        list: list_name.to_string(),
    };

    let caps = re.captures(document).ok_or_else(not_found)?;
    let (Some(opening), Some(body), Some(closing)) = (caps.get(1), caps.get(2), caps.get(3)) else {
        return Err(not_found());
    };

    Ok(ListAssignment {
        opening: opening.as_str(),
        body: body.as_str(),
        closing: closing.as_str(),
        span: opening.start()..closing.end(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_simple_list() {
        let doc = r#"locals {
  mysql_list = ["alpha", "beta", ]
}
"#;
        let found = locate_list(doc, "mysql_list").unwrap();
        assert_eq!(found.opening, "mysql_list = [");
        assert_eq!(found.body, r#""alpha", "beta", "#);
        assert_eq!(found.closing, "]");
        assert_eq!(&doc[found.span.clone()], r#"mysql_list = ["alpha", "beta", ]"#);
    }

    #[test]
    fn test_locate_tolerates_whitespace_around_equals() {
        let doc = "mysql_list\t=\n  [\"a\"]";
        let found = locate_list(doc, "mysql_list").unwrap();
        assert_eq!(found.opening, "mysql_list\t=\n  [");
        assert_eq!(found.body, "\"a\"");
    }

    #[test]
    fn test_locate_at_document_start() {
        let found = locate_list("postgres_list = []", "postgres_list").unwrap();
        assert_eq!(found.span, 0..18);
        assert_eq!(found.body, "");
    }

    #[test]
    fn test_locate_requires_identifier_boundary() {
        let doc = "legacy_mysql_list = [\"old\"]\nmysql_list = [\"new\"]\n";
        let found = locate_list(doc, "mysql_list").unwrap();
        assert_eq!(found.body, "\"new\"");
        assert_eq!(found.span.start, doc.find("\nmysql_list").unwrap() + 1);
    }

    #[test]
    fn test_locate_ignores_longer_identifier() {
        let doc = "mysql_list_old = [\"x\"]\n";
        let err = locate_list(doc, "mysql_list").unwrap_err();
        assert_eq!(
            err,
            PatchError::ListNotFound {
                list: "mysql_list".into()
            }
        );
    }

    #[test]
    fn test_locate_first_match_only() {
        let doc = "mysql_list = [\"first\"]\nmysql_list = [\"second\"]\n";
        let found = locate_list(doc, "mysql_list").unwrap();
        assert_eq!(found.body, "\"first\"");
        assert_eq!(found.span, 0..22);
    }

    #[test]
    fn test_locate_escaped_bracket_in_body() {
        let doc = r#"mysql_list = ["a\]b", "c"] # tail"#;
        let found = locate_list(doc, "mysql_list").unwrap();
        assert_eq!(found.body, r#""a\]b", "c""#);
        assert!(doc[found.span.end..].starts_with(" # tail"));
    }

    #[test]
    fn test_locate_unclosed_list_is_not_found() {
        let err = locate_list("mysql_list = [\"a\", ", "mysql_list").unwrap_err();
        assert_eq!(err.code(), "LIST_NOT_FOUND");
    }

    #[test]
    fn test_validate_list_name() {
        assert!(validate_list_name("mysql_list").is_ok());
        assert!(validate_list_name("_private").is_ok());
        assert!(validate_list_name("with-dash").is_ok());

        assert!(validate_list_name("").is_err());
        assert!(validate_list_name("1list").is_err());
        assert!(validate_list_name("my list").is_err());
        assert!(validate_list_name("list=[").is_err());
    }
}
