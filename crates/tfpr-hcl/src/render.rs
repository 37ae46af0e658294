//! List rendering
//!
//! Every list that is written back uses one layout: double-quoted items,
//! one space after each comma, and a trailing comma after the last item,
//! all on a single line. `["alpha", "beta", ]`

use crate::locate::ListAssignment;

/// Render items as a list body
///
/// An empty sequence renders as an empty body.
pub fn render_items<S: AsRef<str>>(items: &[S]) -> String {
    let capacity = items.iter().map(|item| item.as_ref().len() + 4).sum();
    let mut body = String::with_capacity(capacity);
    for item in items {
        body.push('"');
        body.push_str(item.as_ref());
        body.push_str("\", ");
    }
    body
}

/// Replace the assignment's body with `body`
///
/// The opening segment and closing bracket are kept as captured; bytes
/// outside the assignment span are copied through unchanged.
pub fn splice(document: &str, assignment: &ListAssignment<'_>, body: &str) -> String {
    let before = &document[..assignment.span.start];
    let after = &document[assignment.span.end..];

    let mut out = String::with_capacity(
        before.len() + assignment.opening.len() + body.len() + assignment.closing.len() + after.len(),
    );
    out.push_str(before);
    out.push_str(assignment.opening);
    out.push_str(body);
    out.push_str(assignment.closing);
    out.push_str(after);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::parse_items;
    use crate::locate::locate_list;

    #[test]
    fn test_render_items() {
        assert_eq!(render_items(&["alpha", "beta"]), r#""alpha", "beta", "#);
        assert_eq!(render_items(&["first"]), r#""first", "#);
    }

    #[test]
    fn test_render_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(render_items(&empty), "");
    }

    #[test]
    fn test_render_then_parse_gives_same_items() {
        let items = vec!["orders-db", "billing_db", "a b"];
        assert_eq!(parse_items(&render_items(&items)), items);
    }

    #[test]
    fn test_splice_keeps_surrounding_bytes() {
        let doc = "before\nmysql_list = [\"a\"]\nafter\n";
        let found = locate_list(doc, "mysql_list").unwrap();
        let out = splice(doc, &found, "\"a\", \"b\", ");
        assert_eq!(out, "before\nmysql_list = [\"a\", \"b\", ]\nafter\n");
    }

    #[test]
    fn test_splice_keeps_opening_formatting() {
        let doc = "mysql_list   =   [ ]";
        let found = locate_list(doc, "mysql_list").unwrap();
        assert_eq!(splice(doc, &found, "\"x\", "), "mysql_list   =   [\"x\", ]");
    }
}
