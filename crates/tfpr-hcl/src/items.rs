//! List body parsing and mutation

/// Outcome of adding a value to an item sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The value was appended to the end of the sequence
    Appended,
    /// The value was already present; the sequence is unchanged
    AlreadyPresent,
}

impl Mutation {
    /// Whether the sequence changed
    #[must_use]
    pub fn changed(self) -> bool {
        matches!(self, Self::Appended)
    }
}

/// Parse the raw body of a list into its items
///
/// The body is split on `,`, each fragment is trimmed of ASCII whitespace,
/// empty fragments (from trailing commas or blank lines) are dropped, and a
/// single layer of enclosing double quotes is removed.
///
/// Items that themselves contain commas or quotes are not supported and
/// come back split or partially quoted.
pub fn parse_items(body: &str) -> Vec<String> {
    body.split(',')
        .map(|fragment| fragment.trim_matches(|c: char| c.is_ascii_whitespace()))
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| strip_quotes(fragment).to_string())
        .collect()
}

fn strip_quotes(fragment: &str) -> &str {
    fragment
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(fragment)
}

/// Append `value` unless an identical item already exists
///
/// Matching is exact and case-sensitive. Existing items keep their order.
pub fn append_unique(items: &mut Vec<String>, value: &str) -> Mutation {
    if items.iter().any(|item| item == value) {
        return Mutation::AlreadyPresent;
    }
    items.push(value.to_string());
    Mutation::Appended
}
