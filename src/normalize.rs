use std::collections::BTreeMap;

pub const LIST_SEPARATOR: &str = ", ";

pub type SparsePayload<K> = BTreeMap<K, String>;

/// Splits comma separated user input into trimmed tokens.
///
/// Tokens that are empty after trimming are dropped; duplicates and order are
/// kept as typed.
pub fn parse_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn format_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(LIST_SEPARATOR)
}

/// Keeps only the fields that carry a value, so the server can apply its own
/// defaults for the rest. Kept values are trimmed.
pub fn build_sparse_payload<K, V, I>(fields: I) -> SparsePayload<K>
where
    K: Ord,
    V: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    fields
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value.as_ref().trim();
            if value.is_empty() {
                None
            } else {
                Some((key, value.to_owned()))
            }
        })
        .collect()
}
