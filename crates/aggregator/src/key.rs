/// Logical key of a fragment: its raw file-name bytes with the rule's suffix removed.
///
/// No escaping or normalization is applied. A name that does not carry the suffix is
/// returned as-is.
pub fn derive_key<'a>(name: &'a [u8], suffix: &str) -> &'a [u8] {
    name.strip_suffix(suffix.as_bytes()).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::derive_key;

    #[test]
    fn strips_trailing_suffix_only() {
        assert_eq!(derive_key(b"tasks.json", ".json"), b"tasks");
        assert_eq!(derive_key(b"a.json.json", ".json"), b"a.json");
        assert_eq!(derive_key(b"odd name (1).ract", ".ract"), b"odd name (1)");
    }

    #[test]
    fn suffix_equal_to_name_yields_empty_key() {
        assert_eq!(derive_key(b".css", ".css"), b"");
    }

    #[test]
    fn missing_suffix_returns_name_unchanged() {
        assert_eq!(derive_key(b"readme.md", ".json"), b"readme.md");
    }

    #[test]
    fn non_utf8_bytes_are_preserved() {
        assert_eq!(derive_key(b"bad\xff.js", ".js"), b"bad\xff");
    }
}
