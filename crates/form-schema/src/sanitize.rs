//! Deriving identifiers and accessors from arbitrary source keys.

use std::sync::OnceLock;

use regex::Regex;

use crate::constants::is_reserved_accessor;

fn non_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]+").expect("static pattern"))
}

/// Turn a source key into an identifier that is a plain word, is not
/// reserved, and is not already taken by a sibling.
///
/// Runs of non-word characters become `_`, a leading digit gets a `_`
/// prefix, and collisions get the smallest numeric suffix that is free.
///
/// # Example
///
/// ```
/// use form_schema::sanitize_key;
///
/// assert_eq!(sanitize_key("first name", |_| false), "first_name");
/// assert_eq!(sanitize_key("2fa", |_| false), "_2fa");
/// assert_eq!(sanitize_key("__array_item__", |_| false), "__array_item__1");
/// assert_eq!(sanitize_key("name", |k| k == "name"), "name1");
/// ```
pub fn sanitize_key(key: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let mut base = non_word_regex().replace_all(key, "_").into_owned();
    if base.is_empty() {
        base.push('_');
    }
    if base.starts_with(|c: char| c.is_ascii_digit()) {
        base.insert(0, '_');
    }
    claim_unique(&base, |candidate| {
        is_taken(candidate) || is_reserved_accessor(candidate, key)
    })
}

/// `base` itself if free, otherwise `base1`, `base2`, ...
pub(crate) fn claim_unique(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_keys_unchanged() {
        assert_eq!(sanitize_key("firstName", |_| false), "firstName");
        assert_eq!(sanitize_key("first_name", |_| false), "first_name");
    }

    #[test]
    fn test_mongo_id_kept_only_for_real_id() {
        assert_eq!(sanitize_key("_id", |_| false), "_id");
        assert_eq!(sanitize_key("-id", |_| false), "_id1");
    }

    #[test]
    fn test_non_word_only_key() {
        assert_eq!(sanitize_key("", |_| false), "_");
        assert_eq!(sanitize_key("名前", |_| false), "_");
    }

    #[test]
    fn test_collision_suffix_skips_taken() {
        let taken = ["a_b", "a_b1"];
        assert_eq!(sanitize_key("a b", |k| taken.contains(&k)), "a_b2");
    }
}
