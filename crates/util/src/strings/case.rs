/// Split a string into words the way lodash `words` does for ASCII and
/// cased Unicode input.
///
/// Runs of characters that are neither letters nor digits separate words.
/// Inside a run a new word starts at a lower→upper transition, at a
/// letter↔digit transition, and before the last capital of an acronym that
/// is followed by a lowercase letter.
///
/// # Examples
///
/// ```
/// use form_schema_util::strings::words;
///
/// assert_eq!(words("firstName"), vec!["first", "Name"]);
/// assert_eq!(words("first_name"), vec!["first", "name"]);
/// assert_eq!(words("HTMLParser"), vec!["HTML", "Parser"]);
/// assert_eq!(words("age14"), vec!["age", "14"]);
/// ```
pub fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut out = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            flush(&mut out, &mut current);
            prev = None;
            continue;
        }
        if let Some(p) = prev {
            if is_boundary(p, ch, chars.get(i + 1).copied()) {
                flush(&mut out, &mut current);
            }
        }
        current.push(ch);
        prev = Some(ch);
    }
    flush(&mut out, &mut current);
    out
}

/// Convert a key to "Start Case": words separated by a space, first letter
/// of each word upper-cased, the rest untouched.
///
/// # Examples
///
/// ```
/// use form_schema_util::strings::start_case;
///
/// assert_eq!(start_case("firstName"), "First Name");
/// assert_eq!(start_case("__id"), "Id");
/// assert_eq!(start_case("zip-code"), "Zip Code");
/// ```
pub fn start_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|w| upper_first(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `key` can be used after a `.` in a JavaScript member expression.
pub fn is_js_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn is_boundary(prev: char, ch: char, next: Option<char>) -> bool {
    if prev.is_numeric() != ch.is_numeric() {
        return true;
    }
    if prev.is_lowercase() && ch.is_uppercase() {
        return true;
    }
    prev.is_uppercase() && ch.is_uppercase() && next.is_some_and(char::is_lowercase)
}

fn flush(out: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        out.push(std::mem::take(current));
    }
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_separators() {
        assert_eq!(words("first name"), vec!["first", "name"]);
        assert_eq!(words("  --a__b--  "), vec!["a", "b"]);
        assert!(words("___").is_empty());
        assert!(words("").is_empty());
    }

    #[test]
    fn test_words_camel_and_acronym() {
        assert_eq!(words("userID"), vec!["user", "ID"]);
        assert_eq!(words("XMLHttpRequest"), vec!["XML", "Http", "Request"]);
    }

    #[test]
    fn test_words_digits() {
        assert_eq!(words("address2line"), vec!["address", "2", "line"]);
        assert_eq!(words("123"), vec!["123"]);
    }

    #[test]
    fn test_start_case() {
        assert_eq!(start_case("name"), "Name");
        assert_eq!(start_case("date_of_birth"), "Date Of Birth");
        assert_eq!(start_case("isActive"), "Is Active");
        assert_eq!(start_case("_id"), "Id");
        assert_eq!(start_case("HTML"), "HTML");
        assert_eq!(start_case("userID"), "User ID");
    }

    #[test]
    fn test_start_case_uncased_script() {
        assert_eq!(start_case("名前"), "名前");
    }

    #[test]
    fn test_is_js_identifier() {
        assert!(is_js_identifier("name"));
        assert!(is_js_identifier("_id"));
        assert!(is_js_identifier("$ref"));
        assert!(!is_js_identifier("first name"));
        assert!(!is_js_identifier("1st"));
        assert!(!is_js_identifier(""));
    }
}
