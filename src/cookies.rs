//! Cookie header helpers.

/// Name of the cookie carrying the CSRF token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Look up `name` in a `Cookie:` header value (`a=1; b=2`).
///
/// Returns `None` when the cookie is missing or appears more than once.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    let mut found = None;
    for pair in header.split(';') {
        let Some((key, value)) = pair.trim_start().split_once('=') else {
            continue;
        };
        if key == name {
            if found.is_some() {
                return None;
            }
            found = Some(value);
        }
    }
    found
}

/// Split a `Cookie:` header value into `name=value` pairs, skipping blanks.
pub fn split_pairs(header: &str) -> impl Iterator<Item = &str> {
    header
        .split(';')
        .map(str::trim)
        .filter(|pair| pair.contains('='))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let header = "sessionid=abc; csrftoken=tok123; theme=dark";
        assert_eq!(cookie_value(header, CSRF_COOKIE), Some("tok123"));
        assert_eq!(cookie_value(header, "sessionid"), Some("abc"));
        assert_eq!(cookie_value(header, "missing"), None);
    }

    #[test]
    fn test_cookie_value_prefix_is_not_a_match() {
        assert_eq!(cookie_value("xcsrftoken=nope", CSRF_COOKIE), None);
    }

    #[test]
    fn test_duplicate_cookie_is_ambiguous() {
        assert_eq!(cookie_value("csrftoken=a; csrftoken=b", CSRF_COOKIE), None);
    }

    #[test]
    fn test_split_pairs() {
        let pairs: Vec<_> = split_pairs(" a=1;; b=2 ;junk").collect();
        assert_eq!(pairs, vec!["a=1", "b=2"]);
    }
}
