use regex::Regex;
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex"));

/// Check that a string is a valid Avro name component.
///
/// Avro names start with a letter or underscore followed by letters,
/// digits or underscores.
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Check that every dot-separated component of a full name is valid.
pub fn is_valid_fullname(name: &str) -> bool {
    name.split('.').all(is_valid_name)
}

/// Build the full name of a named type from its `name` and `namespace`.
///
/// A dotted `name` is already a full name and ignores both namespaces.
/// Otherwise the explicit `namespace` wins over the enclosing one; an
/// empty namespace means the null namespace.
pub fn fullname(name: &str, namespace: Option<&str>, enclosing_namespace: &str) -> String {
    if name.contains('.') {
        return name.to_string();
    }
    let namespace = namespace.unwrap_or(enclosing_namespace);
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}

/// Namespace part of a full name (empty for the null namespace).
pub fn namespace_of(fullname: &str) -> &str {
    fullname.rsplit_once('.').map(|(ns, _)| ns).unwrap_or("")
}

/// Candidate full names a type reference may resolve to, most specific first.
pub fn reference_candidates(reference: &str, enclosing_namespace: &str) -> Vec<String> {
    if reference.contains('.') || enclosing_namespace.is_empty() {
        vec![reference.to_string()]
    } else {
        vec![
            format!("{}.{}", enclosing_namespace, reference),
            reference.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_names() {
        assert!(is_valid_name("user_id"));
        assert!(is_valid_name("_private"));
        assert!(!is_valid_name("1st"));
        assert!(!is_valid_name("with-dash"));
        assert!(!is_valid_name(""));
        assert!(is_valid_fullname("com.example.User"));
        assert!(!is_valid_fullname("com..User"));
    }

    #[test]
    fn builds_fullnames() {
        assert_eq!(fullname("User", None, "com.example"), "com.example.User");
        assert_eq!(fullname("User", Some("org.other"), "com.example"), "org.other.User");
        assert_eq!(fullname("User", Some(""), "com.example"), "User");
        assert_eq!(fullname("a.b.User", Some("ignored"), "com.example"), "a.b.User");
        assert_eq!(namespace_of("com.example.User"), "com.example");
        assert_eq!(namespace_of("User"), "");
    }

    #[test]
    fn reference_candidates_prefer_enclosing_namespace() {
        assert_eq!(
            reference_candidates("Address", "com.example"),
            vec!["com.example.Address".to_string(), "Address".to_string()]
        );
        assert_eq!(reference_candidates("x.Address", "com.example"), vec!["x.Address".to_string()]);
        assert_eq!(reference_candidates("Address", ""), vec!["Address".to_string()]);
    }
}
