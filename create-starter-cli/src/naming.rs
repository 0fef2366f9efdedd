//! Target directory and package name handling
//!
//! Validation and sanitization are separate pure functions: the prompt flow
//! derives a candidate with [`to_valid_package_name`] and re-asks while
//! [`is_valid_package_name`] rejects it.

use once_cell::sync::Lazy;
use regex::Regex;

/// npm package name grammar, with an optional `@scope/` prefix
static PACKAGE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:@[a-z0-9\-*~][a-z0-9\-*._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$")
        .unwrap_or_else(|e| unreachable!("package name pattern is valid: {e}"))
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").unwrap_or_else(|e| unreachable!("{e}")));

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\-~]+").unwrap_or_else(|e| unreachable!("{e}")));

/// Message shown when a typed package name is rejected
pub const INVALID_PACKAGE_NAME: &str = "Invalid package.json name";

/// Trim whitespace and strip trailing `/` separators from a directory name
#[must_use]
pub fn normalize_dir_name(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Whether `name` is accepted as a `package.json` name
#[must_use]
pub fn is_valid_package_name(name: &str) -> bool {
    PACKAGE_NAME.is_match(name)
}

/// Derive a package name candidate from arbitrary input
///
/// The result only contains `[a-z0-9-~]`, but may be empty for degenerate
/// input, so callers must validate it again.
#[must_use]
pub fn to_valid_package_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let dashed = WHITESPACE.replace_all(&lowered, "-");
    let stripped = dashed.strip_prefix(['.', '_']).unwrap_or(&*dashed);
    DISALLOWED.replace_all(stripped, "-").into_owned()
}

/// Validator used by the package name prompt
///
/// # Errors
///
/// Returns [`INVALID_PACKAGE_NAME`] when the input is not a valid name.
pub fn validate_package_name(input: &str) -> Result<(), &'static str> {
    if is_valid_package_name(input) {
        Ok(())
    } else {
        Err(INVALID_PACKAGE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_dir_name() {
        assert_eq!(normalize_dir_name("  my-app  "), "my-app");
        assert_eq!(normalize_dir_name("foo/"), "foo");
        assert_eq!(normalize_dir_name("foo///"), "foo");
        assert_eq!(normalize_dir_name("nested/dir/"), "nested/dir");
        assert_eq!(normalize_dir_name("   "), "");
        assert_eq!(normalize_dir_name("."), ".");
    }

    #[test]
    fn test_valid_package_names() {
        assert!(is_valid_package_name("my-app"));
        assert!(is_valid_package_name("@scope/app"));
        assert!(is_valid_package_name("app.js"));
        assert!(is_valid_package_name("a~b"));
        assert!(is_valid_package_name("123"));
    }

    #[test]
    fn test_invalid_package_names() {
        assert!(!is_valid_package_name("My App!"));
        assert!(!is_valid_package_name(""));
        assert!(!is_valid_package_name(".hidden"));
        assert!(!is_valid_package_name("_private"));
        assert!(!is_valid_package_name("UPPER"));
        assert!(!is_valid_package_name("foo/"));
        assert!(!is_valid_package_name("@scope/"));
    }

    #[test]
    fn test_to_valid_package_name() {
        assert_eq!(to_valid_package_name("My App"), "my-app");
        assert_eq!(to_valid_package_name("  Hello   World  "), "hello-world");
        assert_eq!(to_valid_package_name(".dotfile"), "dotfile");
        assert_eq!(to_valid_package_name("_under"), "under");
        assert_eq!(to_valid_package_name("a@b#c"), "a-b-c");
        assert_eq!(to_valid_package_name("foo/bar"), "foo-bar");
        assert_eq!(to_valid_package_name("!!!"), "-");
        assert_eq!(to_valid_package_name(""), "");
    }

    #[test]
    fn test_only_one_leading_marker_is_stripped() {
        assert_eq!(to_valid_package_name("._x"), "-x");
        assert_eq!(to_valid_package_name("..x"), "-x");
    }

    #[test]
    fn test_validator_message() {
        assert_eq!(validate_package_name("ok"), Ok(()));
        assert_eq!(validate_package_name("Not Ok"), Err(INVALID_PACKAGE_NAME));
    }
}
