//! Branch name validation.
//!
//! Names may nest with `/` (for example `feature/editor`). The rules track
//! git's conventions closely enough that an accepted name is also safe as
//! a map key or a path component:
//! - non-empty, no whitespace or control characters
//! - none of `~` `^` `:` `?` `*` `[` `\`
//! - no `..`, no leading or trailing `/`, no `.lock` suffix
//! - every `/`-separated component is non-empty and neither starts nor
//!   ends with `.`

use crate::error::{BranchError, Result};

/// Characters that are forbidden anywhere in a branch name.
const FORBIDDEN_CHARS: &[char] = &['~', '^', ':', '?', '*', '[', '\\'];

/// Validate a branch name, returning `Ok(())` if it is acceptable.
///
/// # Examples
///
/// ```
/// use grove_branch::validate_branch_name;
///
/// assert!(validate_branch_name("main").is_ok());
/// assert!(validate_branch_name("feature/editor").is_ok());
/// assert!(validate_branch_name("").is_err());
/// assert!(validate_branch_name("bad..name").is_err());
/// ```
pub fn validate_branch_name(name: &str) -> Result<()> {
    match rejection(name) {
        None => Ok(()),
        Some(reason) => Err(BranchError::InvalidName {
            name: name.to_string(),
            reason,
        }),
    }
}

/// The first rule the name breaks, if any.
fn rejection(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("must not be empty".into());
    }
    if let Some(ch) = name.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Some(format!("contains whitespace or control character: {ch:?}"));
    }
    if let Some(ch) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Some(format!("contains forbidden character: {ch:?}"));
    }
    if name.contains("..") {
        return Some("must not contain '..'".into());
    }
    if name.starts_with('/') || name.ends_with('/') {
        return Some("must not start or end with '/'".into());
    }
    if name.ends_with(".lock") {
        return Some("must not end with '.lock'".into());
    }
    for component in name.split('/') {
        if component.is_empty() {
            return Some("must not contain empty path components".into());
        }
        if component.starts_with('.') || component.ends_with('.') {
            return Some(format!(
                "component must not start or end with '.': {component:?}"
            ));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_names() {
        assert!(validate_branch_name("main").is_ok());
        assert!(validate_branch_name("develop").is_ok());
        assert!(validate_branch_name("fix-123").is_ok());
        assert!(validate_branch_name("v1.0").is_ok());
    }

    #[test]
    fn accepts_nested_names() {
        assert!(validate_branch_name("feature/editor").is_ok());
        assert!(validate_branch_name("user/sam/fix-42").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(validate_branch_name("").is_err());
    }

    #[test]
    fn rejects_whitespace_and_control() {
        assert!(validate_branch_name("has space").is_err());
        assert!(validate_branch_name("has\ttab").is_err());
        assert!(validate_branch_name("has\nnewline").is_err());
    }

    #[test]
    fn rejects_forbidden_characters() {
        for bad in ["a~b", "a^b", "a:b", "a?b", "a*b", "a[b", "a\\b"] {
            assert!(validate_branch_name(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_double_dot() {
        assert!(validate_branch_name("bad..name").is_err());
    }

    #[test]
    fn rejects_dot_boundaries() {
        assert!(validate_branch_name(".hidden").is_err());
        assert!(validate_branch_name("trailing.").is_err());
        assert!(validate_branch_name("feature/.hidden").is_err());
    }

    #[test]
    fn rejects_slash_boundaries_and_empty_components() {
        assert!(validate_branch_name("/leading").is_err());
        assert!(validate_branch_name("trailing/").is_err());
        assert!(validate_branch_name("a//b").is_err());
    }

    #[test]
    fn rejects_lock_suffix() {
        assert!(validate_branch_name("main.lock").is_err());
    }

    #[test]
    fn reported_error_carries_the_name() {
        let err = validate_branch_name("a b").unwrap_err();
        assert!(matches!(err, BranchError::InvalidName { ref name, .. } if name == "a b"));
    }
}
