//! Test helpers for generating unique test data
//!
//! ULID-based helpers so parallel tests never collide on primary keys.

use ulid::Ulid;

/// Generate a unique string with the given prefix, e.g. `acme-01h…`.
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique company display name, e.g. `Acme 01H…`.
///
/// The ULID keeps the derived slug unique as well, since slugging is
/// deterministic.
pub fn unique_company_name(prefix: &str) -> String {
    format!("{} {}", prefix, Ulid::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_str_is_unique_and_prefixed() {
        let a = unique_str("user");
        let b = unique_str("user");
        assert_ne!(a, b);
        assert!(a.starts_with("user-"));
    }

    #[test]
    fn unique_company_name_is_unique() {
        assert_ne!(unique_company_name("Acme"), unique_company_name("Acme"));
    }
}
