//! Field rules shared by entry validation and listing.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// Sort keys accepted by the entry listing.
pub const SORT_SAFELIST: &[&str] = &["id", "name", "level", "-id", "-name", "-level"];

/// North American style phone numbers: `501-123-4567`, `(501) 123 4567`,
/// `+5011234567`.
pub static PHONE_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?\(?[0-9]{3}\)?[\s.-]?[0-9]{3}[\s.-]?[0-9]{4}$").expect("valid phone regex")
});

/// Reject mode lists that repeat a value.
pub fn unique_modes(mode: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(mode.len());
    if mode.iter().all(|m| seen.insert(m.as_str())) {
        Ok(())
    } else {
        Err(ValidationError::new("unique")
            .with_message("must not contain duplicate entries".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_pattern() {
        for ok in ["501-123-4567", "(501) 123 4567", "+5011234567", "501.123.4567"] {
            assert!(PHONE_RX.is_match(ok), "{ok}");
        }
        for bad in ["", "123", "501-123-456", "phone", "501-123-45678"] {
            assert!(!PHONE_RX.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn test_unique_modes() {
        let modes = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert!(unique_modes(&modes(&["online", "in-person"])).is_ok());
        assert!(unique_modes(&[]).is_ok());
        assert!(unique_modes(&modes(&["online", "online"])).is_err());
    }
}
