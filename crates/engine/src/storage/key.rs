use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageKeyError {
    #[error("storage key must not be empty")]
    Empty,
    #[error("storage key must not start with '.'")]
    LeadingDot,
    #[error("storage key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

pub fn validate_storage_key(key: &str) -> Result<(), StorageKeyError> {
    if key.is_empty() {
        return Err(StorageKeyError::Empty);
    }
    if key.starts_with('.') {
        return Err(StorageKeyError::LeadingDot);
    }
    for ch in key.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.') {
            continue;
        }
        return Err(StorageKeyError::InvalidCharacter { character: ch });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_keys() {
        for key in ["caviaColors", "gameSettings", "high_scores-v2", "a.b"] {
            assert!(validate_storage_key(key).is_ok(), "key={key}");
        }
    }

    #[test]
    fn rejects_invalid_keys() {
        for key in ["", ".hidden", "..", "a/b", r"a\b", "a b", "kleur!"] {
            assert!(validate_storage_key(key).is_err(), "key={key}");
        }
    }

    #[test]
    fn reports_offending_character() {
        assert_eq!(
            validate_storage_key("a/b"),
            Err(StorageKeyError::InvalidCharacter { character: '/' })
        );
    }
}
