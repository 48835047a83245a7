//! Classification of the credential typed at the first prompt.

/// What the user typed when asked for a secret key or an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialInput {
    Email(String),
    SecretKey(String),
    Invalid,
}

/// Classify `value`. Total and pure: every string maps to exactly one
/// variant. Email is checked before the secret-key shape.
pub fn classify(value: &str) -> CredentialInput {
    if utils::is_email(value) {
        CredentialInput::Email(value.to_string())
    } else if utils::is_secret_key(value) {
        CredentialInput::SecretKey(value.to_string())
    } else {
        CredentialInput::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_email() {
        assert_eq!(
            classify("jane@example.com"),
            CredentialInput::Email("jane@example.com".to_string())
        );
    }

    #[test]
    fn test_classify_secret_key() {
        let key = "11111111-2222-3333-4444-555555555555";
        assert_eq!(classify(key), CredentialInput::SecretKey(key.to_string()));
    }

    #[test]
    fn test_classify_invalid() {
        for value in ["", "jane", "jane@", "11111111-2222", "SCW1234567890ABCDEFG"] {
            assert_eq!(classify(value), CredentialInput::Invalid, "{value:?}");
        }
    }

    #[test]
    fn test_classification_is_mutually_exclusive() {
        let samples = [
            "jane@example.com",
            "11111111-2222-3333-4444-555555555555",
            "11111111-2222-3333-4444-555555555555@example.com",
            "not a credential",
        ];
        for value in samples {
            let email = utils::is_email(value);
            let key = utils::is_secret_key(value);
            match classify(value) {
                CredentialInput::Email(_) => assert!(email),
                CredentialInput::SecretKey(_) => assert!(key && !email),
                CredentialInput::Invalid => assert!(!email && !key),
            }
        }
    }

    #[test]
    fn test_uuid_local_part_classifies_as_email() {
        let value = "11111111-2222-3333-4444-555555555555@example.com";
        assert!(matches!(classify(value), CredentialInput::Email(_)));
    }
}
