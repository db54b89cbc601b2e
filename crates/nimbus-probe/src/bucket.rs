//! Ephemeral bucket names.

use std::{fmt, net::Ipv4Addr};

use thiserror::Error;
use uuid::Uuid;

/// Prefix used when none is configured.
pub const DEFAULT_BUCKET_PREFIX: &str = "test-credentials";

/// Length of a hyphenated UUID.
const UUID_LEN: usize = 36;

/// S3 bucket names are at most 63 characters.
const MAX_BUCKET_LEN: usize = 63;

/// Longest prefix that still leaves room for `-<uuid>`.
pub(crate) const MAX_PREFIX_LEN: usize = MAX_BUCKET_LEN - UUID_LEN - 1;

/// Name prefixes S3 keeps for itself.
const RESERVED_PREFIXES: [&str; 3] = ["xn--", "sthree-", "amzn-s3-demo-"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BucketNameError {
    #[error("bucket prefix must not be empty")]
    Empty,

    #[error("bucket prefix `{prefix}` is longer than {MAX_PREFIX_LEN} characters")]
    TooLong { prefix: String },

    #[error("bucket prefix `{prefix}` may only contain lowercase letters, digits, `-` and `.`")]
    InvalidCharacter { prefix: String },

    #[error("bucket prefix `{prefix}` must start with a lowercase letter or digit")]
    InvalidStart { prefix: String },

    #[error("bucket prefix `{prefix}` must not contain two adjacent periods")]
    AdjacentPeriods { prefix: String },

    #[error("bucket names starting with `{reserved}` are reserved, prefix `{prefix}` would produce one")]
    Reserved {
        prefix: String,
        reserved: &'static str,
    },

    #[error("bucket prefix `{prefix}` must not be formatted as an IP address")]
    IpAddress { prefix: String },
}

/// A bucket name of the form `<prefix>-<uuid v4>`.
///
/// Names can only be obtained from [`BucketName::generate`], which validates
/// the prefix, so every value satisfies the S3 naming rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    /// Generates a fresh name with a random v4 UUID suffix.
    ///
    /// # Errors
    ///
    /// Returns a [`BucketNameError`] if `prefix` would produce an invalid name.
    ///
    /// # Examples
    ///
    /// ```
    /// use nimbus_probe::BucketName;
    ///
    /// let first = BucketName::generate("test-credentials").unwrap();
    /// let second = BucketName::generate("test-credentials").unwrap();
    /// assert!(first.as_str().starts_with("test-credentials-"));
    /// assert_ne!(first, second);
    /// ```
    pub fn generate(prefix: &str) -> Result<Self, BucketNameError> {
        validate_prefix(prefix)?;
        Ok(Self::from_validated_prefix(prefix))
    }

    /// Caller guarantees `prefix` passed [`validate_prefix`].
    pub(crate) fn from_validated_prefix(prefix: &str) -> Self {
        Self(format!("{prefix}-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BucketName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Checks that `prefix` yields a valid bucket name once the UUID is appended.
pub(crate) fn validate_prefix(prefix: &str) -> Result<(), BucketNameError> {
    let owned = || prefix.to_string();

    let Some(first) = prefix.chars().next() else {
        return Err(BucketNameError::Empty);
    };
    if prefix.len() > MAX_PREFIX_LEN {
        return Err(BucketNameError::TooLong { prefix: owned() });
    }
    if !prefix
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(BucketNameError::InvalidCharacter { prefix: owned() });
    }
    if !(first.is_ascii_lowercase() || first.is_ascii_digit()) {
        return Err(BucketNameError::InvalidStart { prefix: owned() });
    }
    if prefix.contains("..") {
        return Err(BucketNameError::AdjacentPeriods { prefix: owned() });
    }
    // The separator counts: `xn-` becomes `xn--<uuid>`.
    let head = format!("{prefix}-");
    if let Some(reserved) = RESERVED_PREFIXES
        .into_iter()
        .find(|reserved| head.starts_with(*reserved))
    {
        return Err(BucketNameError::Reserved {
            prefix: owned(),
            reserved,
        });
    }
    if prefix.parse::<Ipv4Addr>().is_ok() {
        return Err(BucketNameError::IpAddress { prefix: owned() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn is_valid_s3_name(name: &str) -> bool {
        let bytes = name.as_bytes();
        (3..=MAX_BUCKET_LEN).contains(&name.len())
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
            && bytes[0].is_ascii_alphanumeric()
            && bytes[bytes.len() - 1].is_ascii_alphanumeric()
            && !name.contains("..")
            && !RESERVED_PREFIXES
                .iter()
                .any(|reserved| name.starts_with(*reserved))
            && name.parse::<Ipv4Addr>().is_err()
    }

    #[test]
    fn test_default_prefix_fits() {
        let name = BucketName::generate(DEFAULT_BUCKET_PREFIX).unwrap();
        assert_eq!(name.as_str().len(), DEFAULT_BUCKET_PREFIX.len() + 1 + UUID_LEN);
        assert!(is_valid_s3_name(name.as_str()));
    }

    #[test]
    fn test_rejected_prefixes() {
        assert_eq!(BucketName::generate(""), Err(BucketNameError::Empty));
        assert!(matches!(
            BucketName::generate("Test"),
            Err(BucketNameError::InvalidCharacter { .. })
        ));
        assert!(matches!(
            BucketName::generate("has_underscore"),
            Err(BucketNameError::InvalidCharacter { .. })
        ));
        assert!(matches!(
            BucketName::generate("-leading"),
            Err(BucketNameError::InvalidStart { .. })
        ));
        assert!(matches!(
            BucketName::generate(&"a".repeat(MAX_PREFIX_LEN + 1)),
            Err(BucketNameError::TooLong { .. })
        ));
        assert!(BucketName::generate(&"a".repeat(MAX_PREFIX_LEN)).is_ok());
    }

    #[test]
    fn test_prefixes_s3_would_refuse() {
        assert_eq!(
            BucketName::generate("a..b"),
            Err(BucketNameError::AdjacentPeriods {
                prefix: "a..b".to_string()
            })
        );
        assert!(matches!(
            BucketName::generate("xn--check"),
            Err(BucketNameError::Reserved {
                reserved: "xn--",
                ..
            })
        ));
        assert!(matches!(
            BucketName::generate("xn-"),
            Err(BucketNameError::Reserved {
                reserved: "xn--",
                ..
            })
        ));
        assert!(matches!(
            BucketName::generate("sthree"),
            Err(BucketNameError::Reserved {
                reserved: "sthree-",
                ..
            })
        ));
        assert!(matches!(
            BucketName::generate("amzn-s3-demo-bucket"),
            Err(BucketNameError::Reserved {
                reserved: "amzn-s3-demo-",
                ..
            })
        ));
        assert_eq!(
            BucketName::generate("192.168.0.1"),
            Err(BucketNameError::IpAddress {
                prefix: "192.168.0.1".to_string()
            })
        );

        assert!(BucketName::generate("a.b").is_ok());
        assert!(BucketName::generate("xn-check").is_ok());
        assert!(BucketName::generate("192.168.0").is_ok());
    }

    proptest! {
        #[test]
        fn generated_names_are_valid_s3_names(prefix in "[a-z0-9][a-z0-9.-]{0,25}") {
            if let Ok(name) = BucketName::generate(&prefix) {
                prop_assert!(is_valid_s3_name(name.as_str()), "invalid name {}", name);
                prop_assert!(name.as_str().starts_with(&prefix));
            }
        }

        #[test]
        fn prefixes_without_periods_are_accepted(prefix in "[b-rt-wyz0-9][a-z0-9-]{0,25}") {
            prop_assert!(BucketName::generate(&prefix).is_ok());
        }

        #[test]
        fn generated_names_do_not_repeat(prefix in "[a-z][a-z0-9-]{0,10}") {
            let first = BucketName::generate(&prefix).unwrap();
            let second = BucketName::generate(&prefix).unwrap();
            prop_assert_ne!(first, second);
        }
    }
}
