//! The create-then-delete credential probe.

use std::fmt;

use log::{debug, error, info};

use crate::{
    bucket::{self, BucketName, BucketNameError},
    config::ProbeConfig,
    store::{ObjectStore, StoreError},
};

/// Progress notification emitted while a probe runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvent {
    CreatingBucket(BucketName),
    BucketCreated(BucketName),
    DeletingBucket(BucketName),
    Completed(BucketName),
}

impl fmt::Display for ProbeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreatingBucket(name) => write!(f, "Creating bucket {name}"),
            Self::BucketCreated(name) => write!(f, "Bucket {name} created"),
            Self::DeletingBucket(name) => write!(f, "Deleting bucket {name}"),
            Self::Completed(name) => {
                write!(f, "Bucket {name} deleted, credentials verified")
            }
        }
    }
}

/// Result of a single probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The bucket was created and deleted.
    Verified { bucket: BucketName },

    /// Creation was refused; nothing exists on the service.
    CreateFailed {
        bucket: BucketName,
        error: StoreError,
    },

    /// Creation succeeded but deletion did not, so `bucket` still exists.
    DeleteFailed {
        bucket: BucketName,
        error: StoreError,
    },
}

impl ProbeOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// The bucket left behind on the service, if any.
    pub fn leaked_bucket(&self) -> Option<&BucketName> {
        match self {
            Self::DeleteFailed { bucket, .. } => Some(bucket),
            Self::Verified { .. } | Self::CreateFailed { .. } => None,
        }
    }

    /// The bucket name this run used.
    pub fn bucket(&self) -> &BucketName {
        match self {
            Self::Verified { bucket }
            | Self::CreateFailed { bucket, .. }
            | Self::DeleteFailed { bucket, .. } => bucket,
        }
    }

    pub fn error(&self) -> Option<&StoreError> {
        match self {
            Self::Verified { .. } => None,
            Self::CreateFailed { error, .. } | Self::DeleteFailed { error, .. } => Some(error),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified { bucket } => write!(f, "credentials verified with bucket {bucket}"),
            Self::CreateFailed { bucket, error } => {
                write!(f, "failed to create bucket {bucket}: {error}")
            }
            Self::DeleteFailed { bucket, error } => write!(
                f,
                "bucket {bucket} was created but could not be deleted: {error}"
            ),
        }
    }
}

/// Verifies credentials by creating and deleting a uniquely named bucket.
///
/// Each [`run`](Self::run) generates a fresh bucket name. A store error ends
/// the run at once; the probe never retries and never attempts a second
/// delete, so a failed deletion is reported through
/// [`ProbeOutcome::DeleteFailed`] for the caller to handle.
pub struct CredentialProbe<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    prefix: String,
}

impl<'a, S: ObjectStore + ?Sized> CredentialProbe<'a, S> {
    /// Creates a probe using the bucket prefix from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`BucketNameError`] if the configured prefix cannot form a
    /// valid bucket name.
    pub fn new(store: &'a S, config: &ProbeConfig) -> Result<Self, BucketNameError> {
        bucket::validate_prefix(config.bucket_prefix())?;
        Ok(Self {
            store,
            prefix: config.bucket_prefix().to_string(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Runs the probe, reporting each step to `observer`.
    pub fn run(&self, mut observer: impl FnMut(&ProbeEvent)) -> ProbeOutcome {
        let bucket = BucketName::from_validated_prefix(&self.prefix);

        let mut emit = |event: ProbeEvent| {
            debug!(event:% = event; "Probe step");
            observer(&event);
        };

        info!(bucket:% = bucket; "Creating bucket");
        emit(ProbeEvent::CreatingBucket(bucket.clone()));
        if let Err(err) = self.store.create_bucket(&bucket) {
            error!(bucket:% = bucket, err:err; "Failed to create bucket");
            return ProbeOutcome::CreateFailed { bucket, error: err };
        }
        info!(bucket:% = bucket; "Bucket created");
        emit(ProbeEvent::BucketCreated(bucket.clone()));

        info!(bucket:% = bucket; "Deleting bucket");
        emit(ProbeEvent::DeletingBucket(bucket.clone()));
        if let Err(err) = self.store.delete_bucket(&bucket) {
            error!(
                bucket:% = bucket,
                err:err;
                "Failed to delete bucket, it must be removed manually"
            );
            return ProbeOutcome::DeleteFailed { bucket, error: err };
        }
        info!(bucket:% = bucket; "Bucket deleted, credentials verified");
        emit(ProbeEvent::Completed(bucket.clone()));

        ProbeOutcome::Verified { bucket }
    }
}

/// Runs one probe with the default prefix and reports whether it succeeded.
///
/// # Examples
///
/// ```
/// use nimbus_probe::{MemoryObjectStore, StoreError, verify_credentials};
///
/// assert!(verify_credentials(&MemoryObjectStore::new()));
///
/// let denied = MemoryObjectStore::new()
///     .fail_create_with(StoreError::Unauthorized("AccessDenied".to_string()));
/// assert!(!verify_credentials(&denied));
/// ```
pub fn verify_credentials<S: ObjectStore + ?Sized>(store: &S) -> bool {
    let probe = match CredentialProbe::new(store, &ProbeConfig::default()) {
        Ok(probe) => probe,
        Err(err) => {
            error!(err:err; "Invalid default bucket prefix");
            return false;
        }
    };
    probe.run(|_| {}).is_verified()
}
