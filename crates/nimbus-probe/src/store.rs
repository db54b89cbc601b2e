//! The object storage seam.

use thiserror::Error;

use crate::bucket::BucketName;

/// Failure reported by an [`ObjectStore`].
///
/// Variants classify the cause so callers can tell a permission problem from
/// a transient one; the payload is the service's own message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("bucket already exists: {0}")]
    Conflict(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("service error: {0}")]
    Service(String),

    #[error("client error: {0}")]
    Client(String),
}

/// Bucket lifecycle operations against an object storage service.
///
/// Calls are synchronous; async-backed implementations drive their own runtime.
pub trait ObjectStore {
    fn create_bucket(&self, name: &BucketName) -> Result<(), StoreError>;

    fn delete_bucket(&self, name: &BucketName) -> Result<(), StoreError>;
}

impl<T: ObjectStore + ?Sized> ObjectStore for &T {
    fn create_bucket(&self, name: &BucketName) -> Result<(), StoreError> {
        (**self).create_bucket(name)
    }

    fn delete_bucket(&self, name: &BucketName) -> Result<(), StoreError> {
        (**self).delete_bucket(name)
    }
}

impl<T: ObjectStore + ?Sized> ObjectStore for Box<T> {
    fn create_bucket(&self, name: &BucketName) -> Result<(), StoreError> {
        (**self).create_bucket(name)
    }

    fn delete_bucket(&self, name: &BucketName) -> Result<(), StoreError> {
        (**self).delete_bucket(name)
    }
}
