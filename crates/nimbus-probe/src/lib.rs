//! Nimbus Probe - object storage credential check.
//!
//! Confirms that the credentials available to the process allow the minimal
//! write path of an object storage service: create a uniquely named bucket,
//! then delete it.
//!
//! The storage service is reached through the [`ObjectStore`] trait, so the
//! probe itself never touches ambient state. [`MemoryObjectStore`] backs tests;
//! `S3ObjectStore` (feature `s3`, on by default) talks to Amazon S3 or any
//! S3-compatible endpoint using the standard AWS credential chain.
//!
//! # Example
//!
//! ```
//! use nimbus_probe::{CredentialProbe, MemoryObjectStore, ProbeConfig};
//!
//! let store = MemoryObjectStore::new();
//! let probe = CredentialProbe::new(&store, &ProbeConfig::default()).unwrap();
//!
//! let outcome = probe.run(|event| println!("{event}"));
//! assert!(outcome.is_verified());
//! assert!(store.buckets().is_empty());
//! ```

pub mod config;

mod bucket;
mod memory;
mod probe;
#[cfg(feature = "s3")]
mod s3;
mod store;

pub use bucket::{BucketName, BucketNameError, DEFAULT_BUCKET_PREFIX};
pub use config::ProbeConfig;
pub use memory::{MemoryObjectStore, StoreCall};
pub use probe::{CredentialProbe, ProbeEvent, ProbeOutcome, verify_credentials};
#[cfg(feature = "s3")]
pub use s3::S3ObjectStore;
pub use store::{ObjectStore, StoreError};
