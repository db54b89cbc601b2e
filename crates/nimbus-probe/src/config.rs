//! Probe configuration.
//!
//! [`ProbeConfig`] is deserialized from the `[probe]` section of the CLI
//! configuration file. Every field is optional; credentials themselves are
//! never part of it and always come from the ambient AWS credential chain.

use serde::Deserialize;

use crate::bucket::DEFAULT_BUCKET_PREFIX;

/// Settings for a credential probe run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Fixed label the generated bucket name starts with.
    bucket_prefix: String,

    /// Region override; the ambient region is used when unset.
    region: Option<String>,

    /// Custom endpoint for S3-compatible services.
    endpoint_url: Option<String>,

    /// Use path-style addressing (`https://host/bucket`), as most S3-compatible services expect.
    force_path_style: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            bucket_prefix: DEFAULT_BUCKET_PREFIX.to_string(),
            region: None,
            endpoint_url: None,
            force_path_style: false,
        }
    }
}

impl ProbeConfig {
    pub fn with_bucket_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.bucket_prefix = prefix.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn with_force_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = force_path_style;
        self
    }

    pub fn bucket_prefix(&self) -> &str {
        &self.bucket_prefix
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    pub fn force_path_style(&self) -> bool {
        self.force_path_style
    }
}
