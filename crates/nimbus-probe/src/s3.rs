//! Amazon S3 backed [`ObjectStore`].

use std::{error::Error, fmt::Debug};

use aws_config::BehaviorVersion;
use aws_sdk_s3::{
    Client,
    config::Region,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    types::{BucketLocationConstraint, CreateBucketConfiguration},
};
use log::{debug, info};
use tokio::runtime::{Builder, Runtime};

use crate::{
    bucket::BucketName,
    config::ProbeConfig,
    store::{ObjectStore, StoreError},
};

/// Region in which buckets are created without a location constraint.
const DEFAULT_REGION: &str = "us-east-1";

/// Object store talking to S3 or an S3-compatible endpoint.
///
/// Credentials and, unless overridden, the region come from the standard AWS
/// chain (environment, shared profile files, instance metadata). Each call
/// blocks on a private current-thread runtime.
pub struct S3ObjectStore {
    runtime: Runtime,
    client: Client,
    region: Option<String>,
}

impl S3ObjectStore {
    /// Resolves ambient configuration and builds a client.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Client`] if the async runtime cannot be started.
    pub fn connect(config: &ProbeConfig) -> Result<Self, StoreError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| StoreError::Client(format!("failed to start runtime: {err}")))?;

        let shared = runtime.block_on(async {
            let mut loader = aws_config::defaults(BehaviorVersion::latest());
            if let Some(region) = config.region() {
                loader = loader.region(Region::new(region.to_string()));
            }
            if let Some(endpoint_url) = config.endpoint_url() {
                loader = loader.endpoint_url(endpoint_url);
            }
            loader.load().await
        });

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.force_path_style())
            .build();
        let region = shared.region().map(|region| region.as_ref().to_string());

        info!(
            region:? = region,
            endpoint_url:? = config.endpoint_url(),
            path_style = config.force_path_style();
            "S3 client configured"
        );

        Ok(Self {
            runtime,
            client: Client::from_conf(s3_config),
            region,
        })
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    fn location_constraint(&self) -> Option<CreateBucketConfiguration> {
        let region = self.region.as_deref().filter(|region| *region != DEFAULT_REGION)?;
        Some(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build(),
        )
    }
}

impl ObjectStore for S3ObjectStore {
    fn create_bucket(&self, name: &BucketName) -> Result<(), StoreError> {
        let mut request = self.client.create_bucket().bucket(name.as_str());
        if let Some(configuration) = self.location_constraint() {
            request = request.create_bucket_configuration(configuration);
        }

        let output = self.runtime.block_on(request.send()).map_err(classify)?;
        debug!(bucket:% = name, location:? = output.location(); "CreateBucket succeeded");
        Ok(())
    }

    fn delete_bucket(&self, name: &BucketName) -> Result<(), StoreError> {
        self.runtime
            .block_on(self.client.delete_bucket().bucket(name.as_str()).send())
            .map_err(classify)?;
        debug!(bucket:% = name; "DeleteBucket succeeded");
        Ok(())
    }
}

fn classify<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + Error + 'static,
    R: Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => StoreError::Network(message),
        SdkError::ConstructionFailure(_) => StoreError::Client(message),
        _ => classify_code(err.code(), message),
    }
}

/// Maps an S3 error code onto a [`StoreError`] kind.
fn classify_code(code: Option<&str>, message: String) -> StoreError {
    match code {
        Some(
            "AccessDenied"
            | "InvalidAccessKeyId"
            | "SignatureDoesNotMatch"
            | "ExpiredToken"
            | "InvalidToken",
        ) => StoreError::Unauthorized(message),
        Some("BucketAlreadyExists" | "BucketAlreadyOwnedByYou") => StoreError::Conflict(message),
        _ => StoreError::Service(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_code() {
        let kind = |code| classify_code(code, String::new());

        assert_eq!(kind(Some("AccessDenied")), StoreError::Unauthorized(String::new()));
        assert_eq!(
            kind(Some("SignatureDoesNotMatch")),
            StoreError::Unauthorized(String::new())
        );
        assert_eq!(
            kind(Some("BucketAlreadyOwnedByYou")),
            StoreError::Conflict(String::new())
        );
        assert_eq!(kind(Some("InternalError")), StoreError::Service(String::new()));
        assert_eq!(kind(None), StoreError::Service(String::new()));
    }
}
