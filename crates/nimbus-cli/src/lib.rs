//! Nimbus CLI library
//!
//! This module contains the core CLI logic: rendering the built-in blueprint
//! and running the storage credential probe.

pub mod blueprint;
pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};
pub use config::{Settings, load_config};

use std::{
    io::{self, Write},
    path::PathBuf,
};

use log::{error, info, warn};

use nimbus::{
    Engine, NimbusError, OutputFormat, Renderer,
    config::{AppConfig, RenderConfig},
};
use nimbus_probe::{CredentialProbe, ObjectStore, ProbeConfig, ProbeOutcome, S3ObjectStore};

/// How a successful CLI invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// The probe failed and left nothing behind.
    Failed,
    /// The probe created a bucket it could not delete.
    BucketLeaked,
}

impl Status {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failed => 1,
            Self::BucketLeaked => 2,
        }
    }
}

/// Run the Nimbus CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `NimbusError` for:
/// - Configuration loading errors
/// - Graph construction and rendering errors
/// - File I/O errors
///
/// A probe that runs but fails is not an error; it is reported through the
/// returned [`Status`].
pub fn run(args: &Args) -> Result<Status, NimbusError> {
    let settings = load_config(args.config.as_ref())?;

    match &args.command {
        Command::Diagram {
            format,
            engine,
            output_dir,
        } => {
            let config = diagram_config(settings.diagram(), *engine, output_dir.clone());
            let format = format.unwrap_or_else(|| config.render().format());
            let path = render_blueprint(config, format)?;
            println!("{}", path.display());
            Ok(Status::Success)
        }
        Command::Probe {
            prefix,
            region,
            endpoint_url,
            path_style,
        } => {
            let config = probe_config(
                settings.probe(),
                prefix.as_deref(),
                region.as_deref(),
                endpoint_url.as_deref(),
                *path_style,
            );
            let mut stdout = io::stdout().lock();

            let store = match S3ObjectStore::connect(&config) {
                Ok(store) => store,
                Err(err) => {
                    error!(err:err; "Failed to set up S3 client");
                    writeln!(stdout, "Could not set up S3 client: {err}")?;
                    return Ok(Status::Failed);
                }
            };

            probe_with(&store, &config, &mut stdout)
        }
    }
}

/// Render the data center blueprint with `config`, returning the written path.
///
/// # Errors
///
/// Returns [`NimbusError`] if rendering or writing the file fails.
pub fn render_blueprint(config: AppConfig, format: OutputFormat) -> Result<PathBuf, NimbusError> {
    let diagram = blueprint::data_center_on_aws()?;
    info!(
        title = diagram.title(),
        engine:% = config.render().engine(),
        format:% = format;
        "Rendering blueprint"
    );

    let path = Renderer::new(config).render_to_file(&diagram, format)?;
    info!(output_file = path.display().to_string(); "Blueprint exported successfully");
    Ok(path)
}

/// Run one credential probe against `store`, writing one line per step to `out`.
///
/// # Errors
///
/// Returns [`NimbusError::Config`] if the bucket prefix is invalid, or
/// [`NimbusError::Io`] if `out` cannot be written.
pub fn probe_with<S: ObjectStore + ?Sized>(
    store: &S,
    config: &ProbeConfig,
    out: &mut impl Write,
) -> Result<Status, NimbusError> {
    let probe = CredentialProbe::new(store, config)
        .map_err(|err| NimbusError::Config(err.to_string()))?;

    let mut write_result = Ok(());
    let outcome = probe.run(|event| {
        if write_result.is_ok() {
            write_result = writeln!(out, "{event}");
        }
    });
    write_result?;

    writeln!(out, "{outcome}")?;

    let status = match &outcome {
        ProbeOutcome::Verified { .. } => Status::Success,
        ProbeOutcome::CreateFailed { .. } => Status::Failed,
        ProbeOutcome::DeleteFailed { bucket, .. } => {
            warn!(bucket:% = bucket; "Bucket left behind, delete it manually");
            Status::BucketLeaked
        }
    };
    Ok(status)
}

/// Apply command-line overrides on top of the configured diagram settings.
fn diagram_config(
    base: &AppConfig,
    engine: Option<Engine>,
    output_dir: Option<PathBuf>,
) -> AppConfig {
    let render = base.render();
    let output_dir = output_dir.unwrap_or_else(|| render.output_dir().to_path_buf());

    AppConfig::new(
        RenderConfig::new(
            engine.unwrap_or_else(|| render.engine()),
            render.format(),
            Some(output_dir),
        ),
        base.style().clone(),
    )
}

/// Apply command-line overrides on top of the configured probe settings.
fn probe_config(
    base: &ProbeConfig,
    prefix: Option<&str>,
    region: Option<&str>,
    endpoint_url: Option<&str>,
    path_style: bool,
) -> ProbeConfig {
    let mut config = base.clone();
    if let Some(prefix) = prefix {
        config = config.with_bucket_prefix(prefix);
    }
    if let Some(region) = region {
        config = config.with_region(region);
    }
    if let Some(endpoint_url) = endpoint_url {
        config = config.with_endpoint_url(endpoint_url);
    }
    if path_style {
        config = config.with_force_path_style(true);
    }
    config
}
