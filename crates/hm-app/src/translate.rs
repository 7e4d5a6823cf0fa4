//! The translation pipeline: description in, model (and optional exports) out.

use crate::error::{AppError, AppResult};
use crate::options::TranslateOptions;
use hm_envelope::EnvelopeSummary;
use hm_hvac::{AllocationSummary, ResidualPolicy};
use hm_input::BuildingDescription;
use hm_model::{BuildingModel, ModelBuilder};
use hm_output::{BuildManifest, OutputDir, compute_build_id};
use std::path::Path;
use tracing::{info, warn};

pub const TRANSLATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything one successful translation produced.
#[derive(Debug, Clone)]
pub struct Translation {
    pub model: BuildingModel,
    pub envelope: EnvelopeSummary,
    pub allocation: AllocationSummary,
    /// Present when an output directory was configured.
    pub manifest: Option<BuildManifest>,
}

/// Parse without validating; validation is a separate pipeline step.
pub fn load_description(path: &Path) -> AppResult<BuildingDescription> {
    hm_input::read_description(path).map_err(|e| match e {
        hm_input::InputError::Io(source) => AppError::InputFileRead {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

pub fn validate_description(desc: &BuildingDescription) -> AppResult<()> {
    hm_input::validate_building(desc)?;
    Ok(())
}

/// Envelope, then HVAC, then freeze. Any error aborts the whole build.
pub fn build_model(
    desc: &BuildingDescription,
    policy: ResidualPolicy,
) -> AppResult<(BuildingModel, EnvelopeSummary, AllocationSummary)> {
    let mut builder = ModelBuilder::new(&desc.name);
    let envelope = hm_envelope::assemble(desc, &mut builder)?;
    let allocation = hm_hvac::allocate(desc, &mut builder, policy)?;
    let model = builder.build()?;
    Ok((model, envelope, allocation))
}

pub fn translate_file(path: &Path, options: &TranslateOptions) -> AppResult<Translation> {
    let desc = load_description(path)?;
    translate(&desc, options)
}

pub fn translate(desc: &BuildingDescription, options: &TranslateOptions) -> AppResult<Translation> {
    options.check()?;
    info!(name = %desc.name, skip_validation = options.skip_validation, "translating");

    if !options.skip_validation {
        validate_description(desc)?;
    }

    let (model, envelope, allocation) = match build_model(desc, options.residual_policy) {
        Ok(built) => built,
        Err(err) if options.skip_validation => return Err(validate_after_failure(desc, err)),
        Err(err) => return Err(err),
    };
    info!(
        zones = model.zones.len(),
        surfaces = model.surfaces.len(),
        equipment = model.equipment.len(),
        "model built"
    );

    let manifest = match &options.output_dir {
        Some(dir) => Some(export(desc, &model, dir, options)?),
        None => None,
    };

    Ok(Translation {
        model,
        envelope,
        allocation,
        manifest,
    })
}

/// Run the skipped validation so its findings are reported with the build error.
fn validate_after_failure(desc: &BuildingDescription, err: AppError) -> AppError {
    warn!(error = %err, "build failed with validation skipped; validating description");
    let errors = match hm_input::validate_building(desc) {
        Ok(()) => return err,
        Err(errors) => errors.messages(),
    };
    match err {
        AppError::Build { kind, message } => AppError::BuildInvalid {
            kind,
            message,
            validation: errors,
        },
        _ => AppError::Validation(errors),
    }
}

fn export(
    desc: &BuildingDescription,
    model: &BuildingModel,
    dir: &Path,
    options: &TranslateOptions,
) -> AppResult<BuildManifest> {
    let out = OutputDir::new(dir.to_path_buf())?;
    let build_id = compute_build_id(desc, TRANSLATOR_VERSION);
    let manifest = BuildManifest::new(
        build_id,
        model,
        TRANSLATOR_VERSION,
        options
            .weather_dir
            .as_ref()
            .map(|d| d.display().to_string()),
    );
    out.save_build(&manifest, model)?;
    Ok(manifest)
}
