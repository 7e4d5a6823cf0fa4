//! Output directory layout.

use crate::mapping::hvac_map_tsv;
use crate::types::{BuildManifest, ModelExport, ModelSummary};
use crate::{OutputError, OutputResult};
use hm_model::BuildingModel;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const MODEL_FILE: &str = "model.json";
pub const HVAC_MAP_FILE: &str = "map_hvac.tsv";

#[derive(Clone)]
pub struct OutputDir {
    root_dir: PathBuf,
}

impl OutputDir {
    pub fn new(root_dir: PathBuf) -> OutputResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn path(&self) -> &Path {
        &self.root_dir
    }

    pub fn has_build(&self) -> bool {
        self.root_dir.join(MANIFEST_FILE).exists()
    }

    /// Write the manifest, the model and the HVAC mapping, replacing any
    /// previous build in this directory.
    pub fn save_build(&self, manifest: &BuildManifest, model: &BuildingModel) -> OutputResult<()> {
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(self.root_dir.join(MANIFEST_FILE), manifest_json)?;

        let export = ModelExport {
            summary: ModelSummary::from_model(model),
            model,
        };
        let model_json = serde_json::to_string_pretty(&export)?;
        fs::write(self.root_dir.join(MODEL_FILE), model_json)?;

        fs::write(self.root_dir.join(HVAC_MAP_FILE), hvac_map_tsv(model))?;

        info!(dir = %self.root_dir.display(), build_id = %manifest.build_id, "build exported");
        Ok(())
    }

    pub fn load_manifest(&self) -> OutputResult<BuildManifest> {
        let manifest_path = self.root_dir.join(MANIFEST_FILE);

        if !manifest_path.exists() {
            return Err(OutputError::BuildNotFound {
                path: self.root_dir.display().to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_hvac_map(&self) -> OutputResult<String> {
        let map_path = self.root_dir.join(HVAC_MAP_FILE);
        if !map_path.exists() {
            return Err(OutputError::BuildNotFound {
                path: self.root_dir.display().to_string(),
            });
        }
        Ok(fs::read_to_string(map_path)?)
    }
}
