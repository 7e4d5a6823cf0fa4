//! Per-invocation translation settings.

use crate::error::{AppError, AppResult};
use hm_hvac::ResidualPolicy;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// Validate only if the build fails.
    pub skip_validation: bool,
    /// Write manifest, model and HVAC mapping here when set.
    pub output_dir: Option<PathBuf>,
    /// Recorded in the manifest for the simulation engine; never read.
    pub weather_dir: Option<PathBuf>,
    pub schemas_dir: Option<PathBuf>,
    pub residual_policy: ResidualPolicy,
}

impl TranslateOptions {
    pub fn check(&self) -> AppResult<()> {
        if let Some(dir) = &self.schemas_dir
            && !dir.is_dir()
        {
            return Err(AppError::Config(format!(
                "schemas directory does not exist: {}",
                dir.display()
            )));
        }
        if let Some(dir) = &self.output_dir
            && dir.is_file()
        {
            return Err(AppError::Config(format!(
                "output directory is a file: {}",
                dir.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_up_front() {
        let options = TranslateOptions::default();
        assert!(!options.skip_validation);
        assert_eq!(options.residual_policy, ResidualPolicy::Default);
        assert!(options.check().is_ok());
    }

    #[test]
    fn missing_schemas_dir_is_a_config_error() {
        let options = TranslateOptions {
            schemas_dir: Some(std::env::temp_dir().join("hm_app_no_such_schemas")),
            ..TranslateOptions::default()
        };
        assert!(matches!(options.check(), Err(AppError::Config(_))));
    }
}
