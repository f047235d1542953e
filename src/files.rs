use std::path::Path;

use color_eyre::eyre::{
    Context,
    Error,
    OptionExt,
};
use directories::ProjectDirs;
use serde::{
    Serialize,
    de::DeserializeOwned,
};

#[derive(Clone, Debug)]
pub struct AppFiles {
    project_dirs: ProjectDirs,
}

impl AppFiles {
    pub fn new(project_dirs: ProjectDirs) -> Self {
        Self { project_dirs }
    }

    pub fn open() -> Result<Self, Error> {
        let project_dirs = ProjectDirs::from("", "", std::env!("CARGO_PKG_NAME"))
            .ok_or_eyre("Could not determine the config directory")?;
        let app_files = Self::new(project_dirs);
        std::fs::create_dir_all(app_files.config_dir())?;
        Ok(app_files)
    }

    pub fn config_dir(&self) -> &Path {
        self.project_dirs.config_local_dir()
    }

    /// Read config file, or create one if it doesn't exist yet.
    pub fn read_config_or_create<T>(&self) -> Result<T, Error>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let path = self.config_dir().join("config.toml");

        let config = if !path.exists() {
            tracing::info!(path = %path.display(), "Creating config file");
            let config = T::default();
            let toml = toml::to_string_pretty(&config)?;
            std::fs::write(&path, &toml)
                .with_context(|| format!("Could not write config file: {}", path.display()))?;
            config
        }
        else {
            tracing::info!(path = %path.display(), "Reading config file");
            let toml = std::fs::read(&path)
                .with_context(|| format!("Could not read config file: {}", path.display()))?;

            toml::from_slice(&toml)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        };

        Ok(config)
    }
}
