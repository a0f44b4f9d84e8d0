//! Project configuration read from `config.yaml`.
//!
//! The file names the dataset and the project folders. Directory entries
//! are prefixes and are joined to file names by plain concatenation, so
//! `data/` + `vehicles_us.csv` gives `data/vehicles_us.csv`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cleaning::EmptyGroupPolicy;
use crate::error::{Result, VehiscopeError};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderConfig {
    pub path: String,
}

/// File names of the clean export, written next to the raw dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub clean_filename: String,
    pub schema_filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            clean_filename: "vehicles_us_clean.csv".to_string(),
            schema_filename: "vehicles_us_clean_dtypes.yaml".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    pub empty_group: EmptyGroupPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub port: u16,
    pub histogram_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            port: 8501,
            histogram_bins: 30,
        }
    }
}

/// Parsed project configuration.
///
/// Built once at startup and passed by reference to whatever needs a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub dataset: DatasetConfig,
    pub notebooks: FolderConfig,
    pub utils: FolderConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub cleaning: CleaningConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Directory the configured paths are relative to.
    #[serde(skip)]
    root: PathBuf,
}

impl ProjectConfig {
    /// Read a configuration file; relative paths resolve against its folder.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            VehiscopeError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_yaml(&content).map_err(|e| {
            VehiscopeError::Config(format!("failed to parse '{}': {}", path.display(), e))
        })?;
        config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    /// Parse configuration text; paths resolve against the working directory.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Directory the configured paths are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Data folder, e.g. `data/`.
    pub fn data_dir(&self) -> &str {
        &self.dataset.path
    }

    /// Dataset path for the app launcher, e.g. `data/vehicles_us.csv`.
    pub fn csv_for_main(&self) -> String {
        format!("{}{}", self.dataset.path, self.dataset.filename)
    }

    /// Dataset path as seen from the notebooks folder.
    pub fn csv_for_notebooks(&self) -> String {
        format!("../{}", self.csv_for_main())
    }

    pub fn notebooks_dir(&self) -> &str {
        &self.notebooks.path
    }

    pub fn utils_dir(&self) -> &str {
        &self.utils.path
    }

    /// Raw dataset on disk.
    pub fn raw_data_path(&self) -> PathBuf {
        self.root.join(self.csv_for_main())
    }

    /// Clean data file on disk.
    pub fn clean_csv_path(&self) -> PathBuf {
        self.root
            .join(format!("{}{}", self.dataset.path, self.export.clean_filename))
    }

    /// Schema document on disk.
    pub fn schema_path(&self) -> PathBuf {
        self.root
            .join(format!("{}{}", self.dataset.path, self.export.schema_filename))
    }
}

/// Human-readable summary of a configuration lookup.
///
/// Also covers a file that could not be read, in which case every path
/// is reported as `None`.
pub struct ConfigReport<'a> {
    path: &'a Path,
    config: Option<&'a ProjectConfig>,
}

impl<'a> ConfigReport<'a> {
    pub fn new(path: &'a Path, config: Option<&'a ProjectConfig>) -> Self {
        Self { path, config }
    }
}

impl fmt::Display for ConfigReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn entry(f: &mut fmt::Formatter<'_>, title: &str, value: Option<String>) -> fmt::Result {
            writeln!(f, "{}:", title)?;
            match value {
                Some(v) => writeln!(f, "\t{}", v),
                None => writeln!(f, "\tNone"),
            }
        }

        let rule = "-".repeat(28);
        writeln!(f, "*** Configuration report ***")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Target YAML file: {}", self.path.display())?;
        writeln!(f, "YAML file read: {}", self.config.is_some())?;
        writeln!(f, "Dictionary retrieved:")?;
        match self.config.map(serde_json::to_string) {
            Some(Ok(json)) => writeln!(f, "{}", json)?,
            _ => writeln!(f, "None")?,
        }

        let c = self.config;
        entry(f, "Data folder", c.map(|c| c.data_dir().to_string()))?;
        entry(f, "Dataset path for app launcher", c.map(|c| c.csv_for_main()))?;
        entry(f, "Dataset path for notebooks", c.map(|c| c.csv_for_notebooks()))?;
        entry(f, "Notebooks folder", c.map(|c| c.notebooks_dir().to_string()))?;
        entry(f, "Utils library folder", c.map(|c| c.utils_dir().to_string()))?;
        writeln!(f, "{}", rule)?;
        write!(f, "*** Report End ***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
dataset:
  path: data/
  filename: vehicles_us.csv
notebooks:
  path: notebooks/
utils:
  path: utils/
"#;

    #[test]
    fn test_path_accessors() {
        let config = ProjectConfig::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.data_dir(), "data/");
        assert_eq!(config.csv_for_main(), "data/vehicles_us.csv");
        assert_eq!(config.csv_for_notebooks(), "../data/vehicles_us.csv");
        assert_eq!(config.notebooks_dir(), "notebooks/");
        assert_eq!(config.utils_dir(), "utils/");
    }

    #[test]
    fn test_optional_sections_default() {
        let config = ProjectConfig::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.export, ExportConfig::default());
        assert_eq!(config.cleaning.empty_group, EmptyGroupPolicy::Error);
        assert_eq!(config.dashboard.port, 8501);
        assert_eq!(config.dashboard.histogram_bins, 30);
    }

    #[test]
    fn test_optional_sections_override() {
        let yaml = format!(
            "{}cleaning:\n  empty_group: leave_missing\ndashboard:\n  port: 9000\n",
            MINIMAL
        );
        let config = ProjectConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config.cleaning.empty_group, EmptyGroupPolicy::LeaveMissing);
        assert_eq!(config.dashboard.port, 9000);
        assert_eq!(config.dashboard.histogram_bins, 30);
    }

    #[test]
    fn test_load_resolves_against_config_folder() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, MINIMAL).unwrap();

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.root(), dir.path());
        assert_eq!(
            config.raw_data_path(),
            dir.path().join("data/vehicles_us.csv")
        );
        assert_eq!(
            config.schema_path(),
            dir.path().join("data/vehicles_us_clean_dtypes.yaml")
        );
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let result = ProjectConfig::load(dir.path().join(CONFIG_FILE_NAME));
        assert!(matches!(result, Err(VehiscopeError::Config(_))));
    }

    #[test]
    fn test_bad_yaml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "dataset: [unterminated").unwrap();
        assert!(matches!(
            ProjectConfig::load(&path),
            Err(VehiscopeError::Config(_))
        ));
    }

    #[test]
    fn test_report_without_config() {
        let path = Path::new(CONFIG_FILE_NAME);
        let report = ConfigReport::new(path, None).to_string();
        assert!(report.starts_with("*** Configuration report ***"));
        assert!(report.contains("YAML file read: false"));
        assert!(report.ends_with("*** Report End ***"));
    }

    #[test]
    fn test_report_with_config() {
        let config = ProjectConfig::from_yaml(MINIMAL).unwrap();
        let path = Path::new(CONFIG_FILE_NAME);
        let report = ConfigReport::new(path, Some(&config)).to_string();
        assert!(report.contains("YAML file read: true"));
        assert!(report.contains("\tdata/vehicles_us.csv"));
        assert!(report.contains("\t../data/vehicles_us.csv"));
    }
}
