use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub conventions: ConventionsConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

/// Project metadata stamped into the document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub company: String,
    pub name: String,
}

/// Naming conventions of the analyzed codebase: base types, markers and
/// layer directories
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConventionsConfig {
    /// Leading namespace segment of the codebase (`App` in `App\Billing\...`)
    pub root_namespace: String,
    /// Base type of command messages
    pub command_base: String,
    /// Base type of query messages
    pub query_base: String,
    /// Base type of domain events
    pub event_base: String,
    /// Dispatch capability for commands
    pub command_bus: String,
    /// Dispatch capability for queries
    pub query_bus: String,
    /// Marker attribute carried by event subscribers
    pub subscriber_attribute: String,
    /// Base type of module-registration marker classes
    pub module_base: String,
    /// File-name suffix of module markers
    pub marker_suffix: String,
    /// Layer subdirectory holding commands and queries
    pub application_dir: String,
    /// Layer subdirectory holding domain events
    pub domain_dir: String,
    /// Layer subdirectory holding subscribers and module markers
    pub infrastructure_dir: String,
}

/// Analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Glob patterns excluded from the scan
    pub exclude: Vec<String>,
    /// Top-level directories that never form a context (shared kernels)
    pub exclude_contexts: Vec<String>,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub pretty: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            company: "acme".to_string(),
            name: "untitled".to_string(),
        }
    }
}

impl Default for ConventionsConfig {
    fn default() -> Self {
        Self {
            root_namespace: "App".to_string(),
            command_base: "App\\Shared\\Application\\Command\\Command".to_string(),
            query_base: "App\\Shared\\Application\\Query\\Query".to_string(),
            event_base: "App\\Shared\\Domain\\Event\\DomainEvent".to_string(),
            command_bus: "App\\Shared\\Application\\Command\\CommandBus".to_string(),
            query_bus: "App\\Shared\\Application\\Query\\QueryBus".to_string(),
            subscriber_attribute: "App\\Shared\\Infrastructure\\Event\\AsDomainEventSubscriber"
                .to_string(),
            module_base: "App\\Shared\\Infrastructure\\Module\\ModuleExtension".to_string(),
            marker_suffix: "Extension.php".to_string(),
            application_dir: "Application".to_string(),
            domain_dir: "Domain".to_string(),
            infrastructure_dir: "Infrastructure".to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exclude: vec![
                "vendor/**".to_string(),
                "var/**".to_string(),
                "node_modules/**".to_string(),
                ".git/**".to_string(),
            ],
            exclude_contexts: vec!["Shared".to_string()],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("arch.json"),
            pretty: false,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(&mut self, output: Option<PathBuf>, pretty: bool) {
        if let Some(out) = output {
            self.output.path = out;
        }
        if pretty {
            self.output.pretty = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.conventions.root_namespace.is_empty() {
            return Err(Error::config_validation("root_namespace must not be empty"));
        }

        if self.conventions.root_namespace.contains('\\') {
            return Err(Error::config_validation(
                "root_namespace must be a single namespace segment",
            ));
        }

        if !self.conventions.marker_suffix.ends_with(".php") {
            return Err(Error::config_validation(
                "marker_suffix must name a .php file suffix",
            ));
        }

        for (label, value) in [
            ("command_base", &self.conventions.command_base),
            ("query_base", &self.conventions.query_base),
            ("event_base", &self.conventions.event_base),
            ("command_bus", &self.conventions.command_bus),
            ("query_bus", &self.conventions.query_bus),
            ("subscriber_attribute", &self.conventions.subscriber_attribute),
            ("module_base", &self.conventions.module_base),
        ] {
            if value.is_empty() {
                return Err(Error::config_validation(format!(
                    "{} must not be empty",
                    label
                )));
            }
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(Error::config_validation("output path must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.conventions.root_namespace, "App");
        assert_eq!(config.conventions.application_dir, "Application");
        assert_eq!(config.conventions.marker_suffix, "Extension.php");
        assert_eq!(config.output.path, PathBuf::from("arch.json"));
        assert!(!config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[project]
company = "acme"
name = "billing-api"

[conventions]
root_namespace = "Acme"
command_base = 'Acme\Kernel\Command'

[output]
path = "docs/arch.json"
pretty = true
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.project.name, "billing-api");
        assert_eq!(config.conventions.root_namespace, "Acme");
        assert_eq!(config.conventions.command_base, "Acme\\Kernel\\Command");
        // untouched sections keep their defaults
        assert_eq!(config.conventions.domain_dir, "Domain");
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/archdoc.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let config = Config::load_or_default(Path::new("/nonexistent/archdoc.toml"));
        assert_eq!(config.conventions.root_namespace, "App");
    }

    #[test]
    fn test_validation_empty_root_namespace() {
        let mut config = Config::default();
        config.conventions.root_namespace.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_multi_segment_root_namespace() {
        let mut config = Config::default();
        config.conventions.root_namespace = "App\\Billing".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_marker_suffix() {
        let mut config = Config::default();
        config.conventions.marker_suffix = "Extension".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_base_type() {
        let mut config = Config::default();
        config.conventions.event_base.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_cli() {
        let mut config = Config::default();
        config.merge_cli(Some(PathBuf::from("/custom/arch.json")), true);
        assert_eq!(config.output.path, PathBuf::from("/custom/arch.json"));
        assert!(config.output.pretty);
    }

    #[test]
    fn test_merge_cli_keeps_config_pretty() {
        let mut config = Config::default();
        config.output.pretty = true;
        config.merge_cli(None, false);
        assert!(config.output.pretty);
    }
}
