//! Model loading functionality
//!
//! Reads a serialized MIM source model from disk or memory and maps it into
//! a target model.

use crate::mapping::{MapperConfig, MappingError, ModelMapper};
use crate::models::{Model, ValueTypeRegistry};
use crate::source::SourceModel;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Errors raised while loading a model
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} source model: {message}")]
    Parse { format: SourceFormat, message: String },

    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Serialization format of a source model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| LoadError::UnsupportedFormat(path.display().to_string()))?;
        extension.parse()
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Json => write!(f, "json"),
            SourceFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for SourceFormat {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(SourceFormat::Json),
            "yaml" | "yml" => Ok(SourceFormat::Yaml),
            _ => Err(LoadError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Loads target models registered under a profile key
pub trait ModelLoader {
    /// Profile key this loader is registered under
    fn profile(&self) -> &str;

    /// Load the model at `path`, naming it `alias`
    fn load(&self, alias: &str, path: &Path) -> Result<Model, LoadError>;
}

/// Loader for serialized MIM information models
#[derive(Debug, Clone)]
pub struct MimModelLoader {
    config: MapperConfig,
    registry: ValueTypeRegistry,
}

impl Default for MimModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MimModelLoader {
    pub const PROFILE: &'static str = "mim";

    pub fn new() -> Self {
        Self {
            config: MapperConfig::default(),
            registry: ValueTypeRegistry::with_defaults(),
        }
    }

    pub fn with_config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_registry(mut self, registry: ValueTypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Parse a source model without mapping it
    pub fn parse(content: &str, format: SourceFormat) -> Result<SourceModel, LoadError> {
        let parsed = match format {
            SourceFormat::Json => SourceModel::from_json(content).map_err(|e| e.to_string()),
            SourceFormat::Yaml => SourceModel::from_yaml(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| LoadError::Parse { format, message })
    }

    /// Load a model from in-memory content
    pub fn load_str(
        &self,
        alias: &str,
        content: &str,
        format: SourceFormat,
    ) -> Result<Model, LoadError> {
        let source = Self::parse(content, format)?;
        let mapper = ModelMapper::with_config(self.registry.clone(), self.config.clone());
        let model = mapper.map_model(&source, Some(alias))?;
        info!(
            "Loaded model '{}' as '{}' with {} object types",
            source.name,
            alias,
            model.len()
        );
        Ok(model)
    }
}

impl ModelLoader for MimModelLoader {
    fn profile(&self) -> &str {
        Self::PROFILE
    }

    fn load(&self, alias: &str, path: &Path) -> Result<Model, LoadError> {
        let format = SourceFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(alias, &content, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
name: Winkel
packages:
  - name: Fietsen
    objectTypes:
      - name: Fiets
        attributes:
          - name: framenummer
            identifier: true
            occurrence: 1
            datatype: CharacterString
"#;

    #[test]
    fn test_format_detection() {
        assert_eq!(SourceFormat::from_path(Path::new("a.json")).unwrap(), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("a.YML")).unwrap(), SourceFormat::Yaml);
        assert!(matches!(
            SourceFormat::from_path(Path::new("a.xmi")),
            Err(LoadError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            SourceFormat::from_path(Path::new("model")),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_str() {
        let loader = MimModelLoader::new();
        assert_eq!(loader.profile(), "mim");

        let model = loader.load_str("winkel", YAML, SourceFormat::Yaml).unwrap();
        assert_eq!(model.alias(), Some("winkel"));
        let attribute = model.object_type("Fiets").unwrap().attribute("framenummer").unwrap();
        assert!(attribute.identifier);
    }

    #[test]
    fn test_parse_error() {
        let err = MimModelLoader::new()
            .load_str("winkel", "{ not json", SourceFormat::Json)
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse { format: SourceFormat::Json, .. }));
    }
}
