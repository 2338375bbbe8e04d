use std::borrow::Cow;
use std::path::Path;
use std::string::FromUtf8Error;

use clap::ValueEnum;
use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::data::ColorChoice;
use crate::config::SeedEntry;

pub const CONFIG_FILE_NAME: &str = "arbor.yaml";
pub const DEFAULT_PROMPT: &str = "> ";
pub const DEFAULT_BANNER: &str = "Welcome to the simple file system. Type 'exit' to quit.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub banner: String,
    pub color: ColorChoice,
    pub tree: Vec<SeedEntry>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            banner: DEFAULT_BANNER.to_string(),
            color: ColorChoice::default(),
            tree: Vec::new(),
        }
    }
}

impl ShellConfig {
    /// Reads the explicitly given file, or `arbor.yaml` in the working
    /// directory when it exists, or falls back to defaults.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, ConfigCreationError> {
        match explicit {
            Some(path) => Self::from_path(path).await,
            None => Self::from_path_if_present(Path::new(CONFIG_FILE_NAME)).await,
        }
    }

    /// Like [`Self::from_path`], but a missing file yields the defaults.
    async fn from_path_if_present(path: &Path) -> Result<Self, ConfigCreationError> {
        let present = fs::metadata(path)
            .await
            .is_ok_and(|metadata| metadata.is_file());
        if present {
            Self::from_path(path).await
        } else {
            info!("No {} found, using default configuration", path.display());
            Ok(Self::default())
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, ConfigCreationError> {
        debug!("Reading config file: {}", path.display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.display().to_string(),
        })?;
        debug!("Successfully read config file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.display().to_string(),
        })?;
        contents.as_str().try_into()
    }

    /// Reads an optional string entry, failing with `error` when the entry has another shape.
    fn string_value(
        top_level: &LinkedHashMap<Yaml, Yaml>,
        key: &'static str,
        error: ConfigCreationError,
    ) -> Result<Option<String>, ConfigCreationError> {
        match top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed(key)))) {
            Some(value) => value.as_str().map(|s| Some(s.to_string())).ok_or(error),
            None => Ok(None),
        }
    }
}

impl TryFrom<&str> for ShellConfig {
    type Error = ConfigCreationError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let Some(document) = documents.first() else {
            debug!("Config file is empty, using defaults");
            return Ok(Self::default());
        };

        let top_level = document
            .as_mapping()
            .ok_or(ConfigCreationError::TopLevelNotMap)?;

        let mut config = Self::default();

        if let Some(prompt) =
            Self::string_value(top_level, "prompt", ConfigCreationError::PromptNotString)?
        {
            config.prompt = prompt;
        }

        if let Some(banner) =
            Self::string_value(top_level, "banner", ConfigCreationError::BannerNotString)?
        {
            config.banner = banner;
        }

        if let Some(color) =
            Self::string_value(top_level, "color", ConfigCreationError::ColorNotString)?
        {
            config.color = ColorChoice::from_str(&color, true)
                .map_err(|_| ConfigCreationError::UnknownColor { value: color })?;
        }

        if let Some(tree) = top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed("tree")))) {
            let tree = tree
                .as_mapping()
                .ok_or(ConfigCreationError::TreeNotMap)?;
            config.tree = SeedEntry::from_yaml_mapping(tree);
        }

        Ok(config)
    }
}

#[derive(Debug, Snafu)]
pub enum ConfigCreationError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Config file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("'prompt' should be a string"))]
    PromptNotString,
    #[snafu(display("'banner' should be a string"))]
    BannerNotString,
    #[snafu(display("'color' should be a string"))]
    ColorNotString,
    #[snafu(display("Unknown color choice '{}', expected auto, always or never", value))]
    UnknownColor { value: String },
    #[snafu(display("'tree' section should be a map"))]
    TreeNotMap,
}
