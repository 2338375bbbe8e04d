use hashlink::LinkedHashMap;
use saphyr::{Scalar, Yaml};
use tracing::warn;

/// Node to create before the first command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedEntry {
    File {
        name: String,
        content: String,
    },
    Directory {
        name: String,
        children: Vec<SeedEntry>,
    },
}

impl SeedEntry {
    pub fn name(&self) -> &str {
        match self {
            SeedEntry::File { name, .. } | SeedEntry::Directory { name, .. } => name,
        }
    }

    /// Mapping values become directories, strings become files with that
    /// content and nulls become empty files. Anything else is skipped.
    pub fn from_yaml_mapping(mapping: &LinkedHashMap<Yaml, Yaml>) -> Vec<Self> {
        mapping
            .iter()
            .filter_map(|(key, value)| {
                let Some(name) = key.as_str() else {
                    warn!("Skipping seed entry with a non-string name: {:?}", key);
                    return None;
                };
                Self::from_yaml_value(name, value)
            })
            .collect()
    }

    fn from_yaml_value(name: &str, value: &Yaml) -> Option<Self> {
        match value {
            Yaml::Mapping(children) => Some(SeedEntry::Directory {
                name: name.to_string(),
                children: Self::from_yaml_mapping(children),
            }),
            Yaml::Value(Scalar::String(content)) => Some(SeedEntry::File {
                name: name.to_string(),
                content: content.to_string(),
            }),
            Yaml::Value(Scalar::Null) => Some(SeedEntry::File {
                name: name.to_string(),
                content: String::new(),
            }),
            _ => {
                warn!("Skipping seed entry '{}' with unsupported value: {:?}", name, value);
                None
            }
        }
    }
}
