use crate::identity::DeviceRegistry;
use crate::types::DeviceId;

#[derive(serde::Deserialize, Debug)]
pub struct ApplicationConfig {
    pub feed: FeedConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub devices: std::collections::HashMap<String, DeviceId>,
}

impl ApplicationConfig {
    pub fn construct_from_path(
        path: &std::path::Path,
    ) -> Result<ApplicationConfig, errors::ApplicationConfigError> {
        let string =
            std::fs::read_to_string(path).map_err(|error| errors::ApplicationConfigError::Io {
                source: error,
                path: path.to_path_buf(),
            })?;

        toml::from_str(&string).map_err(|error| errors::ApplicationConfigError::Parse {
            source: error,
            path: path.to_path_buf(),
        })
    }

    #[must_use]
    pub fn device_registry(&self) -> DeviceRegistry {
        DeviceRegistry::new(self.devices.clone())
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct FeedConfig {
    pub host: String,
    pub port: u16,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct PipelineConfig {
    #[serde(default = "default_sink_period_millis")]
    pub sink_period_millis: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            sink_period_millis: default_sink_period_millis(),
        }
    }
}

fn default_sink_period_millis() -> u64 {
    500
}

pub mod errors {
    #[derive(Debug, thiserror::Error)]
    pub enum ApplicationConfigError {
        #[error("Failed to read config file '{}': {source}", path.display())]
        Io {
            source: std::io::Error,
            path: std::path::PathBuf,
        },
        #[error("Failed to parse config file '{}': {source}", path.display())]
        Parse {
            source: toml::de::Error,
            path: std::path::PathBuf,
        },
    }
}
