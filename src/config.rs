//! Module to instantiate streams from a configuration string.
//!
//! Configuration strings describe streams using the
//! [`toml`](https://toml.io/en/) format. Each description is a table
//! with an `id` field naming the stream kind; a stacked stream nests its
//! components as a `source` array of tables.
//!
//! ```
//! use bytestack::config::StreamConfig;
//! use bytestack::Stream;
//!
//! let config_str = "
//! id = 'StackConfig'
//!
//! [[source]]
//! id = 'MemoryConfig'
//! content = 'Hello, '
//!
//! [[source]]
//! id = 'MemoryConfig'
//! content = 'Besame Mucho'
//! ";
//! let mut stream = StreamConfig::from_string(config_str)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! assert_eq!(stream.contents().unwrap(), b"Hello, Besame Mucho");
//! ```

use crate::{FileStream, MemoryStream, StackedStream, Stream, StreamError, StreamResult};
use serde::Deserialize;

#[derive(Deserialize, Clone)]
struct MemoryConfig {
    #[allow(dead_code)]
    id: String,
    #[serde(default)]
    content: String,
}

#[derive(Deserialize, Clone)]
struct FileConfig {
    #[allow(dead_code)]
    id: String,
    path: String,
    #[serde(default)]
    create: bool,
}

enum ConfigKind {
    Memory(MemoryConfig),
    File(FileConfig),
    Stack(Vec<StreamConfig>),
}

/// Parsed description of a stream, ready to [`build()`](StreamConfig::build).
///
/// Recognized `id` values are `MemoryConfig` (optional `content`),
/// `FileConfig` (`path`, optional `create`) and `StackConfig`
/// (`source` array of nested descriptions).
pub struct StreamConfig {
    kind: ConfigKind,
}

impl StreamConfig {
    /// Parse a toml configuration string into a stream description.
    pub fn from_string(s: &str) -> StreamResult<Self> {
        let value: toml::Value = toml::from_str(s).map_err(|e| {
            StreamError::InvalidInput(format!("invalid stream configuration: {}", e))
        })?;
        Self::from_toml(&value)
    }

    fn from_toml(value: &toml::Value) -> StreamResult<Self> {
        let table = value.as_table().ok_or_else(|| {
            StreamError::InvalidInput(
                "stream configuration must be a table".to_string(),
            )
        })?;
        let id = table.get("id").and_then(|id| id.as_str()).ok_or_else(|| {
            StreamError::InvalidInput(
                "stream configuration must name an 'id'".to_string(),
            )
        })?;
        let kind = match id {
            "MemoryConfig" => ConfigKind::Memory(deserialize_table(value)?),
            "FileConfig" => ConfigKind::File(deserialize_table(value)?),
            "StackConfig" => {
                let sources = match table.get("source") {
                    Some(toml::Value::Array(sources)) => sources,
                    _ => {
                        return Err(StreamError::InvalidInput(
                            "'StackConfig' requires a 'source' array".to_string(),
                        ))
                    }
                };
                let mut configs = Vec::with_capacity(sources.len());
                for source in sources {
                    configs.push(Self::from_toml(source)?);
                }
                ConfigKind::Stack(configs)
            }
            unknown => {
                return Err(StreamError::InvalidInput(format!(
                    "unknown stream configuration id '{}'",
                    unknown
                )))
            }
        };
        Ok(StreamConfig { kind })
    }

    /// Build the configured stream.
    pub fn build(self) -> StreamResult<Box<dyn Stream>> {
        match self.kind {
            ConfigKind::Memory(config) => {
                Ok(Box::new(MemoryStream::with_content(config.content)))
            }
            ConfigKind::File(config) => {
                let stream = if config.create {
                    FileStream::create(&config.path)?
                } else {
                    FileStream::open(&config.path)?
                };
                Ok(Box::new(stream))
            }
            ConfigKind::Stack(configs) => {
                let mut stack = StackedStream::new();
                for config in configs {
                    stack.push(config.build()?)?;
                }
                Ok(Box::new(stack))
            }
        }
    }
}

fn deserialize_table<T>(value: &toml::Value) -> StreamResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    value.clone().try_into().map_err(|e| {
        StreamError::InvalidInput(format!("invalid stream configuration: {}", e))
    })
}
