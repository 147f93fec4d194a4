use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickerError {
    /// A page fixture, script or config file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Page fixture or notification payload was not valid JSON
    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing engine state for output failed
    #[error("JSON serialize error ({context}): {source}")]
    JsonSerialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Gesture script or config was not valid YAML
    #[error("YAML parse error ({context}): {source}")]
    YamlParse {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Selection mode string did not name a known mode
    #[error("Unknown selection mode '{0}' (expected single, multiple, area or smart)")]
    UnknownMode(String),

    /// A script referenced a page node that does not exist
    #[error("Node '{selector}' not found: {context}")]
    NodeNotFound { selector: String, context: String },

    /// Page fixture had an unusable structure
    #[error("Unexpected page structure: {0}")]
    PageStructure(String),
}

impl PickerError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        PickerError::Io {
            path: path.into(),
            source,
        }
    }
}
