/// All error types that can occur while driving a MIoT light.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The light was asked to turn on before a send-mode handle was bound to it.
    #[error("light {unique_id} has no command send mode bound for device {device_id}")]
    SendModeUnbound {
        unique_id: String,
        device_id: String,
    },

    /// The property transport rejected a write.
    #[error("failed to set property {property}: {reason}")]
    Transport { property: String, reason: String },

    /// Failed to deserialize device metadata.
    #[error("failed to load json: {0:?}")]
    JsonLoad(serde_json::Error),

    /// A `value-range` did not have the `[min, max, step]` shape.
    #[error("invalid value range {0:?}; expected [min, max, step]")]
    InvalidValueRange(Vec<i64>),

    /// Failed to parse a [`crate::Color`] from a string.
    #[error("invalid color string: {0}")]
    InvalidColorString(String),
}

impl Error {
    /// Create a new transport error
    pub fn transport(property: &str, reason: &str) -> Self {
        Error::Transport {
            property: property.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a new unbound send mode error
    pub fn send_mode_unbound(unique_id: &str, device_id: &str) -> Self {
        Error::SendModeUnbound {
            unique_id: unique_id.to_string(),
            device_id: device_id.to_string(),
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
