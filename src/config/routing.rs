//! Routing configuration

use serde::{Deserialize, Serialize};

pub use crate::routing::CursorWrite;

/// Review routing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Whether a redirect waits for the rotation cursor write
    pub cursor_write: CursorWrite,
}
