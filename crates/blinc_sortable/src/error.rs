//! Sortable errors
//!
//! Drag-time conditions (no owner under the pointer, a transition still
//! running, a no-op insertion) are not errors; they skip the current event.
//! Only configuration loading and lookups by stale ids can fail.

use std::path::PathBuf;

use thiserror::Error;

use crate::registry::ControllerId;

#[derive(Debug, Error)]
pub enum SortableError {
    #[error("failed to read sortable config {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse sortable config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("unknown sortable controller {0:?}")]
    UnknownController(ControllerId),
}
