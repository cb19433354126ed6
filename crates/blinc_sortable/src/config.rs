//! Per-list configuration
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```toml
//! group = "kanban"
//! threshold = 8.0
//!
//! [classes]
//! placeholder = "card-ghost"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SortableError;

/// Marker class names applied while sorting
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SortableClasses {
    /// Added to every item of a list the placeholder visits
    pub item: String,
    /// Added to the dragged item while it marks the landing slot
    pub placeholder: String,
    /// Added to the floating drag proxy
    pub drag: String,
    /// Added to the document root for the duration of a drag
    pub drag_state: String,
    /// Added to every registered list root
    pub base: String,
    /// Grabs inside an element with this class never start a drag
    pub no_drag: String,
    /// Toggled on the item container while it has no items
    pub empty: String,
    /// Extra class for the drag proxy
    pub custom: Option<String>,
}

impl Default for SortableClasses {
    fn default() -> Self {
        Self {
            item: "blinc-sortable-item".to_string(),
            placeholder: "blinc-sortable-placeholder".to_string(),
            drag: "blinc-sortable-drag".to_string(),
            drag_state: "blinc-drag".to_string(),
            base: "blinc-sortable".to_string(),
            no_drag: "blinc-sortable-nodrag".to_string(),
            empty: "blinc-sortable-empty".to_string(),
            custom: None,
        }
    }
}

/// Configuration for one sortable list
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SortableConfig {
    /// Lists sharing a group exchange items. `None` keeps items in their list.
    pub group: Option<String>,
    /// Pointer travel in px, on either axis, before a press becomes a drag
    pub threshold: f32,
    /// Duration of insert/remove transitions in ms (0 disables them)
    pub animation: u64,
    /// Class a grab must be inside of; any part of an item when unset
    pub handle: Option<String>,
    pub classes: SortableClasses,
}

impl Default for SortableConfig {
    fn default() -> Self {
        Self {
            group: None,
            threshold: 5.0,
            animation: 150,
            handle: None,
            classes: SortableClasses::default(),
        }
    }
}

impl SortableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, SortableError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, SortableError> {
        let content = fs::read_to_string(path).map_err(|source| SortableError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_handle(mut self, class: impl Into<String>) -> Self {
        self.handle = Some(class.into());
        self
    }

    /// Set the transition duration in ms; 0 applies mutations instantly
    pub fn with_animation(mut self, millis: u64) -> Self {
        self.animation = millis;
        self
    }

    pub fn with_classes(mut self, classes: SortableClasses) -> Self {
        self.classes = classes;
        self
    }

    /// Transition duration for insert/remove, if animations are enabled
    pub fn transition(&self) -> Option<Duration> {
        (self.animation > 0).then(|| Duration::from_millis(self.animation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SortableConfig::default();
        assert_eq!(config.group, None);
        assert_eq!(config.threshold, 5.0);
        assert_eq!(config.transition(), Some(Duration::from_millis(150)));
        assert_eq!(config.classes.placeholder, "blinc-sortable-placeholder");
        assert_eq!(config.classes.custom, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SortableConfig::from_toml_str(
            r#"
            group = "kanban"
            threshold = 0.0
            animation = 0

            [classes]
            placeholder = "ghost"
            custom = "shadow"
            "#,
        )
        .unwrap();

        assert_eq!(config.group.as_deref(), Some("kanban"));
        assert_eq!(config.threshold, 0.0);
        assert_eq!(config.transition(), None);
        assert_eq!(config.classes.placeholder, "ghost");
        assert_eq!(config.classes.item, "blinc-sortable-item");
        assert_eq!(config.classes.custom.as_deref(), Some("shadow"));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = SortableConfig::from_toml_str("threshold = \"far\"").unwrap_err();
        assert!(matches!(err, SortableError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = SortableConfig::load(Path::new("/nonexistent/sortable.toml")).unwrap_err();
        assert!(matches!(err, SortableError::ConfigRead { .. }));
    }
}
