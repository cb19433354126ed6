//! Replay scenario files
//!
//! A scenario describes a row of sortable lists and a script of pointer
//! actions to run against them:
//!
//! ```toml
//! [[lists]]
//! name = "todo"
//! items = ["write", "review"]
//! sortable = { group = "board", animation = 0 }
//!
//! [[lists]]
//! name = "done"
//! width = 100.0
//! sortable = { group = "board", animation = 0 }
//!
//! [[steps]]
//! action = "down"
//! target = "write"
//! x = 10.0
//! y = 10.0
//!
//! [[steps]]
//! action = "move"
//! x = 150.0
//! y = 10.0
//!
//! [[steps]]
//! action = "up"
//! x = 150.0
//! y = 10.0
//! ```

use anyhow::{Context, Result};
use blinc_sortable::SortableConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level scenario file
#[derive(Debug, Deserialize, Serialize)]
pub struct Scenario {
    #[serde(default)]
    pub viewport: ViewportConfig,
    pub lists: Vec<ListConfig>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Document viewport
#[derive(Debug, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_viewport_width")]
    pub width: f32,
    #[serde(default = "default_viewport_height")]
    pub height: f32,
}

fn default_viewport_width() -> f32 {
    800.0
}

fn default_viewport_height() -> f32 {
    600.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
        }
    }
}

/// How a list lays out its items
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListLayout {
    /// Vertical stack
    #[default]
    Column,
    /// Wrapping rows of cards; needs `width`
    RowWrap,
    /// Vertical stack inside a scroll viewport; needs `width` and `height`
    Scroll,
}

/// One sortable list, placed left to right in declaration order
#[derive(Debug, Deserialize, Serialize)]
pub struct ListConfig {
    pub name: String,
    #[serde(default)]
    pub layout: ListLayout,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    /// Item labels, in initial order
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default = "default_item_width")]
    pub item_width: f32,
    #[serde(default = "default_item_height")]
    pub item_height: f32,
    #[serde(default)]
    pub sortable: SortableConfig,
}

fn default_item_width() -> f32 {
    100.0
}

fn default_item_height() -> f32 {
    40.0
}

/// A scripted pointer action
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    /// Press at a point. `target` names the pressed element; without it the
    /// element under the point is used.
    Down {
        x: f32,
        y: f32,
        #[serde(default)]
        target: Option<String>,
        #[serde(default)]
        button: u8,
    },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    /// Let time pass: animations settle and auto-scroll polls run
    Wait { ms: u64 },
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("No scenario found at {}", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<()> {
        for list in &self.lists {
            match list.layout {
                ListLayout::Column => {}
                ListLayout::RowWrap if list.width.is_none() => {
                    anyhow::bail!("List `{}` uses row-wrap layout without a width", list.name)
                }
                ListLayout::Scroll if list.width.is_none() || list.height.is_none() => {
                    anyhow::bail!("List `{}` scrolls without a width and height", list.name)
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_scenario() {
        let scenario = Scenario::from_toml_str(
            r#"
            [[lists]]
            name = "todo"
            items = ["a", "b"]

            [[steps]]
            action = "down"
            x = 10.0
            y = 10.0

            [[steps]]
            action = "wait"
            ms = 30
            "#,
        )
        .unwrap();

        assert_eq!(scenario.viewport.width, 800.0);
        assert_eq!(scenario.lists[0].layout, ListLayout::Column);
        assert_eq!(scenario.lists[0].item_height, 40.0);
        assert_eq!(scenario.lists[0].sortable, SortableConfig::default());
        assert_eq!(
            scenario.steps,
            vec![
                Step::Down {
                    x: 10.0,
                    y: 10.0,
                    target: None,
                    button: 0
                },
                Step::Wait { ms: 30 },
            ]
        );
    }

    #[test]
    fn test_parse_list_options() {
        let scenario = Scenario::from_toml_str(
            r#"
            [[lists]]
            name = "cards"
            layout = "row-wrap"
            width = 250.0
            sortable = { group = "board", threshold = 0.0 }
            "#,
        )
        .unwrap();

        let list = &scenario.lists[0];
        assert_eq!(list.layout, ListLayout::RowWrap);
        assert_eq!(list.sortable.group.as_deref(), Some("board"));
        assert_eq!(list.sortable.threshold, 0.0);
        assert!(scenario.steps.is_empty());
    }

    #[test]
    fn test_scroll_list_requires_viewport_size() {
        let err = Scenario::from_toml_str(
            r#"
            [[lists]]
            name = "feed"
            layout = "scroll"
            width = 300.0
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("feed"));
    }
}
