//! TOML page layouts for the simulator
//!
//! ```toml
//! [viewport]
//! width = 1280
//! height = 800
//! scroll_height = 4000
//!
//! [[element]]
//! selector = "#list"
//! top = 200
//! height = 400
//! scroll_height = 1200
//!
//! [[element]]
//! selector = "#item-40"
//! parent = "#list"
//! top = 780
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use scrollto_core::memory::NodeId;
use scrollto_core::{BoxMetrics, MemoryDocument, Position};

#[derive(Debug, Clone, Deserialize)]
pub struct Layout {
    pub viewport: Viewport,
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Content width; defaults to the viewport width
    pub scroll_width: Option<f64>,
    /// Full document height
    pub scroll_height: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementSpec {
    pub selector: String,
    /// Selector of an earlier element this one is laid out inside
    pub parent: Option<String>,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    pub scroll_width: Option<f64>,
    pub scroll_height: Option<f64>,
}

impl ElementSpec {
    fn metrics(&self) -> BoxMetrics {
        BoxMetrics::new(
            self.width,
            self.height,
            self.scroll_width.unwrap_or(self.width),
            self.scroll_height.unwrap_or(self.height),
        )
    }
}

impl Layout {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid layout {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build the document. Parents must be declared before their children.
    pub fn build(&self) -> Result<MemoryDocument> {
        let viewport = &self.viewport;
        let doc = MemoryDocument::new(BoxMetrics::new(
            viewport.width,
            viewport.height,
            viewport.scroll_width.unwrap_or(viewport.width),
            viewport.scroll_height,
        ));

        let mut declared: HashMap<&str, NodeId> = HashMap::new();
        for element in &self.elements {
            let parent = match element.parent.as_deref() {
                Some(selector) => match declared.get(selector) {
                    Some(node) => Some(*node),
                    None => bail!(
                        "element {} is inside {} which is not declared before it",
                        element.selector,
                        selector
                    ),
                },
                None => None,
            };

            let node = doc.append(
                &element.selector,
                parent.as_ref(),
                Position::new(element.top, element.left),
                element.metrics(),
            );
            declared.entry(element.selector.as_str()).or_insert(node);
        }

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollto_core::position::cumulative_offset;
    use scrollto_core::{Axis, ScrollHost};

    const PAGE: &str = r##"
        [viewport]
        width = 1280
        height = 800
        scroll_height = 4000

        [[element]]
        selector = "#list"
        top = 200
        left = 40
        width = 300
        height = 400
        scroll_height = 1200

        [[element]]
        selector = "#item"
        parent = "#list"
        top = 780
    "##;

    #[test]
    fn test_build_nested_layout() {
        let doc = Layout::parse(PAGE).unwrap().build().unwrap();

        let list = doc.query_selector("#list").unwrap();
        let item = doc.query_selector("#item").unwrap();
        assert_eq!(doc.offset_parent(&item), Some(list));
        assert_eq!(cumulative_offset(&doc, &item), Position::new(980.0, 40.0));
        assert_eq!(doc.box_metrics(&list).max_scroll(Axis::Y), 800.0);
        assert_eq!(doc.box_metrics(&doc.body()).scroll_height, 4000.0);
    }

    #[test]
    fn test_parent_must_be_declared_first() {
        let layout = Layout::parse(
            r##"
            [viewport]
            width = 800
            height = 600
            scroll_height = 600

            [[element]]
            selector = "#child"
            parent = "#later"
            "##,
        )
        .unwrap();

        let err = layout.build().unwrap_err();
        assert!(err.to_string().contains("#later"));
    }

    #[test]
    fn test_missing_viewport_is_rejected() {
        assert!(Layout::parse("[[element]]\nselector = \"#a\"\n").is_err());
    }
}
