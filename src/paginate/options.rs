//! Pagination options and configuration.

use crate::error::{Error, Result};
use crate::model::ElementKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Options controlling how a document is broken into pages.
///
/// All heights are in pixels. Deserializes from camelCase JSON; missing
/// fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationConfig {
    /// Master switch; when off the whole document lands on one page
    pub enabled: bool,

    /// Break pages when content exceeds the page height
    pub automatic_detection: bool,

    /// Honor manual `PageBreak` elements
    pub manual_break_support: bool,

    /// Pull short paragraphs stranded at the top of a page back
    pub widow_control: bool,

    /// Push short paragraphs stranded at the bottom of a page forward
    pub orphan_control: bool,

    /// Lines below which a page-leading paragraph counts as a widow
    pub widow_line_count: u32,

    /// Lines below which a page-trailing paragraph counts as an orphan
    pub orphan_line_count: u32,

    /// Usable content height of a page
    pub max_content_height: f64,

    /// Splitting only applies to elements at least twice this tall
    pub min_content_height: f64,

    /// Passed through for exporters; break placement does not read it
    pub respect_element_boundaries: bool,

    /// Element kinds that must never be split
    pub avoid_breaking_inside: HashSet<ElementKind>,

    /// Height attributed to a page break element
    pub page_break_margin: f64,

    /// Typography paragraph spacing added to every element estimate
    pub paragraph_spacing: f64,

    /// Typography list item spacing; twice this is added to every element estimate
    pub list_item_spacing: f64,
}

impl PaginationConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Enable or disable pagination entirely.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Disable pagination (single-page passthrough).
    pub fn disabled(self) -> Self {
        self.with_enabled(false)
    }

    /// Enable or disable height-driven page breaks.
    pub fn with_automatic_detection(mut self, enabled: bool) -> Self {
        self.automatic_detection = enabled;
        self
    }

    /// Enable or disable manual page breaks.
    pub fn with_manual_breaks(mut self, enabled: bool) -> Self {
        self.manual_break_support = enabled;
        self
    }

    /// Enable or disable widow control.
    pub fn with_widow_control(mut self, enabled: bool) -> Self {
        self.widow_control = enabled;
        self
    }

    /// Enable or disable orphan control.
    pub fn with_orphan_control(mut self, enabled: bool) -> Self {
        self.orphan_control = enabled;
        self
    }

    /// Set the widow threshold in lines.
    pub fn with_widow_lines(mut self, lines: u32) -> Self {
        self.widow_line_count = lines;
        self
    }

    /// Set the orphan threshold in lines.
    pub fn with_orphan_lines(mut self, lines: u32) -> Self {
        self.orphan_line_count = lines;
        self
    }

    /// Set the usable page content height.
    pub fn with_max_content_height(mut self, height: f64) -> Self {
        self.max_content_height = height;
        self
    }

    /// Set the minimum content height used by the split threshold.
    pub fn with_min_content_height(mut self, height: f64) -> Self {
        self.min_content_height = height;
        self
    }

    /// Set whether exporters should respect element boundaries.
    pub fn with_respect_element_boundaries(mut self, respect: bool) -> Self {
        self.respect_element_boundaries = respect;
        self
    }

    /// Replace the set of kinds that must not be split.
    pub fn with_avoid_breaking_inside(mut self, kinds: impl IntoIterator<Item = ElementKind>) -> Self {
        self.avoid_breaking_inside = kinds.into_iter().collect();
        self
    }

    /// Set the height of a page break element.
    pub fn with_page_break_margin(mut self, margin: f64) -> Self {
        self.page_break_margin = margin;
        self
    }

    /// Set typography spacing inputs.
    pub fn with_spacing(mut self, paragraph_spacing: f64, list_item_spacing: f64) -> Self {
        self.paragraph_spacing = paragraph_spacing;
        self.list_item_spacing = list_item_spacing;
        self
    }

    /// Check that every height is finite and usable.
    pub fn validate(&self) -> Result<()> {
        if !self.max_content_height.is_finite() || self.max_content_height <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "maxContentHeight must be a positive number, got {}",
                self.max_content_height
            )));
        }

        let non_negative = [
            ("minContentHeight", self.min_content_height),
            ("pageBreakMargin", self.page_break_margin),
            ("paragraphSpacing", self.paragraph_spacing),
            ("listItemSpacing", self.list_item_spacing),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Whether elements of `kind` must stay whole.
    pub fn avoids_breaking_inside(&self, kind: ElementKind) -> bool {
        self.avoid_breaking_inside.contains(&kind)
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            automatic_detection: true,
            manual_break_support: true,
            widow_control: true,
            orphan_control: true,
            widow_line_count: 2,
            orphan_line_count: 2,
            max_content_height: 1000.0,
            min_content_height: 100.0,
            respect_element_boundaries: true,
            avoid_breaking_inside: [ElementKind::Table, ElementKind::Image, ElementKind::Code]
                .into_iter()
                .collect(),
            page_break_margin: 20.0,
            paragraph_spacing: 0.0,
            list_item_spacing: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PaginationConfig::default();
        assert!(config.enabled);
        assert_eq!(config.widow_line_count, 2);
        assert_eq!(config.orphan_line_count, 2);
        assert_eq!(config.max_content_height, 1000.0);
        assert_eq!(config.min_content_height, 100.0);
        assert_eq!(config.page_break_margin, 20.0);
        assert!(config.avoids_breaking_inside(ElementKind::Table));
        assert!(config.avoids_breaking_inside(ElementKind::Image));
        assert!(config.avoids_breaking_inside(ElementKind::Code));
        assert!(!config.avoids_breaking_inside(ElementKind::Paragraph));
    }

    #[test]
    fn test_builder_chained() {
        let config = PaginationConfig::new()
            .with_max_content_height(500.0)
            .with_widow_control(false)
            .with_orphan_lines(3)
            .with_spacing(8.0, 4.0)
            .with_avoid_breaking_inside([ElementKind::Quote]);

        assert_eq!(config.max_content_height, 500.0);
        assert!(!config.widow_control);
        assert_eq!(config.orphan_line_count, 3);
        assert_eq!(config.paragraph_spacing, 8.0);
        assert_eq!(config.list_item_spacing, 4.0);
        assert!(config.avoids_breaking_inside(ElementKind::Quote));
        assert!(!config.avoids_breaking_inside(ElementKind::Table));
    }

    #[test]
    fn test_from_json_partial() {
        let config = PaginationConfig::from_json(
            r#"{"maxContentHeight": 750, "widowControl": false, "avoidBreakingInside": ["table"]}"#,
        )
        .unwrap();
        assert_eq!(config.max_content_height, 750.0);
        assert!(!config.widow_control);
        assert!(config.orphan_control);
        assert_eq!(config.avoid_breaking_inside.len(), 1);
        assert_eq!(config.page_break_margin, 20.0);
    }

    #[test]
    fn test_validate() {
        assert!(PaginationConfig::default().validate().is_ok());
        assert!(PaginationConfig::default()
            .with_max_content_height(0.0)
            .validate()
            .is_err());
        assert!(PaginationConfig::default()
            .with_max_content_height(f64::INFINITY)
            .validate()
            .is_err());
        assert!(PaginationConfig::default()
            .with_spacing(-1.0, 0.0)
            .validate()
            .is_err());
    }
}
