//! JSON rendering for pagination results.

use super::PaginationResult;
use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a pagination result to JSON.
pub fn to_json(result: &PaginationResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
        JsonFormat::Compact => serde_json::to_string(result),
    };

    json.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

impl PaginationResult {
    /// Convert this result to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(self, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentElement;
    use crate::paginate::Page;

    fn sample() -> PaginationResult {
        let mut page = Page::new(1);
        page.push(ContentElement::paragraph("p1", "Crown lifted to 5m."), 20.0);
        PaginationResult {
            pages: vec![page],
            page_heights: vec![20.0],
            break_positions: vec![1],
            ..Default::default()
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"pageHeights\""));
        assert!(json.contains("\"breakPositions\""));
        assert!(json.contains("Crown lifted"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = sample().to_json(JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains(r#""type":"paragraph""#));
    }

    #[test]
    fn test_json_round_trip() {
        let result = sample();
        let json = result.to_json(JsonFormat::Compact).unwrap();
        let back: PaginationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
