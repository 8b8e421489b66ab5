pub mod heuristic;
pub mod inline_json;
pub mod price;
pub mod structured;

pub use heuristic::HeuristicPass;
pub use inline_json::InlineJsonPass;
pub use structured::JsonLdPass;

use html_escape::decode_html_entities;
use tracing::debug;

use crate::models::ProductInfo;

/// Clean and normalize text by collapsing whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// One extraction attempt over raw HTML. Passes are pure and synchronous;
/// returning `None` means "this strategy found nothing", never a failure.
pub trait ExtractPass: Send + Sync {
    fn name(&self) -> &'static str;
    fn try_extract(&self, html: &str) -> Option<ProductInfo>;
}

/// Ordered chain of extraction strategies: JSON-LD first, then the inline
/// brace scan, then the visual heuristics. The first pass that produces a
/// result short-circuits the rest; when every pass comes up empty the
/// outcome is the "not found" sentinel, never an error.
pub struct Extractor {
    passes: Vec<Box<dyn ExtractPass>>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            passes: vec![
                Box::new(JsonLdPass),
                Box::new(InlineJsonPass),
                Box::new(HeuristicPass),
            ],
        }
    }

    pub fn extract(&self, html: &str) -> ProductInfo {
        for pass in &self.passes {
            if let Some(info) = pass.try_extract(html) {
                debug!("Pass '{}' produced a result", pass.name());
                return info;
            }
            debug!("Pass '{}' found nothing", pass.name());
        }

        ProductInfo::not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn structured_data_bypasses_heuristics() {
        // The heuristic pass would find the h1/span pair; JSON-LD must win
        let html = r#"<html><head>
            <script type="application/ld+json">{"name": "Structured Name", "price": "55.00"}</script>
            </head><body><h1>Visible Name</h1><span>$99.99</span></body></html>"#;

        let info = Extractor::new().extract(html);
        assert_eq!(info.name.as_deref(), Some("Structured Name"));
        assert_eq!(info.price.as_ref().unwrap().amount, 55.00);
    }

    #[test]
    fn inline_json_outranks_heuristics() {
        let html = r#"<html><script>var p = {"title": "Inline Name", "price": "12.00"};</script>
            <h1>Visible Name</h1></html>"#;

        let info = Extractor::new().extract(html);
        assert_eq!(info.name.as_deref(), Some("Inline Name"));
    }

    #[test]
    fn incomplete_structured_data_falls_back_to_heuristics() {
        // The inline object has a price but no name, so it is rejected whole
        let html = r#"<html><script>var p = {"price": "12.00"};</script>
            <h1>Visible Name</h1><span>$34.50</span></html>"#;

        let info = Extractor::new().extract(html);
        assert_eq!(info.name.as_deref(), Some("Visible Name"));
        assert_eq!(info.price.as_ref().unwrap().raw, "$34.50");
    }

    #[test]
    fn unrecognizable_page_returns_not_found() {
        let info = Extractor::new().extract("<html><p>nothing to see</p></html>");
        assert_eq!(info, ProductInfo::not_found());
    }

    #[test]
    fn extract_never_panics_on_garbage_input() {
        let extractor = Extractor::new();
        for html in ["", "{{{{", "<<<>>>", "\u{0}\u{1}", "«€»{]"] {
            let _ = extractor.extract(html);
        }
    }

    #[test]
    fn clean_text_collapses_whitespace_and_entities() {
        assert_eq!(clean_text("  Product\n &amp;  Name "), "Product & Name");
    }
}
