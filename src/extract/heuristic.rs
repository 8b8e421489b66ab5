use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::extract::price::{find_price_snippet, normalize_price};
use crate::extract::{clean_text, ExtractPass};
use crate::models::{Price, ProductInfo};

static ANY_ELEMENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("*").expect("Invalid wildcard selector"));

// Attributes a rule pattern is matched against
const MATCHED_ATTRS: &[&str] = &["class", "property", "name", "itemprop", "id"];

/// A single heuristic rule: a tag name (or any tag) plus either an attribute
/// pattern or an inner-text pattern. Rules are tried strictly in list order
/// and only the first matching element of a rule is considered; an element
/// with unusable text fails the whole rule, not just that element.
struct Rule {
    tag: Option<&'static str>,
    attr_pattern: Option<Regex>,
    text_pattern: Option<Regex>,
}

impl Rule {
    fn attr(tag: Option<&'static str>, pattern: &str) -> Self {
        Self {
            tag,
            attr_pattern: Some(Regex::new(pattern).expect("Invalid attr pattern")),
            text_pattern: None,
        }
    }

    fn tag(tag: &'static str) -> Self {
        Self {
            tag: Some(tag),
            attr_pattern: None,
            text_pattern: None,
        }
    }

    fn text(tag: Option<&'static str>, pattern: &str) -> Self {
        Self {
            tag,
            attr_pattern: None,
            text_pattern: Some(Regex::new(pattern).expect("Invalid text pattern")),
        }
    }

    fn matches(&self, element: &ElementRef) -> bool {
        if let Some(tag) = self.tag {
            if element.value().name() != tag {
                return false;
            }
        }
        if let Some(pattern) = &self.attr_pattern {
            let hit = MATCHED_ATTRS.iter().any(|attr| {
                element
                    .value()
                    .attr(attr)
                    .is_some_and(|value| pattern.is_match(value))
            });
            if !hit {
                return false;
            }
        }
        if let Some(pattern) = &self.text_pattern {
            let text = element.text().collect::<String>();
            if !pattern.is_match(&text) {
                return false;
            }
        }
        true
    }

    /// Text of the first matching element: `content` for meta tags,
    /// cleaned inner text for everything else.
    fn first_candidate(&self, document: &Html) -> Option<String> {
        let element = document
            .select(&ANY_ELEMENT)
            .find(|el| self.matches(el))?;

        if element.value().name() == "meta" {
            element.value().attr("content").map(clean_text)
        } else {
            Some(clean_text(&element.text().collect::<String>()))
        }
    }
}

static NAME_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::attr(Some("meta"), r"(?i)og:title"),
        Rule::tag("h1"),
        Rule::attr(None, r"(?i)product.*(name|title)"),
    ]
});

static PRICE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::attr(Some("meta"), r"(?i)(product|og):price"),
        Rule::attr(None, r"(?i)product.*price"),
        Rule::attr(Some("span"), r"(?i)(^|[\s_-])price"),
        Rule::text(Some("span"), r"[£$€¥₹₽]"),
    ]
});

/// Guess-based fallback pass over visible markup. Name and price resolve
/// independently through their own rule lists, so a partial result (name
/// without price, or the reverse) is a valid outcome here.
pub struct HeuristicPass;

impl ExtractPass for HeuristicPass {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn try_extract(&self, html: &str) -> Option<ProductInfo> {
        let document = Html::parse_document(html);

        let name = NAME_RULES
            .iter()
            .filter_map(|rule| rule.first_candidate(&document))
            .find(|text| !text.is_empty());

        let price = PRICE_RULES
            .iter()
            .filter_map(|rule| rule.first_candidate(&document))
            .find_map(|text| price_from_text(&text));

        if name.is_none() && price.is_none() {
            return None;
        }

        Some(ProductInfo { name, price })
    }
}

fn price_from_text(text: &str) -> Option<Price> {
    // Prefer the currency-tagged snippet; fall back to the bare text for
    // markup like <meta property="product:price:amount" content="128.00">
    let raw = find_price_snippet(text).unwrap_or_else(|| text.to_string());
    normalize_price(&raw).map(|amount| Price { raw, amount })
}
