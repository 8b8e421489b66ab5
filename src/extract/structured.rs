use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::debug;

use crate::extract::price::normalize_price;
use crate::extract::{clean_text, ExtractPass};
use crate::models::{Price, ProductInfo};

static LD_JSON_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#)
        .expect("Invalid ld+json selector")
});

/// Structured-data pass over `<script type="application/ld+json">` blocks.
///
/// Each block is parsed as JSON and searched recursively for an object that
/// carries both a name and a price. A candidate missing either field is
/// rejected outright rather than returned half-filled.
pub struct JsonLdPass;

impl ExtractPass for JsonLdPass {
    fn name(&self) -> &'static str {
        "json-ld"
    }

    fn try_extract(&self, html: &str) -> Option<ProductInfo> {
        let document = Html::parse_document(html);

        for script in document.select(&LD_JSON_SELECTOR) {
            let text = script.text().collect::<String>();
            let value = match serde_json::from_str::<Value>(&text) {
                Ok(value) => value,
                Err(e) => {
                    debug!("Discarding unparseable ld+json block: {}", e);
                    continue;
                }
            };

            if let Some((name, price)) = find_name_and_price(&value) {
                return Some(ProductInfo {
                    name: Some(name),
                    price: Some(price),
                });
            }
        }

        None
    }
}

/// Depth-first search for the first object yielding both fields. Objects are
/// visited in field order, then arrays element by element; the first complete
/// hit wins, with no ranking among later candidates. Field order here means
/// document order: serde_json's preserve_order feature keeps map iteration
/// in insertion order instead of sorting keys.
pub(crate) fn find_name_and_price(value: &Value) -> Option<(String, Price)> {
    match value {
        Value::Object(map) => {
            if let (Some(name), Some(price)) = (object_name(map), object_price(map)) {
                return Some((name, price));
            }
            map.values().find_map(find_name_and_price)
        }
        Value::Array(items) => items.iter().find_map(find_name_and_price),
        _ => None,
    }
}

fn object_name(map: &Map<String, Value>) -> Option<String> {
    map.get("name")
        .or_else(|| map.get("title"))
        .and_then(Value::as_str)
        .map(clean_text)
        .filter(|name| !name.is_empty())
}

fn object_price(map: &Map<String, Value>) -> Option<Price> {
    if let Some(price) = map.get("price").and_then(price_from_value) {
        return Some(price);
    }
    map.get("offers").and_then(nested_price)
}

// Price hiding under "offers": either an offer object or a list of them
fn nested_price(value: &Value) -> Option<Price> {
    match value {
        Value::Object(map) => object_price(map),
        Value::Array(items) => items.iter().find_map(nested_price),
        _ => None,
    }
}

fn price_from_value(value: &Value) -> Option<Price> {
    match value {
        Value::Number(n) => n.as_f64().map(|amount| Price {
            raw: n.to_string(),
            amount,
        }),
        Value::String(s) => normalize_price(s).map(|amount| Price {
            raw: s.trim().to_string(),
            amount,
        }),
        _ => None,
    }
}
