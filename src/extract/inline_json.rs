use serde_json::Value;
use tracing::debug;

use crate::extract::structured::find_name_and_price;
use crate::extract::ExtractPass;
use crate::models::ProductInfo;

// Most spans are script fragments, not JSON; cap the parse attempts so a
// brace-heavy page cannot turn into a serde_json stress test.
const MAX_CANDIDATES: usize = 2048;

/// Last-resort structured pass: scan the raw HTML for balanced `{...}` spans
/// and try to parse each as JSON. The scanner is string- and escape-aware, so
/// braces inside JSON string literals do not break the pairing, but it is
/// still approximate: most captured spans are JavaScript, not data, and are
/// expected to fail the parse. Failures are discarded silently.
pub struct InlineJsonPass;

impl ExtractPass for InlineJsonPass {
    fn name(&self) -> &'static str {
        "inline-json"
    }

    fn try_extract(&self, html: &str) -> Option<ProductInfo> {
        for value in json_candidates(html) {
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

/// All balanced brace spans that parse as JSON, in document order
/// (outer spans before the spans nested inside them).
pub fn json_candidates(html: &str) -> Vec<Value> {
    let mut candidates = Vec::new();
    let mut attempts = 0;

    for (start, end) in balanced_spans(html) {
        if attempts >= MAX_CANDIDATES {
            break;
        }
        attempts += 1;

        match serde_json::from_str::<Value>(&html[start..end]) {
            Ok(value) => candidates.push(value),
            Err(e) => debug!("Discarding inline brace span at {}: {}", start, e),
        }
    }

    candidates
}

/// Byte ranges of every balanced `{...}` pair. String literals are tracked
/// while inside a span so that `"}"` content does not close a brace; spans
/// left unclosed at end of input are dropped.
fn balanced_spans(html: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut stack: Vec<usize> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in html.char_indices() {
        if stack.is_empty() {
            if c == '{' {
                stack.push(i);
                in_string = false;
                escaped = false;
            }
            continue;
        }

        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => stack.push(i),
            '}' => {
                let start = stack.pop().expect("stack checked non-empty");
                spans.push((start, i + 1));
            }
            _ => {}
        }
    }

    // Pops record inner spans first; candidates are consumed outermost-first
    spans.sort_by_key(|&(start, _)| start);
    spans
}
