use super::{NAME_NOT_FOUND, PRICE_NOT_FOUND};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An extracted price: the raw text as it appeared on the page plus the
/// normalized numeric amount. The amount is always parseable by construction;
/// candidates whose text does not normalize are dropped before a `Price` is
/// ever built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub raw: String,
    pub amount: f64,
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Best-effort extraction result. Each field is independently optional:
/// a found name with a missing price is a valid outcome the caller must
/// handle (e.g. by prompting for manual entry), not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: Option<String>,
    pub price: Option<Price>,
}

impl ProductInfo {
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.price.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }

    pub fn name_display(&self) -> &str {
        self.name.as_deref().unwrap_or(NAME_NOT_FOUND)
    }

    pub fn price_display(&self) -> String {
        match &self.price {
            Some(price) => price.raw.clone(),
            None => PRICE_NOT_FOUND.to_string(),
        }
    }
}

/// A fetched page: raw HTML plus the URL it came from. Ephemeral, one per
/// request, never persisted outside the optional archive dump.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub url: String,
    pub html: String,
}
