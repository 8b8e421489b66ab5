pub mod product;

pub use product::*;

// Display sentinels matching the chat front end's wording
pub const NAME_NOT_FOUND: &str = "Name not found";
pub const PRICE_NOT_FOUND: &str = "Price not found";
