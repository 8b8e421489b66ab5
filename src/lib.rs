pub mod archive;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod pricing;
