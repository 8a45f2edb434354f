pub mod client;
pub mod error;
pub mod http;
pub mod model;
pub mod repohost;
pub mod scrape;

pub use client::{Client, DEFAULT_BASE_URL};
pub use error::{ErrorList, NotFound};
pub use model::{
    Image, ImportedBy, Imports, License, Package, SearchResult, SearchResults, Version, Versions,
};
