//! Canonical field names shared by the pipeline and the catalog.
//!
//! Raw scrape records key their values by these names; the assembler and the
//! ingestion catalog agree on them so a finalized item needs no schema beyond
//! the field map itself.

pub const NAME: &str = "name";
pub const BRAND: &str = "brand";
pub const PRICE: &str = "price";
pub const STORE: &str = "store";
pub const PRODUCT_URL: &str = "product_url";
/// Write-only derived field. Never read as a raw input, even if an upstream
/// extractor mistakenly populates it.
pub const SEARCH_URL: &str = "search_url";
/// Combined `"<main>/<sub>"` path as scraped; split before storage.
pub const CATEGORY_PATH: &str = "category_path";
pub const MAIN_CATEGORY: &str = "main_category";
pub const SUB_CATEGORY: &str = "sub_category";
/// Multi-valued; kept as the full ordered sequence of collected entries.
pub const REVIEWS: &str = "reviews";
