//! In-memory catalog implementing the ingestion contract.
//!
//! Creation is done in a fixed order:
//! - Store is created or fetched
//! - Main category is created or fetched
//! - Subcategory is created or fetched with the main category as parent
//! - Product is created or fetched under the subcategory
//! - SalesDetail is created or merged, keyed by (product, store)
//! - Reviews are attached to (product, store)
//!
//! For duplicate sales details, a cheaper duplicate updates the existing row;
//! an equal or more expensive one is discarded. The item is validated in full
//! before any row is touched, so an invalid item can never be half-ingested.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use pricelens_core::{fields, FieldValue, FinalizedItem};

use crate::error::IngestError;

#[derive(Debug, Clone)]
pub struct StoreRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    /// `None` for main categories; subcategories point at their parent.
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: i64,
    /// Subcategory the product lives under.
    pub category_id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub search_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SalesDetailRow {
    pub id: i64,
    pub product_id: i64,
    pub store_id: i64,
    pub price: Decimal,
    /// Offer link for the stored price; replaced together with the price
    /// when a cheaper duplicate wins.
    pub product_url: String,
    pub first_seen_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ReviewRow {
    pub id: i64,
    pub product_id: i64,
    pub store_id: i64,
    pub body: String,
}

/// What happened to the sales detail for an ingested item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesOutcome {
    /// First offer for this (product, store) pair.
    Created,
    /// Duplicate was cheaper; the existing row was updated.
    CheaperWins,
    /// Duplicate was equal or more expensive; the existing row was kept.
    KeptExisting,
}

#[derive(Debug, Clone, Copy)]
pub struct IngestOutcome {
    pub store_id: i64,
    pub product_id: i64,
    pub sales: SalesOutcome,
    pub reviews_added: usize,
}

/// An item's required fields, extracted and parsed up front so validation
/// completes before the catalog is mutated.
struct ValidatedItem<'a> {
    store: &'a str,
    main_category: &'a str,
    sub_category: &'a str,
    name: &'a str,
    brand: Option<&'a str>,
    price: Decimal,
    product_url: &'a str,
    search_url: Option<&'a str>,
    reviews: &'a [String],
}

impl<'a> ValidatedItem<'a> {
    fn from_item(item: &'a FinalizedItem) -> Result<Self, IngestError> {
        let price_raw = item.require_scalar(fields::PRICE)?;
        let price = price_raw
            .parse::<Decimal>()
            .map_err(|e| IngestError::InvalidPrice {
                value: price_raw.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            store: item.require_scalar(fields::STORE)?,
            main_category: item.require_scalar(fields::MAIN_CATEGORY)?,
            sub_category: item.require_scalar(fields::SUB_CATEGORY)?,
            name: item.require_scalar(fields::NAME)?,
            brand: item.scalar(fields::BRAND),
            price,
            product_url: item.require_scalar(fields::PRODUCT_URL)?,
            search_url: item.scalar(fields::SEARCH_URL),
            reviews: item
                .get(fields::REVIEWS)
                .and_then(FieldValue::as_many)
                .unwrap_or(&[]),
        })
    }
}

#[derive(Debug, Default)]
pub struct Catalog {
    next_id: i64,
    stores: Vec<StoreRow>,
    categories: Vec<CategoryRow>,
    products: Vec<ProductRow>,
    sales_details: Vec<SalesDetailRow>,
    reviews: Vec<ReviewRow>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests one finalized item in the fixed creation order.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::MissingField`] if a required field is absent
    /// and [`IngestError::InvalidPrice`] if the price does not parse as a
    /// decimal. Validation runs before any row is created or updated.
    pub fn ingest(&mut self, item: &FinalizedItem) -> Result<IngestOutcome, IngestError> {
        let validated = ValidatedItem::from_item(item)?;

        let store_id = self.get_or_create_store(validated.store);
        let main_id = self.get_or_create_category(validated.main_category, None);
        let sub_id = self.get_or_create_category(validated.sub_category, Some(main_id));
        let product_id = self.get_or_create_product(
            validated.name,
            sub_id,
            validated.brand,
            validated.search_url,
        );
        let sales = self.merge_sales_detail(
            product_id,
            store_id,
            validated.price,
            validated.product_url,
        );

        for body in validated.reviews {
            let id = self.next_id();
            self.reviews.push(ReviewRow {
                id,
                product_id,
                store_id,
                body: body.clone(),
            });
        }

        Ok(IngestOutcome {
            store_id,
            product_id,
            sales,
            reviews_added: validated.reviews.len(),
        })
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn get_or_create_store(&mut self, name: &str) -> i64 {
        if let Some(row) = self.stores.iter().find(|s| s.name == name) {
            return row.id;
        }
        let id = self.next_id();
        self.stores.push(StoreRow {
            id,
            name: name.to_owned(),
        });
        id
    }

    fn get_or_create_category(&mut self, name: &str, parent_id: Option<i64>) -> i64 {
        if let Some(row) = self
            .categories
            .iter()
            .find(|c| c.name == name && c.parent_id == parent_id)
        {
            return row.id;
        }
        let id = self.next_id();
        self.categories.push(CategoryRow {
            id,
            name: name.to_owned(),
            parent_id,
        });
        id
    }

    fn get_or_create_product(
        &mut self,
        name: &str,
        category_id: i64,
        brand: Option<&str>,
        search_url: Option<&str>,
    ) -> i64 {
        if let Some(row) = self
            .products
            .iter()
            .find(|p| p.name == name && p.category_id == category_id)
        {
            return row.id;
        }
        let id = self.next_id();
        self.products.push(ProductRow {
            id,
            category_id,
            name: name.to_owned(),
            brand: brand.map(str::to_owned),
            search_url: search_url.map(str::to_owned),
        });
        id
    }

    /// Creates the (product, store) sales detail, or merges a duplicate:
    /// the lower price wins, equal keeps the existing row untouched.
    fn merge_sales_detail(
        &mut self,
        product_id: i64,
        store_id: i64,
        price: Decimal,
        product_url: &str,
    ) -> SalesOutcome {
        if let Some(row) = self
            .sales_details
            .iter_mut()
            .find(|d| d.product_id == product_id && d.store_id == store_id)
        {
            if price < row.price {
                tracing::debug!(
                    product_id,
                    store_id,
                    old_price = %row.price,
                    new_price = %price,
                    "cheaper duplicate wins, updating sales detail"
                );
                row.price = price;
                row.product_url = product_url.to_owned();
                row.updated_at = Utc::now();
                return SalesOutcome::CheaperWins;
            }
            return SalesOutcome::KeptExisting;
        }

        let id = self.next_id();
        let now = Utc::now();
        self.sales_details.push(SalesDetailRow {
            id,
            product_id,
            store_id,
            price,
            product_url: product_url.to_owned(),
            first_seen_at: now,
            updated_at: now,
        });
        SalesOutcome::Created
    }

    /// The sales detail for a (product, store) pair, if one exists.
    #[must_use]
    pub fn sales_detail(&self, product_id: i64, store_id: i64) -> Option<&SalesDetailRow> {
        self.sales_details
            .iter()
            .find(|d| d.product_id == product_id && d.store_id == store_id)
    }

    #[must_use]
    pub fn stores(&self) -> &[StoreRow] {
        &self.stores
    }

    #[must_use]
    pub fn categories(&self) -> &[CategoryRow] {
        &self.categories
    }

    #[must_use]
    pub fn products(&self) -> &[ProductRow] {
        &self.products
    }

    #[must_use]
    pub fn sales_details(&self) -> &[SalesDetailRow] {
        &self.sales_details
    }

    #[must_use]
    pub fn reviews(&self) -> &[ReviewRow] {
        &self.reviews
    }
}
