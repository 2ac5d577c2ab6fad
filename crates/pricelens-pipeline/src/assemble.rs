//! Assembly of a [`FinalizedItem`] from a [`RawRecord`].
//!
//! Fields are processed in the order they were collected during extraction,
//! each reduced through the rule table; derived fields (`search_url`, the
//! absolute `product_url`) are computed strictly afterwards. One call, one
//! record, no state retained between invocations.

use pricelens_core::{fields, FieldValue, FinalizedItem, RawRecord, SiteConfig};

use crate::category::split_category_path;
use crate::encode::{encode_path, quote_plus, resolve};
use crate::error::PipelineError;
use crate::normalize::normalize_field;
use crate::rules::{FieldRule, RuleTable};

pub struct ItemAssembler<'a> {
    site: &'a SiteConfig,
    rules: &'a RuleTable,
}

impl<'a> ItemAssembler<'a> {
    #[must_use]
    pub fn new(site: &'a SiteConfig, rules: &'a RuleTable) -> Self {
        Self { site, rules }
    }

    /// Populates a finalized item from the data collected so far and returns
    /// it. Raw fields pass through their output rules first; `search_url` and
    /// the absolute `product_url` are derived from the normalized values.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingField`] when `brand`, `name`, or
    /// `product_url` is absent at derivation time — the item is rejected
    /// whole, never emitted partially derived. Returns
    /// [`PipelineError::MalformedCategoryPath`] for an unsplittable category
    /// path.
    pub fn load_item(&self, record: &RawRecord) -> Result<FinalizedItem, PipelineError> {
        let mut item = FinalizedItem::new();

        for field in record.field_order() {
            // Write-only derived field; never read as raw input even when an
            // upstream extractor mistakenly populates it.
            if field == fields::SEARCH_URL {
                tracing::debug!(%field, "ignoring reserved derived field in raw record");
                continue;
            }

            if field == fields::CATEGORY_PATH {
                self.load_categories(&mut item, record.values(field))?;
                continue;
            }

            if let Some(value) = normalize_field(self.rules.rule(field), record.values(field)) {
                item.insert(field, value);
            }
        }

        self.derive_urls(&mut item)?;

        Ok(item)
    }

    /// Reduces the combined category path and stores its `(main, sub)` split.
    /// The combined path itself is not kept on the item.
    fn load_categories(
        &self,
        item: &mut FinalizedItem,
        values: &[String],
    ) -> Result<(), PipelineError> {
        let Some(FieldValue::Scalar(path)) = normalize_field(FieldRule::TakeFirst, values) else {
            return Ok(());
        };

        let (main, sub) = split_category_path(&path, self.site.category_separator)?;
        item.insert(fields::MAIN_CATEGORY, FieldValue::Scalar(main));
        item.insert(fields::SUB_CATEGORY, FieldValue::Scalar(sub));
        Ok(())
    }

    fn derive_urls(&self, item: &mut FinalizedItem) -> Result<(), PipelineError> {
        let brand = item.require_scalar(fields::BRAND)?.to_lowercase();
        let name = item.require_scalar(fields::NAME)?.to_lowercase();
        let search_path = format!("/{}/{}/", quote_plus(&brand), quote_plus(&name));
        let search_url = resolve(&self.site.base_url, &search_path);

        let raw_product_url = item.require_scalar(fields::PRODUCT_URL)?;
        let product_url = resolve(&self.site.base_url, &encode_path(raw_product_url));

        item.insert(fields::SEARCH_URL, FieldValue::Scalar(search_url));
        item.insert(fields::PRODUCT_URL, FieldValue::Scalar(product_url));
        Ok(())
    }
}
