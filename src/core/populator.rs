use crate::core::catalog::fetch_catalog;
use crate::dom::{Document, NodeId, Selector};
use crate::domain::model::{Anchor, AnchorPolicy, PopulateReport, Product};
use crate::domain::ports::{CatalogSource, ConfigProvider, FiltersInstance, ListInstance};
use crate::template::{FilterTemplate, ItemTemplate, MarkerConfig, ProductFormat};
use crate::utils::error::{PopulateError, Result};
use std::collections::HashSet;

/// Replaces a list's placeholder items with fetched products and builds one
/// category filter per distinct category.
pub struct CatalogPopulator<S: CatalogSource> {
    source: S,
    format: ProductFormat,
    markers: MarkerConfig,
    anchor_policy: AnchorPolicy,
}

impl<S: CatalogSource> CatalogPopulator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            format: ProductFormat::default(),
            markers: MarkerConfig::default(),
            anchor_policy: AnchorPolicy::default(),
        }
    }

    pub fn from_config<C: ConfigProvider>(source: S, config: &C) -> Self {
        Self {
            source,
            format: config.product_format(),
            markers: config.markers(),
            anchor_policy: config.anchor_policy(),
        }
    }

    pub fn with_markers(mut self, markers: MarkerConfig) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_anchor_policy(mut self, policy: AnchorPolicy) -> Self {
        self.anchor_policy = policy;
        self
    }

    /// Runs the populate sequence against the first filtering instance.
    ///
    /// Fetch failures leave the list empty. A missing filter template or
    /// container ends the run after the list is populated; a filter clone
    /// without label or control drops that one category.
    pub async fn populate<F: FiltersInstance>(
        &self,
        doc: &mut Document,
        instances: &mut [F],
    ) -> Result<PopulateReport> {
        let mut report = PopulateReport::default();

        let Some(filters) = instances.first_mut() else {
            tracing::warn!("Ready hook fired without a filters instance");
            return Ok(report);
        };

        let label: Selector = self.markers.filter_label.parse()?;
        let control: Selector = self.markers.filter_control.parse()?;

        let first_item = filters
            .list_instance()
            .items()
            .first()
            .copied()
            .ok_or(PopulateError::MissingAnchor(Anchor::ItemTemplate))?;
        let item_template = ItemTemplate::capture(first_item, &self.markers)?;

        let products = fetch_catalog(&self.source).await;

        let list = filters.list_instance();
        list.clear_items(doc);

        let items: Vec<NodeId> = products
            .iter()
            .map(|product| item_template.render(doc, product, &self.format))
            .collect();
        report.items_rendered = items.len();
        list.add_items(doc, items).await?;
        tracing::debug!("Populated list with {} items", report.items_rendered);

        let form = filters.form();
        let Some(filter_element) = doc.query_selector(form, &self.markers.filter_selector()?) else {
            self.anchor_missing(Anchor::FilterTemplate);
            report.aborted_at = Some(Anchor::FilterTemplate);
            return Ok(report);
        };
        let Some(container) = doc.parent(filter_element) else {
            self.anchor_missing(Anchor::FilterContainer);
            report.aborted_at = Some(Anchor::FilterContainer);
            return Ok(report);
        };

        doc.remove(filter_element);
        let filter_template = FilterTemplate::capture(filter_element, label, control);

        for category in derive_categories(&products) {
            match filter_template.render(doc, &category) {
                Some(filter) => {
                    doc.append_child(container, filter);
                    report.filters_created += 1;
                }
                None => {
                    self.log_anchor(format_args!(
                        "Filter template lacks label or control, skipping category '{}'",
                        category
                    ));
                    report.categories_skipped.push(category);
                }
            }
        }

        filters.store_filters_data(doc);
        report.filters_synced = true;

        tracing::info!(
            "✅ Catalog populated: {} items, {} filters",
            report.items_rendered,
            report.filters_created
        );
        Ok(report)
    }

    fn anchor_missing(&self, anchor: Anchor) {
        self.log_anchor(format_args!("Page has no {}, skipping filter generation", anchor));
    }

    fn log_anchor(&self, message: std::fmt::Arguments<'_>) {
        match self.anchor_policy {
            AnchorPolicy::Warn => tracing::warn!("{}", message),
            AnchorPolicy::Silent => tracing::debug!("{}", message),
        }
    }
}

/// Distinct categories in first-seen order.
pub fn derive_categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|product| seen.insert(product.category.as_str()))
        .map(|product| product.category.clone())
        .collect()
}
