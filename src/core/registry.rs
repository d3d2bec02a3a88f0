use crate::core::populator::CatalogPopulator;
use crate::dom::Document;
use crate::domain::model::PopulateReport;
use crate::domain::ports::{CatalogSource, FiltersInstance};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Attribute key the list filtering library initializes under.
pub const CMS_FILTER: &str = "cmsfilter";

/// Callback run when the host library has built its filtering instances.
#[async_trait]
pub trait InitHook<F: FiltersInstance + 'static>: Send + Sync {
    async fn on_ready(&self, doc: &mut Document, instances: &mut [F]) -> Result<PopulateReport>;
}

#[async_trait]
impl<S, F> InitHook<F> for CatalogPopulator<S>
where
    S: CatalogSource + 'static,
    F: FiltersInstance + 'static,
{
    async fn on_ready(&self, doc: &mut Document, instances: &mut [F]) -> Result<PopulateReport> {
        self.populate(doc, instances).await
    }
}

/// Hooks waiting for the host library, keyed by attribute name. Hooks
/// registered before the host initializes are kept and run once it fires.
pub struct HookRegistry<F: FiltersInstance + 'static> {
    hooks: Vec<(String, Box<dyn InitHook<F>>)>,
}

impl<F: FiltersInstance + 'static> Default for HookRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FiltersInstance + 'static> HookRegistry<F> {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    pub fn register<H>(&mut self, key: impl Into<String>, hook: H)
    where
        H: InitHook<F> + 'static,
    {
        let key = key.into();
        tracing::debug!("Registered init hook for '{}'", key);
        self.hooks.push((key, Box::new(hook)));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Runs every hook registered under `key`, in registration order. Stops
    /// at the first hook error.
    pub async fn fire(
        &self,
        key: &str,
        doc: &mut Document,
        instances: &mut [F],
    ) -> Result<Vec<PopulateReport>> {
        let mut reports = Vec::new();
        for (hook_key, hook) in &self.hooks {
            if hook_key != key {
                continue;
            }
            reports.push(hook.on_ready(doc, instances).await?);
        }

        if reports.is_empty() {
            tracing::debug!("No init hooks registered for '{}'", key);
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFilters;
    use crate::adapters::page::PageBuilder;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHook(Arc<AtomicUsize>);

    #[async_trait]
    impl InitHook<MemoryFilters> for CountingHook {
        async fn on_ready(
            &self,
            _doc: &mut Document,
            instances: &mut [MemoryFilters],
        ) -> Result<PopulateReport> {
            self.0.fetch_add(instances.len(), Ordering::SeqCst);
            Ok(PopulateReport::default())
        }
    }

    #[test]
    fn test_fire_runs_only_matching_hooks() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = HookRegistry::new();
        registry.register(CMS_FILTER, CountingHook(hits.clone()));
        registry.register("cmsload", CountingHook(hits.clone()));
        registry.register(CMS_FILTER, CountingHook(hits.clone()));

        let (mut doc, filters) = PageBuilder::new().build().unwrap();
        let mut instances = vec![filters];
        let reports =
            tokio_test::block_on(registry.fire(CMS_FILTER, &mut doc, &mut instances)).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(reports.len(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fire_with_unknown_key_runs_nothing() {
        let registry: HookRegistry<MemoryFilters> = HookRegistry::new();
        let mut doc = Document::new();
        let reports = tokio_test::block_on(registry.fire(CMS_FILTER, &mut doc, &mut [])).unwrap();
        assert!(reports.is_empty());
        assert!(registry.is_empty());
    }
}
