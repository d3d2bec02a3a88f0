//! In-process stand-in for the list filtering library.
//!
//! Tracks list items and the filter index the way the browser library does
//! for a page, but over a [`Document`].

use crate::dom::{Document, NodeId};
use crate::domain::ports::{FiltersInstance, ListInstance};
use crate::utils::error::{PopulateError, Result};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct MemoryList {
    wrapper: NodeId,
    items: Vec<NodeId>,
}

impl MemoryList {
    /// Adopts the element children of `wrapper` as the initial items.
    pub fn from_wrapper(doc: &Document, wrapper: NodeId) -> Self {
        Self {
            wrapper,
            items: doc.element_children(wrapper),
        }
    }
}

#[async_trait]
impl ListInstance for MemoryList {
    fn items(&self) -> Vec<NodeId> {
        self.items.clone()
    }

    fn clear_items(&mut self, doc: &mut Document) {
        for item in self.items.drain(..) {
            doc.remove(item);
        }
    }

    async fn add_items(&mut self, doc: &mut Document, items: Vec<NodeId>) -> Result<()> {
        if !doc.is_connected(self.wrapper) {
            return Err(PopulateError::HostError {
                message: "list wrapper is not attached to the page".to_string(),
            });
        }

        for item in items {
            doc.append_child(self.wrapper, item);
            self.items.push(item);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct MemoryFilters {
    list: MemoryList,
    form: NodeId,
    /// Values of the form's controls as of the last sync.
    filter_values: Vec<String>,
    sync_count: usize,
}

impl MemoryFilters {
    pub fn new(doc: &Document, list: MemoryList, form: NodeId) -> Self {
        Self {
            filter_values: Self::index_form(doc, form),
            list,
            form,
            sync_count: 0,
        }
    }

    fn index_form(doc: &Document, form: NodeId) -> Vec<String> {
        doc.descendants(form)
            .into_iter()
            .filter(|id| doc.tag(*id) == Some("input"))
            .map(|input| doc.attribute(input, "value").unwrap_or_default().to_string())
            .collect()
    }

    pub fn filter_values(&self) -> Vec<String> {
        self.filter_values.clone()
    }

    /// Number of `store_filters_data` calls so far.
    pub fn sync_count(&self) -> usize {
        self.sync_count
    }
}

impl FiltersInstance for MemoryFilters {
    type List = MemoryList;

    fn list_instance(&mut self) -> &mut MemoryList {
        &mut self.list
    }

    fn form(&self) -> NodeId {
        self.form
    }

    fn store_filters_data(&mut self, doc: &Document) {
        self.filter_values = Self::index_form(doc, self.form);
        self.sync_count += 1;
        tracing::debug!("Filter index rebuilt with {} controls", self.filter_values.len());
    }
}
