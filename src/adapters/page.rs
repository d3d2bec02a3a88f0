use crate::adapters::memory::{MemoryFilters, MemoryList};
use crate::dom::{Document, NodeId, Selector};
use crate::template::{MarkerConfig, Slot};
use crate::utils::error::{PopulateError, Result};

/// Builds the product listing markup the populator is written against:
/// a filter form holding one radio filter template, and a collection list
/// holding one placeholder item with the slot elements.
#[derive(Debug, Clone)]
pub struct PageBuilder {
    markers: MarkerConfig,
    placeholder_item: bool,
    filter_template: bool,
    filter_label: bool,
    filter_control: bool,
    item_slots: Vec<Slot>,
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageBuilder {
    pub fn new() -> Self {
        Self {
            markers: MarkerConfig::default(),
            placeholder_item: true,
            filter_template: true,
            filter_label: true,
            filter_control: true,
            item_slots: Slot::ALL.to_vec(),
        }
    }

    pub fn with_markers(mut self, markers: MarkerConfig) -> Self {
        self.markers = markers;
        self
    }

    pub fn without_placeholder_item(mut self) -> Self {
        self.placeholder_item = false;
        self
    }

    pub fn without_filter_template(mut self) -> Self {
        self.filter_template = false;
        self
    }

    pub fn without_filter_label(mut self) -> Self {
        self.filter_label = false;
        self
    }

    pub fn without_filter_control(mut self) -> Self {
        self.filter_control = false;
        self
    }

    pub fn with_item_slots(mut self, slots: &[Slot]) -> Self {
        self.item_slots = slots.to_vec();
        self
    }

    /// The listing markup, with one placeholder item and one filter
    /// template unless switched off.
    pub fn markup(&self) -> String {
        let mut filters_list = String::new();
        if self.filter_template {
            let mut label = String::new();
            if self.filter_control {
                label.push_str(
                    "<input class=\"radio_input\" type=\"radio\" name=\"category\">",
                );
            }
            if self.filter_label {
                label.push_str("<span class=\"radio_label\">Category</span>");
            }
            filters_list = format!(
                "<label class=\"radio_field\" {}=\"{}\">{}</label>",
                self.markers.attribute,
                escape_attribute(&self.markers.filter_marker),
                label
            );
        }

        let mut collection_list = String::new();
        if self.placeholder_item {
            let slots: String = self
                .item_slots
                .iter()
                .map(|slot| {
                    let tag = match slot {
                        Slot::Name => "h3",
                        Slot::Description => "p",
                        _ => "div",
                    };
                    format!(
                        "<{tag} class=\"{marker}\" {attr}=\"{marker}\">Lorem ipsum</{tag}>",
                        tag = tag,
                        marker = slot.marker(),
                        attr = self.markers.attribute
                    )
                })
                .collect();
            collection_list = format!("<div class=\"collection_item\">{}</div>", slots);
        }

        format!(
            "<form class=\"filters_form\"><div class=\"filters_list\">{}</div></form>\
             <div class=\"collection_list\">{}</div>",
            filters_list, collection_list
        )
    }

    /// Parses [`PageBuilder::markup`] and wires the filtering instance to
    /// its form and list wrapper.
    pub fn build(self) -> Result<(Document, MemoryFilters)> {
        let doc = Document::parse_fragment(&self.markup());
        let root = doc.root();

        let form = find(&doc, root, ".filters_form")?;
        let wrapper = find(&doc, root, ".collection_list")?;

        let list = MemoryList::from_wrapper(&doc, wrapper);
        let filters = MemoryFilters::new(&doc, list, form);
        Ok((doc, filters))
    }
}

fn find(doc: &Document, scope: NodeId, selector: &str) -> Result<NodeId> {
    doc.query_selector(scope, &selector.parse::<Selector>()?)
        .ok_or_else(|| PopulateError::HostError {
            message: format!("page markup has no '{}' element", selector),
        })
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FiltersInstance, ListInstance};

    #[test]
    fn test_standard_page_layout() {
        let (doc, mut filters) = PageBuilder::new().build().unwrap();
        let markers = MarkerConfig::default();

        let items = filters.list_instance().items();
        assert_eq!(items.len(), 1);
        for slot in Slot::ALL {
            let selector = markers.slot_selector(slot).unwrap();
            assert!(doc.query_selector(items[0], &selector).is_some());
        }

        let template = doc.query_selector(filters.form(), &markers.filter_selector().unwrap());
        assert!(template.is_some());
        assert_eq!(filters.filter_values(), vec![String::new()]);
    }

    #[test]
    fn test_switches_drop_elements() {
        let (doc, mut filters) = PageBuilder::new()
            .without_placeholder_item()
            .without_filter_template()
            .build()
            .unwrap();

        let selector = MarkerConfig::default().filter_selector().unwrap();
        assert!(filters.list_instance().items().is_empty());
        assert!(doc.query_selector(filters.form(), &selector).is_none());
        assert!(filters.filter_values().is_empty());
    }

    #[test]
    fn test_custom_marker_values_are_escaped_into_markup() {
        let markers = MarkerConfig {
            attribute: "data-role".to_string(),
            filter_marker: "cat \"radio\" & more".to_string(),
            ..MarkerConfig::default()
        };
        let (doc, filters) = PageBuilder::new()
            .with_markers(markers.clone())
            .with_item_slots(&[Slot::Name])
            .build()
            .unwrap();

        let template = doc
            .query_selector(filters.form(), &markers.filter_selector().unwrap())
            .unwrap();
        assert_eq!(doc.attribute(template, "data-role"), Some("cat \"radio\" & more"));
        assert_eq!(doc.text_content(doc.root()), "CategoryLorem ipsum");
    }
}
