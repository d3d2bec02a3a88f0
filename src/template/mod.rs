//! Typed template binding.
//!
//! A template is an element captured from the page once and cloned per
//! record. [`Slot`] names the marked sub-elements an item clone may carry,
//! [`ProductFormat`] decides what text each slot receives.

use crate::dom::{Document, NodeId, Selector};
use crate::domain::model::Product;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Named sub-elements of an item template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Name,
    Price,
    Discount,
    Description,
    Rating,
    Brand,
    Category,
}

impl Slot {
    pub const ALL: [Slot; 7] = [
        Slot::Name,
        Slot::Price,
        Slot::Discount,
        Slot::Description,
        Slot::Rating,
        Slot::Brand,
        Slot::Category,
    ];

    /// Marker value identifying the slot element in the markup.
    pub fn marker(self) -> &'static str {
        match self {
            Slot::Name => "name",
            Slot::Price => "price",
            Slot::Discount => "discount",
            Slot::Description => "description",
            Slot::Rating => "rating",
            Slot::Brand => "brand",
            Slot::Category => "category",
        }
    }
}

/// Renders a number the way a browser stringifies it: integral values
/// drop the fraction, magnitudes at or above 1e21 or below 1e-6 switch to
/// exponent form (`1e+21`, `1.5e-7`), non-finite values use the script
/// spellings.
pub fn display_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        // covers -0.0
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        let formatted = format!("{:e}", value);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFormat {
    pub currency_symbol: String,
    pub discount_suffix: String,
    pub rating_label: String,
    pub brand_label: String,
    pub category_label: String,
}

impl Default for ProductFormat {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            discount_suffix: "% off".to_string(),
            rating_label: "Rating: ".to_string(),
            brand_label: "Brand: ".to_string(),
            category_label: "Category: ".to_string(),
        }
    }
}

impl ProductFormat {
    pub fn format(&self, slot: Slot, product: &Product) -> String {
        match slot {
            Slot::Name => product.name.clone(),
            Slot::Price => format!("{}{}", self.currency_symbol, display_number(product.price)),
            Slot::Discount => format!("{}{}", display_number(product.discount), self.discount_suffix),
            Slot::Description => product.description.clone(),
            Slot::Rating => format!("{}{}", self.rating_label, display_number(product.rating)),
            Slot::Brand => format!("{}{}", self.brand_label, product.brand),
            Slot::Category => format!("{}{}", self.category_label, product.category),
        }
    }
}

/// Where the page marks its templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Attribute carrying slot and filter markers.
    pub attribute: String,
    pub filter_marker: String,
    pub filter_label: String,
    pub filter_control: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            attribute: "data-element".to_string(),
            filter_marker: "filter".to_string(),
            filter_label: "span".to_string(),
            filter_control: "input".to_string(),
        }
    }
}

impl MarkerConfig {
    pub fn filter_selector(&self) -> Result<Selector> {
        Selector::attribute(&self.attribute, &self.filter_marker)
    }

    pub fn slot_selector(&self, slot: Slot) -> Result<Selector> {
        Selector::attribute(&self.attribute, slot.marker())
    }
}

/// Prototype for list items.
#[derive(Debug, Clone)]
pub struct ItemTemplate {
    element: NodeId,
    slots: Vec<(Slot, Selector)>,
}

impl ItemTemplate {
    pub fn capture(element: NodeId, markers: &MarkerConfig) -> Result<Self> {
        let slots = Slot::ALL
            .iter()
            .map(|slot| Ok((*slot, markers.slot_selector(*slot)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { element, slots })
    }

    /// Clones the template and fills every slot present in the clone.
    /// The returned element is detached.
    pub fn render(&self, doc: &mut Document, product: &Product, format: &ProductFormat) -> NodeId {
        let item = doc.clone_node(self.element);
        for (slot, selector) in &self.slots {
            match doc.query_selector(item, selector) {
                Some(target) => doc.set_text_content(target, &format.format(*slot, product)),
                None => tracing::trace!("item template has no '{}' slot", slot.marker()),
            }
        }
        item
    }
}

/// Prototype for one category control.
#[derive(Debug, Clone)]
pub struct FilterTemplate {
    element: NodeId,
    label: Selector,
    control: Selector,
}

impl FilterTemplate {
    pub fn capture(element: NodeId, label: Selector, control: Selector) -> Self {
        Self {
            element,
            label,
            control,
        }
    }

    /// Clones the template with its label text and control value set to
    /// `category`. `None` when the clone lacks either element.
    pub fn render(&self, doc: &mut Document, category: &str) -> Option<NodeId> {
        let filter = doc.clone_node(self.element);
        let label = doc.query_selector(filter, &self.label)?;
        let control = doc.query_selector(filter, &self.control)?;

        doc.set_text_content(label, category);
        doc.set_attribute(control, "value", category);
        Some(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            name: "Shoe".to_string(),
            price: 10.0,
            discount: 5.0,
            description: "Comfy".to_string(),
            rating: 4.5,
            brand: "Acme".to_string(),
            category: "Footwear".to_string(),
        }
    }

    fn item_with_slots(doc: &mut Document, slots: &[Slot]) -> NodeId {
        let item = doc.create_element("div");
        for slot in slots {
            let el = doc.create_element("div");
            doc.set_attribute(el, "data-element", slot.marker());
            doc.set_text_content(el, "placeholder");
            doc.append_child(item, el);
        }
        let root = doc.root();
        doc.append_child(root, item);
        item
    }

    fn slot_text(doc: &Document, item: NodeId, slot: Slot) -> Option<String> {
        let selector = MarkerConfig::default().slot_selector(slot).unwrap();
        doc.query_selector(item, &selector)
            .map(|el| doc.text_content(el))
    }

    #[test]
    fn test_display_number_matches_script_output() {
        assert_eq!(display_number(10.0), "10");
        assert_eq!(display_number(9.99), "9.99");
        assert_eq!(display_number(-0.0), "0");
        assert_eq!(display_number(f64::NAN), "NaN");
        assert_eq!(display_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_display_number_uses_exponent_form_at_the_extremes() {
        assert_eq!(display_number(1e21), "1e+21");
        assert_eq!(display_number(1.2345e22), "1.2345e+22");
        assert_eq!(display_number(-1e21), "-1e+21");
        assert_eq!(display_number(1e-7), "1e-7");
        assert_eq!(display_number(1.5e-7), "1.5e-7");
        assert_eq!(display_number(1e20), "100000000000000000000");
        assert_eq!(display_number(0.000001), "0.000001");
    }

    #[test]
    fn test_format_prefixes_and_suffixes() {
        let format = ProductFormat::default();
        let p = product();
        assert_eq!(format.format(Slot::Name, &p), "Shoe");
        assert_eq!(format.format(Slot::Price, &p), "$10");
        assert_eq!(format.format(Slot::Discount, &p), "5% off");
        assert_eq!(format.format(Slot::Rating, &p), "Rating: 4.5");
        assert_eq!(format.format(Slot::Brand, &p), "Brand: Acme");
        assert_eq!(format.format(Slot::Category, &p), "Category: Footwear");
    }

    #[test]
    fn test_item_render_fills_slots_and_leaves_template_alone() {
        let mut doc = Document::new();
        let element = item_with_slots(&mut doc, &Slot::ALL);
        let template = ItemTemplate::capture(element, &MarkerConfig::default()).unwrap();

        let item = template.render(&mut doc, &product(), &ProductFormat::default());

        assert!(!doc.is_connected(item));
        assert_eq!(slot_text(&doc, item, Slot::Price).as_deref(), Some("$10"));
        assert_eq!(slot_text(&doc, item, Slot::Description).as_deref(), Some("Comfy"));
        assert_eq!(
            slot_text(&doc, element, Slot::Price).as_deref(),
            Some("placeholder")
        );
    }

    #[test]
    fn test_item_render_skips_missing_slots() {
        let mut doc = Document::new();
        let element = item_with_slots(&mut doc, &[Slot::Name, Slot::Category]);
        let template = ItemTemplate::capture(element, &MarkerConfig::default()).unwrap();

        let item = template.render(&mut doc, &product(), &ProductFormat::default());

        assert_eq!(slot_text(&doc, item, Slot::Name).as_deref(), Some("Shoe"));
        assert_eq!(slot_text(&doc, item, Slot::Price), None);
        assert_eq!(doc.text_content(item), "ShoeCategory: Footwear");
    }

    fn sel(selector: &str) -> Selector {
        selector.parse().unwrap()
    }

    fn filter_label(doc: &mut Document, with_span: bool, with_input: bool) -> NodeId {
        let label = doc.create_element("label");
        if with_span {
            let span = doc.create_element("span");
            doc.set_text_content(span, "Category");
            doc.append_child(label, span);
        }
        if with_input {
            let input = doc.create_element("input");
            doc.set_attribute(input, "type", "radio");
            doc.append_child(label, input);
        }
        label
    }

    #[test]
    fn test_filter_render_sets_label_and_value() {
        let mut doc = Document::new();
        let element = filter_label(&mut doc, true, true);
        let template = FilterTemplate::capture(element, sel("span"), sel("input"));

        let filter = template.render(&mut doc, "Apparel").unwrap();
        let input = doc.query_selector(filter, &sel("input")).unwrap();

        assert_eq!(doc.text_content(filter), "Apparel");
        assert_eq!(doc.attribute(input, "value"), Some("Apparel"));
        assert_eq!(doc.attribute(input, "type"), Some("radio"));
    }

    #[test]
    fn test_filter_render_without_label_or_control_yields_none() {
        let mut doc = Document::new();
        let no_label = filter_label(&mut doc, false, true);
        let no_input = filter_label(&mut doc, true, false);

        for element in [no_label, no_input] {
            let template = FilterTemplate::capture(element, sel("span"), sel("input"));
            assert_eq!(template.render(&mut doc, "Apparel"), None);
        }
    }
}
