use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One catalog entry as served by the products API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "title")]
    pub name: String,
    pub price: f64,
    #[serde(default, alias = "discountPercentage", deserialize_with = "null_as_default")]
    pub discount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: String,
    pub category: String,
}

/// Accepted response bodies: a bare array, or the `{ "products": [...] }`
/// envelope the live service returns.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CatalogPayload {
    Bare(Vec<Product>),
    Envelope { products: Vec<Product> },
}

impl CatalogPayload {
    pub fn into_products(self) -> Vec<Product> {
        match self {
            CatalogPayload::Bare(products) => products,
            CatalogPayload::Envelope { products } => products,
        }
    }
}

/// Page elements the populator depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    ItemTemplate,
    FilterTemplate,
    FilterContainer,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Anchor::ItemTemplate => "item template",
            Anchor::FilterTemplate => "filter template",
            Anchor::FilterContainer => "filter container",
        };
        f.write_str(name)
    }
}

/// How missing anchors are reported. The run skips the same steps either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorPolicy {
    Silent,
    #[default]
    Warn,
}

/// Outcome of one populate run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulateReport {
    pub items_rendered: usize,
    pub filters_created: usize,
    pub categories_skipped: Vec<String>,
    /// Set when the filter stage stopped early at a missing anchor.
    pub aborted_at: Option<Anchor>,
    pub filters_synced: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bare_array() {
        let body = r#"[{"name":"Shoe","price":10,"discount":5,"description":"Comfy",
            "rating":4.5,"brand":"Acme","category":"Footwear"}]"#;
        let products = serde_json::from_str::<CatalogPayload>(body)
            .unwrap()
            .into_products();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Shoe");
        assert_eq!(products[0].price, 10.0);
        assert_eq!(products[0].category, "Footwear");
    }

    #[test]
    fn test_decode_live_envelope_with_aliases() {
        let body = r#"{"products":[{"id":1,"title":"Essence Mascara","price":9.99,
            "discountPercentage":7.17,"description":"Volumizing","rating":4.94,
            "brand":"Essence","category":"beauty","tags":["beauty"]}],
            "total":194,"skip":0,"limit":30}"#;
        let products = serde_json::from_str::<CatalogPayload>(body)
            .unwrap()
            .into_products();

        assert_eq!(products[0].name, "Essence Mascara");
        assert_eq!(products[0].discount, 7.17);
    }

    #[test]
    fn test_optional_fields_default() {
        let body = r#"[{"title":"Apple","price":1.99,"category":"groceries"}]"#;
        let products = serde_json::from_str::<CatalogPayload>(body)
            .unwrap()
            .into_products();

        assert_eq!(products[0].brand, "");
        assert_eq!(products[0].rating, 0.0);
    }

    #[test]
    fn test_null_optional_fields_keep_the_record() {
        let body = r#"[{"name":"Shoe","price":10,"category":"Footwear","brand":"Acme"},
            {"name":"Apple","price":1,"category":"groceries","brand":null,
             "description":null,"rating":null,"discount":null}]"#;
        let products = serde_json::from_str::<CatalogPayload>(body)
            .unwrap()
            .into_products();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].brand, "Acme");
        assert_eq!(products[1].brand, "");
        assert_eq!(products[1].description, "");
        assert_eq!(products[1].rating, 0.0);
        assert_eq!(products[1].discount, 0.0);
    }

    #[test]
    fn test_missing_category_is_rejected() {
        let body = r#"[{"name":"Shoe","price":10}]"#;
        assert!(serde_json::from_str::<CatalogPayload>(body).is_err());
    }
}
