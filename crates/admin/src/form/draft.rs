//! The in-progress product draft and its validated form.

use leafpress_core::{Category, Product};
use rust_decimal::Decimal;
use serde::Serialize;

/// The unsaved, form-level representation of a product.
///
/// Numeric fields hold the raw user-entered text so that "non-numeric" is a
/// representable state the validator can report per field, instead of being
/// swallowed at input time. `tags` is the comma-separated editing form; it
/// is split into a normalised list only at submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub original_price: String,
    pub discount_percent: String,
    pub stock: String,
    pub category: Option<Category>,
    pub tags: String,
    pub is_top_pick: bool,
    pub is_trending: bool,
}

impl ProductDraft {
    /// Seed a draft from a fetched product record (edit flow).
    ///
    /// The tags array is flattened to a comma-joined string for editing and
    /// re-split on submit.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            original_price: product.original_price.to_string(),
            discount_percent: product.discount_percent.to_string(),
            stock: product.stock.to_string(),
            category: Some(product.category),
            tags: product.tags.join(", "),
            is_top_pick: product.is_top_pick,
            is_trending: product.is_trending,
        }
    }
}

/// Split the comma-separated tag field into trimmed, non-empty, unique tags
/// (first occurrence wins).
pub(crate) fn split_tags(tags: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in tags.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
        if !seen.iter().any(|t| t == tag) {
            seen.push(tag.to_string());
        }
    }
    seen
}

/// The validated, typed submission payload.
///
/// Only produced by [`ProductFields::try_from_draft`]; serialises to the
/// backend's create/update body shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub title: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub original_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,
    pub stock: u32,
    pub category: Category,
    pub tags: Vec<String>,
    pub is_top_pick: bool,
    pub is_trending: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafpress_core::{ImageRef, ProductId};

    fn sample_product() -> Product {
        Product {
            id: ProductId::new("p1"),
            title: "Spiral Notepad".to_string(),
            description: "Sturdy binding, premium eco-paper.".to_string(),
            original_price: Decimal::new(250, 0),
            discount_percent: Decimal::new(10, 0),
            stock: 45,
            category: Category::Stationery,
            tags: vec!["eco".to_string(), "notepad".to_string()],
            images: vec![ImageRef::new("/spiral/1.png")],
            is_top_pick: false,
            is_trending: true,
            created_at: None,
        }
    }

    #[test]
    fn test_from_product_flattens_tags() {
        let draft = ProductDraft::from_product(&sample_product());
        assert_eq!(draft.tags, "eco, notepad");
        assert_eq!(draft.original_price, "250");
        assert_eq!(draft.stock, "45");
        assert_eq!(draft.category, Some(Category::Stationery));
        assert!(draft.is_trending);
    }

    #[test]
    fn test_split_tags_normalises() {
        assert_eq!(split_tags("eco, notepad"), vec!["eco", "notepad"]);
        assert_eq!(split_tags("  a ,, b , "), vec!["a", "b"]);
        assert_eq!(split_tags("eco, paper, eco"), vec!["eco", "paper"]);
        assert!(split_tags("").is_empty());
        assert!(split_tags(" , , ").is_empty());
    }

    #[test]
    fn test_fields_serialise_to_wire_names() {
        let fields = ProductFields {
            title: "Notebook".to_string(),
            description: "x".to_string(),
            original_price: Decimal::new(100, 0),
            discount_percent: Decimal::new(10, 0),
            stock: 5,
            category: Category::Paper,
            tags: vec![],
            is_top_pick: false,
            is_trending: false,
        };

        let value = serde_json::to_value(&fields).expect("serialize");
        assert_eq!(value["originalPrice"], 100.0);
        assert_eq!(value["discountPercent"], 10.0);
        assert_eq!(value["stock"], 5);
        assert_eq!(value["category"], "Paper");
        assert_eq!(value["isTopPick"], false);
        assert!(value["tags"].as_array().expect("tags array").is_empty());
    }
}
