//! Pure draft validation.
//!
//! `validate` maps a draft to a set of field-level errors; an empty set
//! means the draft is submittable. The image-count rule is submit-time only
//! and lives with the orchestrator, not here, so per-keystroke revalidation
//! never touches it.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::draft::{ProductDraft, ProductFields, split_tags};

/// Fields a validation error can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Description,
    OriginalPrice,
    DiscountPercent,
    Stock,
    Category,
    Images,
}

impl Field {
    /// Every field the validator checks on a draft (excludes `Images`,
    /// which is a submit-time rule).
    pub(crate) const DRAFT_FIELDS: [Self; 6] = [
        Self::Title,
        Self::Description,
        Self::OriginalPrice,
        Self::DiscountPercent,
        Self::Stock,
        Self::Category,
    ];

    /// Stable lowercase name, matching the form's input names.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::OriginalPrice => "originalPrice",
            Self::DiscountPercent => "discountPercent",
            Self::Stock => "stock",
            Self::Category => "category",
            Self::Images => "images",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Field-level validation errors.
///
/// Absence of an entry for a field means the field is currently valid.
/// Backed by a `BTreeMap` so iteration order is stable for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    /// True when no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields in error.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The message for one field, if it is in error.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// The set of fields currently in error.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        self.errors.keys().copied().collect()
    }

    /// Iterate over `(field, message)` pairs in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub(crate) fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub(crate) fn remove(&mut self, field: Field) {
        self.errors.remove(&field);
    }
}

/// Validate every draft field, returning all errors at once.
#[must_use]
pub fn validate(draft: &ProductDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in Field::DRAFT_FIELDS {
        if let Some(message) = check_field(draft, field) {
            errors.insert(field, message);
        }
    }
    errors
}

/// Check one field; `None` means valid.
pub(crate) fn check_field(draft: &ProductDraft, field: Field) -> Option<String> {
    match field {
        Field::Title => draft
            .title
            .trim()
            .is_empty()
            .then(|| "Title is required".to_string()),
        Field::Description => draft
            .description
            .trim()
            .is_empty()
            .then(|| "Description is required".to_string()),
        Field::OriginalPrice => match parse_decimal(&draft.original_price) {
            Some(price) if price > Decimal::ZERO => None,
            _ => Some("Price must be a number greater than 0".to_string()),
        },
        Field::DiscountPercent => {
            if draft.discount_percent.trim().is_empty() {
                return None;
            }
            match parse_decimal(&draft.discount_percent) {
                Some(percent)
                    if percent >= Decimal::ZERO && percent <= Decimal::new(100, 0) =>
                {
                    None
                }
                _ => Some("Discount must be between 0 and 100".to_string()),
            }
        }
        Field::Stock => match draft.stock.trim().parse::<i64>() {
            Ok(stock) if (0..=i64::from(u32::MAX)).contains(&stock) => None,
            _ => Some("Stock must be zero or a positive whole number".to_string()),
        },
        Field::Category => draft
            .category
            .is_none()
            .then(|| "Category is required".to_string()),
        // Submit-time rule, checked by the orchestrator against the image set.
        Field::Images => None,
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    raw.trim().parse::<Decimal>().ok()
}

impl ProductFields {
    /// Validate a draft and, if it passes, produce the typed payload.
    ///
    /// # Errors
    ///
    /// Returns the full error set (all violated fields at once) when any
    /// draft field fails validation.
    pub fn try_from_draft(draft: &ProductDraft) -> Result<Self, ValidationErrors> {
        let errors = validate(draft);
        if !errors.is_empty() {
            return Err(errors);
        }

        // Validation guarantees these parses succeed.
        let original_price = parse_decimal(&draft.original_price).unwrap_or_default();
        let discount_percent = parse_decimal(&draft.discount_percent).unwrap_or_default();
        let stock = draft.stock.trim().parse::<u32>().unwrap_or_default();
        let category = draft.category.unwrap_or(leafpress_core::Category::Stationery);

        Ok(Self {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            original_price,
            discount_percent,
            stock,
            category,
            tags: split_tags(&draft.tags),
            is_top_pick: draft.is_top_pick,
            is_trending: draft.is_trending,
        })
    }
}
