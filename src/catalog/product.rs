use super::dimension::{BaseCategory, Dimension};
use crate::error::CoreError;
use crate::storage::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived rating fields of a product. Written only by the rating aggregator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAggregates {
    pub average_rating: f64,

    /// Only dimensions that at least one review scored are present.
    #[serde(default)]
    pub dimension_averages: BTreeMap<Dimension, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub base_category: BaseCategory,
    #[serde(default)]
    pub image_url: String,
    #[serde(flatten)]
    pub aggregates: ProductAggregates,
}

impl Record for Product {
    const COLLECTION: &'static str = "products";
    type Patch = ProductAggregates;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &ProductAggregates) {
        self.aggregates = patch.clone();
    }
}

/// Product submission as received from a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub price: f64,
    pub category: String,
    pub base_category: String,
    #[serde(default)]
    pub image_url: String,
}

impl NewProduct {
    /// Validate the submission and resolve its base category.
    pub fn validate(&self) -> Result<BaseCategory, CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Product name cannot be empty".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(CoreError::Validation("Category cannot be empty".to_string()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CoreError::Validation("Price must be a non-negative number".to_string()));
        }
        BaseCategory::from_name(&self.base_category)
            .ok_or_else(|| CoreError::Validation("Invalid base category".to_string()))
    }

    pub fn into_product(self, id: String, base_category: BaseCategory) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            price: self.price,
            category: self.category.trim().to_string(),
            base_category,
            image_url: self.image_url,
            aggregates: ProductAggregates::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(base: &str) -> NewProduct {
        NewProduct {
            name: "Coca Cola".to_string(),
            price: 1.5,
            category: "Soda".to_string(),
            base_category: base.to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_validate_resolves_base_category() {
        let base = submission("Food & Beverages").validate().unwrap();
        assert_eq!(base, BaseCategory::FoodAndBeverages);
    }

    #[test]
    fn test_validate_rejects_unknown_base_category() {
        let err = submission("Garden Tools").validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_blank_name_and_negative_price() {
        let mut blank = submission("Food & Beverages");
        blank.name = "   ".to_string();
        assert!(matches!(blank.validate(), Err(CoreError::Validation(_))));

        let mut negative = submission("Food & Beverages");
        negative.price = -1.0;
        assert!(matches!(negative.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_new_product_starts_without_aggregates() {
        let product = submission("Food & Beverages")
            .into_product("p1".to_string(), BaseCategory::FoodAndBeverages);
        assert_eq!(product.aggregates.average_rating, 0.0);
        assert!(product.aggregates.dimension_averages.is_empty());
    }

    #[test]
    fn test_product_json_uses_flat_camel_case_fields() {
        let mut product = submission("Food & Beverages")
            .into_product("p1".to_string(), BaseCategory::FoodAndBeverages);
        product
            .aggregates
            .dimension_averages
            .insert(Dimension::TasteFlavor, 4.5);

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["baseCategory"], "Food & Beverages");
        assert_eq!(json["averageRating"], 0.0);
        assert_eq!(json["dimensionAverages"]["tasteFlavor"], 4.5);
        assert!(json["dimensionAverages"].get("scent").is_none());
    }
}
