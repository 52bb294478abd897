use serde::{Deserialize, Serialize};
use std::fmt;

/// Category-specific review axis, scored alongside the overall rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    TasteFlavor,
    PricePerformance,
    NutritionalValue,
    PortionSize,
    Effectiveness,
    Scent,
    SkinCompatibility,
    Durability,
    Design,
    Functionality,
    Performance,
    Quality,
    Comfort,
    EaseOfUse,
}

impl Dimension {
    pub const ALL: [Dimension; 14] = [
        Dimension::TasteFlavor,
        Dimension::PricePerformance,
        Dimension::NutritionalValue,
        Dimension::PortionSize,
        Dimension::Effectiveness,
        Dimension::Scent,
        Dimension::SkinCompatibility,
        Dimension::Durability,
        Dimension::Design,
        Dimension::Functionality,
        Dimension::Performance,
        Dimension::Quality,
        Dimension::Comfort,
        Dimension::EaseOfUse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::TasteFlavor => "tasteFlavor",
            Dimension::PricePerformance => "pricePerformance",
            Dimension::NutritionalValue => "nutritionalValue",
            Dimension::PortionSize => "portionSize",
            Dimension::Effectiveness => "effectiveness",
            Dimension::Scent => "scent",
            Dimension::SkinCompatibility => "skinCompatibility",
            Dimension::Durability => "durability",
            Dimension::Design => "design",
            Dimension::Functionality => "functionality",
            Dimension::Performance => "performance",
            Dimension::Quality => "quality",
            Dimension::Comfort => "comfort",
            Dimension::EaseOfUse => "easeOfUse",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level classification every product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseCategory {
    #[serde(rename = "Food & Beverages")]
    FoodAndBeverages,
    #[serde(rename = "Personal Care & Cosmetics")]
    PersonalCareAndCosmetics,
    #[serde(rename = "Home & Living")]
    HomeAndLiving,
    #[serde(rename = "Electronics & Technology")]
    ElectronicsAndTechnology,
    #[serde(rename = "Clothing & Fashion")]
    ClothingAndFashion,
    #[serde(rename = "Health & Sports")]
    HealthAndSports,
}

impl BaseCategory {
    pub const ALL: [BaseCategory; 6] = [
        BaseCategory::FoodAndBeverages,
        BaseCategory::PersonalCareAndCosmetics,
        BaseCategory::HomeAndLiving,
        BaseCategory::ElectronicsAndTechnology,
        BaseCategory::ClothingAndFashion,
        BaseCategory::HealthAndSports,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BaseCategory::FoodAndBeverages => "Food & Beverages",
            BaseCategory::PersonalCareAndCosmetics => "Personal Care & Cosmetics",
            BaseCategory::HomeAndLiving => "Home & Living",
            BaseCategory::ElectronicsAndTechnology => "Electronics & Technology",
            BaseCategory::ClothingAndFashion => "Clothing & Fashion",
            BaseCategory::HealthAndSports => "Health & Sports",
        }
    }

    /// Parse a display name; `None` for anything outside the fixed set.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|base| base.name() == name)
    }

    /// Dimensions reviewers are prompted for in this base category.
    pub fn dimensions(&self) -> &'static [Dimension] {
        use Dimension::*;
        match self {
            BaseCategory::FoodAndBeverages => {
                &[TasteFlavor, PricePerformance, NutritionalValue, PortionSize]
            }
            BaseCategory::PersonalCareAndCosmetics => {
                &[Effectiveness, Scent, SkinCompatibility, PricePerformance]
            }
            BaseCategory::HomeAndLiving => &[Functionality, Durability, Design, PricePerformance],
            BaseCategory::ElectronicsAndTechnology => {
                &[Performance, Durability, Design, PricePerformance]
            }
            BaseCategory::ClothingAndFashion => &[Quality, Comfort, Design, PricePerformance],
            BaseCategory::HealthAndSports => {
                &[Effectiveness, EaseOfUse, Durability, PricePerformance]
            }
        }
    }
}

impl fmt::Display for BaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_serializes_camel_case() {
        let json = serde_json::to_string(&Dimension::EaseOfUse).unwrap();
        assert_eq!(json, "\"easeOfUse\"");

        for dimension in Dimension::ALL {
            let json = serde_json::to_string(&dimension).unwrap();
            assert_eq!(json, format!("\"{}\"", dimension.as_str()));
        }
    }

    #[test]
    fn test_base_category_round_trips_display_name() {
        for base in BaseCategory::ALL {
            assert_eq!(BaseCategory::from_name(base.name()), Some(base));
            let json = serde_json::to_string(&base).unwrap();
            assert_eq!(json, format!("\"{}\"", base.name()));
        }
    }

    #[test]
    fn test_unknown_base_category_is_rejected() {
        assert_eq!(BaseCategory::from_name("Garden"), None);
        assert!(serde_json::from_str::<BaseCategory>("\"Garden\"").is_err());
    }

    #[test]
    fn test_every_dimension_belongs_to_some_base_category() {
        for dimension in Dimension::ALL {
            assert!(
                BaseCategory::ALL
                    .iter()
                    .any(|base| base.dimensions().contains(&dimension)),
                "{dimension} is not offered by any base category"
            );
        }
    }
}
