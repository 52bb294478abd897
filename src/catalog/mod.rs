//! Catalog records: products, reviews, and the derived category view.

pub mod category;
pub mod dimension;
pub mod product;
pub mod review;

pub use category::{category_names_in, group_by_category, Category};
pub use dimension::{BaseCategory, Dimension};
pub use product::{NewProduct, Product, ProductAggregates};
pub use review::{NewReview, Review};
