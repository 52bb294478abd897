use super::dimension::BaseCategory;
use super::product::Product;
use serde::Serialize;

/// Products sharing a `category` value. A read-side view, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub products: Vec<Product>,
}

/// Group products by category, keeping the order in which each category
/// first appears in `products`.
pub fn group_by_category(products: &[Product]) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();

    for product in products {
        match categories.iter_mut().find(|c| c.name == product.category) {
            Some(category) => category.products.push(product.clone()),
            None => categories.push(Category {
                name: product.category.clone(),
                products: vec![product.clone()],
            }),
        }
    }

    categories
}

/// Distinct category names used by products of the given base category.
pub fn category_names_in(products: &[Product], base: BaseCategory) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for product in products.iter().filter(|p| p.base_category == base) {
        if !names.contains(&product.category) {
            names.push(product.category.clone());
        }
    }
    names
}
