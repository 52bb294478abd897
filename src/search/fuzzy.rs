use crate::catalog::{Category, Product};

pub const DEFAULT_THRESHOLD: usize = 2;

/// Levenshtein distance between `a` and `b`, counted in chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows instead of the full matrix
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current: Vec<usize> = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;

        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }

        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

fn within(candidate: &str, query: &str, threshold: usize) -> bool {
    edit_distance(&candidate.to_lowercase(), query) <= threshold
}

/// Products and categories whose names are within `threshold` edits of
/// `query`, case-insensitively, in catalog order.
///
/// A product also matches through its category name.
pub fn search(
    query: &str,
    products: &[Product],
    categories: &[Category],
    threshold: usize,
) -> (Vec<Product>, Vec<Category>) {
    let query = query.to_lowercase();

    let matched_products = products
        .iter()
        .filter(|p| within(&p.name, &query, threshold) || within(&p.category, &query, threshold))
        .cloned()
        .collect();

    let matched_categories = categories
        .iter()
        .filter(|c| within(&c.name, &query, threshold))
        .cloned()
        .collect();

    (matched_products, matched_categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{group_by_category, BaseCategory, ProductAggregates};

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price: 1.0,
            category: category.to_string(),
            base_category: BaseCategory::FoodAndBeverages,
            image_url: String::new(),
            aggregates: ProductAggregates::default(),
        }
    }

    #[test]
    fn test_edit_distance_basics() {
        assert_eq!(edit_distance("abc", "abd"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", ""), 0);
    }

    #[test]
    fn test_edit_distance_identity_and_symmetry() {
        let words = ["", "a", "coca cola", "pepsi max", "ayran", "çay", "ÇAY", "köfte"];
        for a in words {
            assert_eq!(edit_distance(a, a), 0, "{a}");
            for b in words {
                assert_eq!(edit_distance(a, b), edit_distance(b, a), "{a} / {b}");
            }
        }
    }

    #[test]
    fn test_edit_distance_counts_chars_not_bytes() {
        // 'ç' is two bytes in UTF-8 but one edit
        assert_eq!(edit_distance("cay", "çay"), 1);
        assert_eq!(edit_distance("süt", "sut"), 1);
    }

    #[test]
    fn test_search_coca_cola_example() {
        let products = vec![
            product("1", "Coca Cola", "Soda"),
            product("2", "Pepsi Max", "Soda"),
        ];
        let categories = group_by_category(&products);

        let (found, found_categories) = search("Coca Col", &products, &categories, 2);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Coca Cola");
        assert!(found_categories.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = vec![product("1", "Coca Cola", "Soda")];
        let (found, _) = search("COCA COLA", &products, &[], DEFAULT_THRESHOLD);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_search_matches_product_by_category() {
        let products = vec![
            product("1", "Ayran", "Dairy"),
            product("2", "Cheddar", "Dairy"),
            product("3", "Cola", "Soda"),
        ];
        let categories = group_by_category(&products);

        let (found, found_categories) = search("dairy", &products, &categories, DEFAULT_THRESHOLD);

        let ids: Vec<&str> = found.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(found_categories.len(), 1);
        assert_eq!(found_categories[0].name, "Dairy");
        assert_eq!(found_categories[0].products.len(), 2);
    }

    #[test]
    fn test_search_preserves_catalog_order() {
        // The exact match comes last in the catalog and stays last
        let products = vec![
            product("1", "Colx", "Misc"),
            product("2", "Cxla", "Misc"),
            product("3", "Cola", "Misc"),
        ];

        let (found, _) = search("Cola", &products, &[], DEFAULT_THRESHOLD);
        let ids: Vec<&str> = found.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_search_threshold_boundary() {
        let products = vec![product("1", "abcdef", "Misc")];

        let (at_two, _) = search("abcdxy", &products, &[], 2);
        assert_eq!(at_two.len(), 1);

        let (past_two, _) = search("abcxyz", &products, &[], 2);
        assert!(past_two.is_empty());

        let (exact_only, _) = search("abcdeg", &products, &[], 0);
        assert!(exact_only.is_empty());
    }

    #[test]
    fn test_search_empty_catalog() {
        let (found, found_categories) = search("anything", &[], &[], DEFAULT_THRESHOLD);
        assert!(found.is_empty());
        assert!(found_categories.is_empty());
    }
}
