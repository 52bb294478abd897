use crate::catalog::{Dimension, Product, ProductAggregates, Review};
use crate::error::{CoreError, CoreResult};
use crate::storage::Collection;
use std::collections::BTreeMap;
use tracing::{debug, info};

fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = u8>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), v| (sum + v as u64, count + 1));

    (count > 0).then(|| sum as f64 / count as f64)
}

/// Mean overall rating of `reviews`, 0.0 when there are none.
pub fn average_rating(reviews: &[Review]) -> f64 {
    mean(reviews.iter().map(|r| r.rating)).unwrap_or(0.0)
}

/// Compute the aggregate fields of `product_id` from its full review set.
///
/// Reviews of other products are ignored. A dimension nobody scored is left
/// out of `dimension_averages` rather than reported as zero.
pub fn recompute(product_id: &str, reviews: &[Review]) -> ProductAggregates {
    let own: Vec<&Review> = reviews.iter().filter(|r| r.product_id == product_id).collect();

    let average_rating = mean(own.iter().map(|r| r.rating)).unwrap_or(0.0);

    let dimension_averages: BTreeMap<Dimension, f64> = Dimension::ALL
        .into_iter()
        .filter_map(|dimension| {
            mean(own.iter().filter_map(|r| r.dimension_score(dimension)))
                .map(|average| (dimension, average))
        })
        .collect();

    ProductAggregates {
        average_rating,
        dimension_averages,
    }
}

/// Re-read the reviews of `product_id` and write fresh aggregates onto it.
///
/// The write is guarded by the product version read first; a concurrent
/// refresh surfaces as a conflict.
pub async fn refresh(
    products: &dyn Collection<Product>,
    reviews: &dyn Collection<Review>,
    product_id: &str,
) -> CoreResult<Product> {
    let current = products
        .find_one(product_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Product {} not found", product_id)))?;

    let product_reviews: Vec<Review> = reviews
        .find_many(&|r: &Review| r.product_id == product_id)
        .await?
        .into_iter()
        .map(|v| v.data)
        .collect();

    let aggregates = recompute(product_id, &product_reviews);
    debug!(
        product_id,
        reviews = product_reviews.len(),
        dimensions = aggregates.dimension_averages.len(),
        "Recomputed aggregates"
    );

    let updated = products
        .update(product_id, current.version, aggregates)
        .await?;

    info!(
        product_id,
        average_rating = updated.data.aggregates.average_rating,
        "Product ratings refreshed"
    );
    Ok(updated.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::review::DimensionScore;
    use crate::catalog::BaseCategory;
    use crate::storage::MemoryCollection;
    use crate::votes::VoteTally;
    use chrono::Utc;

    fn review(id: &str, product_id: &str, rating: u8, dims: &[(Dimension, u8)]) -> Review {
        Review {
            id: id.to_string(),
            product_id: product_id.to_string(),
            product_name: String::new(),
            user_id: "u1".to_string(),
            username: "alice".to_string(),
            rating,
            comment: String::new(),
            dimensions: dims
                .iter()
                .map(|&(d, score)| (d, DimensionScore { score, comment: None }))
                .collect(),
            votes: VoteTally::default(),
            date: Utc::now(),
        }
    }

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: "Coca Cola".to_string(),
            price: 1.0,
            category: "Soda".to_string(),
            base_category: BaseCategory::FoodAndBeverages,
            image_url: String::new(),
            aggregates: ProductAggregates::default(),
        }
    }

    #[test]
    fn test_empty_review_set() {
        let aggregates = recompute("p1", &[]);
        assert_eq!(aggregates.average_rating, 0.0);
        assert!(aggregates.dimension_averages.is_empty());
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn test_average_rating_is_unrounded_mean() {
        let reviews = vec![
            review("r1", "p1", 5, &[]),
            review("r2", "p1", 4, &[]),
            review("r3", "p1", 4, &[]),
        ];

        let aggregates = recompute("p1", &reviews);
        assert!((aggregates.average_rating - 13.0 / 3.0).abs() < 1e-12);
        assert_eq!(average_rating(&reviews), aggregates.average_rating);
    }

    #[test]
    fn test_dimension_means_skip_missing_scores() {
        let reviews = vec![
            review("r1", "p1", 5, &[(Dimension::TasteFlavor, 5), (Dimension::PortionSize, 2)]),
            review("r2", "p1", 3, &[(Dimension::TasteFlavor, 4)]),
            review("r3", "p1", 1, &[]),
        ];

        let aggregates = recompute("p1", &reviews);

        assert_eq!(aggregates.average_rating, 3.0);
        assert_eq!(aggregates.dimension_averages.get(&Dimension::TasteFlavor).copied(), Some(4.5));
        assert_eq!(aggregates.dimension_averages.get(&Dimension::PortionSize).copied(), Some(2.0));
        assert_eq!(aggregates.dimension_averages.get(&Dimension::Scent).copied(), None);
        assert_eq!(aggregates.dimension_averages.len(), 2);
    }

    #[test]
    fn test_every_dimension_is_aggregated_independently() {
        let reviews: Vec<Review> = Dimension::ALL
            .iter()
            .enumerate()
            .map(|(i, &d)| review(&format!("r{i}"), "p1", 3, &[(d, (i % 5) as u8 + 1)]))
            .collect();

        let aggregates = recompute("p1", &reviews);
        for (i, dimension) in Dimension::ALL.iter().enumerate() {
            assert_eq!(
                aggregates.dimension_averages.get(dimension).copied(),
                Some(((i % 5) + 1) as f64),
                "{dimension}"
            );
        }
    }

    #[test]
    fn test_reviews_of_other_products_are_ignored() {
        let reviews = vec![
            review("r1", "p1", 2, &[(Dimension::Design, 2)]),
            review("r2", "p2", 5, &[(Dimension::Design, 5)]),
        ];

        let aggregates = recompute("p1", &reviews);
        assert_eq!(aggregates.average_rating, 2.0);
        assert_eq!(aggregates.dimension_averages.get(&Dimension::Design).copied(), Some(2.0));
    }

    #[tokio::test]
    async fn test_refresh_writes_aggregates() {
        let products = MemoryCollection::new();
        let reviews = MemoryCollection::new();
        products.insert(product("p1")).await.unwrap();
        products.insert(product("p2")).await.unwrap();
        reviews
            .insert(review("r1", "p1", 4, &[(Dimension::TasteFlavor, 3)]))
            .await
            .unwrap();
        reviews.insert(review("r2", "p1", 2, &[])).await.unwrap();
        reviews.insert(review("r3", "p2", 5, &[])).await.unwrap();

        let refreshed = refresh(&products, &reviews, "p1").await.unwrap();
        assert_eq!(refreshed.aggregates.average_rating, 3.0);
        assert_eq!(refreshed.aggregates.dimension_averages.get(&Dimension::TasteFlavor).copied(), Some(3.0));

        let stored = products.find_one("p1").await.unwrap().unwrap();
        assert_eq!(stored.version, 2);
        assert_eq!(stored.data, refreshed);

        // Untouched product keeps its defaults
        let other = products.find_one("p2").await.unwrap().unwrap();
        assert_eq!(other.data.aggregates, ProductAggregates::default());
    }

    #[tokio::test]
    async fn test_refresh_unknown_product_creates_nothing() {
        let products: MemoryCollection<Product> = MemoryCollection::new();
        let reviews = MemoryCollection::new();
        reviews.insert(review("r1", "ghost", 4, &[])).await.unwrap();

        let err = refresh(&products, &reviews, "ghost").await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
        assert_eq!(products.count().await.unwrap(), 0);
    }
}
