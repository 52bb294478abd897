use crate::auth::Caller;
use crate::catalog::{
    category_names_in, group_by_category, BaseCategory, Category, NewProduct, NewReview, Product,
    Review,
};
use crate::error::{CoreError, CoreResult};
use crate::ratings;
use crate::search::{self, DEFAULT_THRESHOLD};
use crate::storage::Collection;
use crate::votes::{self, Axis};
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// How often a write rejected by a concurrent writer is attempted again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
}

impl RetryPolicy {
    /// A single attempt: conflicts go straight back to the caller.
    pub fn none() -> Self {
        Self { attempts: 1 }
    }

    pub fn attempts(attempts: u32) -> Self {
        Self {
            attempts: attempts.max(1),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    pub reviews: Vec<Review>,
    /// Computed from `reviews` at read time.
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatches {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

/// Entry point for every product, review, vote and search operation.
#[derive(Clone)]
pub struct ReviewCoordinator {
    products: Arc<dyn Collection<Product>>,
    reviews: Arc<dyn Collection<Review>>,
    threshold: usize,
    retry: RetryPolicy,
}

impl ReviewCoordinator {
    pub fn new(products: Arc<dyn Collection<Product>>, reviews: Arc<dyn Collection<Review>>) -> Self {
        Self {
            products,
            reviews,
            threshold: DEFAULT_THRESHOLD,
            retry: RetryPolicy::none(),
        }
    }

    /// Coordinator over fresh in-memory collections.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(crate::storage::MemoryCollection::<Product>::new()),
            Arc::new(crate::storage::MemoryCollection::<Review>::new()),
        )
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn retrying<T, F, Fut>(&self, operation: &'static str, mut attempt: F) -> CoreResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CoreResult<T>>,
    {
        let mut tries = 1;
        loop {
            match attempt().await {
                Err(err) if err.is_conflict() && tries < self.retry.attempts => {
                    warn!(operation, attempt = tries, error = %err, "Write conflict, retrying");
                    tries += 1;
                }
                result => return result,
            }
        }
    }

    pub async fn submit_product(&self, new: NewProduct) -> CoreResult<Product> {
        let base_category = new.validate()?;
        let product = new.into_product(Uuid::new_v4().to_string(), base_category);

        let stored = self.products.insert(product).await?;
        info!(product_id = %stored.data.id, name = %stored.data.name, "Product added");
        Ok(stored.data)
    }

    /// Store a review stamped with the caller and the product's current
    /// name, then refresh the product's aggregates.
    pub async fn submit_review(&self, caller: &Caller, new: NewReview) -> CoreResult<Review> {
        new.validate()?;

        let product = self
            .products
            .find_one(&new.product_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Product {} not found", new.product_id)))?
            .data;

        let review = Review {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            user_id: caller.user_id.clone(),
            username: caller.username.clone(),
            rating: new.rating,
            comment: new.comment,
            dimensions: new.dimensions,
            votes: Default::default(),
            date: Utc::now(),
        };

        let stored = self.reviews.insert(review).await?;
        info!(
            review_id = %stored.data.id,
            product_id = %product.id,
            rating = stored.data.rating,
            "Review added"
        );

        self.refresh_product(&product.id).await?;
        Ok(stored.data)
    }

    /// Recompute and persist the aggregates of one product.
    pub async fn refresh_product(&self, product_id: &str) -> CoreResult<Product> {
        self.retrying("refresh_product", || {
            ratings::refresh(self.products.as_ref(), self.reviews.as_ref(), product_id)
        })
        .await
    }

    /// Toggle the caller's vote on a review along `axis`.
    pub async fn vote(&self, caller: &Caller, review_id: &str, axis: Axis) -> CoreResult<Review> {
        self.retrying("vote", || self.vote_once(&caller.user_id, review_id, axis))
            .await
    }

    async fn vote_once(&self, user_id: &str, review_id: &str, axis: Axis) -> CoreResult<Review> {
        let current = self
            .reviews
            .find_one(review_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Review {} not found", review_id)))?;

        let tally = votes::toggle(&current.data.votes, axis, user_id);
        let updated = self.reviews.update(review_id, current.version, tally).await?;

        info!(
            review_id,
            user_id,
            axis = axis.as_str(),
            state = ?updated.data.votes.state_of(user_id),
            likes = updated.data.votes.likes,
            dislikes = updated.data.votes.dislikes,
            "Vote toggled"
        );
        Ok(updated.data)
    }

    pub async fn list_products(&self) -> CoreResult<Vec<Product>> {
        Ok(self.products.all().await?)
    }

    pub async fn product_detail(&self, product_id: &str) -> CoreResult<ProductDetail> {
        let product = self
            .products
            .find_one(product_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Product {} not found", product_id)))?
            .data;

        let reviews: Vec<Review> = self
            .reviews
            .find_many(&|r: &Review| r.product_id == product_id)
            .await?
            .into_iter()
            .map(|v| v.data)
            .collect();

        Ok(ProductDetail {
            average_rating: ratings::average_rating(&reviews),
            product,
            reviews,
        })
    }

    pub async fn categories(&self) -> CoreResult<Vec<Category>> {
        Ok(group_by_category(&self.products.all().await?))
    }

    pub async fn categories_by_base(&self, base_category: &str) -> CoreResult<Vec<String>> {
        if base_category.trim().is_empty() {
            return Err(CoreError::Validation("Base category is missing".to_string()));
        }
        let base = BaseCategory::from_name(base_category)
            .ok_or_else(|| CoreError::Validation("Invalid base category".to_string()))?;

        Ok(category_names_in(&self.products.all().await?, base))
    }

    /// The caller's reviews, each carrying its product's current name.
    pub async fn reviews_by_user(&self, user_id: &str) -> CoreResult<Vec<Review>> {
        let own = self
            .reviews
            .find_many(&|r: &Review| r.user_id == user_id)
            .await?;

        let mut reviews = Vec::with_capacity(own.len());
        for versioned in own {
            let mut review = versioned.data;
            let product = self
                .products
                .find_one(&review.product_id)
                .await?
                .ok_or_else(|| {
                    CoreError::NotFound(format!("Product {} not found", review.product_id))
                })?;
            review.product_name = product.data.name;
            reviews.push(review);
        }
        Ok(reviews)
    }

    pub async fn search(&self, query: &str) -> CoreResult<SearchMatches> {
        if query.trim().is_empty() {
            return Err(CoreError::Validation("Search query cannot be empty".to_string()));
        }

        let products = self.products.all().await?;
        let categories = group_by_category(&products);
        let (products, categories) = search::search(query, &products, &categories, self.threshold);

        info!(
            query,
            products = products.len(),
            categories = categories.len(),
            "Search complete"
        );

        if products.is_empty() && categories.is_empty() {
            return Err(CoreError::NotFound(
                "No products or categories match the search".to_string(),
            ));
        }

        Ok(SearchMatches {
            products,
            categories,
        })
    }

    /// Number of stored products and reviews.
    pub async fn counts(&self) -> CoreResult<(usize, usize)> {
        Ok((self.products.count().await?, self.reviews.count().await?))
    }
}
