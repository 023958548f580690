//! ProductStore - the document-store collaborator behind the product service.
//!
//! The trait mirrors the primitives a document database offers: filtered
//! finds, find-and-update (increment, patch, add-to-set), delete-with-filter,
//! update-many with pull, random sampling and a grouped sum. Each method is a
//! single atomic operation on the store side; the service never composes
//! read-then-write sequences where atomicity matters.
//!
//! ## Example
//!
//! ```ignore
//! use artshop_products::{InMemoryProductStore, ProductQuery, ProductStore};
//!
//! let store = InMemoryProductStore::new();
//! let product = store.insert(new_product).await?;
//! let in_stock = store.find(&ProductQuery::all().in_stock(true)).await?;
//! ```

mod error;
mod in_memory;
mod query;

use async_trait::async_trait;

use crate::model::{Artist, ArtistId, NewProduct, Product, ProductId, ProductPatch, UserId};

pub use error::StoreError;
pub use in_memory::InMemoryProductStore;
pub use query::ProductQuery;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new product, assigning its id and timestamps.
    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// Every product matching `query`, in insertion order.
    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError>;

    /// Increment the view counter and return the updated document.
    async fn increment_views(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Apply `patch` and return the updated document.
    async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, StoreError>;

    /// Delete the product with `id` only if it also matches `condition`.
    /// Returns the deleted document.
    async fn delete_where(
        &self,
        id: ProductId,
        condition: &ProductQuery,
    ) -> Result<Option<Product>, StoreError>;

    /// Add `user` to the likes of one product. Returns false if no product matched.
    async fn add_like(&self, id: ProductId, user: &UserId) -> Result<bool, StoreError>;

    /// Pull `user` from the likes of every matching product. Returns how many changed.
    async fn remove_like(&self, query: &ProductQuery, user: &UserId) -> Result<usize, StoreError>;

    /// Up to `size` matching products chosen at random.
    async fn sample(&self, query: &ProductQuery, size: usize) -> Result<Vec<Product>, StoreError>;

    /// Up to `limit` products, most recently updated first.
    async fn latest(&self, limit: usize) -> Result<Vec<Product>, StoreError>;

    /// Sum of prices over matching products; `None` when nothing matches.
    async fn sum_price(&self, query: &ProductQuery) -> Result<Option<u64>, StoreError>;

    /// Artists for the given references. Unknown ids are skipped.
    async fn artists(&self, ids: &[ArtistId]) -> Result<Vec<Artist>, StoreError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let mut found = self.find(&ProductQuery::all().with_ids([id])).await?;
        Ok(found.pop())
    }
}
