//! InMemoryProductStore - Vec-backed product store for development and testing.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{ProductQuery, ProductStore, StoreError};
use crate::model::{Artist, ArtistId, NewProduct, Product, ProductId, ProductPatch, UserId};

/// Internal stored representation of a product.
struct StoredProduct {
    product: Product,
    /// Store-wide write sequence of the last change; breaks `updated_at` ties.
    revision: u64,
}

#[derive(Default)]
struct Collections {
    /// Insertion order is the natural order of `find`.
    products: Vec<StoredProduct>,
    artists: HashMap<ArtistId, Artist>,
    revision: u64,
}

impl Collections {
    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|s| s.product.id == id)
    }

    fn next_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    /// Stamp a write on the product at `index`.
    fn touch(&mut self, index: usize) {
        let revision = self.next_revision();
        let stored = &mut self.products[index];
        stored.product.updated_at = Utc::now();
        stored.revision = revision;
    }
}

/// In-memory product store.
///
/// Every mutation runs under a single write lock, so each operation is atomic
/// with respect to the others. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    inner: Arc<RwLock<Collections>>,
}

impl InMemoryProductStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an artist so products can reference it.
    pub fn put_artist(&self, artist: Artist) -> Result<(), StoreError> {
        let mut inner = self.write("put_artist")?;
        inner.artists.insert(artist.id, artist);
        Ok(())
    }

    fn read(
        &self,
        operation: &'static str,
    ) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }

    fn write(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut inner = self.write("insert")?;
        let product = product.into_product(ProductId::new(), Utc::now());
        let revision = inner.next_revision();
        inner.products.push(StoredProduct {
            product: product.clone(),
            revision,
        });
        Ok(product)
    }

    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError> {
        let inner = self.read("find")?;
        Ok(inner
            .products
            .iter()
            .filter(|s| query.matches(&s.product))
            .map(|s| s.product.clone())
            .collect())
    }

    async fn increment_views(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let mut inner = self.write("increment_views")?;
        let Some(index) = inner.position(id) else {
            return Ok(None);
        };
        inner.products[index].product.count += 1;
        inner.touch(index);
        Ok(Some(inner.products[index].product.clone()))
    }

    async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        let mut inner = self.write("update")?;
        let Some(index) = inner.position(id) else {
            return Ok(None);
        };
        patch.apply(&mut inner.products[index].product);
        inner.touch(index);
        Ok(Some(inner.products[index].product.clone()))
    }

    async fn delete_where(
        &self,
        id: ProductId,
        condition: &ProductQuery,
    ) -> Result<Option<Product>, StoreError> {
        let mut inner = self.write("delete_where")?;
        let index = inner
            .products
            .iter()
            .position(|s| s.product.id == id && condition.matches(&s.product));
        Ok(index.map(|index| inner.products.remove(index).product))
    }

    async fn add_like(&self, id: ProductId, user: &UserId) -> Result<bool, StoreError> {
        let mut inner = self.write("add_like")?;
        let Some(index) = inner.position(id) else {
            return Ok(false);
        };
        if inner.products[index].product.add_like(user) {
            inner.touch(index);
        }
        Ok(true)
    }

    async fn remove_like(
        &self,
        query: &ProductQuery,
        user: &UserId,
    ) -> Result<usize, StoreError> {
        let mut inner = self.write("remove_like")?;
        let mut changed = Vec::new();
        for (index, stored) in inner.products.iter_mut().enumerate() {
            if query.matches(&stored.product) && stored.product.remove_like(user) {
                changed.push(index);
            }
        }
        for &index in &changed {
            inner.touch(index);
        }
        Ok(changed.len())
    }

    async fn sample(&self, query: &ProductQuery, size: usize) -> Result<Vec<Product>, StoreError> {
        let mut matching = self.find(query).await?;
        fastrand::shuffle(&mut matching);
        matching.truncate(size);
        Ok(matching)
    }

    async fn latest(&self, limit: usize) -> Result<Vec<Product>, StoreError> {
        let inner = self.read("latest")?;
        let mut stored: Vec<&StoredProduct> = inner.products.iter().collect();
        stored.sort_by(|a, b| {
            b.product
                .updated_at
                .cmp(&a.product.updated_at)
                .then(b.revision.cmp(&a.revision))
        });
        Ok(stored
            .into_iter()
            .take(limit)
            .map(|s| s.product.clone())
            .collect())
    }

    async fn sum_price(&self, query: &ProductQuery) -> Result<Option<u64>, StoreError> {
        let inner = self.read("sum_price")?;
        let mut matched = false;
        let mut total: u64 = 0;
        for stored in inner.products.iter().filter(|s| query.matches(&s.product)) {
            matched = true;
            total = total
                .checked_add(stored.product.price)
                .ok_or(StoreError::Overflow("sum_price"))?;
        }
        Ok(matched.then_some(total))
    }

    async fn artists(&self, ids: &[ArtistId]) -> Result<Vec<Artist>, StoreError> {
        let inner = self.read("artists")?;
        Ok(ids
            .iter()
            .filter_map(|id| inner.artists.get(id).cloned())
            .collect())
    }
}
