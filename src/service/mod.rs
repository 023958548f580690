//! Product service: the query and mutation operations behind the storefront API.
//!
//! `ProductService<S>` owns an injected [`ProductStore`] and implements every
//! product operation on top of it: listings with artist expansion, filtered
//! public listings, the detail page with recommendations, stock-guarded
//! deletes, cart checks and totals, and favorites.
//!
//! ## Quick Start
//!
//! ```ignore
//! use artshop_products::{InMemoryProductStore, ProductService, FilterRequest};
//!
//! let service = ProductService::new(InMemoryProductStore::new());
//! let created = service.create(new_product).await?;
//! let page = service.get_by_id(created.id).await?;
//! let abstracts = service
//!     .list_by_filter(&FilterRequest::ByTheme("abstract".into()))
//!     .await?;
//! ```

mod error;
mod filter;
mod session;

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::model::{
    Artist, ArtistId, CartItem, FavoriteItem, FilteredProduct, ImageOnly, Message, NewProduct,
    PriceTotal, Product, ProductDetail, ProductId, ProductListing, ProductPage, ProductPatch,
    UserId,
};
use crate::store::{ProductQuery, ProductStore};

pub use error::ServiceError;
pub use filter::{FilterParams, FilterRequest};
pub use session::{Session, ADMIN_ROLE, ROLE_KEY, USER_ID_KEY};

/// Same-artist recommendations on the detail page.
pub const SAME_ARTIST_SAMPLE: usize = 4;
/// Other-artist recommendations on the detail page.
pub const RANDOM_SAMPLE: usize = 8;
pub const LATEST_LIMIT: usize = 6;
pub const TOTAL_PRICE_LABEL: &str = "cart total";

/// Parse client-supplied ids into [`ProductId`]s.
pub fn parse_ids<I, T>(raw: I) -> Result<Vec<ProductId>, ServiceError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    raw.into_iter()
        .map(|id| {
            let id = id.as_ref();
            ProductId::parse(id)
                .map_err(|_| ServiceError::Validation(format!("invalid product id: {id}")))
        })
        .collect()
}

pub struct ProductService<S> {
    store: S,
}

impl<S: ProductStore> ProductService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the artist references of `products` in one store call.
    async fn artists_for(
        &self,
        products: &[Product],
    ) -> Result<HashMap<ArtistId, Artist>, ServiceError> {
        let mut ids: Vec<ArtistId> = products.iter().map(|p| p.artist).collect();
        ids.sort();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let artists = self.store.artists(&ids).await?;
        Ok(artists.into_iter().map(|a| (a.id, a)).collect())
    }

    pub async fn create(&self, product: NewProduct) -> Result<Product, ServiceError> {
        product.validate()?;
        let product = self.store.insert(product).await?;
        info!(product_id = %product.id, title = %product.title, "product created");
        Ok(product)
    }

    /// Every product, sold out included, with the artist fully expanded.
    pub async fn list_all(&self) -> Result<Vec<ProductListing>, ServiceError> {
        let products = self.store.find(&ProductQuery::all()).await?;
        let artists = self.artists_for(&products).await?;
        debug!(count = products.len(), "listed all products");
        Ok(products
            .iter()
            .map(|p| ProductListing::new(p, artists.get(&p.artist)))
            .collect())
    }

    pub async fn list_by_filter(
        &self,
        filter: &FilterRequest,
    ) -> Result<Vec<FilteredProduct>, ServiceError> {
        let products = self.store.find(&filter.query()).await?;
        let artists = self.artists_for(&products).await?;
        debug!(?filter, count = products.len(), "filtered products");
        let keep_theme = filter.keeps_theme();
        Ok(products
            .iter()
            .map(|p| FilteredProduct::new(p, artists.get(&p.artist), keep_theme))
            .collect())
    }

    /// Detail page. Counts the view, then samples recommendations from the
    /// same artist and from everyone else.
    pub async fn get_by_id(&self, id: ProductId) -> Result<ProductPage, ServiceError> {
        let product = self
            .store
            .increment_views(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("product {id} not found")))?;

        let artist = self.store.artists(&[product.artist]).await?.pop();

        let by_artist = self
            .store
            .sample(
                &ProductQuery::all().by_artist(product.artist),
                SAME_ARTIST_SAMPLE,
            )
            .await?;
        let by_random = self
            .store
            .sample(
                &ProductQuery::all().not_by_artist(product.artist),
                RANDOM_SAMPLE,
            )
            .await?;

        debug!(product_id = %id, views = product.count, "product viewed");
        Ok(ProductPage {
            product_detail: ProductDetail::new(&product, artist.as_ref()),
            products_by_artist: by_artist.iter().map(ImageOnly::from).collect(),
            products_by_random: by_random.iter().map(ImageOnly::from).collect(),
        })
    }

    pub async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, ServiceError> {
        patch.validate()?;
        let product = self
            .store
            .update(id, &patch)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("product {id} not found")))?;
        info!(product_id = %id, "product updated");
        Ok(product)
    }

    /// Delete an in-stock product. Sold-out products are kept for purchase history.
    pub async fn delete(&self, id: ProductId) -> Result<Message, ServiceError> {
        let deleted = self
            .store
            .delete_where(id, &ProductQuery::all().in_stock(true))
            .await?;

        match deleted {
            Some(product) => {
                info!(product_id = %id, title = %product.title, "product deleted");
                Ok(Message::new("product deleted"))
            }
            None => {
                warn!(product_id = %id, "delete refused: product sold out or missing");
                Err(ServiceError::BusinessRule(
                    "this product cannot be deleted".into(),
                ))
            }
        }
    }

    pub async fn list_latest(&self) -> Result<Vec<ImageOnly>, ServiceError> {
        let products = self.store.latest(LATEST_LIMIT).await?;
        if products.is_empty() {
            return Err(ServiceError::NotFound("no products found".into()));
        }
        Ok(products.iter().map(ImageOnly::from).collect())
    }

    /// Stock check for cart items. Unknown ids are skipped.
    pub async fn list_by_ids(&self, ids: &[ProductId]) -> Result<Vec<CartItem>, ServiceError> {
        let products = self
            .store
            .find(&ProductQuery::all().with_ids(ids.iter().copied()))
            .await?;
        let artists = self.artists_for(&products).await?;
        Ok(products
            .iter()
            .map(|p| CartItem::new(p, artists.get(&p.artist)))
            .collect())
    }

    /// Total price of the given products; `None` when none of them exist.
    pub async fn sum_price(&self, ids: &[ProductId]) -> Result<Option<PriceTotal>, ServiceError> {
        if ids.is_empty() {
            return Ok(None);
        }
        let total = self
            .store
            .sum_price(&ProductQuery::all().with_ids(ids.iter().copied()))
            .await?;
        Ok(total.map(|total_price| PriceTotal {
            label: TOTAL_PRICE_LABEL.to_string(),
            total_price,
        }))
    }

    /// Favorite (`Some(true)`) one product or unfavorite (`Some(false)`) any
    /// number of products for `user`. Both directions are idempotent.
    pub async fn toggle_favorite(
        &self,
        user: &UserId,
        ids: &[ProductId],
        favorite: Option<bool>,
    ) -> Result<Message, ServiceError> {
        let Some(favorite) = favorite else {
            return Err(ServiceError::BusinessRule(
                "expected boolean zzim flag".into(),
            ));
        };

        if favorite {
            let [id] = ids else {
                return Err(ServiceError::Validation(
                    "exactly one productId is required to add a favorite".into(),
                ));
            };
            if !self.store.add_like(*id, user).await? {
                return Err(ServiceError::NotFound(format!("product {id} not found")));
            }
            info!(user = %user, product_id = %id, "favorite added");
            return Ok(Message::new("product added to favorites"));
        }

        if ids.is_empty() {
            return Err(ServiceError::Validation("productId is required".into()));
        }
        let changed = self
            .store
            .remove_like(&ProductQuery::all().with_ids(ids.iter().copied()), user)
            .await?;
        info!(user = %user, requested = ids.len(), changed, "favorites removed");
        Ok(Message::new("product removed from favorites"))
    }

    pub async fn list_favorites(&self, user: &UserId) -> Result<Vec<FavoriteItem>, ServiceError> {
        let products = self
            .store
            .find(&ProductQuery::all().liked_by(user.clone()))
            .await?;
        let artists = self.artists_for(&products).await?;
        Ok(products
            .iter()
            .map(|p| FavoriteItem::new(p, artists.get(&p.artist)))
            .collect())
    }
}
