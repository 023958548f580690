//! Models - the Product and Artist documents plus the payloads that create and patch them.
//!
//! A [`Product`] is an artwork listing. It references an [`Artist`] by id and
//! carries the set of users who favorited it in `likes`. Field names follow the
//! storefront's JSON wire format (`_id`, `inStock`, `info.canvas`, ...).
//!
//! ## Example
//!
//! ```ignore
//! use artshop_products::{NewProduct, ProductPatch};
//!
//! let new: NewProduct = serde_json::from_value(json!({
//!     "title": "Blue Hour",
//!     "price": 120000,
//!     "image": "blue-hour.jpg",
//!     "theme": "landscape",
//!     "info": { "size": "53.0x45.5cm", "canvas": 10 },
//!     "artist": artist_id,
//! }))?;
//! new.validate()?;
//! ```

mod ids;
mod patch;
mod view;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use ids::{ArtistId, ProductId, UserId};
pub use patch::{InfoPatch, ProductPatch};
pub use view::{
    ArtistName, ArtistSummary, CartItem, FavoriteItem, FilteredProduct, ImageOnly, InfoSummary,
    Message, PriceTotal, ProductDetail, ProductListing, ProductPage,
};

/// A payload field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct InvalidField {
    pub field: &'static str,
    pub reason: &'static str,
}

impl InvalidField {
    pub(crate) fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

/// Physical description of the artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    /// Display size, e.g. `"53.0x45.5cm"`.
    pub size: String,
    /// Canvas number; the orderable size used by range filters.
    pub canvas: u32,
    #[serde(default)]
    pub details: String,
    /// When the artwork itself was made, as written by the seller.
    #[serde(default)]
    pub created_at: String,
}

/// A stored product document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub title: String,
    pub price: u64,
    pub image: String,
    pub theme: String,
    pub art_code: String,
    pub in_stock: bool,
    /// View counter, bumped on every detail fetch.
    pub count: u64,
    pub info: ProductInfo,
    pub artist: ArtistId,
    pub likes: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether `user` has favorited this product.
    pub fn is_liked_by(&self, user: &UserId) -> bool {
        self.likes.contains(user)
    }

    /// Add `user` to `likes`. Returns false if already present.
    pub fn add_like(&mut self, user: &UserId) -> bool {
        if self.is_liked_by(user) {
            return false;
        }
        self.likes.push(user.clone());
        true
    }

    /// Remove `user` from `likes`. Returns false if absent.
    pub fn remove_like(&mut self, user: &UserId) -> bool {
        let before = self.likes.len();
        self.likes.retain(|u| u != user);
        self.likes.len() != before
    }
}

/// A referenced artist. Never created or mutated by the product service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(rename = "_id")]
    pub id: ArtistId,
    pub name: String,
    #[serde(default)]
    pub aka: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub record: String,
}

fn default_in_stock() -> bool {
    true
}

/// Payload for creating a product. Server-managed fields (`_id`, `count`,
/// `likes`, timestamps) are not accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewProduct {
    pub title: String,
    pub price: u64,
    pub image: String,
    pub theme: String,
    #[serde(default)]
    pub art_code: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    pub info: ProductInfo,
    pub artist: ArtistId,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), InvalidField> {
        if self.title.trim().is_empty() {
            return Err(InvalidField::new("title", "must not be empty"));
        }
        if self.price == 0 {
            return Err(InvalidField::new("price", "must be greater than zero"));
        }
        if self.image.trim().is_empty() {
            return Err(InvalidField::new("image", "must not be empty"));
        }
        Ok(())
    }

    /// Materialize the stored document with store-assigned fields.
    pub fn into_product(self, id: ProductId, now: DateTime<Utc>) -> Product {
        Product {
            id,
            title: self.title,
            price: self.price,
            image: self.image,
            theme: self.theme,
            art_code: self.art_code,
            in_stock: self.in_stock,
            count: 0,
            info: self.info,
            artist: self.artist,
            likes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
