use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::model::{ArtistId, Product, ProductId, UserId};

/// A filter document. Every condition that is set must hold (logical AND);
/// an empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub ids: Option<BTreeSet<ProductId>>,
    pub theme: Option<String>,
    pub in_stock: Option<bool>,
    pub canvas: Option<RangeInclusive<u32>>,
    pub price: Option<RangeInclusive<u64>>,
    pub artist: Option<ArtistId>,
    pub artist_ne: Option<ArtistId>,
    pub liked_by: Option<UserId>,
}

impl ProductQuery {
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to a set of ids. Duplicates collapse.
    pub fn with_ids(mut self, ids: impl IntoIterator<Item = ProductId>) -> Self {
        self.ids = Some(ids.into_iter().collect());
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    pub fn canvas_between(mut self, min: u32, max: u32) -> Self {
        self.canvas = Some(min..=max);
        self
    }

    pub fn price_between(mut self, min: u64, max: u64) -> Self {
        self.price = Some(min..=max);
        self
    }

    pub fn by_artist(mut self, artist: ArtistId) -> Self {
        self.artist = Some(artist);
        self
    }

    pub fn not_by_artist(mut self, artist: ArtistId) -> Self {
        self.artist_ne = Some(artist);
        self
    }

    pub fn liked_by(mut self, user: UserId) -> Self {
        self.liked_by = Some(user);
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ids) = &self.ids {
            if !ids.contains(&product.id) {
                return false;
            }
        }
        if let Some(theme) = &self.theme {
            if &product.theme != theme {
                return false;
            }
        }
        if let Some(in_stock) = self.in_stock {
            if product.in_stock != in_stock {
                return false;
            }
        }
        if let Some(canvas) = &self.canvas {
            if !canvas.contains(&product.info.canvas) {
                return false;
            }
        }
        if let Some(price) = &self.price {
            if !price.contains(&product.price) {
                return false;
            }
        }
        if let Some(artist) = &self.artist {
            if &product.artist != artist {
                return false;
            }
        }
        if let Some(artist) = &self.artist_ne {
            if &product.artist == artist {
                return false;
            }
        }
        if let Some(user) = &self.liked_by {
            if !product.is_liked_by(user) {
                return false;
            }
        }
        true
    }
}
