//! Partial updates. Only the fields listed here are writable by an admin patch;
//! anything else in the payload (including `_id`, `count`, `likes` and the
//! timestamps) is rejected at deserialization.

use serde::Deserialize;

use super::{ArtistId, InvalidField, Product};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InfoPatch {
    pub size: Option<String>,
    pub canvas: Option<u32>,
    pub details: Option<String>,
    pub created_at: Option<String>,
}

impl InfoPatch {
    fn is_empty(&self) -> bool {
        self.size.is_none()
            && self.canvas.is_none()
            && self.details.is_none()
            && self.created_at.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub price: Option<u64>,
    pub image: Option<String>,
    pub theme: Option<String>,
    pub art_code: Option<String>,
    pub in_stock: Option<bool>,
    pub artist: Option<ArtistId>,
    pub info: Option<InfoPatch>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.theme.is_none()
            && self.art_code.is_none()
            && self.in_stock.is_none()
            && self.artist.is_none()
            && self.info.as_ref().map_or(true, InfoPatch::is_empty)
    }

    pub fn validate(&self) -> Result<(), InvalidField> {
        if self.is_empty() {
            return Err(InvalidField::new("patch", "no updatable fields given"));
        }
        if matches!(&self.title, Some(title) if title.trim().is_empty()) {
            return Err(InvalidField::new("title", "must not be empty"));
        }
        if self.price == Some(0) {
            return Err(InvalidField::new("price", "must be greater than zero"));
        }
        if matches!(&self.image, Some(image) if image.trim().is_empty()) {
            return Err(InvalidField::new("image", "must not be empty"));
        }
        Ok(())
    }

    /// Write every present field onto `product`. Timestamps are left to the store.
    pub fn apply(&self, product: &mut Product) {
        if let Some(title) = &self.title {
            product.title = title.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(image) = &self.image {
            product.image = image.clone();
        }
        if let Some(theme) = &self.theme {
            product.theme = theme.clone();
        }
        if let Some(art_code) = &self.art_code {
            product.art_code = art_code.clone();
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = in_stock;
        }
        if let Some(artist) = self.artist {
            product.artist = artist;
        }
        if let Some(info) = &self.info {
            if let Some(size) = &info.size {
                product.info.size = size.clone();
            }
            if let Some(canvas) = info.canvas {
                product.info.canvas = canvas;
            }
            if let Some(details) = &info.details {
                product.info.details = details.clone();
            }
            if let Some(created_at) = &info.created_at {
                product.info.created_at = created_at.clone();
            }
        }
    }
}
