//! Startup fixtures: artists and products loaded into an empty in-memory store.
//!
//! ```json
//! {
//!   "artists": [{ "_id": "…", "name": "Kim", "aka": "K", "code": "KIM01", "record": "" }],
//!   "products": [{ "title": "Blue Hour", "price": 120000, "image": "…", "theme": "landscape",
//!                  "info": { "size": "53.0x45.5cm", "canvas": 10 }, "artist": "…" }]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::model::{Artist, InvalidField, NewProduct};
use crate::store::{InMemoryProductStore, ProductStore, StoreError};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid seed product {index}: {source}")]
    Invalid { index: usize, source: InvalidField },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub products: Vec<NewProduct>,
}

impl Seed {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Validate every product, then load artists and products into `store`.
    pub async fn apply(self, store: &InMemoryProductStore) -> Result<(), SeedError> {
        for (index, product) in self.products.iter().enumerate() {
            product
                .validate()
                .map_err(|source| SeedError::Invalid { index, source })?;
        }

        let artists = self.artists.len();
        for artist in self.artists {
            store.put_artist(artist)?;
        }
        let products = self.products.len();
        for product in self.products {
            store.insert(product).await?;
        }

        info!(artists, products, "seed loaded");
        Ok(())
    }
}
