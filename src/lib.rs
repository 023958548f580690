//! Product service for an artwork storefront.
//!
//! Listings with artist expansion, in-stock filtered views, a detail page with
//! recommendations, stock-guarded deletes, cart checks and totals, and per-user
//! favorites, over an injected [`ProductStore`].

pub mod config;
#[cfg(feature = "http")]
pub mod http;
mod model;
pub mod seed;
mod service;
mod store;

pub use config::{Config, ConfigError};
pub use model::{
    Artist, ArtistId, ArtistName, ArtistSummary, CartItem, FavoriteItem, FilteredProduct,
    ImageOnly, InfoPatch, InfoSummary, InvalidField, Message, NewProduct, PriceTotal, Product,
    ProductDetail, ProductId, ProductInfo, ProductListing, ProductPage, ProductPatch, UserId,
};
pub use seed::{Seed, SeedError};
pub use service::{
    parse_ids, FilterParams, FilterRequest, ProductService, ServiceError, Session, ADMIN_ROLE,
    LATEST_LIMIT, RANDOM_SAMPLE, ROLE_KEY, SAME_ARTIST_SAMPLE, TOTAL_PRICE_LABEL, USER_ID_KEY,
};
pub use store::{InMemoryProductStore, ProductQuery, ProductStore, StoreError};
