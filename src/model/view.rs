//! Response projections. Each view is the exact field set one endpoint returns,
//! with the artist reference expanded to as much of the [`Artist`] as the
//! endpoint exposes. A dangling artist reference expands to `null`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Artist, ArtistId, Product, ProductId, ProductInfo, UserId};

/// Artist expanded with every public field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    #[serde(rename = "_id")]
    pub id: ArtistId,
    pub name: String,
    pub aka: String,
    pub code: String,
    pub record: String,
}

impl From<&Artist> for ArtistSummary {
    fn from(artist: &Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name.clone(),
            aka: artist.aka.clone(),
            code: artist.code.clone(),
            record: artist.record.clone(),
        }
    }
}

/// Artist expanded with the name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistName {
    #[serde(rename = "_id")]
    pub id: ArtistId,
    pub name: String,
}

impl From<&Artist> for ArtistName {
    fn from(artist: &Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name.clone(),
        }
    }
}

/// `info` without the long-text details and the creation note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoSummary {
    pub size: String,
    pub canvas: u32,
}

impl From<&ProductInfo> for InfoSummary {
    fn from(info: &ProductInfo) -> Self {
        Self {
            size: info.size.clone(),
            canvas: info.canvas,
        }
    }
}

/// Full document for administrative listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub title: String,
    pub price: u64,
    pub image: String,
    pub theme: String,
    pub art_code: String,
    pub in_stock: bool,
    pub count: u64,
    pub info: ProductInfo,
    pub artist: Option<ArtistSummary>,
    pub likes: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductListing {
    pub fn new(product: &Product, artist: Option<&Artist>) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            theme: product.theme.clone(),
            art_code: product.art_code.clone(),
            in_stock: product.in_stock,
            count: product.count,
            info: product.info.clone(),
            artist: artist.map(ArtistSummary::from),
            likes: product.likes.clone(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Detail page document: no view counter, no update timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub title: String,
    pub price: u64,
    pub image: String,
    pub theme: String,
    pub art_code: String,
    pub in_stock: bool,
    pub info: ProductInfo,
    pub artist: Option<ArtistSummary>,
    pub likes: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl ProductDetail {
    pub fn new(product: &Product, artist: Option<&Artist>) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            theme: product.theme.clone(),
            art_code: product.art_code.clone(),
            in_stock: product.in_stock,
            info: product.info.clone(),
            artist: artist.map(ArtistSummary::from),
            likes: product.likes.clone(),
            created_at: product.created_at,
        }
    }
}

/// Public filtered listing: internal code, details and creation note stripped.
/// `theme` is kept only when filtering by theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredProduct {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub title: String,
    pub price: u64,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    pub in_stock: bool,
    pub count: u64,
    pub info: InfoSummary,
    pub artist: Option<ArtistName>,
    pub likes: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FilteredProduct {
    pub fn new(product: &Product, artist: Option<&Artist>, keep_theme: bool) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            theme: keep_theme.then(|| product.theme.clone()),
            in_stock: product.in_stock,
            count: product.count,
            info: InfoSummary::from(&product.info),
            artist: artist.map(ArtistName::from),
            likes: product.likes.clone(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Thumbnail entry used by the latest and recommendation lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageOnly {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub image: String,
}

impl From<&Product> for ImageOnly {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            image: product.image.clone(),
        }
    }
}

/// Fields a cart needs to re-check stock before checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub info: InfoSummary,
    pub price: u64,
    pub in_stock: bool,
    pub artist: Option<ArtistName>,
}

impl CartItem {
    pub fn new(product: &Product, artist: Option<&Artist>) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            image: product.image.clone(),
            info: InfoSummary::from(&product.info),
            price: product.price,
            in_stock: product.in_stock,
            artist: artist.map(ArtistName::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteItem {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub info: InfoSummary,
    pub price: u64,
    pub artist: Option<ArtistName>,
}

impl FavoriteItem {
    pub fn new(product: &Product, artist: Option<&Artist>) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            image: product.image.clone(),
            info: InfoSummary::from(&product.info),
            price: product.price,
            artist: artist.map(ArtistName::from),
        }
    }
}

/// Detail fetch result with two recommendation lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub product_detail: ProductDetail,
    pub products_by_artist: Vec<ImageOnly>,
    pub products_by_random: Vec<ImageOnly>,
}

/// Grouped price sum for a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTotal {
    #[serde(rename = "_id")]
    pub label: String,
    pub total_price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
