//! Request parameter shapes that axum's stock extractors do not cover.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use serde::Deserialize;

use crate::model::ProductId;
use crate::service::{parse_ids, ServiceError};

const PRODUCT_ID: &str = "productId";
const PRODUCT_ID_LIST: &str = "productId[]";

/// Every `productId` in a query string. Accepts repeated keys
/// (`?productId=a&productId=b`) and the bracket form (`productId[]=a`).
pub fn product_ids(query: Option<&str>) -> Result<Vec<ProductId>, ServiceError> {
    let raw: Vec<String> = url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .filter(|(key, _)| key == PRODUCT_ID || key == PRODUCT_ID_LIST)
        .map(|(_, value)| value.into_owned())
        .collect();
    parse_ids(raw)
}

/// A JSON field that may hold one id or an array of ids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn parse(&self) -> Result<Vec<ProductId>, ServiceError> {
        match self {
            OneOrMany::One(id) => parse_ids([id]),
            OneOrMany::Many(ids) => parse_ids(ids),
        }
    }
}

/// Body of `PATCH /api/products/zzim`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZzimBody {
    pub product_id: OneOrMany,
    pub zzim: Option<bool>,
}

pub fn path_id(raw: &str) -> Result<ProductId, ServiceError> {
    ProductId::parse(raw)
        .map_err(|_| ServiceError::Validation(format!("invalid product id: {raw}")))
}

pub fn json_rejection(rejection: JsonRejection) -> ServiceError {
    ServiceError::Validation(rejection.body_text())
}

pub fn query_rejection(rejection: QueryRejection) -> ServiceError {
    ServiceError::Validation(rejection.body_text())
}
