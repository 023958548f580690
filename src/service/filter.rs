//! Public listing filters.
//!
//! A listing is filtered by exactly one criterion. [`FilterParams`] is the raw
//! query-string shape (`theme`, `sizeMin`/`sizeMax`, `priceMin`/`priceMax`);
//! [`FilterParams::into_request`] turns it into a [`FilterRequest`] and rejects
//! combinations that would leave the criterion ambiguous.

use serde::Deserialize;

use super::ServiceError;
use crate::store::ProductQuery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRequest {
    ByTheme(String),
    BySizeRange { min: u32, max: u32 },
    ByPriceRange { min: u64, max: u64 },
}

impl FilterRequest {
    /// Store query for this filter. Sold-out products never match.
    pub fn query(&self) -> ProductQuery {
        let query = ProductQuery::all().in_stock(true);
        match self {
            FilterRequest::ByTheme(theme) => query.theme(theme.clone()),
            FilterRequest::BySizeRange { min, max } => query.canvas_between(*min, *max),
            FilterRequest::ByPriceRange { min, max } => query.price_between(*min, *max),
        }
    }

    /// Only theme listings echo the theme back.
    pub fn keeps_theme(&self) -> bool {
        matches!(self, FilterRequest::ByTheme(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub theme: Option<String>,
    pub size_min: Option<u32>,
    pub size_max: Option<u32>,
    pub price_min: Option<u64>,
    pub price_max: Option<u64>,
}

impl FilterParams {
    /// `Ok(None)` when no criterion was given.
    pub fn into_request(self) -> Result<Option<FilterRequest>, ServiceError> {
        let theme = self
            .theme
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let size = pair("sizeMin", self.size_min, "sizeMax", self.size_max)?;
        let price = pair("priceMin", self.price_min, "priceMax", self.price_max)?;

        let mut requests = Vec::new();
        if let Some(theme) = theme {
            requests.push(FilterRequest::ByTheme(theme));
        }
        if let Some((min, max)) = size {
            requests.push(FilterRequest::BySizeRange { min, max });
        }
        if let Some((min, max)) = price {
            requests.push(FilterRequest::ByPriceRange { min, max });
        }

        if requests.len() > 1 {
            return Err(ServiceError::Validation(
                "only one of theme, sizeMin/sizeMax or priceMin/priceMax may be given".into(),
            ));
        }
        Ok(requests.pop())
    }
}

fn pair<T>(
    min_name: &str,
    min: Option<T>,
    max_name: &str,
    max: Option<T>,
) -> Result<Option<(T, T)>, ServiceError> {
    match (min, max) {
        (Some(min), Some(max)) => Ok(Some((min, max))),
        (None, None) => Ok(None),
        _ => Err(ServiceError::Validation(format!(
            "{min_name} and {max_name} must be given together"
        ))),
    }
}
