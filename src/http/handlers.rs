use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use super::params::{self, ZzimBody};
use super::session_from_headers;
use crate::model::{
    CartItem, FavoriteItem, FilteredProduct, ImageOnly, Message, NewProduct, PriceTotal, Product,
    ProductListing, ProductPage, ProductPatch,
};
use crate::service::{FilterParams, ProductService, ServiceError};
use crate::store::ProductStore;

type Shared<S> = State<Arc<ProductService<S>>>;

/// `POST /api/products/` (admin)
pub async fn create<S: ProductStore + 'static>(
    State(service): Shared<S>,
    headers: HeaderMap,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ServiceError> {
    session_from_headers(&headers).require_admin()?;
    let Json(product) = body.map_err(params::json_rejection)?;
    let created = service.create(product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/products/`
pub async fn list_all<S: ProductStore + 'static>(
    State(service): Shared<S>,
) -> Result<Json<Vec<ProductListing>>, ServiceError> {
    Ok(Json(service.list_all().await?))
}

/// `GET /api/products/filter`. No criterion yields an empty list.
pub async fn list_by_filter<S: ProductStore + 'static>(
    State(service): Shared<S>,
    query: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<Vec<FilteredProduct>>, ServiceError> {
    let Query(filter) = query.map_err(params::query_rejection)?;
    match filter.into_request()? {
        Some(request) => Ok(Json(service.list_by_filter(&request).await?)),
        None => Ok(Json(Vec::new())),
    }
}

/// `PATCH /api/products/:id` (admin)
pub async fn update<S: ProductStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>, ServiceError> {
    session_from_headers(&headers).require_admin()?;
    let id = params::path_id(&id)?;
    let Json(patch) = body.map_err(params::json_rejection)?;
    Ok(Json(service.update(id, patch).await?))
}

/// `DELETE /api/products/?productId=` (admin)
pub async fn delete<S: ProductStore + 'static>(
    State(service): Shared<S>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Json<Message>, ServiceError> {
    session_from_headers(&headers).require_admin()?;
    let ids = params::product_ids(query.as_deref())?;
    let [id] = ids.as_slice() else {
        return Err(ServiceError::Validation(
            "exactly one productId is required".into(),
        ));
    };
    Ok(Json(service.delete(*id).await?))
}

/// `GET /api/products/:id`
pub async fn get_by_id<S: ProductStore + 'static>(
    State(service): Shared<S>,
    Path(id): Path<String>,
) -> Result<Json<ProductPage>, ServiceError> {
    let id = params::path_id(&id)?;
    Ok(Json(service.get_by_id(id).await?))
}

/// `GET /api/products/latest`
pub async fn list_latest<S: ProductStore + 'static>(
    State(service): Shared<S>,
) -> Result<Json<Vec<ImageOnly>>, ServiceError> {
    Ok(Json(service.list_latest().await?))
}

/// `GET /api/products/cartItems?productId=`
pub async fn cart_items<S: ProductStore + 'static>(
    State(service): Shared<S>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<CartItem>>, ServiceError> {
    let ids = params::product_ids(query.as_deref())?;
    Ok(Json(service.list_by_ids(&ids).await?))
}

/// `GET /api/products/totalPrice?productId=` (private). Responds `null` when
/// none of the ids exist.
pub async fn total_price<S: ProductStore + 'static>(
    State(service): Shared<S>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Json<Option<PriceTotal>>, ServiceError> {
    session_from_headers(&headers).require_user()?;
    let ids = params::product_ids(query.as_deref())?;
    Ok(Json(service.sum_price(&ids).await?))
}

/// `PATCH /api/products/zzim` (private)
pub async fn toggle_favorite<S: ProductStore + 'static>(
    State(service): Shared<S>,
    headers: HeaderMap,
    body: Result<Json<ZzimBody>, JsonRejection>,
) -> Result<Json<Message>, ServiceError> {
    let user = session_from_headers(&headers).require_user()?;
    let Json(body) = body.map_err(params::json_rejection)?;
    let ids = body.product_id.parse()?;
    Ok(Json(service.toggle_favorite(&user, &ids, body.zzim).await?))
}

/// `GET /api/products/zzim` (private)
pub async fn list_favorites<S: ProductStore + 'static>(
    State(service): Shared<S>,
    headers: HeaderMap,
) -> Result<Json<Vec<FavoriteItem>>, ServiceError> {
    let user = session_from_headers(&headers).require_user()?;
    Ok(Json(service.list_favorites(&user).await?))
}
