//! End-to-end tests over a real listener with reqwest.

use std::sync::Arc;

use artshop_products::{
    http, InMemoryProductStore, Product, ProductId, ProductService, ProductStore, ADMIN_ROLE,
    ROLE_KEY, USER_ID_KEY,
};
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};

use crate::support::{new_product, FailingStore, Fixture};

/// Bind to port 0 and return the base url.
async fn start_server<S: ProductStore + 'static>(service: ProductService<S>) -> String {
    let app = http::router(Arc::new(service));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn as_admin(request: RequestBuilder) -> RequestBuilder {
    request
        .header(USER_ID_KEY, "admin-1")
        .header(ROLE_KEY, ADMIN_ROLE)
}

fn as_user(request: RequestBuilder, user: &str) -> RequestBuilder {
    request.header(USER_ID_KEY, user).header(ROLE_KEY, "customer")
}

/// Seed a fixture with one in-stock and one sold-out product, then serve it.
async fn seeded() -> (String, Product, Product) {
    let fx = Fixture::new();
    let available = fx.add(new_product("available", 100, fx.kim.id)).await;
    let mut sold = new_product("sold", 200, fx.lee.id);
    sold.in_stock = false;
    sold.theme = "portrait".into();
    let sold = fx.add(sold).await;
    let base = start_server(fx.service).await;
    (base, available, sold)
}

fn create_body(artist: impl serde::Serialize) -> Value {
    json!({
        "title": "Blue Hour",
        "price": 120000,
        "image": "blue-hour.jpg",
        "theme": "landscape",
        "artCode": "BH-1",
        "info": { "size": "53.0x45.5cm", "canvas": 10 },
        "artist": artist,
    })
}

#[tokio::test]
async fn health_check() {
    let (base, _, _) = seeded().await;
    let resp = Client::new()
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn create_requires_admin() {
    let fx = Fixture::new();
    let artist = fx.kim.id;
    let base = start_server(fx.service).await;
    let client = Client::new();
    let url = format!("{base}/api/products/");

    let resp = client
        .post(&url)
        .json(&create_body(artist))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = as_user(client.post(&url), "user-1")
        .json(&create_body(artist))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let resp = as_admin(client.post(&url))
        .json(&create_body(artist))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["title"], "Blue Hour");
    assert_eq!(created["inStock"], true);
    assert_eq!(created["count"], 0);
    assert_eq!(created["likes"], json!([]));
    assert!(created["_id"].is_string());
}

#[tokio::test]
async fn create_rejects_protected_fields() {
    let fx = Fixture::new();
    let mut body = create_body(fx.kim.id);
    body["count"] = json!(99);
    let base = start_server(fx.service).await;

    let resp = as_admin(Client::new().post(format!("{base}/api/products/")))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn list_all_with_and_without_trailing_slash() {
    let (base, _, _) = seeded().await;
    let client = Client::new();

    for path in ["/api/products/", "/api/products"] {
        let resp = client.get(format!("{base}{path}")).send().await.unwrap();
        assert_eq!(resp.status(), 200);
        let listed: Vec<Value> = resp.json().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["artist"]["code"], "KIM01");
    }
}

#[tokio::test]
async fn filter_by_theme_and_ambiguous_filter() {
    let (base, available, _) = seeded().await;
    let client = Client::new();

    let listed: Vec<Value> = client
        .get(format!("{base}/api/products/filter?theme=landscape"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["_id"], available.id.to_string());

    let sold_out: Vec<Value> = client
        .get(format!("{base}/api/products/filter?theme=portrait"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(sold_out.is_empty());

    let none: Vec<Value> = client
        .get(format!("{base}/api/products/filter"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(none.is_empty());

    let resp = client
        .get(format!(
            "{base}/api/products/filter?theme=landscape&priceMin=0&priceMax=500"
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .get(format!("{base}/api/products/filter?sizeMin=5"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn get_by_id_page() {
    let (base, available, _) = seeded().await;
    let client = Client::new();

    let resp = client
        .get(format!("{base}/api/products/{}", available.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let page: Value = resp.json().await.unwrap();
    assert_eq!(page["productDetail"]["title"], "available");
    assert!(page["productDetail"].get("count").is_none());
    assert!(page["productsByArtist"].is_array());
    assert_eq!(page["productsByRandom"].as_array().unwrap().len(), 1);

    let resp = client
        .get(format!("{base}/api/products/not-an-id"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .get(format!("{base}/api/products/{}", ProductId::new()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn update_product() {
    let (base, available, _) = seeded().await;
    let client = Client::new();
    let url = format!("{base}/api/products/{}", available.id);

    let resp = as_admin(client.patch(&url))
        .json(&json!({ "price": 150, "info": { "canvas": 12 } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["price"], 150);
    assert_eq!(updated["info"]["canvas"], 12);
    assert_eq!(updated["info"]["size"], "53.0x45.5cm");

    let resp = as_admin(client.patch(&url))
        .json(&json!({ "count": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = as_user(client.patch(&url), "user-1")
        .json(&json!({ "price": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn delete_in_stock_only() {
    let (base, available, sold) = seeded().await;
    let client = Client::new();

    let resp = as_admin(client.delete(format!(
        "{base}/api/products/?productId={}",
        available.id
    )))
    .send()
    .await
    .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "product deleted");

    let resp = as_admin(client.delete(format!("{base}/api/products/?productId={}", sold.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "this product cannot be deleted");

    let listed: Vec<Value> = client
        .get(format!("{base}/api/products/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["_id"], sold.id.to_string());
}

#[tokio::test]
async fn latest_images() {
    let (base, available, sold) = seeded().await;

    let latest: Vec<Value> = Client::new()
        .get(format!("{base}/api/products/latest"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        latest,
        vec![
            json!({ "_id": sold.id, "image": "sold.jpg" }),
            json!({ "_id": available.id, "image": "available.jpg" }),
        ]
    );
}

#[tokio::test]
async fn cart_items_with_repeated_ids() {
    let (base, available, sold) = seeded().await;

    let items: Vec<Value> = Client::new()
        .get(format!(
            "{base}/api/products/cartItems?productId={}&productId={}",
            available.id, sold.id
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["inStock"], true);
    assert_eq!(items[1]["inStock"], false);
    assert_eq!(items[1]["artist"]["name"], "Lee");
}

#[tokio::test]
async fn total_price_requires_user() {
    let (base, available, sold) = seeded().await;
    let client = Client::new();
    let url = format!(
        "{base}/api/products/totalPrice?productId={}&productId={}",
        available.id, sold.id
    );

    let resp = client.get(&url).send().await.unwrap();
    assert_eq!(resp.status(), 401);

    let resp = as_user(client.get(&url), "user-1").send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["totalPrice"], 300);
    assert_eq!(body["_id"], "cart total");

    let resp = as_user(
        client.get(format!(
            "{base}/api/products/totalPrice?productId={}",
            ProductId::new()
        )),
        "user-1",
    )
    .send()
    .await
    .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn zzim_round_trip() {
    let (base, available, _) = seeded().await;
    let client = Client::new();
    let url = format!("{base}/api/products/zzim");

    let resp = as_user(client.patch(&url), "user-1")
        .json(&json!({ "productId": available.id, "zzim": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let favorites: Vec<Value> = as_user(client.get(&url), "user-1")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["_id"], available.id.to_string());
    assert_eq!(favorites[0]["artist"]["name"], "Kim");

    let others: Vec<Value> = as_user(client.get(&url), "user-2")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(others.is_empty());

    let resp = as_user(client.patch(&url), "user-1")
        .json(&json!({ "productId": [available.id], "zzim": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let favorites: Vec<Value> = as_user(client.get(&url), "user-1")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(favorites.is_empty());

    let resp = client.get(&url).send().await.unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let base = start_server(ProductService::new(FailingStore)).await;

    let resp = Client::new()
        .get(format!("{base}/api/products/"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn empty_store_serves_empty_list() {
    let base = start_server(ProductService::new(InMemoryProductStore::new())).await;

    let listed: Vec<Value> = Client::new()
        .get(format!("{base}/api/products/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.is_empty());
}
