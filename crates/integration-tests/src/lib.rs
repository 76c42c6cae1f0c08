//! Integration tests for Redcart.
//!
//! Each test spawns the storefront on an ephemeral port, backed by a
//! [`wiremock`] stand-in for the catalog API and a temporary data directory.
//! Nothing outside the test process is required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p redcart-integration-tests
//! ```

use std::path::PathBuf;

use redcart_storefront::config::StorefrontConfig;
use redcart_storefront::routes;
use redcart_storefront::state::AppState;
use reqwest::{Client, Response};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A running storefront plus the fakes it talks to.
pub struct TestApp {
    /// `http://127.0.0.1:<port>` of the spawned storefront.
    pub address: String,
    pub client: Client,
    /// Fake catalog API.
    pub catalog: MockServer,
    data_dir: TempDir,
}

impl TestApp {
    /// Start a storefront with an empty data directory and a catalog API
    /// that knows no routes yet.
    pub async fn spawn() -> Self {
        let catalog = MockServer::start().await;
        let data_dir = tempfile::tempdir().expect("Failed to create data dir");
        Self::start(catalog, data_dir).await
    }

    /// Start a fresh storefront over the same data directory and catalog,
    /// as a process restart would.
    pub async fn restart(self) -> Self {
        Self::start(self.catalog, self.data_dir).await
    }

    async fn start(catalog: MockServer, data_dir: TempDir) -> Self {
        let catalog_url = catalog.uri();
        let data_path = data_dir.path().to_string_lossy().into_owned();
        let config = StorefrontConfig::from_vars(|key| match key {
            "CATALOG_API_URL" => Some(catalog_url.clone()),
            "REDCART_DATA_DIR" => Some(data_path.clone()),
            _ => None,
        })
        .expect("Failed to build test config");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let address = format!(
            "http://{}",
            listener.local_addr().expect("Listener has no address")
        );

        let app = routes::app(AppState::new(config));
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server failed");
        });

        Self {
            address,
            client: Client::new(),
            catalog,
            data_dir,
        }
    }

    /// Absolute URL for a storefront path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET")
    }

    pub async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST")
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Response {
        self.client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PATCH")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE")
    }

    /// File a store key is persisted to.
    pub fn data_file(&self, key: &str) -> PathBuf {
        self.data_dir.path().join(format!("{key}.json"))
    }

    /// Parsed contents of a persisted key, if the file exists.
    pub fn persisted(&self, key: &str) -> Option<Value> {
        let raw = std::fs::read_to_string(self.data_file(key)).ok()?;
        Some(serde_json::from_str(&raw).expect("Persisted file is not JSON"))
    }

    /// Serve `products` from the listing endpoint and each product from its
    /// detail endpoint. Unknown ids get the API's 404.
    pub async fn mount_products(&self, products: &[Value]) {
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": products,
                "total": products.len(),
                "skip": 0,
                "limit": products.len(),
            })))
            .mount(&self.catalog)
            .await;

        for product in products {
            Mock::given(method("GET"))
                .and(path(format!("/products/{}", product["id"])))
                .respond_with(ResponseTemplate::new(200).set_body_json(product))
                .mount(&self.catalog)
                .await;
        }
    }

    /// Serve `comments` from the comments endpoint.
    pub async fn mount_comments(&self, comments: &[Value]) {
        Mock::given(method("GET"))
            .and(path("/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "comments": comments,
                "total": comments.len(),
            })))
            .mount(&self.catalog)
            .await;
    }
}

/// A catalog product in the API's wire format.
pub fn product(id: u32, title: &str, category: &str, price: f64) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} description"),
        "category": category,
        "price": price,
        "discountPercentage": 0.0,
        "rating": 4.2,
        "stock": 20,
        "brand": "Acme",
        "thumbnail": format!("https://cdn.example.com/{id}.png"),
    })
}

/// The same product with a discount.
pub fn on_offer(mut product: Value, discount: f64) -> Value {
    product["discountPercentage"] = json!(discount);
    product
}

/// `count` products with ids `1..=count`, priced `10 × id`.
pub fn catalog(count: u32) -> Vec<Value> {
    (1..=count)
        .map(|id| product(id, &format!("Product {id}"), "beauty", f64::from(id) * 10.0))
        .collect()
}

/// A catalog comment in the API's wire format.
pub fn comment(id: u32, body: &str, username: &str) -> Value {
    json!({
        "id": id,
        "body": body,
        "postId": 1,
        "likes": id,
        "user": {"id": 100 + id, "username": username, "fullName": username.to_uppercase()},
    })
}

/// Decode a JSON response body.
pub async fn body(response: Response) -> Value {
    response.json().await.expect("Response body is not JSON")
}
