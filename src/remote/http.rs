//! HTTP remote backed by `reqwest`.
//!
//! Talks JSON to the inventory service. Item routes always put a `/`
//! between the collection path and the id (`/products/7`), never `/products7`.
//!
//! Error bodies are inspected for a `detail` member. FastAPI-style services put a
//! string there for domain errors and an array of objects for validation errors;
//! both are surfaced as text.

use crate::domain::{InventoryError, Product, ProductId, Result};
use crate::remote::backend::ProductRemote;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use std::time::Duration;

/// Collection path on the service.
const PRODUCTS_PATH: &str = "products";

/// Error body returned by the service on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// JSON-over-HTTP implementation of [`ProductRemote`].
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: Client,
    base_url: String,
}

impl HttpRemote {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Config`] if `base_url` is not an absolute URL
    /// or the HTTP client cannot be built.
    ///
    /// # Examples
    ///
    /// ```
    /// use stocktake::remote::HttpRemote;
    ///
    /// let remote = HttpRemote::new("http://localhost:8000/", None)?;
    /// assert_eq!(remote.item_url(7)?.as_str(), "http://localhost:8000/products/7");
    /// # Ok::<(), stocktake::InventoryError>(())
    /// ```
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| InventoryError::Config(format!("invalid base url {base_url:?}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(InventoryError::Config(format!("base url cannot carry paths: {base_url}")));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| InventoryError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// URL of the product collection.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Config`] if the joined URL does not parse.
    pub fn collection_url(&self) -> Result<Url> {
        Self::parse_url(format!("{}/{PRODUCTS_PATH}", self.base_url))
    }

    /// URL of a single product.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Config`] if the joined URL does not parse.
    pub fn item_url(&self, id: ProductId) -> Result<Url> {
        Self::parse_url(format!("{}/{PRODUCTS_PATH}/{id}", self.base_url))
    }

    fn parse_url(url: String) -> Result<Url> {
        Url::parse(&url).map_err(|e| InventoryError::Config(format!("invalid url {url:?}: {e}")))
    }

    /// Turns a non-success response into a network error carrying the server detail.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .map(|value| match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            });

        tracing::debug!(status = status.as_u16(), detail = ?detail, "remote returned failure status");

        Err(InventoryError::network(
            Some(status.as_u16()),
            detail,
            format!("server responded with {status}"),
        ))
    }
}

impl ProductRemote for HttpRemote {
    fn list(&self) -> BoxFuture<'_, Result<Vec<Product>>> {
        async move {
            let url = self.collection_url()?;
            tracing::debug!(%url, "GET products");
            let response = Self::check(self.client.get(url).send().await?).await?;
            Ok(response.json::<Vec<Product>>().await?)
        }
        .boxed()
    }

    fn create<'a>(&'a self, product: &'a Product) -> BoxFuture<'a, Result<Product>> {
        async move {
            let url = self.collection_url()?;
            tracing::debug!(%url, id = product.id, "POST product");
            let response = Self::check(self.client.post(url).json(product).send().await?).await?;
            Ok(response.json::<Product>().await?)
        }
        .boxed()
    }

    fn update<'a>(&'a self, id: ProductId, product: &'a Product) -> BoxFuture<'a, Result<Product>> {
        async move {
            let url = self.item_url(id)?;
            tracing::debug!(%url, id, "PUT product");
            let response = Self::check(self.client.put(url).json(product).send().await?).await?;
            Ok(response.json::<Product>().await?)
        }
        .boxed()
    }

    fn delete(&self, id: ProductId) -> BoxFuture<'_, Result<()>> {
        async move {
            let url = self.item_url(id)?;
            tracing::debug!(%url, id, "DELETE product");
            Self::check(self.client.delete(url).send().await?).await?;
            Ok(())
        }
        .boxed()
    }
}
