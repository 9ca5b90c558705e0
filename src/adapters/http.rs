use crate::utils::error::SupplierError;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// A supplier's HTTP endpoint: one GET with query parameters, JSON array back.
#[derive(Debug, Clone)]
pub struct SupplierEndpoint {
    client: Client,
    base_url: String,
    supplier: String,
}

impl SupplierEndpoint {
    pub fn new(client: Client, base_url: impl Into<String>, supplier: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            supplier: supplier.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    /// Issues the GET and decodes the body as a list of raw supplier records.
    ///
    /// A `null` or empty body counts as missing, `[]` is a valid empty answer.
    pub async fn fetch_records<T>(&self, query: &[(&str, String)]) -> Result<Vec<T>, SupplierError>
    where
        T: DeserializeOwned,
    {
        let request = self
            .client
            .get(&self.base_url)
            .query(query)
            .build()
            .map_err(|e| SupplierError::transport(&self.supplier, e))?;

        tracing::info!("Calling {} API with URL: {}", self.supplier, request.url());

        let response = self.client.execute(request).await.map_err(|e| {
            tracing::error!("Exception when calling {} API: {}", self.supplier, e);
            SupplierError::transport(&self.supplier, e)
        })?;

        let status = response.status();
        tracing::debug!("{} API response status: {}", self.supplier, status);

        if !status.is_success() {
            tracing::error!("Failed response from {} API: HTTP {}", self.supplier, status);
            return Err(SupplierError::bad_response(
                &self.supplier,
                status.as_u16(),
                "HTTP status not successful",
            ));
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read {} API response body: {}", self.supplier, e);
            SupplierError::transport(&self.supplier, e)
        })?;

        let records: Option<Vec<T>> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Unparseable response body from {} API: {}", self.supplier, e);
            SupplierError::bad_response(
                &self.supplier,
                status.as_u16(),
                format!("unparseable body: {}", e),
            )
        })?;

        records.ok_or_else(|| {
            tracing::error!("Missing response body from {} API", self.supplier);
            SupplierError::bad_response(&self.supplier, status.as_u16(), "missing body")
        })
    }
}
