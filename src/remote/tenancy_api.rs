// src/remote/tenancy_api.rs

use async_trait::async_trait;
use reqwest::Client;

use super::http::{classify_transport, decode_json};
use crate::{common::error::FetchError, models::tenancy::Tenant};

// Listagem pública dos estabelecimentos disponíveis para login
#[async_trait]
pub trait TenancyApi: Send + Sync {
    async fn fetch_companies(&self) -> Result<Vec<Tenant>, FetchError>;
}

#[derive(Clone)]
pub struct HttpTenancyApi {
    client: Client,
    base_url: String,
}

impl HttpTenancyApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TenancyApi for HttpTenancyApi {
    async fn fetch_companies(&self) -> Result<Vec<Tenant>, FetchError> {
        let response = self
            .client
            .get(format!("{}/tenants", self.base_url))
            .send()
            .await
            .map_err(classify_transport)?;
        decode_json(response).await
    }
}
