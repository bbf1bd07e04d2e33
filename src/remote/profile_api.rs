// src/remote/profile_api.rs

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::http::{classify_transport, decode_json};
use crate::{
    common::error::FetchError,
    models::profile::{MonthlyPaymentSummary, Order},
};

// Os endpoints de dados do perfil, paginados ou não, todos autorizados
// pelo token da sessão.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn fetch_orders(&self, token: &str) -> Result<Vec<Order>, FetchError>;

    async fn fetch_monthly_payments(
        &self,
        token: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<MonthlyPaymentSummary>, FetchError>;

    async fn fetch_current_month_payment(
        &self,
        token: &str,
    ) -> Result<Option<MonthlyPaymentSummary>, FetchError>;
}

#[derive(Clone)]
pub struct HttpProfileApi {
    client: Client,
    base_url: String,
}

impl HttpProfileApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        token: &str,
    ) -> Result<T, FetchError> {
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(classify_transport)?;
        decode_json(response).await
    }
}

#[async_trait]
impl ProfileApi for HttpProfileApi {
    async fn fetch_orders(&self, token: &str) -> Result<Vec<Order>, FetchError> {
        self.get_json(format!("{}/profile/orders", self.base_url), token)
            .await
    }

    async fn fetch_monthly_payments(
        &self,
        token: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<MonthlyPaymentSummary>, FetchError> {
        let url = format!(
            "{}/profile/monthly-payments?offset={offset}&limit={limit}",
            self.base_url
        );
        self.get_json(url, token).await
    }

    async fn fetch_current_month_payment(
        &self,
        token: &str,
    ) -> Result<Option<MonthlyPaymentSummary>, FetchError> {
        let url = format!("{}/profile/monthly-payments/current", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(classify_transport)?;

        // Conta recém-criada ainda não tem resumo do mês corrente
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let summary: MonthlyPaymentSummary = decode_json(response).await?;
        Ok(Some(summary))
    }
}
