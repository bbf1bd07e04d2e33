// src/services/tenancy.rs

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::{
    common::{error::FetchError, retry::RetryPolicy},
    models::tenancy::{Tenant, TenantSelection},
    remote::TenancyApi,
};

// Guarda a lista de estabelecimentos disponíveis, o termo de busca e a
// seleção corrente. Independente da sessão: só fornece o tenant_id que o
// login precisa; a composição dos dois é responsabilidade de quem chama.
#[derive(Clone)]
pub struct TenancyService {
    api: Arc<dyn TenancyApi>,
    retry: RetryPolicy,
    state: Arc<RwLock<TenantSelection>>,
    // Uma busca de lista por vez
    fetch_gate: Arc<Mutex<()>>,
}

impl TenancyService {
    pub fn new(api: Arc<dyn TenancyApi>, retry: RetryPolicy) -> Self {
        Self {
            api,
            retry,
            state: Arc::new(RwLock::new(TenantSelection::default())),
            fetch_gate: Arc::new(Mutex::new(())),
        }
    }

    pub async fn snapshot(&self) -> TenantSelection {
        self.state.read().await.clone()
    }

    // Substitui a lista por inteiro; um refresh nunca é um merge.
    // Em caso de falha a lista anterior fica intacta.
    pub async fn fetch_companies(&self) -> Result<Vec<Tenant>, FetchError> {
        let _in_flight = self.fetch_gate.lock().await;

        let companies = self
            .retry
            .run(|| self.api.fetch_companies(), FetchError::is_retryable)
            .await
            .map_err(|failure| {
                let error = failure.into_fetch_error();
                tracing::warn!("Falha ao buscar estabelecimentos: {}", error);
                error
            })?;

        let mut state = self.state.write().await;
        state.companies = companies.clone();
        Ok(companies)
    }

    pub async fn set_search_term(&self, term: impl Into<String>) {
        self.state.write().await.search_term = term.into();
    }

    // Leitura derivada: filtro por substring sobre o nome, nada é guardado
    pub async fn filtered_companies(&self) -> Vec<Tenant> {
        let state = self.state.read().await;
        state
            .companies
            .iter()
            .filter(|tenant| tenant.name.contains(&state.search_term))
            .cloned()
            .collect()
    }

    // Selecionar não dispara autenticação
    pub async fn set_selected_company(&self, tenant: Tenant) {
        self.state.write().await.selected = Some(tenant);
    }

    pub async fn selected_company(&self) -> Option<Tenant> {
        self.state.read().await.selected.clone()
    }

    // Chamado no teardown do logout
    pub async fn clear_selection(&self) {
        self.state.write().await.selected = None;
    }
}
