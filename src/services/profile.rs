// src/services/profile.rs

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::{
    common::{error::FetchError, retry::RetryPolicy},
    models::profile::{MonthlyPaymentSummary, Order, PaginatedCollection},
    remote::ProfileApi,
    services::session::SessionService,
};

// Snapshot agregado do perfil lido pela UI. Cada coleção carrega o próprio
// último erro; uma falha nunca apaga o que já foi carregado.
#[derive(Debug, Clone, Default)]
pub struct ProfileData {
    pub orders: Vec<Order>,
    pub monthly_payments: PaginatedCollection<MonthlyPaymentSummary>,
    pub current_month_payment: Option<MonthlyPaymentSummary>,
    pub orders_error: Option<FetchError>,
    pub monthly_payments_error: Option<FetchError>,
    pub current_month_error: Option<FetchError>,
}

// Busca incremental e retomável das coleções do perfil. Lê o token da
// sessão, nunca o escreve.
#[derive(Clone)]
pub struct ProfileService {
    api: Arc<dyn ProfileApi>,
    session: SessionService,
    retry: RetryPolicy,
    // Teto de itens do histórico mensal; atingi-lo encerra a paginação
    ceiling: usize,
    state: Arc<RwLock<ProfileData>>,
    // Um guarda por coleção: buscas idênticas em voo não se duplicam e as
    // coleções irmãs não se bloqueiam entre si
    orders_gate: Arc<Mutex<()>>,
    payments_gate: Arc<Mutex<()>>,
    current_gate: Arc<Mutex<()>>,
}

impl ProfileService {
    pub fn new(
        api: Arc<dyn ProfileApi>,
        session: SessionService,
        retry: RetryPolicy,
        ceiling: usize,
    ) -> Self {
        Self {
            api,
            session,
            retry,
            ceiling: ceiling.max(1),
            state: Arc::new(RwLock::new(ProfileData::default())),
            orders_gate: Arc::new(Mutex::new(())),
            payments_gate: Arc::new(Mutex::new(())),
            current_gate: Arc::new(Mutex::new(())),
        }
    }

    pub async fn snapshot(&self) -> ProfileData {
        self.state.read().await.clone()
    }

    async fn require_token(&self) -> Result<String, FetchError> {
        self.session.token().await.ok_or(FetchError::Unauthorized)
    }

    // Substitui a lista de pedidos por inteiro; não há paginação aqui
    pub async fn fetch_orders(&self) -> Result<Vec<Order>, FetchError> {
        let _in_flight = self.orders_gate.lock().await;

        let result = async {
            let token = self.require_token().await?;
            self.retry
                .run(|| self.api.fetch_orders(&token), FetchError::is_retryable)
                .await
                .map_err(|failure| failure.into_fetch_error())
        }
        .await;

        let mut state = self.state.write().await;
        match result {
            Ok(orders) => {
                state.orders = orders.clone();
                state.orders_error = None;
                Ok(orders)
            }
            Err(error) => {
                state.orders_error = Some(error.clone());
                Err(error)
            }
        }
    }

    // Substitui o resumo do mês corrente; ele não faz parte do histórico
    pub async fn fetch_current_month_payment(
        &self,
    ) -> Result<Option<MonthlyPaymentSummary>, FetchError> {
        let _in_flight = self.current_gate.lock().await;

        let result = async {
            let token = self.require_token().await?;
            self.retry
                .run(
                    || self.api.fetch_current_month_payment(&token),
                    FetchError::is_retryable,
                )
                .await
                .map_err(|failure| failure.into_fetch_error())
        }
        .await;

        let mut state = self.state.write().await;
        match result {
            Ok(summary) => {
                state.current_month_payment = summary.clone();
                state.current_month_error = None;
                Ok(summary)
            }
            Err(error) => {
                state.current_month_error = Some(error.clone());
                Err(error)
            }
        }
    }

    // Anexa uma página ao histórico mensal, do mais recente para o mais
    // antigo. `offset` deve ser o loaded_count atual: um offset defasado
    // (requisição duplicada ou atrasada) é no-op e devolve a coleção
    // inalterada, assim como qualquer chamada depois de has_more == false.
    pub async fn fetch_monthly_payments(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedCollection<MonthlyPaymentSummary>, FetchError> {
        let _in_flight = self.payments_gate.lock().await;

        {
            let state = self.state.read().await;
            let collection = &state.monthly_payments;
            if !collection.has_more() || offset != collection.loaded_count() || limit == 0 {
                return Ok(collection.clone());
            }
        }

        // Nunca pede além do teto configurado
        let capped_limit = limit.min(self.ceiling - offset);

        let result = async {
            let token = self.require_token().await?;
            self.retry
                .run(
                    || self.api.fetch_monthly_payments(&token, offset, capped_limit),
                    FetchError::is_retryable,
                )
                .await
                .map_err(|failure| failure.into_fetch_error())
        }
        .await;

        let mut state = self.state.write().await;
        match result {
            Ok(page) => {
                state
                    .monthly_payments
                    .append_page(page, capped_limit, self.ceiling);
                state.monthly_payments_error = None;
                Ok(state.monthly_payments.clone())
            }
            Err(error) => {
                // A falha não derruba o que já está carregado
                state.monthly_payments_error = Some(error.clone());
                Err(error)
            }
        }
    }

    // Chamado no teardown do logout
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        *state = ProfileData::default();
    }
}
