// tests/common/mod.rs

// Dublês roteirizados das APIs remotas, compartilhados pelos testes de
// integração. Cada dublê conta as chamadas que recebeu.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use uuid::Uuid;

use mobile_core::common::{AuthError, FetchError};
use mobile_core::models::auth::{Credentials, LoginSuccess, UserIdentity};
use mobile_core::models::profile::{MonthlyPaymentSummary, Order};
use mobile_core::models::tenancy::Tenant;
use mobile_core::remote::{AuthApi, ProfileApi, TenancyApi};

// ---
// Construtores de dados
// ---

pub fn success(token: &str, first_name: &str) -> LoginSuccess {
    LoginSuccess {
        token: token.to_owned(),
        user: UserIdentity {
            first_name: Some(first_name.to_owned()),
            name: Some(format!("{first_name} Teste")),
            email: Some(format!("{}@example.com", first_name.to_lowercase())),
            ..UserIdentity::default()
        },
    }
}

// Resumo mensal `index` meses atrás de dezembro/2025, do mais recente
// para o mais antigo quando gerado em sequência
pub fn payment(index: usize) -> MonthlyPaymentSummary {
    MonthlyPaymentSummary {
        month: 12 - (index % 12) as u32,
        year: 2025 - (index / 12) as i32,
        total_payment: Decimal::from(100 + index as i64),
        number_of_orders: (index + 1) as u32,
    }
}

pub fn payments(n: usize) -> Vec<MonthlyPaymentSummary> {
    (0..n).map(payment).collect()
}

pub fn order(total: &str) -> Order {
    Order {
        id: Uuid::new_v4(),
        date: Utc::now(),
        total: total.parse().expect("total decimal válido"),
        status: "entregue".to_owned(),
    }
}

pub fn tenant(id: &str, name: &str) -> Tenant {
    Tenant {
        tenant_id: id.to_owned(),
        name: name.to_owned(),
    }
}

// ---
// FakeAuthApi
// ---

pub struct FakeAuthApi {
    responses: Mutex<VecDeque<Result<LoginSuccess, AuthError>>>,
    fallback: Option<Result<LoginSuccess, AuthError>>,
    delay: Duration,
    pub calls: AtomicUsize,
}

impl FakeAuthApi {
    pub fn with_responses(responses: Vec<Result<LoginSuccess, AuthError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            fallback: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    // Endpoint que responde sempre a mesma falha, quantas vezes for chamado
    pub fn always_failing(error: AuthError) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: Some(Err(error)),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    // Segura cada resposta por `delay`, para provocar sobreposição real
    pub fn slow(response: Result<LoginSuccess, AuthError>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: Some(response),
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthApi for FakeAuthApi {
    async fn login(
        &self,
        _credentials: Credentials,
        _tenant_id: &str,
    ) -> Result<LoginSuccess, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let scripted = self.responses.lock().await.pop_front();
        match scripted.or_else(|| self.fallback.clone()) {
            Some(response) => response,
            None => Err(AuthError::ServerRejected(
                "roteiro do dublê esgotado".to_owned(),
            )),
        }
    }
}

// ---
// FakeProfileApi
// ---

pub struct FakeProfileApi {
    // O histórico completo que o "servidor" conhece; as páginas saem daqui
    monthly: Vec<MonthlyPaymentSummary>,
    monthly_delay: Duration,
    fail_monthly: Mutex<VecDeque<FetchError>>,
    orders_script: Mutex<VecDeque<Result<Vec<Order>, FetchError>>>,
    current_script: Mutex<VecDeque<Result<Option<MonthlyPaymentSummary>, FetchError>>>,
    pub monthly_calls: AtomicUsize,
    pub orders_calls: AtomicUsize,
    pub current_calls: AtomicUsize,
}

impl FakeProfileApi {
    pub fn with_payments(n: usize) -> Arc<Self> {
        Arc::new(Self {
            monthly: payments(n),
            monthly_delay: Duration::ZERO,
            fail_monthly: Mutex::new(VecDeque::new()),
            orders_script: Mutex::new(VecDeque::new()),
            current_script: Mutex::new(VecDeque::new()),
            monthly_calls: AtomicUsize::new(0),
            orders_calls: AtomicUsize::new(0),
            current_calls: AtomicUsize::new(0),
        })
    }

    pub fn slow_payments(n: usize, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            monthly: payments(n),
            monthly_delay: delay,
            fail_monthly: Mutex::new(VecDeque::new()),
            orders_script: Mutex::new(VecDeque::new()),
            current_script: Mutex::new(VecDeque::new()),
            monthly_calls: AtomicUsize::new(0),
            orders_calls: AtomicUsize::new(0),
            current_calls: AtomicUsize::new(0),
        })
    }

    // Enfileira uma falha para a próxima busca do histórico mensal
    pub async fn fail_monthly_next(&self, error: FetchError) {
        self.fail_monthly.lock().await.push_back(error);
    }

    pub async fn script_orders(&self, response: Result<Vec<Order>, FetchError>) {
        self.orders_script.lock().await.push_back(response);
    }

    pub async fn script_current(
        &self,
        response: Result<Option<MonthlyPaymentSummary>, FetchError>,
    ) {
        self.current_script.lock().await.push_back(response);
    }

    pub fn monthly_call_count(&self) -> usize {
        self.monthly_calls.load(Ordering::SeqCst)
    }

    pub fn orders_call_count(&self) -> usize {
        self.orders_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileApi for FakeProfileApi {
    async fn fetch_orders(&self, _token: &str) -> Result<Vec<Order>, FetchError> {
        self.orders_calls.fetch_add(1, Ordering::SeqCst);
        self.orders_script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_monthly_payments(
        &self,
        _token: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<MonthlyPaymentSummary>, FetchError> {
        self.monthly_calls.fetch_add(1, Ordering::SeqCst);
        if !self.monthly_delay.is_zero() {
            tokio::time::sleep(self.monthly_delay).await;
        }
        if let Some(error) = self.fail_monthly.lock().await.pop_front() {
            return Err(error);
        }
        let end = (offset + limit).min(self.monthly.len());
        let start = offset.min(end);
        Ok(self.monthly[start..end].to_vec())
    }

    async fn fetch_current_month_payment(
        &self,
        _token: &str,
    ) -> Result<Option<MonthlyPaymentSummary>, FetchError> {
        self.current_calls.fetch_add(1, Ordering::SeqCst);
        self.current_script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(None))
    }
}

// ---
// FakeTenancyApi
// ---

pub struct FakeTenancyApi {
    responses: Mutex<VecDeque<Result<Vec<Tenant>, FetchError>>>,
    pub calls: AtomicUsize,
}

impl FakeTenancyApi {
    pub fn with_responses(responses: Vec<Result<Vec<Tenant>, FetchError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TenancyApi for FakeTenancyApi {
    async fn fetch_companies(&self) -> Result<Vec<Tenant>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
