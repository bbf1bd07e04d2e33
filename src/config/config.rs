// src/config/config.rs

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use std::env;

use reqwest::Client;

use crate::{
    common::{error::StoreError, retry::RetryPolicy},
    remote::{HttpAuthApi, HttpProfileApi, HttpTenancyApi},
    services::{ProfileService, SessionService, TenancyService},
    store::FileCredentialStore,
};

// Padrões do ambiente de produção
const DEFAULT_AUTH_URL: &str = "https://api.aionsites.com/auth/login";
const DEFAULT_API_BASE_URL: &str = "https://api.aionsites.com";
const DEFAULT_CREDENTIALS_PATH: &str = "credentials.json";

// Configuração da camada, carregada do ambiente com padrões de produção
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub auth_url: String,
    pub api_base_url: String,
    pub credentials_path: PathBuf,
    // Limite por tentativa; o retry corre por fora dele
    pub request_timeout: Duration,
    pub login_retry: RetryPolicy,
    pub fetch_retry: RetryPolicy,
    pub monthly_payments_ceiling: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_owned(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            request_timeout: Duration::from_secs(10),
            login_retry: RetryPolicy::new(3, Duration::from_secs(2)),
            fetch_retry: RetryPolicy::new(2, Duration::from_secs(1)),
            monthly_payments_ceiling: 50,
        }
    }
}

impl AppConfig {
    // Carrega as configurações do ambiente (e do .env, quando existir)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(url) = env::var("AUTH_URL") {
            config.auth_url = url;
        }
        if let Ok(url) = env::var("API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Ok(path) = env::var("CREDENTIALS_PATH") {
            config.credentials_path = PathBuf::from(path);
        }
        if let Ok(raw) = env::var("REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(raw.parse()?);
        }
        if let Ok(raw) = env::var("MONTHLY_PAYMENTS_CEILING") {
            config.monthly_payments_ceiling = raw.parse()?;
        }
        Ok(config)
    }
}

// O grafo de dependências explícito da camada de sessão e sincronização.
// A casca cria um contexto único no início do processo e o repassa às
// árvores de UI em vez de depender de singletons globais.
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub session: SessionService,
    pub tenants: TenancyService,
    pub profile: ProfileService,
}

impl AppContext {
    // Montagem com peças já prontas (os testes injetam dublês por aqui)
    pub fn new(
        config: AppConfig,
        session: SessionService,
        tenants: TenancyService,
        profile: ProfileService,
    ) -> Self {
        Self {
            config,
            session,
            tenants,
            profile,
        }
    }

    // Monta o grafo com as implementações reais (HTTP + arquivo) e restaura
    // a sessão persistida. Chamado uma vez no início do processo.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        let store = Arc::new(FileCredentialStore::new(config.credentials_path.clone()));

        // --- Monta o grafo de dependências ---
        let auth_api = Arc::new(HttpAuthApi::new(client.clone(), config.auth_url.clone()));
        let tenancy_api = Arc::new(HttpTenancyApi::new(
            client.clone(),
            config.api_base_url.clone(),
        ));
        let profile_api = Arc::new(HttpProfileApi::new(client, config.api_base_url.clone()));

        let session = SessionService::new(auth_api, store, config.login_retry);
        let tenants = TenancyService::new(tenancy_api, config.fetch_retry);
        let profile = ProfileService::new(
            profile_api,
            session.clone(),
            config.fetch_retry,
            config.monthly_payments_ceiling,
        );

        let context = Self::new(config, session, tenants, profile);
        context.session.restore_session().await?;
        Ok(context)
    }

    // Teardown do logout: encerra a sessão e limpa o que deriva dela
    // (seleção de estabelecimento e dados do perfil)
    pub async fn logout(&self) -> Result<(), StoreError> {
        self.session.logout().await?;
        self.tenants.clear_selection().await;
        self.profile.reset().await;
        Ok(())
    }
}

// Inicializa o logger; a casca chama uma única vez no início do processo
pub fn init_tracing() {
    tracing_subscriber::fmt().with_target(false).compact().init();
}
