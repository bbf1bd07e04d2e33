// src/services/session.rs

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use validator::Validate;

use crate::{
    common::{
        error::{AuthError, StoreError},
        retry::RetryPolicy,
    },
    models::auth::{Credentials, LoginPayload, LoginSuccess, Session, SessionStatus, UserIdentity},
    remote::AuthApi,
    store::{CredentialStore, KEY_FIRST_NAME, KEY_USER_TOKEN},
};

// Dono do ciclo de vida da autenticação e da durabilidade das credenciais.
// Clones compartilham o mesmo estado; a UI lê snapshots e dispara comandos.
#[derive(Clone)]
pub struct SessionService {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn CredentialStore>,
    retry: RetryPolicy,
    state: Arc<RwLock<Session>>,
    // Serializa logins concorrentes: o segundo espera o primeiro terminar
    login_gate: Arc<Mutex<()>>,
}

impl SessionService {
    pub fn new(
        api: Arc<dyn AuthApi>,
        store: Arc<dyn CredentialStore>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            api,
            store,
            retry,
            state: Arc::new(RwLock::new(Session::default())),
            login_gate: Arc::new(Mutex::new(())),
        }
    }

    pub async fn snapshot(&self) -> Session {
        self.state.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.state.read().await.is_logged_in()
    }

    // Efetua o login dentro do escopo do tenant selecionado. Erros não
    // atravessam a fronteira da UI: o desfecho volta (e fica) no snapshot
    // da sessão.
    pub async fn login(&self, username: &str, password: &str, tenant_id: &str) -> Session {
        // Uma troca de credenciais por vez; quem chega atrasado espera
        let _in_flight = self.login_gate.lock().await;

        // Já autenticado: não derruba a sessão ativa para tentar de novo
        if self.is_logged_in().await {
            return self.snapshot().await;
        }

        let payload = LoginPayload {
            username: username.to_owned(),
            password: password.to_owned(),
            tenant_id: tenant_id.to_owned(),
        };
        if let Err(validation) = payload.validate() {
            tracing::warn!("Payload de login inválido: {}", validation);
            return self
                .settle_failure(AuthError::ServerRejected(validation.to_string()))
                .await;
        }

        {
            let mut state = self.state.write().await;
            state.status = SessionStatus::Authenticating;
            state.error = None;
        }

        let outcome = self
            .retry
            .run(
                || {
                    let credentials = Credentials {
                        username: payload.username.clone(),
                        password: payload.password.clone(),
                    };
                    self.api.login(credentials, &payload.tenant_id)
                },
                AuthError::is_retryable,
            )
            .await;

        match outcome {
            Ok(success) => self.settle_success(success).await,
            Err(failure) => {
                tracing::warn!(
                    "🔐 Login falhou após {} tentativa(s): {}",
                    failure.attempts,
                    failure.error
                );
                self.settle_failure(failure.error).await
            }
        }
    }

    // Persiste antes de assentar o estado em memória. Se o processo cair no
    // meio, memória e disco só divergem na direção em que o restart volta
    // deslogado.
    async fn settle_success(&self, success: LoginSuccess) -> Session {
        if let Err(e) = self.store.set(KEY_USER_TOKEN, &success.token).await {
            // Sem durabilidade o login ainda vale; só não sobrevive ao restart
            tracing::warn!("Falha ao persistir o token: {}", e);
        }
        if let Some(first_name) = success.user.first_name.as_deref() {
            if let Err(e) = self.store.set(KEY_FIRST_NAME, first_name).await {
                tracing::warn!("Falha ao persistir o nome em cache: {}", e);
            }
        }

        let mut state = self.state.write().await;
        state.token = Some(success.token);
        state.user = Some(success.user);
        state.status = SessionStatus::Authenticated;
        state.error = None;
        tracing::info!("✅ Sessão autenticada com sucesso!");
        state.clone()
    }

    async fn settle_failure(&self, error: AuthError) -> Session {
        let mut state = self.state.write().await;
        state.token = None;
        state.user = None;
        state.status = SessionStatus::Failed;
        state.error = Some(error);
        state.clone()
    }

    // Restaura a sessão persistida no início do processo, sem revalidar o
    // token no servidor. Um token revogado aparece como Unauthorized na
    // primeira busca autorizada.
    pub async fn restore_session(&self) -> Result<Session, StoreError> {
        let token = self.store.get(KEY_USER_TOKEN).await?;
        let first_name = self.store.get(KEY_FIRST_NAME).await?;

        let mut state = self.state.write().await;
        if let Some(token) = token {
            state.token = Some(token);
            state.user = Some(UserIdentity {
                first_name,
                ..UserIdentity::default()
            });
            state.status = SessionStatus::Authenticated;
            state.error = None;
            tracing::info!("✅ Sessão restaurada do armazenamento");
        }
        Ok(state.clone())
    }

    // Encerra a sessão. Seguro de chamar já deslogado (no-op). O nome em
    // cache fica para a próxima saudação; só o token é apagado.
    pub async fn logout(&self) -> Result<(), StoreError> {
        // Apaga do disco antes de limpar a memória: se a remoção falhar, a
        // memória fica como está e o token salvo nunca vira sessão fantasma
        self.store.delete(KEY_USER_TOKEN).await?;

        let mut state = self.state.write().await;
        *state = Session::default();
        tracing::info!("👋 Sessão encerrada");
        Ok(())
    }
}
