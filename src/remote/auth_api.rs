// src/remote/auth_api.rs

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::{
    common::error::AuthError,
    models::auth::{AuthRejection, Credentials, LoginRequest, LoginResponse, LoginSuccess},
};

// O header que delimita o escopo do tenant na troca de credenciais
const TENANT_HEADER: &str = "x-tenant-id";

// A troca de credenciais como o SessionService a enxerga. Atrás deste
// trait fica só o transporte; a máquina de estados não sabe o que é HTTP.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(
        &self,
        credentials: Credentials,
        tenant_id: &str,
    ) -> Result<LoginSuccess, AuthError>;
}

// Implementação reqwest apontada para o endpoint real.
// O timeout por tentativa já vem configurado no Client.
#[derive(Clone)]
pub struct HttpAuthApi {
    client: Client,
    auth_url: String,
}

impl HttpAuthApi {
    pub fn new(client: Client, auth_url: impl Into<String>) -> Self {
        Self {
            client,
            auth_url: auth_url.into(),
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(
        &self,
        credentials: Credentials,
        tenant_id: &str,
    ) -> Result<LoginSuccess, AuthError> {
        let response = self
            .client
            .post(&self.auth_url)
            .header(TENANT_HEADER, tenant_id)
            .json(&LoginRequest { credentials })
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let rejection = response.json::<AuthRejection>().await.unwrap_or_default();
            return Err(classify_rejection(status, rejection));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError::ServerRejected(format!("Resposta malformada: {e}")))?;

        match body.token {
            // Igual ao contrato do servidor: 2xx sem token é login que falhou
            None => Err(AuthError::ServerRejected(
                "Resposta de login sem token".to_owned(),
            )),
            Some(token) => Ok(LoginSuccess {
                token,
                user: body.user_data.unwrap_or_default(),
            }),
        }
    }
}

// Falhas de transporte: o pedido nem chegou a virar uma resposta
fn classify_transport(error: reqwest::Error) -> AuthError {
    if error.is_timeout() {
        AuthError::Timeout(error.to_string())
    } else if error.is_connect() || error.is_request() {
        AuthError::NetworkUnavailable(error.to_string())
    } else {
        AuthError::ServerRejected(error.to_string())
    }
}

// Rejeições com resposta: o servidor falou, resta classificar o que disse
fn classify_rejection(status: StatusCode, rejection: AuthRejection) -> AuthError {
    let message = rejection
        .message
        .unwrap_or_else(|| format!("HTTP {status}"));
    match rejection.wrong_credential.as_deref() {
        Some("username") => AuthError::WrongUsername(message),
        Some("password") => AuthError::WrongPassword(message),
        _ => AuthError::ServerRejected(message),
    }
}
