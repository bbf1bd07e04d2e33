// src/models/auth.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::error::AuthError;

// Dados para login, validados antes de qualquer chamada de rede
#[derive(Debug, Clone, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "O nome de usuário é obrigatório."))]
    pub username: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
    #[validate(length(min = 1, message = "O estabelecimento é obrigatório."))]
    pub tenant_id: String,
}

// O par usuário/senha exatamente como o endpoint espera
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Corpo da requisição de troca de credenciais: { "credentials": { ... } }
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub credentials: Credentials,
}

// Resposta de sucesso do endpoint de autenticação.
// Um 2xx sem token ainda é tratado como falha.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: Option<String>,
    pub user_data: Option<UserIdentity>,
}

// Corpo que o servidor devolve ao rejeitar as credenciais
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRejection {
    pub message: Option<String>,
    // "username" ou "password", quando o servidor sabe apontar o campo
    pub wrong_credential: Option<String>,
}

// Identidade do usuário vinda do payload `userData`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub first_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
    pub banner_image: Option<String>,
}

// Troca de credenciais bem-sucedida, já normalizada
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub token: String,
    pub user: UserIdentity,
}

// Máquina de estados da sessão
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Authenticating,
    Authenticated,
    Failed,
}

// Snapshot da sessão lido pela UI.
// Invariante: `status == Authenticated` ⇔ token e usuário presentes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserIdentity>,
    pub status: SessionStatus,
    pub error: Option<AuthError>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }
}
