// src/common/error.rs

use thiserror::Error;

// Erros de autenticação, agora com `thiserror` para melhor ergonomia.
// Exatamente um fica ativo por vez na sessão; uma nova tentativa de login
// limpa o anterior.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Nome de usuário incorreto: {0}")]
    WrongUsername(String),

    #[error("Senha incorreta: {0}")]
    WrongPassword(String),

    #[error("Sem resposta do servidor: {0}")]
    NetworkUnavailable(String),

    #[error("Requisição rejeitada pelo servidor: {0}")]
    ServerRejected(String),

    #[error("Tempo de resposta esgotado: {0}")]
    Timeout(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    WrongUsername,
    WrongPassword,
    NetworkUnavailable,
    ServerRejected,
    Timeout,
}

// Qual campo do formulário o servidor apontou como errado.
// A UI usa isso para destacar o campo certo, espelhando o `wrongCredential`
// que o endpoint devolve no corpo da rejeição.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrongCredential {
    Username,
    Password,
}

impl AuthError {
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::WrongUsername(_) => AuthErrorKind::WrongUsername,
            AuthError::WrongPassword(_) => AuthErrorKind::WrongPassword,
            AuthError::NetworkUnavailable(_) => AuthErrorKind::NetworkUnavailable,
            AuthError::ServerRejected(_) => AuthErrorKind::ServerRejected,
            AuthError::Timeout(_) => AuthErrorKind::Timeout,
        }
    }

    pub fn wrong_credential(&self) -> Option<WrongCredential> {
        match self {
            AuthError::WrongUsername(_) => Some(WrongCredential::Username),
            AuthError::WrongPassword(_) => Some(WrongCredential::Password),
            _ => None,
        }
    }

    // Rejeição definitiva de credencial não vale nova tentativa;
    // o resto (rede, timeout, servidor instável) vale.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            AuthError::WrongUsername(_) | AuthError::WrongPassword(_)
        )
    }
}

// Erros de busca de dados do perfil. Ficam restritos à coleção que falhou:
// nunca derrubam a sessão nem as coleções irmãs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Sem conexão com o servidor: {0}")]
    NetworkUnavailable(String),

    #[error("Erro do servidor ({status}): {message}")]
    ServerError { status: u16, message: String },

    // Token ausente, expirado ou revogado. A casca do aplicativo decide
    // se faz logout ao receber este erro.
    #[error("Sessão não autorizada pelo servidor")]
    Unauthorized,

    // A política de retry desistiu depois de `attempts` tentativas.
    #[error("Tentativas esgotadas ({attempts}): {last}")]
    Exhausted { attempts: u32, last: String },
}

impl FetchError {
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::NetworkUnavailable(_) => true,
            FetchError::ServerError { status, .. } => *status >= 500,
            FetchError::Unauthorized | FetchError::Exhausted { .. } => false,
        }
    }
}

// Erros do armazenamento durável de credenciais.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Erro de I/O no armazenamento de credenciais")]
    Io(#[from] std::io::Error),

    #[error("Conteúdo inválido no armazenamento de credenciais")]
    Serde(#[from] serde_json::Error),
}
