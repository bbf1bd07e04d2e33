// src/remote/http.rs

// Utilidades compartilhadas pelos adaptadores HTTP

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::common::error::FetchError;

// Falha de transporte: nenhuma resposta chegou do servidor
pub(crate) fn classify_transport(error: reqwest::Error) -> FetchError {
    FetchError::NetworkUnavailable(error.to_string())
}

// Converte uma resposta em JSON tipado, mapeando os status de erro
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(FetchError::Unauthorized);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(FetchError::ServerError {
            status: status.as_u16(),
            message,
        });
    }
    response.json::<T>().await.map_err(|e| FetchError::ServerError {
        status: status.as_u16(),
        message: format!("Resposta malformada: {e}"),
    })
}
