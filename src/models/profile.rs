// src/models/profile.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Um pedido concluído, como aparece na lista do perfil
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub total: Decimal,
    pub status: String,
}

// Resumo de um mês fechado de pagamentos. O mês corrente é um singleton
// buscado à parte, nunca entra no histórico paginado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPaymentSummary {
    pub month: u32,
    pub year: i32,
    pub total_payment: Decimal,
    pub number_of_orders: u32,
}

// Coleção paginada por offset/limit, sempre do mais recente para o mais
// antigo. Só a operação de busca dona da coleção pode mutá-la; a UI lê
// snapshots. Invariante: `loaded_count == items.len()` por construção.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedCollection<T> {
    items: Vec<T>,
    has_more: bool,
}

impl<T> Default for PaginatedCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            has_more: true,
        }
    }
}

impl<T> PaginatedCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn loaded_count(&self) -> usize {
        self.items.len()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    // Anexa uma página preservando a ordem do que já foi carregado.
    // `requested` é o limit pedido ao servidor: página menor que o pedido
    // encerra a paginação, assim como atingir o teto `ceiling`.
    pub fn append_page(&mut self, page: Vec<T>, requested: usize, ceiling: usize) {
        let short_page = page.len() < requested;
        self.items.extend(page);
        if self.items.len() > ceiling {
            self.items.truncate(ceiling);
        }
        self.has_more = !short_page && self.items.len() < ceiling;
    }
}
