// src/models/tenancy.rs

use serde::{Deserialize, Serialize};

// ---
// 1. Tenant (O "Estabelecimento")
// ---
// A empresa na qual a sessão é autenticada. A lista vem pronta do servidor
// e só muda por substituição completa, nunca por merge incremental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub tenant_id: String,
    pub name: String,
}

// ---
// 2. TenantSelection (snapshot do seletor)
// ---
// No máximo um estabelecimento selecionado por vez; a seleção sobrevive à
// navegação e é limpa no logout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantSelection {
    pub companies: Vec<Tenant>,
    pub search_term: String,
    pub selected: Option<Tenant>,
}
