// src/models/relatorio.rs

use serde::Serialize;
use utoipa::ToSchema;

// 1. Quantidade por mês (gráfico de barras simples)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    #[schema(example = "2024-01")]
    pub month: String,
    pub count: u64,
}

// 2. Quantidade por mês e servidor (barras empilhadas + tabela)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffMonthlyCount {
    #[schema(example = "2024-01")]
    pub month: String,
    #[schema(example = "Leonardo Tokuda Pereira")]
    pub name: String,
    pub count: u64,
}

// 3. Total por servidor (gráfico de pizza)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffTotal {
    #[schema(example = "Leonardo Tokuda Pereira")]
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBreakdown {
    pub per_month: Vec<MonthlyCount>,
    // Vazio quando o relatório não quebra por servidor (GAPR).
    pub per_month_staff: Vec<StaffMonthlyCount>,
    pub per_staff: Vec<StaffTotal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[schema(example = "PTB")]
    pub team: String,
    #[schema(example = "cit")]
    pub natureza_prefix: Option<String>,
    /// Quantidade total de linhas depois do filtro de servidores.
    pub total: u64,
    /// Ausente quando a consulta não trouxe a coluna `datapub`.
    pub breakdown: Option<MonthlyBreakdown>,
}
