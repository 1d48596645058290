// src/services/relatorio_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    config::{DbSettings, StaffAllowList},
    db::AndamentoSource,
    models::{
        painel::{PtbTab, ReportQuery},
        relatorio::Report,
    },
    services::agregacao::{build_report, retain_staff},
};

#[derive(Clone)]
pub struct ReportService {
    source: Arc<dyn AndamentoSource>,
    staff: Arc<StaffAllowList>,
}

impl ReportService {
    pub fn new(source: Arc<dyn AndamentoSource>, staff: Arc<StaffAllowList>) -> Self {
        Self { source, staff }
    }

    // Consulta -> filtro de servidores -> agregação. Cada chamada é um
    // pipeline independente, com a sua própria conexão.
    pub async fn build(&self, settings: &DbSettings, query: &ReportQuery) -> Result<Report, AppError> {
        let rows = self.source.fetch(settings, &query.filter).await?;

        let rows = if query.by_staff {
            let fetched = rows.len();
            let kept = retain_staff(rows, &self.staff);
            tracing::debug!(
                "Filtro de servidores ({}): {} de {} linhas mantidas",
                self.staff.team,
                kept.len(),
                fetched
            );
            kept
        } else {
            rows
        };

        Ok(build_report(query, &rows)?)
    }

    pub async fn ptb_report(&self, settings: &DbSettings, tab: PtbTab) -> Result<Report, AppError> {
        self.build(settings, &ReportQuery::ptb(tab)).await
    }

    pub async fn gapr_report(&self, settings: &DbSettings) -> Result<Report, AppError> {
        self.build(settings, &ReportQuery::gapr()).await
    }
}
