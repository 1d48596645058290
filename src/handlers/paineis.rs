// src/handlers/paineis.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{painel::PtbTab, relatorio::Report},
    views::pagina,
};

// GET /
pub async fn index() -> Redirect {
    Redirect::to("/ptb")
}

// GET /ptb
// Configuração ausente encerra a página; falha de consulta encerra só a aba.
pub async fn ptb_page(State(app_state): State<AppState>) -> Result<Html<String>, AppError> {
    let settings = match app_state.db_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Painel PTB sem configuração: {}", e);
            return Ok(Html(pagina::error_page(pagina::PTB_TITLE, &e)?));
        }
    };

    let mut tabs = Vec::with_capacity(PtbTab::ALL.len());
    for tab in PtbTab::ALL {
        let outcome = app_state.report_service.ptb_report(settings, tab).await;
        if let Err(e) = &outcome {
            tracing::error!("Painel PTB, aba {}: {}", tab.label(), e);
        }
        tabs.push((tab, outcome));
    }

    Ok(Html(pagina::ptb_page(&tabs)?))
}

// GET /gapr
pub async fn gapr_page(State(app_state): State<AppState>) -> Result<Html<String>, AppError> {
    let outcome = match app_state.db_settings() {
        Ok(settings) => app_state.report_service.gapr_report(settings).await,
        Err(e) => Err(e),
    };

    if let Err(e) = &outcome {
        tracing::error!("Painel GAPR: {}", e);
    }

    Ok(Html(pagina::gapr_page(&outcome)?))
}

// GET /api/relatorios/ptb/{aba}
#[utoipa::path(
    get,
    path = "/api/relatorios/ptb/{aba}",
    tag = "Relatórios",
    params(
        ("aba" = String, Path, description = "Sub-relatório: citacoes ou intimacoes")
    ),
    responses(
        (status = 200, description = "Contagens mensais e por servidor da aba", body = Report),
        (status = 404, description = "Aba desconhecida"),
        (status = 422, description = "Dados com data de publicação inválida"),
        (status = 502, description = "Falha ao consultar o banco"),
        (status = 503, description = "Configuração do banco ausente")
    )
)]
pub async fn get_ptb_report(
    State(app_state): State<AppState>,
    Path(aba): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tab = PtbTab::from_slug(&aba).ok_or(AppError::UnknownTab(aba))?;
    let settings = app_state.db_settings()?;

    let report = app_state.report_service.ptb_report(settings, tab).await?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/relatorios/gapr
#[utoipa::path(
    get,
    path = "/api/relatorios/gapr",
    tag = "Relatórios",
    responses(
        (status = 200, description = "Contagens mensais do GAPR", body = Report),
        (status = 422, description = "Dados com data de publicação inválida"),
        (status = 502, description = "Falha ao consultar o banco"),
        (status = 503, description = "Configuração do banco ausente")
    )
)]
pub async fn get_gapr_report(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.db_settings()?;

    let report = app_state.report_service.gapr_report(settings).await?;

    Ok((StatusCode::OK, Json(report)))
}
