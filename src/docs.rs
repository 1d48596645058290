// src/docs.rs

use axum::Json;
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Painel de Andamentos",
        description = "Relatórios mensais de andamentos da PTB e do GAPR"
    ),
    paths(
        // --- Relatórios ---
        handlers::paineis::get_ptb_report,
        handlers::paineis::get_gapr_report,
    ),
    components(
        schemas(
            models::relatorio::Report,
            models::relatorio::MonthlyBreakdown,
            models::relatorio::MonthlyCount,
            models::relatorio::StaffMonthlyCount,
            models::relatorio::StaffTotal,
        )
    ),
    tags(
        (name = "Relatórios", description = "Contagens agregadas em JSON")
    )
)]
pub struct ApiDoc;

// GET /api/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
