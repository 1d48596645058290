mod common;

use axum::http::StatusCode;
use common::{
    andamentos, build_app, build_app_without_config, dt, get, get_json, FakeSource, LEONARDO,
    NATALIA,
};
use painel_andamentos::models::andamento::{Cell, ResultSet};
use serde_json::json;

fn ptb_source() -> FakeSource {
    FakeSource::default()
        .with(
            "PTB",
            Some("cit"),
            andamentos(
                "PTB",
                "Citação",
                &[
                    (NATALIA, dt("2024-01-03 09:00:00")),
                    (NATALIA, dt("2024-01-18 14:20:00")),
                    (LEONARDO, dt("2024-01-25 11:05:00")),
                ],
            ),
        )
        .with(
            "PTB",
            Some("int"),
            andamentos(
                "PTB",
                "Intimação",
                &[
                    (LEONARDO, dt("2024-01-10 08:00:00")),
                    ("Unknown Person", dt("2024-01-11 08:00:00")),
                    (NATALIA, dt("2024-02-02 16:30:00")),
                ],
            ),
        )
}

#[tokio::test]
async fn ptb_citations_report_counts_per_staff_and_month() {
    let app = build_app(ptb_source());

    let (status, body) = get_json(&app, "/api/relatorios/ptb/citacoes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team"], "PTB");
    assert_eq!(body["naturezaPrefix"], "cit");
    assert_eq!(body["total"], 3);
    assert_eq!(
        body["breakdown"]["perStaff"],
        json!([
            { "name": NATALIA, "count": 2 },
            { "name": LEONARDO, "count": 1 },
        ])
    );
    assert_eq!(
        body["breakdown"]["perMonth"],
        json!([{ "month": "2024-01", "count": 3 }])
    );
}

#[tokio::test]
async fn staff_outside_the_allow_list_never_reaches_the_report() {
    let app = build_app(ptb_source());

    let (status, body) = get_json(&app, "/api/relatorios/ptb/intimacoes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    let text = body.to_string();
    assert!(!text.contains("Unknown Person"));
    assert_eq!(
        body["breakdown"]["perMonth"],
        json!([
            { "month": "2024-01", "count": 1 },
            { "month": "2024-02", "count": 1 },
        ])
    );
}

#[tokio::test]
async fn gaps_between_months_are_not_filled() {
    let source = FakeSource::default().with(
        "GAPR",
        None,
        andamentos(
            "GAPR",
            "Despacho",
            &[
                ("Qualquer", dt("2024-01-05 10:00:00")),
                ("Qualquer", dt("2024-04-05 10:00:00")),
            ],
        ),
    );
    let app = build_app(source);

    let (_, body) = get_json(&app, "/api/relatorios/gapr").await;

    assert_eq!(
        body["breakdown"]["perMonth"],
        json!([
            { "month": "2024-01", "count": 1 },
            { "month": "2024-04", "count": 1 },
        ])
    );
}

#[tokio::test]
async fn gapr_without_datapub_renders_only_the_metric() {
    let rows = ResultSet::new(
        vec!["nome_procuradoria".into(), "natureza".into()],
        vec![
            vec![Cell::Text("GAPR".into()), Cell::Text("Despacho".into())],
            vec![Cell::Text("GAPR".into()), Cell::Text("Ofício".into())],
        ],
    );
    let app = build_app(FakeSource::default().with("GAPR", None, rows));

    let (status, html) = get(&app, "/gapr").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("GAPR - 2024"));
    assert!(html.contains(r#"<span class="valor">2</span>"#));
    assert!(!html.contains(r#"class="grafico""#));
    assert!(!html.contains("<table>"));
    assert!(!html.contains(r#"class="erro""#));
}

#[tokio::test]
async fn ptb_page_shows_both_tabs() {
    let app = build_app(ptb_source());

    let (status, html) = get(&app, "/ptb").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"id="aba-citacoes""#));
    assert!(html.contains(r#"id="aba-intimacoes""#));
    assert!(html.contains("Distribuição de Publicações por Usuário (Citações)"));
    assert!(html.contains("Publicações Mensais por Usuário (Intimações)"));
    assert!(!html.contains("Unknown Person"));
}

#[tokio::test]
async fn empty_result_shows_zero_without_charts() {
    let app = build_app(FakeSource::default());

    let (status, html) = get(&app, "/gapr").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<span class="valor">0</span>"#));
    assert!(!html.contains(r#"class="grafico""#));
}

#[tokio::test]
async fn missing_configuration_stops_before_any_query() {
    let app = build_app_without_config(ptb_source());

    let (status, html) = get(&app, "/ptb").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Faltam informações de conexão com o banco de dados."));
    assert!(!html.contains(r#"class="metrica""#));
    assert!(!html.contains("aba-citacoes"));

    let (status, body) = get_json(&app, "/api/relatorios/gapr").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body["error"],
        "Faltam informações de conexão com o banco de dados."
    );
}

#[tokio::test]
async fn query_failure_in_one_tab_keeps_the_other() {
    let app = build_app(ptb_source().failing("PTB", Some("int")));

    let (status, html) = get(&app, "/ptb").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Erro na conexão com o banco de dados: "));
    assert!(html.contains("Access denied"));
    assert!(html.contains(r#"id="citacoes-pizza""#));
    assert!(!html.contains(r#"id="intimacoes-pizza""#));

    let (status, body) = get_json(&app, "/api/relatorios/ptb/intimacoes").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("Access denied"));
}

#[tokio::test]
async fn malformed_dates_fail_the_aggregation() {
    let source = FakeSource::default().with(
        "GAPR",
        None,
        andamentos("GAPR", "Despacho", &[("Qualquer", Cell::Text("32/13/2024".into()))]),
    );
    let app = build_app(source);

    let (status, body) = get_json(&app, "/api/relatorios/gapr").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("32/13/2024"));

    let (_, html) = get(&app, "/gapr").await;
    assert!(html.contains("Erro ao processar os dados"));
    assert!(!html.contains(r#"class="metrica""#));
}

#[tokio::test]
async fn unknown_tab_is_not_found() {
    let app = build_app(ptb_source());

    let (status, body) = get_json(&app, "/api/relatorios/ptb/despachos").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Aba desconhecida: despachos");
}

#[tokio::test]
async fn root_redirects_to_ptb_and_health_answers() {
    let app = build_app(FakeSource::default());

    let (status, _) = get(&app, "/").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn openapi_document_lists_report_routes() {
    let app = build_app(FakeSource::default());

    let (status, body) = get_json(&app, "/api/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/relatorios/gapr"].is_object());
    assert!(body["paths"]["/api/relatorios/ptb/{aba}"].is_object());
    assert!(body["components"]["schemas"]["Report"].is_object());
}
