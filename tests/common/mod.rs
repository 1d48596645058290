#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDateTime;
use painel_andamentos::app;
use painel_andamentos::common::error::{AppError, ConfigError};
use painel_andamentos::config::{AppState, DbSettings, StaffAllowList};
use painel_andamentos::db::AndamentoSource;
use painel_andamentos::models::andamento::{AndamentoFilter, Cell, ResultSet};
use painel_andamentos::services::ReportService;
use std::collections::HashMap;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const NATALIA: &str = "Natália Franco Massuia e Marcondes";
pub const LEONARDO: &str = "Leonardo Tokuda Pereira";

/// Fonte em memória: um resultado por (equipe, prefixo), ou falha simulada.
#[derive(Default)]
pub struct FakeSource {
    results: HashMap<(String, Option<String>), ResultSet>,
    failures: Vec<(String, Option<String>)>,
}

impl FakeSource {
    pub fn with(mut self, team: &str, prefix: Option<&str>, rows: ResultSet) -> Self {
        self.results
            .insert((team.to_string(), prefix.map(str::to_string)), rows);
        self
    }

    pub fn failing(mut self, team: &str, prefix: Option<&str>) -> Self {
        self.failures
            .push((team.to_string(), prefix.map(str::to_string)));
        self
    }
}

#[async_trait]
impl AndamentoSource for FakeSource {
    async fn fetch(
        &self,
        _settings: &DbSettings,
        filter: &AndamentoFilter,
    ) -> Result<ResultSet, AppError> {
        let key = (filter.team.clone(), filter.natureza_prefix.clone());
        if self.failures.contains(&key) {
            return Err(sqlx::Error::Protocol("Access denied for user 'painel'".into()).into());
        }
        Ok(self.results.get(&key).cloned().unwrap_or_default())
    }
}

pub fn settings() -> DbSettings {
    DbSettings::from_lookup(|key| match key {
        "DB_HOST" => Some("localhost".to_string()),
        "DB_USER" => Some("painel".to_string()),
        "DB_DATABASE" => Some("procuradoria".to_string()),
        _ => None,
    })
    .expect("test settings should be complete")
}

pub fn staff() -> StaffAllowList {
    StaffAllowList::from_json(include_str!("../../config/ptb_staff.json"))
        .expect("bundled staff list should parse")
}

pub fn build_app(source: FakeSource) -> Router {
    let service = ReportService::new(Arc::new(source), Arc::new(staff()));
    app::build_router(AppState::new(Ok(settings()), service))
}

pub fn build_app_without_config(source: FakeSource) -> Router {
    let service = ReportService::new(Arc::new(source), Arc::new(staff()));
    app::build_router(AppState::new(
        Err(ConfigError::MissingField("DB_HOST")),
        service,
    ))
}

pub fn dt(s: &str) -> Cell {
    Cell::DateTime(
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("valid test datetime"),
    )
}

/// Linhas no formato de ANDAMENTOS: (name, datapub).
pub fn andamentos(team: &str, natureza: &str, rows: &[(&str, Cell)]) -> ResultSet {
    ResultSet::new(
        vec![
            "id".into(),
            "nome_procuradoria".into(),
            "natureza".into(),
            "name".into(),
            "datapub".into(),
            "processo".into(),
        ],
        rows.iter()
            .enumerate()
            .map(|(i, (name, datapub))| {
                vec![
                    Cell::Int(i as i64 + 1),
                    Cell::Text(team.to_string()),
                    Cell::Text(natureza.to_string()),
                    Cell::Text(name.to_string()),
                    datapub.clone(),
                    Cell::Text(format!("0000{i}-12.2024.5.02.0001")),
                ]
            })
            .collect(),
    )
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");

    (status, String::from_utf8_lossy(&bytes).into_owned())
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    let value = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    (status, value)
}
