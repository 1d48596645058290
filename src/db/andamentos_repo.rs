// src/db/andamentos_repo.rs

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow},
    Column, Connection, Executor, Row, Statement, TypeInfo, ValueRef,
};

use crate::{
    common::error::AppError,
    config::DbSettings,
    models::andamento::{AndamentoFilter, Cell, ResultSet},
};

/// De onde vêm as linhas de ANDAMENTOS. O painel só depende deste contrato;
/// a implementação MySQL fica em `AndamentosRepository`.
#[async_trait]
pub trait AndamentoSource: Send + Sync {
    async fn fetch(
        &self,
        settings: &DbSettings,
        filter: &AndamentoFilter,
    ) -> Result<ResultSet, AppError>;
}

// Sem pool: cada consulta abre e fecha a sua própria conexão.
#[derive(Clone, Default)]
pub struct AndamentosRepository;

impl AndamentosRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn select_sql(filter: &AndamentoFilter) -> String {
        let mut sql = String::from("SELECT * FROM ANDAMENTOS WHERE nome_procuradoria = ?");
        if filter.natureza_prefix.is_some() {
            sql.push_str(" AND natureza LIKE ? COLLATE utf8mb4_unicode_ci");
        }
        sql
    }

    fn connect_options(settings: &DbSettings) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.password)
            .database(&settings.database)
    }
}

#[async_trait]
impl AndamentoSource for AndamentosRepository {
    async fn fetch(
        &self,
        settings: &DbSettings,
        filter: &AndamentoFilter,
    ) -> Result<ResultSet, AppError> {
        let mut conn = MySqlConnection::connect_with(&Self::connect_options(settings)).await?;

        let result = query_andamentos(&mut conn, filter).await;

        // A conexão é fechada mesmo quando a consulta falhou
        if let Err(e) = conn.close().await {
            tracing::warn!("Falha ao fechar a conexão com o banco: {}", e);
        }

        let result_set = result?;
        tracing::info!(
            "Consulta ANDAMENTOS (equipe={}, natureza={}) retornou {} linhas",
            filter.team,
            filter.natureza_prefix.as_deref().unwrap_or("*"),
            result_set.len()
        );
        Ok(result_set)
    }
}

/// Padrão de LIKE que casa com qualquer valor começando por `prefix`.
pub fn like_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

async fn query_andamentos(
    conn: &mut MySqlConnection,
    filter: &AndamentoFilter,
) -> Result<ResultSet, sqlx::Error> {
    let sql = AndamentosRepository::select_sql(filter);

    // Prepara antes para ter os nomes das colunas mesmo sem nenhuma linha
    let statement = (&mut *conn).prepare(&sql).await?;
    let columns: Vec<String> = statement
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let mut query = statement.query().bind(filter.team.clone());
    if let Some(prefix) = &filter.natureza_prefix {
        query = query.bind(like_prefix_pattern(prefix));
    }

    let rows: Vec<MySqlRow> = query.fetch_all(&mut *conn).await?;

    let rows = rows
        .iter()
        .map(|row| (0..row.len()).map(|idx| decode_cell(row, idx)).collect())
        .collect::<Result<Vec<Vec<Cell>>, sqlx::Error>>()?;

    Ok(ResultSet::new(columns, rows))
}

// Converte a coluna `idx` no valor opaco correspondente ao tipo MySQL.
fn decode_cell(row: &MySqlRow, idx: usize) -> Result<Cell, sqlx::Error> {
    let type_name = {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            return Ok(Cell::Null);
        }
        raw.type_info().name().to_ascii_uppercase()
    };

    let cell = match type_name.as_str() {
        "BOOLEAN" => Cell::Int(i64::from(row.try_get::<bool, _>(idx)?)),
        name if name.ends_with("UNSIGNED") => Cell::UInt(row.try_get_unchecked::<u64, _>(idx)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
            Cell::Int(row.try_get_unchecked::<i64, _>(idx)?)
        }
        "FLOAT" => Cell::Float(f64::from(row.try_get::<f32, _>(idx)?)),
        "DOUBLE" => Cell::Float(row.try_get::<f64, _>(idx)?),
        "DECIMAL" => Cell::Decimal(row.try_get::<Decimal, _>(idx)?),
        "DATE" => Cell::Date(row.try_get::<NaiveDate, _>(idx)?),
        "DATETIME" | "TIMESTAMP" => Cell::DateTime(row.try_get::<NaiveDateTime, _>(idx)?),
        "TIME" => Cell::Time(row.try_get::<NaiveTime, _>(idx)?),
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
        | "GEOMETRY" => Cell::Bytes(row.try_get_unchecked::<Vec<u8>, _>(idx)?),
        // VARCHAR, CHAR, TEXT, ENUM, SET, JSON...
        _ => match row.try_get_unchecked::<String, _>(idx) {
            Ok(text) => Cell::Text(text),
            Err(_) => Cell::Bytes(row.try_get_unchecked::<Vec<u8>, _>(idx)?),
        },
    };

    Ok(cell)
}
