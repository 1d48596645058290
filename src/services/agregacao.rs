// src/services/agregacao.rs
//
// Funções puras: recebem o resultado da consulta e devolvem as contagens.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

use crate::{
    common::error::AggregationError,
    config::StaffAllowList,
    models::{
        andamento::{Cell, ResultSet},
        painel::ReportQuery,
        relatorio::{MonthlyBreakdown, MonthlyCount, Report, StaffMonthlyCount, StaffTotal},
    },
};

pub const NAME_COLUMN: &str = "name";
pub const DATAPUB_COLUMN: &str = "datapub";

// Balde das linhas com `datapub` nulo, para que a soma mensal feche com o total.
pub const UNDATED_BUCKET: &str = "Sem data";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

/// Mantém só as linhas cujo `name` está na lista. Sem a coluna, nada fica.
pub fn retain_staff(result_set: ResultSet, allow_list: &StaffAllowList) -> ResultSet {
    let ResultSet { columns, rows } = result_set;

    let Some(idx) = columns.iter().position(|c| c == NAME_COLUMN) else {
        return ResultSet::new(columns, Vec::new());
    };

    let rows = rows
        .into_iter()
        .filter(|row| {
            row.get(idx)
                .and_then(Cell::as_text)
                .is_some_and(|name| allow_list.contains(name))
        })
        .collect();

    ResultSet::new(columns, rows)
}

/// Data de publicação de uma célula. `Ok(None)` para nulo ou texto vazio.
pub fn parse_publication_date(cell: &Cell) -> Result<Option<NaiveDate>, String> {
    match cell {
        Cell::Null => Ok(None),
        Cell::Date(date) => Ok(Some(*date)),
        Cell::DateTime(datetime) => Ok(Some(datetime.date())),
        Cell::Text(text) => parse_date_text(text.trim()),
        other => Err(format!("{other:?}")),
    }
}

fn parse_date_text(text: &str) -> Result<Option<NaiveDate>, String> {
    if text.is_empty() {
        return Ok(None);
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Some(datetime.date()));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(Some(date));
        }
    }
    // Mantém o mês do relógio local gravado, sem converter fuso
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(datetime.naive_local().date()));
    }

    Err(text.to_string())
}

/// Balde mensal `YYYY-MM` da célula `datapub`.
pub fn month_bucket(cell: &Cell) -> Result<String, String> {
    Ok(match parse_publication_date(cell)? {
        Some(date) => date.format("%Y-%m").to_string(),
        None => UNDATED_BUCKET.to_string(),
    })
}

/// Agrega as linhas (já filtradas) no relatório do painel.
pub fn build_report(query: &ReportQuery, rows: &ResultSet) -> Result<Report, AggregationError> {
    let total = rows.len() as u64;

    let breakdown = match rows.column_index(DATAPUB_COLUMN) {
        Some(date_idx) => Some(monthly_breakdown(rows, date_idx, query.by_staff)?),
        None => None,
    };

    Ok(Report {
        team: query.filter.team.clone(),
        natureza_prefix: query.filter.natureza_prefix.clone(),
        total,
        breakdown,
    })
}

fn monthly_breakdown(
    rows: &ResultSet,
    date_idx: usize,
    by_staff: bool,
) -> Result<MonthlyBreakdown, AggregationError> {
    let name_idx = rows.column_index(NAME_COLUMN);

    let mut per_month: BTreeMap<String, u64> = BTreeMap::new();
    let mut per_month_staff: BTreeMap<(String, String), u64> = BTreeMap::new();
    let mut per_staff: BTreeMap<String, u64> = BTreeMap::new();

    for (position, row) in rows.rows.iter().enumerate() {
        let cell = row.get(date_idx).unwrap_or(&Cell::Null);
        let month = month_bucket(cell).map_err(|value| AggregationError::InvalidDate {
            row: position + 1,
            value,
        })?;

        *per_month.entry(month.clone()).or_default() += 1;

        if !by_staff {
            continue;
        }
        let Some(name) = name_idx.and_then(|idx| row.get(idx)).and_then(Cell::as_text) else {
            continue;
        };
        *per_month_staff
            .entry((month, name.to_string()))
            .or_default() += 1;
        *per_staff.entry(name.to_string()).or_default() += 1;
    }

    let per_month = per_month
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect();

    let per_month_staff = per_month_staff
        .into_iter()
        .map(|((month, name), count)| StaffMonthlyCount { month, name, count })
        .collect();

    let mut per_staff: Vec<StaffTotal> = per_staff
        .into_iter()
        .map(|(name, count)| StaffTotal { name, count })
        .collect();
    // Maior fatia primeiro; empate pelo nome
    per_staff.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    Ok(MonthlyBreakdown {
        per_month,
        per_month_staff,
        per_staff,
    })
}
