// src/views/graficos.rs
//
// Opções de gráfico no formato do ECharts. O navegador desenha; aqui só
// montamos o JSON.

use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::{
    models::relatorio::{MonthlyCount, StaffMonthlyCount, StaffTotal},
    views::templates::Grafico,
};

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("sem dados para o gráfico {0}")]
    EmptyData(String),

    #[error("falha ao serializar o gráfico: {0}")]
    Serialize(#[from] serde_json::Error),
}

// 1. Pizza com furo (participação de cada servidor)
pub fn staff_share_donut(title: &str, per_staff: &[StaffTotal]) -> Result<Value, ChartError> {
    if per_staff.is_empty() {
        return Err(ChartError::EmptyData(title.to_string()));
    }

    let data: Vec<Value> = per_staff
        .iter()
        .map(|s| json!({ "name": s.name, "value": s.count }))
        .collect();

    Ok(json!({
        "title": { "text": title },
        "tooltip": { "trigger": "item", "formatter": "{b}: {c} ({d}%)" },
        "legend": { "type": "scroll", "bottom": 0 },
        "series": [{
            "name": "Quantidade",
            "type": "pie",
            "radius": ["40%", "70%"],
            "label": { "formatter": "{d}%" },
            "data": data,
        }],
    }))
}

/// Barras com o total de cada mês.
pub fn monthly_totals_bar(
    title: &str,
    subtitle: Option<&str>,
    series_name: &str,
    per_month: &[MonthlyCount],
    toolbox: bool,
) -> Result<Value, ChartError> {
    if per_month.is_empty() {
        return Err(ChartError::EmptyData(title.to_string()));
    }

    let months: Vec<&str> = per_month.iter().map(|m| m.month.as_str()).collect();
    let counts: Vec<u64> = per_month.iter().map(|m| m.count).collect();

    let mut option = json!({
        "title": { "text": title, "subtext": subtitle.unwrap_or_default() },
        "tooltip": { "trigger": "axis" },
        "xAxis": { "type": "category", "data": months },
        "yAxis": { "type": "value", "name": series_name },
        "series": [{ "name": series_name, "type": "bar", "data": counts }],
    });

    if toolbox {
        option["toolbox"] = json!({
            "feature": {
                "saveAsImage": {},
                "dataView": { "readOnly": true },
                "magicType": { "type": ["line", "bar"] },
                "restore": {},
            }
        });
    }

    Ok(option)
}

// 2. Barras empilhadas por servidor, com o valor escrito em cada bloco
pub fn monthly_staff_stacked_bar(
    title: &str,
    per_month_staff: &[StaffMonthlyCount],
) -> Result<Value, ChartError> {
    if per_month_staff.is_empty() {
        return Err(ChartError::EmptyData(title.to_string()));
    }

    let months: BTreeSet<&str> = per_month_staff.iter().map(|r| r.month.as_str()).collect();
    let mut by_staff: BTreeMap<&str, BTreeMap<&str, u64>> = BTreeMap::new();
    for row in per_month_staff {
        by_staff
            .entry(row.name.as_str())
            .or_default()
            .insert(row.month.as_str(), row.count);
    }

    // Mês sem publicações daquele servidor fica sem bloco (null)
    let series: Vec<Value> = by_staff
        .iter()
        .map(|(name, counts)| {
            let data: Vec<Value> = months
                .iter()
                .map(|month| counts.get(month).map_or(Value::Null, |c| json!(c)))
                .collect();
            json!({
                "name": name,
                "type": "bar",
                "stack": "total",
                "label": { "show": true },
                "data": data,
            })
        })
        .collect();

    Ok(json!({
        "title": { "text": title },
        "tooltip": { "trigger": "axis", "axisPointer": { "type": "shadow" } },
        "legend": { "type": "scroll", "bottom": 0 },
        "xAxis": { "type": "category", "name": "Mês e Ano", "data": months },
        "yAxis": { "type": "value", "name": "Quantidade" },
        "series": series,
    }))
}

/// Prepara o gráfico `option` para ser desenhado no elemento `id`.
pub fn grafico(id: &str, option: &Value, height_px: u32) -> Result<Grafico, ChartError> {
    let json = serde_json::to_string(option)?;
    Ok(Grafico {
        id: id.to_string(),
        height_px,
        option_json: script_safe_json(&json),
    })
}

// JSON embutido em `<script>` não pode conter `</script>`.
fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}
