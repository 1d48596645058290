// src/models/andamento.rs

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

// Valor bruto de uma coluna de ANDAMENTOS. As colunas que o painel não usa
// passam adiante sem interpretação.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    Bytes(Vec<u8>),
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// Cópia somente leitura do resultado de uma consulta: nomes das colunas na
/// ordem devolvida pelo banco e as linhas correspondentes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

// Filtro aplicado na consulta: equipe (igualdade) e prefixo da natureza.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndamentoFilter {
    pub team: String,
    pub natureza_prefix: Option<String>,
}

impl AndamentoFilter {
    pub fn team(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            natureza_prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.natureza_prefix = Some(prefix.into());
        self
    }
}
