// src/models/painel.rs

use crate::models::andamento::AndamentoFilter;

pub const PTB_TEAM: &str = "PTB";
pub const GAPR_TEAM: &str = "GAPR";

// As duas abas do painel da PTB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PtbTab {
    Citacoes,
    Intimacoes,
}

impl PtbTab {
    pub const ALL: [PtbTab; 2] = [PtbTab::Citacoes, PtbTab::Intimacoes];

    pub fn natureza_prefix(self) -> &'static str {
        match self {
            PtbTab::Citacoes => "cit",
            PtbTab::Intimacoes => "int",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PtbTab::Citacoes => "Citações",
            PtbTab::Intimacoes => "Intimações",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            PtbTab::Citacoes => "citacoes",
            PtbTab::Intimacoes => "intimacoes",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.slug() == slug)
    }
}

/// O que um relatório consulta e como agrega.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub filter: AndamentoFilter,
    // Filtra pela lista de servidores e quebra as contagens por `name`.
    pub by_staff: bool,
}

impl ReportQuery {
    pub fn ptb(tab: PtbTab) -> Self {
        Self {
            filter: AndamentoFilter::team(PTB_TEAM).with_prefix(tab.natureza_prefix()),
            by_staff: true,
        }
    }

    pub fn gapr() -> Self {
        Self {
            filter: AndamentoFilter::team(GAPR_TEAM),
            by_staff: false,
        }
    }
}
