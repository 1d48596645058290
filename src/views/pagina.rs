// src/views/pagina.rs

use askama::Template;

use crate::{
    common::error::AppError,
    models::{painel::PtbTab, relatorio::Report},
    views::{
        graficos::{self, ChartError},
        templates::{
            ErroTemplate, GaprDetalhes, GaprSecao, GaprTemplate, Grafico, PtbAba, PtbDetalhes,
            PtbSecao, PtbTemplate, Tabela, Widget,
        },
    },
};

pub const PTB_TITLE: &str = "Estatísticas da Procuradoria Trabalhista - PTB 📊";
pub const GAPR_TITLE: &str = "Estatística - grupo apoio processos relevantes - GAPR - 2024 📊";

// Mesmo texto de `componentes.html`.
pub const WIDGET_FALLBACK: &str = "Não foi possível exibir este componente.";

// Um componente que falha vira um aviso; o resto da página continua.
fn widget(name: &str, rendered: Result<Grafico, ChartError>) -> Widget {
    match rendered {
        Ok(grafico) => Some(grafico),
        Err(e) => {
            tracing::warn!("Componente '{}' não renderizado: {}", name, e);
            None
        }
    }
}

/// Conteúdo de uma aba da PTB: métrica, pizza + barras, barras empilhadas e tabela.
pub fn ptb_section(tab: PtbTab, report: &Report) -> PtbSecao {
    let detalhes = report
        .breakdown
        .as_ref()
        .filter(|_| report.total > 0)
        .map(|breakdown| {
            let aba = tab.label();
            let slug = tab.slug();

            let pizza = graficos::staff_share_donut(
                &format!("Distribuição de Publicações por Usuário ({aba})"),
                &breakdown.per_staff,
            )
            .and_then(|option| graficos::grafico(&format!("{slug}-pizza"), &option, 500));

            let mensal = graficos::monthly_totals_bar(
                &format!("Publicações Mensais ({aba})"),
                Some("Total por mês"),
                "Quantidade de Publicações",
                &breakdown.per_month,
                true,
            )
            .and_then(|option| graficos::grafico(&format!("{slug}-mensal"), &option, 500));

            let usuarios = graficos::monthly_staff_stacked_bar(
                &format!("Publicações Mensais por Usuário ({aba})"),
                &breakdown.per_month_staff,
            )
            .and_then(|option| graficos::grafico(&format!("{slug}-usuarios"), &option, 450));

            PtbDetalhes {
                pizza: widget("pizza", pizza),
                mensal: widget("mensal", mensal),
                usuarios: widget("usuarios", usuarios),
                tabela: Tabela {
                    headers: vec!["Mês e Ano", "Nome", "Quantidade"],
                    rows: breakdown
                        .per_month_staff
                        .iter()
                        .map(|r| vec![r.month.clone(), r.name.clone(), r.count.to_string()])
                        .collect(),
                },
            }
        });

    PtbSecao {
        total: report.total,
        detalhes,
    }
}

/// Página da PTB com uma aba por sub-relatório; cada aba exibe o seu próprio erro.
pub fn ptb_page(tabs: &[(PtbTab, Result<Report, AppError>)]) -> Result<String, askama::Error> {
    let abas = tabs
        .iter()
        .map(|(tab, outcome)| PtbAba {
            slug: tab.slug(),
            label: tab.label(),
            conteudo: match outcome {
                Ok(report) => Ok(ptb_section(*tab, report)),
                Err(err) => Err(err.user_message()),
            },
        })
        .collect();

    PtbTemplate {
        title: PTB_TITLE,
        abas,
    }
    .render()
}

pub fn gapr_section(report: &Report) -> GaprSecao {
    let detalhes = report
        .breakdown
        .as_ref()
        .filter(|_| report.total > 0)
        .map(|breakdown| {
            let mensal = graficos::monthly_totals_bar(
                "Publicações Mensais",
                None,
                "Quantidade de Publicações",
                &breakdown.per_month,
                false,
            )
            .and_then(|option| graficos::grafico("gapr-mensal", &option, 400));

            GaprDetalhes {
                mensal: widget("gapr-mensal", mensal),
                resumo: Tabela {
                    headers: vec!["Mês/Ano", "Quantidade"],
                    rows: breakdown
                        .per_month
                        .iter()
                        .map(|m| vec![m.month.clone(), m.count.to_string()])
                        .collect(),
                },
            }
        });

    GaprSecao {
        total: report.total,
        detalhes,
    }
}

pub fn gapr_page(outcome: &Result<Report, AppError>) -> Result<String, askama::Error> {
    GaprTemplate {
        title: GAPR_TITLE,
        conteudo: match outcome {
            Ok(report) => Ok(gapr_section(report)),
            Err(err) => Err(err.user_message()),
        },
    }
    .render()
}

/// Página que só mostra a mensagem de erro (configuração ausente).
pub fn error_page(title: &'static str, err: &AppError) -> Result<String, askama::Error> {
    ErroTemplate {
        title,
        mensagem: err.user_message(),
    }
    .render()
}
