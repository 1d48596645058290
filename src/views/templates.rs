// src/views/templates.rs
//
// Templates askama das páginas e os dados que cada uma recebe. O askama
// escapa todo texto interpolado; só o JSON dos gráficos entra com `|safe`.

use askama::Template;

/// Gráfico pronto para o template: o `<div>` de destino e a opção ECharts.
#[derive(Debug, Clone, PartialEq)]
pub struct Grafico {
    pub id: String,
    pub height_px: u32,
    pub option_json: String,
}

// `None` vira o aviso de componente indisponível.
pub type Widget = Option<Grafico>;

#[derive(Debug, Clone, PartialEq)]
pub struct Tabela {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug)]
pub struct PtbDetalhes {
    pub pizza: Widget,
    pub mensal: Widget,
    pub usuarios: Widget,
    pub tabela: Tabela,
}

#[derive(Debug)]
pub struct PtbSecao {
    pub total: u64,
    // Sem linhas ou sem `datapub`, só a métrica.
    pub detalhes: Option<PtbDetalhes>,
}

#[derive(Debug)]
pub struct PtbAba {
    pub slug: &'static str,
    pub label: &'static str,
    // `Err` carrega a mensagem exibida no lugar da aba.
    pub conteudo: Result<PtbSecao, String>,
}

#[derive(Debug)]
pub struct GaprDetalhes {
    pub mensal: Widget,
    pub resumo: Tabela,
}

#[derive(Debug)]
pub struct GaprSecao {
    pub total: u64,
    pub detalhes: Option<GaprDetalhes>,
}

/// Página da PTB, uma aba por sub-relatório.
#[derive(Template)]
#[template(path = "ptb.html")]
pub struct PtbTemplate {
    pub title: &'static str,
    pub abas: Vec<PtbAba>,
}

/// Página do GAPR
#[derive(Template)]
#[template(path = "gapr.html")]
pub struct GaprTemplate {
    pub title: &'static str,
    pub conteudo: Result<GaprSecao, String>,
}

/// Página que só mostra a mensagem de erro.
#[derive(Template)]
#[template(path = "erro.html")]
pub struct ErroTemplate {
    pub title: &'static str,
    pub mensagem: String,
}
