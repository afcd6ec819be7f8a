//! # Regras do Jornal Oficial (II Série)
//!
//! Os rótulos estruturais e os dois níveis de regras usados para reconstruir
//! a hierarquia do diário. O nível composto casa as formas longas de ato
//! administrativo (despacho conjunto, declaração de retificação com ano) e tem
//! precedência sobre o nível base, que carrega os marcadores simples: o
//! sumário, o marcador "Texto", o despacho curto, a data de cabeçalho e o
//! cabeçalho de secretaria.

use regex::Regex;

use crate::pattern::{PatternRule, PatternStep, Quantifier, RuleTier, TokenPredicate};

/// Início do sumário.
pub const SUM: &str = "SUM";
/// Marcador "Texto" (artefato de paginação do diário).
pub const TEXTO: &str = "TEXTO";
/// Ato administrativo numerado (despacho, aviso, edital...).
pub const DES: &str = "DES";
/// Data do cabeçalho de página ("2 - S 28 de janeiro de 2025").
pub const HEADER_DATE: &str = "HEADER_DATE";
/// Cabeçalho de secretaria, todo em maiúsculas.
pub const SECRETARIA: &str = "SECRETARIA";

/// Rótulos que indicam que o documento tem estrutura reconhecível; sem nenhum
/// deles o documento inteiro é pulado.
pub const STRUCTURAL_LABELS: &[&str] = &[SUM, TEXTO, DES, HEADER_DATE, SECRETARIA];

const ACT_KINDS: &[&str] = &["despacho", "aviso", "edital", "deliberação", "portaria"];

const MONTHS: &[&str] = &[
    "janeiro", "fevereiro", "março", "abril", "maio", "junho",
    "julho", "agosto", "setembro", "outubro", "novembro", "dezembro",
];

fn lower_in(words: &[&str]) -> TokenPredicate {
    TokenPredicate::LowerIn(words.iter().map(|s| s.to_string()).collect())
}

fn one(p: TokenPredicate) -> PatternStep {
    PatternStep::new(p)
}

fn opt(p: TokenPredicate) -> PatternStep {
    PatternStep::with(p, Quantifier::ZeroOrOne)
}

/// Os níveis na ordem de prioridade usada pelo resolver: composto primeiro.
pub fn default_tiers() -> Vec<RuleTier> {
    vec![composed_tier(), base_tier()]
}

/// Formas longas de ato: devem cobrir o span inteiro que as regras do nível
/// base rotulariam em pedaços.
pub fn composed_tier() -> RuleTier {
    RuleTier::new("composto", vec![
        PatternRule::new(DES, vec![
            one(lower_in(ACT_KINDS)),
            opt(TokenPredicate::Lower("conjunto".into())),
            opt(TokenPredicate::Text("n.º".into())),
            one(TokenPredicate::LikeNum),
        ]),
        PatternRule::new(DES, vec![
            one(TokenPredicate::Lower("declaração".into())),
            one(TokenPredicate::Lower("de".into())),
            one(TokenPredicate::Lower("retificação".into())),
            opt(TokenPredicate::Text("n.º".into())),
            one(TokenPredicate::LikeNum),
            opt(TokenPredicate::Text("/".into())),
            opt(TokenPredicate::LikeNum),
        ]),
    ])
}

/// Marcadores simples da edição.
pub fn base_tier() -> RuleTier {
    RuleTier::new("base", vec![
        // O dois-pontos opcional entra no span para que o corpo do sumário
        // comece limpo logo após o marcador
        PatternRule::new(SUM, vec![
            one(TokenPredicate::Text("Sumário".into())),
            opt(TokenPredicate::Text(":".into())),
        ]),
        PatternRule::new(TEXTO, vec![
            one(TokenPredicate::Text("Texto".into())),
        ]),
        PatternRule::new(DES, vec![
            one(TokenPredicate::Lower("despacho".into())),
            opt(TokenPredicate::Text("n.º".into())),
            one(TokenPredicate::LikeNum),
        ]),
        PatternRule::new(HEADER_DATE, vec![
            one(TokenPredicate::LikeNum),
            one(TokenPredicate::Text("-".into())),
            one(TokenPredicate::All(vec![TokenPredicate::IsAlpha, TokenPredicate::Length(1)])),
            opt(TokenPredicate::IsSpace),
            one(TokenPredicate::LikeNum),
            one(TokenPredicate::Lower("de".into())),
            one(lower_in(MONTHS)),
            one(TokenPredicate::Lower("de".into())),
            one(TokenPredicate::LikeNum),
        ]),
        PatternRule::new(SECRETARIA, vec![
            one(TokenPredicate::Matches(
                Regex::new("^SECRETARIA(S)?$").expect("regex estática válida"),
            )),
            PatternStep::with(TokenPredicate::IsUpper, Quantifier::OneOrMore),
        ]),
    ])
}
