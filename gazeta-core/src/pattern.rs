//! # Motor de Padrões — regras ordenadas sobre a sequência de tokens
//!
//! Complementa o reconhecedor estatístico com conhecimento explícito do
//! formato do diário: cada regra é uma sequência de predicados token a token
//! (texto exato, caixa baixa, pertencimento a um conjunto, regex, flags
//! linguísticas, comprimento), cada um com um quantificador opcional.
//!
//! O casamento é guloso da esquerda para a direita, com retrocesso: para cada
//! posição inicial é relatado o casamento mais à esquerda e, para essa posição,
//! o mais longo. A varredura continua após o fim de cada casamento, de modo que
//! uma regra pode casar várias vezes no mesmo documento. Uma regra que não casa
//! simplesmente não contribui spans — nunca é erro.

use regex::Regex;

use crate::document::EntitySpan;
use crate::tokenizer::Token;

/// Predicado avaliado sobre um único token.
#[derive(Debug, Clone)]
pub enum TokenPredicate {
    /// Texto exato do token.
    Text(String),
    /// Texto do token em caixa baixa igual ao valor dado.
    Lower(String),
    /// Texto em caixa baixa pertence ao conjunto dado.
    LowerIn(Vec<String>),
    /// O texto do token casa com a regex.
    Matches(Regex),
    /// Parece literal numérico.
    LikeNum,
    /// Todas as letras maiúsculas.
    IsUpper,
    /// Apenas pontuação.
    IsPunct,
    /// Apenas espaço em branco.
    IsSpace,
    /// Apenas letras.
    IsAlpha,
    /// Comprimento em caracteres.
    Length(usize),
    /// Conjunção: todos os predicados valem para o mesmo token
    /// (ex: alfabético E de comprimento 1).
    All(Vec<TokenPredicate>),
}

impl TokenPredicate {
    fn holds(&self, token: &Token) -> bool {
        match self {
            TokenPredicate::Text(s) => token.text == *s,
            TokenPredicate::Lower(s) => token.text.to_lowercase() == *s,
            TokenPredicate::LowerIn(set) => {
                let lower = token.text.to_lowercase();
                set.iter().any(|s| *s == lower)
            }
            TokenPredicate::Matches(re) => re.is_match(&token.text),
            TokenPredicate::LikeNum => token.like_num,
            TokenPredicate::IsUpper => token.is_upper,
            TokenPredicate::IsPunct => token.is_punct,
            TokenPredicate::IsSpace => token.is_space,
            TokenPredicate::IsAlpha => token.is_alpha,
            TokenPredicate::Length(n) => token.text.chars().count() == *n,
            TokenPredicate::All(preds) => preds.iter().all(|p| p.holds(token)),
        }
    }
}

/// Quantificador de repetição de um predicado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// Exatamente uma vez.
    One,
    /// Zero ou uma vez.
    ZeroOrOne,
    /// Zero ou mais vezes.
    ZeroOrMore,
    /// Uma ou mais vezes.
    OneOrMore,
}

/// Um passo de uma regra: predicado + quantificador.
#[derive(Debug, Clone)]
pub struct PatternStep {
    pub predicate: TokenPredicate,
    pub quantifier: Quantifier,
}

impl PatternStep {
    pub fn new(predicate: TokenPredicate) -> Self {
        PatternStep { predicate, quantifier: Quantifier::One }
    }

    pub fn with(predicate: TokenPredicate, quantifier: Quantifier) -> Self {
        PatternStep { predicate, quantifier }
    }
}

/// Uma regra nomeada: sequência de passos que, ao casar, produz um span
/// candidato com o rótulo associado.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub label: String,
    pub steps: Vec<PatternStep>,
}

impl PatternRule {
    pub fn new(label: &str, steps: Vec<PatternStep>) -> Self {
        PatternRule { label: label.to_string(), steps }
    }
}

/// Um nível de prioridade: grupo ordenado de regras. Níveis anteriores na
/// lista vencem conflitos de sobreposição na resolução de spans.
#[derive(Debug, Clone)]
pub struct RuleTier {
    pub name: String,
    pub rules: Vec<PatternRule>,
}

impl RuleTier {
    pub fn new(name: &str, rules: Vec<PatternRule>) -> Self {
        RuleTier { name: name.to_string(), rules }
    }
}

/// Aplica todas as regras de um nível à sequência de tokens, produzindo os
/// spans candidatos na ordem em que foram encontrados.
pub fn tag(text: &str, tokens: &[Token], tier: &RuleTier) -> Vec<EntitySpan> {
    let mut candidates = Vec::new();

    for rule in &tier.rules {
        let mut i = 0;
        while i < tokens.len() {
            match match_steps(tokens, i, &rule.steps) {
                Some(end) if end > i => {
                    let start_byte = tokens[i].start;
                    let end_byte = tokens[end - 1].end;
                    candidates.push(EntitySpan {
                        label: rule.label.clone(),
                        text: text[start_byte..end_byte].to_string(),
                        start_token: i,
                        end_token: end,
                        start: start_byte,
                        end: end_byte,
                        confidence: 1.0,
                        source: tier.name.clone(),
                    });
                    i = end;
                }
                // Casamento vazio (todos os passos opcionais) não gera span
                _ => i += 1,
            }
        }
    }

    candidates
}

/// Tenta casar a sequência de passos a partir de `pos`. Guloso com retrocesso:
/// cada quantificador consome o máximo possível e recua até o restante da
/// regra casar. Retorna o índice de token exclusivo do fim do casamento.
fn match_steps(tokens: &[Token], pos: usize, steps: &[PatternStep]) -> Option<usize> {
    let Some((step, rest)) = steps.split_first() else {
        return Some(pos);
    };

    let holds = |p: usize| p < tokens.len() && step.predicate.holds(&tokens[p]);

    match step.quantifier {
        Quantifier::One => {
            if holds(pos) {
                match_steps(tokens, pos + 1, rest)
            } else {
                None
            }
        }
        Quantifier::ZeroOrOne => {
            if holds(pos) {
                if let Some(end) = match_steps(tokens, pos + 1, rest) {
                    return Some(end);
                }
            }
            match_steps(tokens, pos, rest)
        }
        Quantifier::ZeroOrMore | Quantifier::OneOrMore => {
            let min = if step.quantifier == Quantifier::OneOrMore { 1 } else { 0 };
            let mut reps = 0;
            while holds(pos + reps) {
                reps += 1;
            }
            loop {
                if reps < min {
                    return None;
                }
                if let Some(end) = match_steps(tokens, pos + reps, rest) {
                    return Some(end);
                }
                if reps == 0 {
                    return None;
                }
                reps -= 1;
            }
        }
    }
}
