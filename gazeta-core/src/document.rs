//! # Documento e resolução de spans
//!
//! O [`Document`] junta o texto original, seus tokens e a lista final de spans
//! rotulados, ordenada por token inicial. Ele é criado uma vez por texto e
//! nunca mutado: qualquer transformação destrutiva do texto (truncagem,
//! excisão) invalida todos os offsets, então o pipeline descarta o documento
//! antigo e constrói um novo.
//!
//! A resolução de spans combina os candidatos dos níveis de regras (em ordem
//! de prioridade) com os spans do reconhecedor estatístico (prioridade mais
//! baixa — o equivalente de inserir o ruler antes do modelo). Um candidato que
//! sobrepõe, em intervalo de tokens, um span já retido é descartado.

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Um span rotulado: intervalo contíguo de tokens com offsets de byte
/// correspondentes no texto original.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntitySpan {
    /// Rótulo semântico (ex: "DES", "SECRETARIA", "PER").
    pub label: String,
    /// Texto coberto pelo span.
    pub text: String,
    /// Índice do primeiro token (inclusivo).
    pub start_token: usize,
    /// Índice do token final (exclusivo).
    pub end_token: usize,
    /// Offset de byte inicial no texto original.
    pub start: usize,
    /// Offset de byte final (exclusivo).
    pub end: usize,
    /// Confiança da atribuição (1.0 para regras).
    pub confidence: f64,
    /// Origem: nome do nível de regras ou do reconhecedor.
    pub source: String,
}

impl EntitySpan {
    /// Verifica sobreposição em intervalo de tokens.
    pub fn overlaps(&self, other: &EntitySpan) -> bool {
        self.start_token < other.end_token && other.start_token < self.end_token
    }
}

/// Um documento analisado: texto, tokens e spans finais.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub tokens: Vec<Token>,
    /// Spans ordenados por `start_token`, sem sobreposição após a resolução.
    pub spans: Vec<EntitySpan>,
}

impl Document {
    /// Primeiro span com o rótulo dado, se houver.
    pub fn first_span(&self, label: &str) -> Option<&EntitySpan> {
        self.spans.iter().find(|s| s.label == label)
    }

    /// Último span com o rótulo dado, se houver.
    pub fn last_span(&self, label: &str) -> Option<&EntitySpan> {
        self.spans.iter().rev().find(|s| s.label == label)
    }

    /// Spans com o rótulo dado, na ordem do documento.
    pub fn spans_with_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a EntitySpan> {
        self.spans.iter().filter(move |s| s.label == label)
    }

    /// Verifica se algum span carrega um dos rótulos dados.
    pub fn has_any_label(&self, labels: &[&str]) -> bool {
        self.spans.iter().any(|s| labels.contains(&s.label.as_str()))
    }
}

/// Resolve os candidatos em uma lista final ordenada e sem sobreposições.
///
/// `tier_candidates` vem em ordem de prioridade (nível mais alto primeiro);
/// `model_spans` entra por último. Dentro de um grupo a ordem de inserção é
/// preservada, de modo que candidatos de mesmo início e mesma prioridade são
/// deduplicados mantendo o primeiro inserido.
pub fn resolve_spans(
    tier_candidates: Vec<Vec<EntitySpan>>,
    model_spans: Vec<EntitySpan>,
) -> Vec<EntitySpan> {
    let mut retained: Vec<EntitySpan> = Vec::new();

    for group in tier_candidates.into_iter().chain(std::iter::once(model_spans)) {
        for candidate in group {
            if retained.iter().any(|kept| kept.overlaps(&candidate)) {
                continue;
            }
            retained.push(candidate);
        }
    }

    retained.sort_by_key(|s| s.start_token);
    retained
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(label: &str, start_token: usize, end_token: usize) -> EntitySpan {
        EntitySpan {
            label: label.to_string(),
            text: String::new(),
            start_token,
            end_token,
            start: start_token * 2,
            end: end_token * 2,
            confidence: 1.0,
            source: "teste".to_string(),
        }
    }

    #[test]
    fn test_higher_tier_wins_overlap() {
        // Nível composto cobre [0,4); nível base teria [0,2) e [2,4)
        let resolved = resolve_spans(
            vec![
                vec![span("DES", 0, 4)],
                vec![span("DES", 0, 2), span("DES", 2, 4), span("SUM", 6, 7)],
            ],
            vec![],
        );
        assert_eq!(resolved.len(), 2);
        assert_eq!((resolved[0].start_token, resolved[0].end_token), (0, 4));
        assert_eq!(resolved[1].label, "SUM");
    }

    #[test]
    fn test_model_spans_are_lowest_priority() {
        let resolved = resolve_spans(
            vec![vec![span("SECRETARIA", 3, 6)]],
            vec![span("PER", 4, 5), span("PER", 10, 12)],
        );
        let labels: Vec<&str> = resolved.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["SECRETARIA", "PER"]);
        assert_eq!(resolved[1].start_token, 10);
    }

    #[test]
    fn test_sorted_and_non_overlapping() {
        let resolved = resolve_spans(
            vec![vec![span("B", 5, 7), span("A", 0, 2)]],
            vec![span("C", 1, 3), span("D", 8, 9)],
        );
        for pair in resolved.windows(2) {
            assert!(pair[0].start_token <= pair[1].start_token);
            assert!(!pair[0].overlaps(&pair[1]));
        }
        assert_eq!(resolved.len(), 3);
    }

    #[test]
    fn test_same_start_dedup_keeps_first() {
        let mut first = span("A", 0, 2);
        first.source = "primeiro".to_string();
        let mut second = span("A", 0, 2);
        second.source = "segundo".to_string();

        let resolved = resolve_spans(vec![vec![first, second]], vec![]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].source, "primeiro");
    }

    #[test]
    fn test_missing_label_lookup_is_none() {
        let doc = Document { text: String::new(), tokens: vec![], spans: vec![] };
        assert!(doc.first_span("DES").is_none());
        assert!(!doc.has_any_label(&["DES", "SUM"]));
    }
}
