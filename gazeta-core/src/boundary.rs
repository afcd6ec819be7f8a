//! # Operações de fronteira sobre o texto
//!
//! Primitivas puras que recortam o texto de um documento usando as posições
//! dos spans rotulados como delimitadores. São a única forma de fatiar
//! documentos no pipeline; comportamento de nível mais alto (isolar o sumário,
//! limpeza iterativa) é composição destas funções.
//!
//! Fronteira ausente nunca é erro: `between` devolve `None` e as truncagens
//! devolvem o texto inalterado, deixando ao chamador a decisão de pular o
//! documento ou seguir com um subtexto degradado.

use crate::document::Document;

/// Texto estritamente entre o primeiro span rotulado `start_label` e o
/// primeiro span `end_label` que ocorra depois dele. A busca pelo rótulo de
/// fim só começa depois de um rótulo de início ter sido encontrado.
pub fn between(doc: &Document, start_label: &str, end_label: &str) -> Option<String> {
    let mut after_start: Option<usize> = None;

    for span in &doc.spans {
        if span.label == start_label && after_start.is_none() {
            after_start = Some(span.end);
        } else if span.label == end_label {
            if let Some(begin) = after_start {
                return Some(doc.text[begin..span.start].trim().to_string());
            }
        }
    }
    None
}

/// Como [`between`], mas o texto do próprio span de início é incluído.
pub fn between_inclusive_start(
    doc: &Document,
    start_label: &str,
    end_label: &str,
) -> Option<String> {
    let mut from: Option<usize> = None;

    for span in &doc.spans {
        if span.label == start_label && from.is_none() {
            from = Some(span.start);
        } else if span.label == end_label {
            if let Some(begin) = from {
                return Some(doc.text[begin..span.start].trim().to_string());
            }
        }
    }
    None
}

/// Todo o texto estritamente antes do início da *última* ocorrência do rótulo.
/// Sem ocorrências, o texto original é devolvido inalterado.
pub fn truncate_after_last(doc: &Document, label: &str) -> String {
    match doc.last_span(label) {
        Some(span) => doc.text[..span.start].to_string(),
        None => doc.text.clone(),
    }
}

/// Todo o texto a partir do início da *primeira* ocorrência do rótulo
/// (inclusive). Sem ocorrências, o texto original é devolvido inalterado.
pub fn truncate_before_keep(doc: &Document, label: &str) -> String {
    match doc.first_span(label) {
        Some(span) => doc.text[span.start..].to_string(),
        None => doc.text.clone(),
    }
}

/// Remove do texto o intervalo de caracteres de cada span com o rótulo dado.
/// As remoções são aplicadas em ordem decrescente de offset inicial para que
/// uma remoção não invalide os offsets das seguintes.
pub fn excise_all(doc: &Document, label: &str) -> String {
    let mut ranges: Vec<(usize, usize)> = doc
        .spans_with_label(label)
        .map(|s| (s.start, s.end))
        .collect();
    ranges.sort_by(|a, b| b.0.cmp(&a.0));

    let mut result = doc.text.clone();
    for (start, end) in ranges {
        result.replace_range(start..end, "");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::resolve_spans;
    use crate::pattern::{tag, PatternRule, PatternStep, RuleTier, TokenPredicate};
    use crate::tokenizer::tokenize;

    fn doc_with_rules(text: &str, rules: Vec<PatternRule>) -> Document {
        let tokens = tokenize(text);
        let candidates = tag(text, &tokens, &RuleTier::new("teste", rules));
        let spans = resolve_spans(vec![candidates], vec![]);
        Document { text: text.to_string(), tokens, spans }
    }

    fn label_rule(label: &str, word: &str) -> PatternRule {
        PatternRule::new(label, vec![PatternStep::new(TokenPredicate::Text(word.into()))])
    }

    #[test]
    fn test_between_missing_end_is_none() {
        let doc = doc_with_rules("INICIO e mais nada", vec![
            label_rule("A", "INICIO"),
            label_rule("B", "FIM"),
        ]);
        assert_eq!(between(&doc, "A", "B"), None);
    }

    #[test]
    fn test_between_end_before_start_is_none() {
        let doc = doc_with_rules("FIM antes de INICIO", vec![
            label_rule("A", "INICIO"),
            label_rule("B", "FIM"),
        ]);
        assert_eq!(between(&doc, "A", "B"), None);
    }

    #[test]
    fn test_between_inclusive_start() {
        let doc = doc_with_rules("x INICIO meio FIM y", vec![
            label_rule("A", "INICIO"),
            label_rule("B", "FIM"),
        ]);
        assert_eq!(between(&doc, "A", "B"), Some("meio".to_string()));
        assert_eq!(
            between_inclusive_start(&doc, "A", "B"),
            Some("INICIO meio".to_string())
        );
    }

    #[test]
    fn test_truncate_after_last() {
        let doc = doc_with_rules("a MARCA b MARCA c", vec![label_rule("M", "MARCA")]);
        assert_eq!(truncate_after_last(&doc, "M"), "a MARCA b ");
        // Rótulo ausente: texto inalterado
        assert_eq!(truncate_after_last(&doc, "X"), "a MARCA b MARCA c");
    }

    #[test]
    fn test_truncate_before_keep() {
        let doc = doc_with_rules("a MARCA b", vec![label_rule("M", "MARCA")]);
        assert_eq!(truncate_before_keep(&doc, "M"), "MARCA b");
        assert_eq!(truncate_before_keep(&doc, "X"), "a MARCA b");
    }

    #[test]
    fn test_excise_all_offset_safety() {
        // Duas remoções; a aplicação em ordem decrescente preserva os offsets
        let rule = PatternRule::new("L1", vec![
            PatternStep::new(TokenPredicate::Text("[".into())),
            PatternStep::new(TokenPredicate::Text("L1".into())),
            PatternStep::new(TokenPredicate::Text("]".into())),
        ]);
        let doc = doc_with_rules("A [L1] B [L1] C", vec![rule]);
        assert_eq!(doc.spans.len(), 2);
        assert_eq!(excise_all(&doc, "L1"), "A  B  C");
    }

    #[test]
    fn test_excise_absent_label_is_identity() {
        let doc = doc_with_rules("nada aqui", vec![]);
        assert_eq!(excise_all(&doc, "L1"), "nada aqui");
    }
}
