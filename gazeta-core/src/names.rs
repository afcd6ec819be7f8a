//! # Filtro de candidatos a nome de pessoa
//!
//! Os spans PER vindos do reconhecedor sobre texto de OCR são ruidosos: vêm
//! colados a cargos, a cabeçalhos de anexo e a fragmentos repetidos do mesmo
//! nome. Este módulo reduz o conjunto bruto a uma lista limpa em cinco
//! estágios, aplicados sempre nesta ordem:
//!
//! 1. descarta candidatos de um único token;
//! 2. trunca cada candidato na primeira ocorrência de uma palavra-chave
//!    estrutural ("anexo", "nota curricular", "secretaria");
//! 3. colapsa extensões: mantém só o membro mais curto de cada cadeia de
//!    prefixos ("João Silva Pereira" cai se "João Silva" sobreviveu);
//! 4. normaliza espaço interno e deduplica;
//! 5. descarta candidatos que contenham, como token inteiro, uma palavra da
//!    lista de cargos/termos organizacionais.
//!
//! A saída é sempre um subconjunto da entrada; a ordem final é por
//! comprimento e depois lexical.

use crate::document::Document;
use crate::recognizer::PER;

/// Palavras-chave que marcam o fim útil de um candidato (estágio 2).
pub const TRIM_KEYWORDS: &[&str] = &["anexo", "nota curricular", "secretaria"];

/// Cargos e termos organizacionais que invalidam um candidato (estágio 5).
pub const UNWANTED_WORDS: &[&str] = &[
    "formação", "profissional", "infraestruturas", "despacho", "conjunto", "madeira",
    "câmara", "chefe", "estudos", "coordenação", "autoridade", "assuntos",
    "fiscais", "regional", "secretária", "&", "diretor", "diretora",
    "habilitações", "literárias", "professor", "professora", "convidado", "convidada",
    "sistemas", "informação", "tecnologias", "especialista", "recursos", "humanos",
    "apoio", "família", "idosa", "idoso", "assistente",
    "vogal", "conselho", "diretivo", "bilhete", "identidade", "inspetora", "tributária",
    "tributário", "secundária", "bolseiro", "bolseira", "investigador", "investigadora",
];

/// Aplica o pipeline completo com as listas padrão do domínio.
pub fn filter_names(candidates: Vec<String>) -> Vec<String> {
    filter_names_with(candidates, TRIM_KEYWORDS, UNWANTED_WORDS)
}

/// Aplica o pipeline completo com listas configuráveis.
pub fn filter_names_with(
    candidates: Vec<String>,
    trim_keywords: &[&str],
    unwanted_words: &[&str],
) -> Vec<String> {
    let multi = remove_single_word(candidates);
    let trimmed: Vec<String> = multi
        .into_iter()
        .map(|c| trim_after_keywords(&c, trim_keywords))
        .collect();
    let collapsed = keep_shortest_prefix(trimmed);
    let deduped = normalize_and_deduplicate(collapsed);
    remove_with_unwanted_words(deduped, unwanted_words)
}

/// Extrai e limpa os nomes de pessoa de um documento já analisado.
pub fn people_from_document(doc: &Document) -> Vec<String> {
    let raw: Vec<String> = doc
        .spans_with_label(PER)
        .map(|s| s.text.trim().to_string())
        .collect();
    filter_names(raw)
}

/// Estágio 1: nomes têm de ser multi-token.
fn remove_single_word(candidates: Vec<String>) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|c| c.split_whitespace().count() > 1)
        .collect()
}

/// Estágio 2: trunca na ocorrência mais à esquerda de qualquer palavra-chave
/// (sem diferenciar caixa); sem ocorrência, devolve inalterado.
fn trim_after_keywords(candidate: &str, keywords: &[&str]) -> String {
    let lower = candidate.to_lowercase();
    let mut cut = candidate.len();
    for kw in keywords {
        if let Some(idx) = lower.find(&kw.to_lowercase()) {
            if idx < cut {
                cut = idx;
            }
        }
    }
    // `cut` vem de índices sobre a versão em caixa baixa; se o lowercase mudou
    // o comprimento em bytes e o corte cai fora de fronteira, mantém o original
    candidate.get(..cut).unwrap_or(candidate).trim().to_string()
}

/// Estágio 3: remove candidatos cuja sequência de tokens estende outra mais
/// curta já mantida. A ordenação por contagem de tokens e depois lexical
/// garante que o membro mais curto de cada cadeia é visitado primeiro.
fn keep_shortest_prefix(candidates: Vec<String>) -> Vec<String> {
    let mut sorted: Vec<String> = candidates;
    sorted.sort_by(|a, b| {
        let na = a.split_whitespace().count();
        let nb = b.split_whitespace().count();
        na.cmp(&nb).then_with(|| a.cmp(b))
    });
    sorted.dedup();

    let mut kept: Vec<String> = Vec::new();
    for candidate in sorted {
        let tokens: Vec<&str> = candidate.split_whitespace().collect();
        let extends_kept = kept.iter().any(|k| {
            let kept_tokens: Vec<&str> = k.split_whitespace().collect();
            tokens.len() >= kept_tokens.len() && tokens[..kept_tokens.len()] == kept_tokens[..]
        });
        if !extends_kept {
            kept.push(candidate);
        }
    }
    kept
}

/// Estágio 4: colapsa sequências de espaço e deduplica; ordem final por
/// comprimento e depois lexical.
fn normalize_and_deduplicate(candidates: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = candidates
        .into_iter()
        .map(|c| c.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    normalized.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    normalized.dedup();
    normalized
}

/// Estágio 5: descarta candidatos contendo uma palavra indesejada como token
/// inteiro (sem diferenciar caixa).
fn remove_with_unwanted_words(candidates: Vec<String>, unwanted: &[&str]) -> Vec<String> {
    let unwanted_lower: Vec<String> = unwanted.iter().map(|w| w.to_lowercase()).collect();
    candidates
        .into_iter()
        .filter(|c| {
            let words: Vec<String> = c.to_lowercase().split_whitespace().map(String::from).collect();
            !words.iter().any(|w| unwanted_lower.contains(w))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_pipeline_reference_case() {
        // Caso de referência: sem truncagem nem blacklist ativas
        let input = strs(&["João Silva", "João Silva Pereira", "Maria", "Ana  Costa"]);
        let out = filter_names_with(input, &[], &[]);
        assert_eq!(out, strs(&["Ana Costa", "João Silva"]));
    }

    #[test]
    fn test_single_word_dropped() {
        let out = filter_names_with(strs(&["Maria", "Maria Luísa"]), &[], &[]);
        assert_eq!(out, strs(&["Maria Luísa"]));
    }

    #[test]
    fn test_trim_at_earliest_keyword() {
        let out = trim_after_keywords(
            "Carlos Nunes Anexo I Secretaria Regional",
            TRIM_KEYWORDS,
        );
        assert_eq!(out, "Carlos Nunes");
    }

    #[test]
    fn test_trim_without_keyword_is_identity() {
        assert_eq!(trim_after_keywords("Carlos Nunes", TRIM_KEYWORDS), "Carlos Nunes");
    }

    #[test]
    fn test_prefix_collapse_chain() {
        let out = keep_shortest_prefix(strs(&[
            "Rui Abreu Gomes da Silva",
            "Rui Abreu",
            "Rui Abreu Gomes",
            "Marta Faria",
        ]));
        assert_eq!(out, strs(&["Marta Faria", "Rui Abreu"]));
    }

    #[test]
    fn test_prefix_collapse_requires_token_boundary() {
        // "Rui Abreulongo" não é extensão token a token de "Rui Abreu"
        let out = keep_shortest_prefix(strs(&["Rui Abreu", "Rui Abreulongo"]));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_blacklist_whole_token_case_insensitive() {
        let out = filter_names(strs(&[
            "Pedro Gomes",
            "Diretora Regional Ana Luz",
            "Chefe de Gabinete",
        ]));
        assert_eq!(out, strs(&["Pedro Gomes"]));
    }

    #[test]
    fn test_output_is_subset_of_input() {
        let input = strs(&["Pedro Gomes", "Ana  Luz Faria", "Anexo", "X"]);
        let out = filter_names(input.clone());
        for name in &out {
            let renormalized: Vec<String> = input
                .iter()
                .map(|c| c.split_whitespace().collect::<Vec<_>>().join(" "))
                .collect();
            assert!(renormalized.iter().any(|c| c.starts_with(name.as_str())));
        }
    }
}
