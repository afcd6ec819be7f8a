//! # Reconhecedor estatístico de entidades (colaborador externo)
//!
//! O núcleo consome spans de um reconhecedor de entidades tratado como caixa
//! preta: recebe o texto e os tokens, devolve spans candidatos com rótulo e
//! confiança. O trait [`EntityRecognizer`] é a costura onde um modelo real se
//! encaixa; o serviço é construído uma vez no arranque, é somente leitura e
//! reentrante, e pode ser partilhado entre documentos.
//!
//! O [`LexiconRecognizer`] é a implementação padrão: uma heurística de
//! sequências capitalizadas com conectivos portugueses, suficiente para
//! alimentar o filtro de nomes em testes e em lotes sem modelo carregado.

use unicode_segmentation::UnicodeSegmentation;

use crate::document::EntitySpan;
use crate::tokenizer::Token;

/// Rótulo de pessoa, o único que o filtro de nomes consome.
pub const PER: &str = "PER";

/// Costura para o modelo estatístico de NER. Implementações devem ser
/// reentrantes: o pipeline partilha uma única instância entre documentos.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str, tokens: &[Token]) -> Vec<EntitySpan>;
}

/// Reconhecedor heurístico de nomes de pessoa.
///
/// Um candidato PER é uma sequência de palavras capitalizadas (não totalmente
/// maiúsculas — cabeçalhos de secretaria são ALL-CAPS e ficam de fora),
/// possivelmente ligadas por conectivos ("de", "da", "dos", "e"). A saída é
/// deliberadamente ruidosa: a limpeza é responsabilidade do filtro de nomes.
pub struct LexiconRecognizer {
    connectives: Vec<&'static str>,
}

impl LexiconRecognizer {
    pub fn new() -> Self {
        Self {
            connectives: vec!["de", "da", "do", "das", "dos", "e"],
        }
    }

    fn is_name_word(&self, token: &Token) -> bool {
        if !token.is_alpha || token.is_upper {
            return false;
        }
        token
            .text
            .graphemes(true)
            .next()
            .map(|g| g.chars().all(char::is_uppercase))
            .unwrap_or(false)
    }

    fn is_connective(&self, token: &Token) -> bool {
        let lower = token.text.to_lowercase();
        self.connectives.iter().any(|c| *c == lower)
    }
}

impl Default for LexiconRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer for LexiconRecognizer {
    fn recognize(&self, text: &str, tokens: &[Token]) -> Vec<EntitySpan> {
        let mut spans = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            if !self.is_name_word(&tokens[i]) {
                i += 1;
                continue;
            }

            // Estende a sequência: palavra capitalizada, ou conectivo seguido
            // de palavra capitalizada
            let start = i;
            let mut end = i + 1;
            loop {
                if end < tokens.len() && self.is_name_word(&tokens[end]) {
                    end += 1;
                } else if end + 1 < tokens.len()
                    && self.is_connective(&tokens[end])
                    && self.is_name_word(&tokens[end + 1])
                {
                    end += 2;
                } else {
                    break;
                }
            }

            let start_byte = tokens[start].start;
            let end_byte = tokens[end - 1].end;
            spans.push(EntitySpan {
                label: PER.to_string(),
                text: text[start_byte..end_byte].to_string(),
                start_token: start,
                end_token: end,
                start: start_byte,
                end: end_byte,
                confidence: 0.85,
                source: "lexicon".to_string(),
            });
            i = end;
        }

        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn recognize(text: &str) -> Vec<EntitySpan> {
        let tokens = tokenize(text);
        LexiconRecognizer::new().recognize(text, &tokens)
    }

    #[test]
    fn test_capitalized_sequence_with_connectives() {
        let spans = recognize("nomeia João Filipe de Sousa para o cargo");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "João Filipe de Sousa");
        assert_eq!(spans[0].label, PER);
    }

    #[test]
    fn test_all_caps_headers_are_ignored() {
        let spans = recognize("SECRETARIA REGIONAL DE SAÚDE");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_sequence_breaks_at_lowercase() {
        let spans = recognize("Maria Luz assina o presente Despacho");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Maria Luz");
        assert_eq!(spans[1].text, "Despacho");
    }

    #[test]
    fn test_connective_at_end_not_absorbed() {
        let spans = recognize("Carlos Nunes de acordo");
        assert_eq!(spans[0].text, "Carlos Nunes");
    }
}
