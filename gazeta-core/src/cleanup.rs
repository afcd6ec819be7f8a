//! Normalização de parágrafos do texto vindo do OCR: quebras de linha simples
//! viram espaço, sequências de linhas em branco viram separador de parágrafo
//! e espaço repetido é colapsado.

use once_cell::sync::Lazy;
use regex::Regex;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());
static SINGLE_NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n").unwrap());
// Limitado a espaço/tab para não colapsar os separadores de parágrafo
static REPEATED_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Reorganiza o texto bruto em parágrafos limpos.
pub fn clean_into_paragraphs(text: &str) -> String {
    let text = text.trim();
    let text = PARAGRAPH_BREAK.replace_all(text, "<PARAGRAFO>");
    let text = SINGLE_NEWLINE.replace_all(&text, " ");
    let text = text.replace("<PARAGRAFO>", "\n\n");
    let text = REPEATED_SPACE.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_newlines_become_spaces() {
        assert_eq!(clean_into_paragraphs("uma\nlinha\nquebrada"), "uma linha quebrada");
    }

    #[test]
    fn test_blank_lines_separate_paragraphs() {
        assert_eq!(
            clean_into_paragraphs("primeiro\n\n\nsegundo"),
            "primeiro\n\nsegundo"
        );
    }

    #[test]
    fn test_repeated_spaces_collapse() {
        assert_eq!(clean_into_paragraphs("a   b\tc"), "a b\tc");
    }
}
