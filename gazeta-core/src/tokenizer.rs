//! # Tokenizador para texto de diário oficial
//!
//! Divide o texto bruto (já extraído do PDF) em tokens, preservando os offsets
//! de byte originais. Cada token carrega flags linguísticas pré-computadas
//! (maiúsculas, numérico, pontuação, espaço, alfabético) que alimentam os
//! predicados do motor de padrões.
//!
//! Particularidades do domínio:
//!
//! - `"n.º"` deve permanecer um único token — os padrões de despacho dependem
//!   dele ("Despacho n.º 123").
//! - Sequências de espaço em branco que não sejam um único espaço simples
//!   (quebras de linha, espaços duplos do OCR) viram tokens de espaço
//!   explícitos, para que regras possam aceitá-los opcionalmente.

use serde::{Deserialize, Serialize};

/// Um token extraído do texto original.
///
/// O token é a unidade atômica do pipeline. Os offsets `start`/`end` referem-se
/// a bytes do texto original e permitem recortar subtextos sem perder a
/// formatação de origem — essencial porque todas as operações de fronteira
/// trabalham sobre o texto cru.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "Despacho", "n.º", "123").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
    /// Todas as letras com caixa são maiúsculas (ex: "SECRETARIA").
    pub is_upper: bool,
    /// Parece um literal numérico (ex: "28", "1.234").
    pub like_num: bool,
    /// Composto apenas por pontuação.
    pub is_punct: bool,
    /// Composto apenas por espaço em branco.
    pub is_space: bool,
    /// Composto apenas por letras.
    pub is_alpha: bool,
}

impl Token {
    fn new(text: String, start: usize, end: usize) -> Self {
        let is_upper = {
            let cased: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
            !cased.is_empty() && cased.iter().all(|c| c.is_uppercase())
        };
        let like_num = {
            let stripped: String = text.chars().filter(|c| *c != '.' && *c != ',').collect();
            !stripped.is_empty() && stripped.chars().all(|c| c.is_numeric())
        };
        let is_punct = !text.is_empty() && text.chars().all(is_punct_char);
        let is_space = !text.is_empty() && text.chars().all(char::is_whitespace);
        let is_alpha = !text.is_empty() && text.chars().all(char::is_alphabetic);
        Token {
            text,
            start,
            end,
            index: 0,
            is_upper,
            like_num,
            is_punct,
            is_space,
            is_alpha,
        }
    }
}

fn is_punct_char(c: char) -> bool {
    c.is_ascii_punctuation() || matches!(c, '–' | '—' | '«' | '»' | '§' | '…' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}')
}

/// Abreviações cujo ponto final pertence ao token (não separa).
/// "n" cobre o onipresente "n.º" dos diários oficiais.
const ABBREVIATIONS: &[&str] = &[
    "n", "art", "pág", "pag", "Dr", "Dra", "Sr", "Sra", "Ex", "Exmo", "Exma",
    "Prof", "Profa", "Eng", "Arq", "av", "vol", "cap", "etc",
];

/// Tokeniza o texto preservando offsets de byte.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current_start = 0;
    let mut current_text = String::new();
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte_pos, ch) = chars[i];

        if ch.is_alphanumeric() || (ch == '-' && !current_text.is_empty()) {
            if current_text.is_empty() {
                current_start = byte_pos;
            }
            current_text.push(ch);
        } else if ch == '.' && !current_text.is_empty() {
            // Ponto após abreviação conhecida ou dentro de número ("1.234") continua o token
            let is_abbrev = ABBREVIATIONS.contains(&current_text.as_str());
            let current_is_num = current_text.chars().all(char::is_numeric);
            let next_is_num = chars
                .get(i + 1)
                .map(|(_, c)| c.is_numeric())
                .unwrap_or(false);

            if is_abbrev || (current_is_num && next_is_num) {
                current_text.push('.');
            } else {
                flush_token(&mut tokens, &mut current_text, current_start, byte_pos);
                tokens.push(Token::new(".".to_string(), byte_pos, byte_pos + 1));
            }
        } else if ch.is_whitespace() {
            flush_token(&mut tokens, &mut current_text, current_start, byte_pos);
            // Acumula a sequência de espaço inteira
            let ws_start = byte_pos;
            let mut ws_end = byte_pos + ch.len_utf8();
            let mut ws_text = String::from(ch);
            while let Some((p, c)) = chars.get(i + 1).copied() {
                if !c.is_whitespace() {
                    break;
                }
                ws_text.push(c);
                ws_end = p + c.len_utf8();
                i += 1;
            }
            // Um único espaço simples é separador puro; qualquer outra sequência
            // (quebra de linha, espaço duplo) vira token de espaço explícito
            if ws_text != " " {
                tokens.push(Token::new(ws_text, ws_start, ws_end));
            }
        } else {
            flush_token(&mut tokens, &mut current_text, current_start, byte_pos);
            let ch_len = ch.len_utf8();
            tokens.push(Token::new(ch.to_string(), byte_pos, byte_pos + ch_len));
        }
        i += 1;
    }

    flush_token(&mut tokens, &mut current_text, current_start, text.len());

    for (idx, token) in tokens.iter_mut().enumerate() {
        token.index = idx;
    }
    tokens
}

/// Fecha o token acumulado e adiciona à lista (se não vazio)
fn flush_token(tokens: &mut Vec<Token>, text: &mut String, start: usize, end: usize) {
    if !text.is_empty() {
        tokens.push(Token::new(text.clone(), start, end));
        text.clear();
    }
}
