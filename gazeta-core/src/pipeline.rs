//! # Pipeline — Orquestrador do processamento por documento
//!
//! Liga todos os estágios: tokenização, reconhecedor estatístico, níveis de
//! regras, resolução de spans, isolamento do sumário, construção da árvore de
//! seções e enriquecimento com nomes de pessoa.
//!
//! O pipeline é construído uma vez no arranque e é somente leitura: o
//! reconhecedor e os níveis de regras são partilhados entre documentos, e cada
//! documento é processado de forma estritamente sequencial. Documentos são
//! independentes entre si — [`GazetaPipeline::process_batch`] explora isso com
//! paralelismo, sem nenhum estado mutável partilhado.

use std::sync::Arc;

use rayon::prelude::*;
use thiserror::Error;

use crate::boundary;
use crate::document::{resolve_spans, Document};
use crate::names;
use crate::pattern::{tag, RuleTier};
use crate::recognizer::{EntityRecognizer, LexiconRecognizer};
use crate::rules::{self, DES, HEADER_DATE, SECRETARIA, SUM};
use crate::sections::{build_sections, extract_people_from_chunk, SectionTree};
use crate::tokenizer::tokenize;

/// Motivos para pular um documento. Nenhum estágio do núcleo aborta: a falha
/// é sinalizada ao chamador, que decide registrar e seguir para o próximo.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("nenhuma entidade estrutural encontrada no documento")]
    NoStructuralEntities,
    #[error("fronteira ausente: nenhum span {end} depois do primeiro {start}")]
    MissingBoundary { start: String, end: String },
}

/// Transformação destrutiva do texto, aplicada pelo laço de re-marcação.
/// Cada aplicação produz um documento novo — offsets antigos nunca são
/// reutilizados depois de uma edição de texto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Corta tudo a partir do início da última ocorrência do rótulo.
    TruncateAfterLast(String),
    /// Mantém apenas do início da primeira ocorrência do rótulo em diante.
    TruncateBeforeKeep(String),
    /// Remove o intervalo de cada ocorrência do rótulo.
    ExciseAll(String),
}

/// O pipeline de extração do diário oficial.
pub struct GazetaPipeline {
    recognizer: Arc<dyn EntityRecognizer>,
    tiers: Vec<RuleTier>,
}

impl GazetaPipeline {
    /// Pipeline padrão: reconhecedor heurístico + níveis de regras do diário.
    pub fn new() -> Self {
        Self {
            recognizer: Arc::new(LexiconRecognizer::new()),
            tiers: rules::default_tiers(),
        }
    }

    /// Pipeline com reconhecedor e níveis customizados (ex: modelo real).
    pub fn with_recognizer(recognizer: Arc<dyn EntityRecognizer>, tiers: Vec<RuleTier>) -> Self {
        Self { recognizer, tiers }
    }

    /// Tokeniza e marca um texto, devolvendo um documento com spans resolvidos.
    pub fn analyze(&self, text: &str) -> Document {
        let tokens = tokenize(text);
        let tier_candidates: Vec<_> = self
            .tiers
            .iter()
            .map(|tier| tag(text, &tokens, tier))
            .collect();
        let model_spans = self.recognizer.recognize(text, &tokens);
        let spans = resolve_spans(tier_candidates, model_spans);
        Document {
            text: text.to_string(),
            tokens,
            spans,
        }
    }

    /// Laço de re-marcação: aplica cada transformação na ordem configurada,
    /// reconstruindo o documento (re-tokenização + re-marcação) após cada uma.
    /// Termina após exatamente `transforms.len()` estágios; quando nenhum
    /// rótulo configurado ocorre mais, cada estágio é identidade.
    pub fn retag(&self, doc: Document, transforms: &[Transform]) -> Document {
        transforms.iter().fold(doc, |doc, transform| {
            let text = match transform {
                Transform::TruncateAfterLast(label) => boundary::truncate_after_last(&doc, label),
                Transform::TruncateBeforeKeep(label) => boundary::truncate_before_keep(&doc, label),
                Transform::ExciseAll(label) => boundary::excise_all(&doc, label),
            };
            self.analyze(&text)
        })
    }

    /// Processa um documento inteiro: valida a presença de estrutura, isola o
    /// sumário entre `SUM` e `HEADER_DATE`, reconstrói a hierarquia
    /// secretaria → despacho e enriquece cada item com os nomes limpos.
    pub fn process(&self, text: &str) -> Result<SectionTree, ProcessError> {
        let doc = self.analyze(text);

        if !doc.has_any_label(rules::STRUCTURAL_LABELS) {
            return Err(ProcessError::NoStructuralEntities);
        }

        let resumo = boundary::between(&doc, SUM, HEADER_DATE).ok_or_else(|| {
            ProcessError::MissingBoundary {
                start: SUM.to_string(),
                end: HEADER_DATE.to_string(),
            }
        })?;

        // O subdocumento é re-analisado do zero: os offsets do documento
        // original não valem para o texto recortado
        let sub = self.analyze(&resumo);
        let mut tree = build_sections(&sub, SECRETARIA, DES, self.recognizer.as_ref());

        // Segundo passe: preenche "pessoas" a partir do chunk de cada item
        for item in tree.items_mut() {
            item.pessoas = extract_people_from_chunk(self.recognizer.as_ref(), &item.chunk);
        }

        tracing::debug!(
            grupos = tree.len(),
            itens = tree.item_count(),
            "documento processado"
        );
        Ok(tree)
    }

    /// Processa vários documentos em paralelo. Cada documento é independente;
    /// falhas individuais não interrompem o lote.
    pub fn process_batch(&self, texts: &[String]) -> Vec<Result<SectionTree, ProcessError>> {
        texts.par_iter().map(|text| self.process(text)).collect()
    }

    /// Extração de pessoas sobre texto arbitrário (fora da árvore de seções).
    pub fn filter_names(&self, text: &str) -> Vec<String> {
        let doc = self.analyze(text);
        names::people_from_document(&doc)
    }
}

impl Default for GazetaPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAZETA: &str = "Jornal Oficial Sumário: \
SECRETARIA REGIONAL DE EDUCAÇÃO \
Despacho n.º 10 designa João Filipe de Sousa para o cargo \
Despacho n.º 11 exonera Marta Gomes Faria do serviço \
SECRETARIAS REGIONAIS DE SAÚDE \
Aviso n.º 4 nomeia Rui Castro Nunes vogal \
2 - S 28 de janeiro de 2025 resto do corpo";

    #[test]
    fn test_analyze_spans_sorted_non_overlapping() {
        let pipeline = GazetaPipeline::new();
        let doc = pipeline.analyze(GAZETA);
        for pair in doc.spans.windows(2) {
            assert!(pair[0].start_token <= pair[1].start_token);
            assert!(!pair[0].overlaps(&pair[1]));
        }
    }

    #[test]
    fn test_between_literal_case() {
        let pipeline = GazetaPipeline::new();
        let doc = pipeline.analyze("X Sumário: FOO BAR 2 - S 28 de janeiro de 2025 Y");
        assert_eq!(
            boundary::between(&doc, SUM, HEADER_DATE),
            Some("FOO BAR".to_string())
        );
    }

    #[test]
    fn test_process_builds_full_tree() {
        let pipeline = GazetaPipeline::new();
        let tree = pipeline.process(GAZETA).expect("documento estruturado");

        let groups: Vec<&str> = tree.groups().map(|(g, _)| g).collect();
        assert_eq!(groups, vec![
            "SECRETARIA REGIONAL DE EDUCAÇÃO",
            "SECRETARIAS REGIONAIS DE SAÚDE",
        ]);

        let educacao = tree.get("SECRETARIA REGIONAL DE EDUCAÇÃO").unwrap();
        assert_eq!(educacao.len(), 2);
        assert_eq!(educacao[0].0, "Despacho n.º 10");
        assert!(educacao[0].1.chunk.contains("João Filipe de Sousa"));
        assert_eq!(educacao[0].1.autor, vec!["João Filipe de Sousa".to_string()]);
        assert_eq!(educacao[0].1.pessoas, educacao[0].1.autor);

        let saude = tree.get("SECRETARIAS REGIONAIS DE SAÚDE").unwrap();
        assert_eq!(saude.len(), 1);
        assert_eq!(saude[0].0, "Aviso n.º 4");
    }

    #[test]
    fn test_process_without_structure_is_skipped() {
        let pipeline = GazetaPipeline::new();
        let err = pipeline.process("texto corrido qualquer sem marcadores").unwrap_err();
        assert_eq!(err, ProcessError::NoStructuralEntities);
    }

    #[test]
    fn test_process_missing_boundary() {
        let pipeline = GazetaPipeline::new();
        let err = pipeline
            .process("Sumário: Despacho n.º 3 algo sem data de cabeçalho")
            .unwrap_err();
        assert_eq!(err, ProcessError::MissingBoundary {
            start: SUM.to_string(),
            end: HEADER_DATE.to_string(),
        });
    }

    #[test]
    fn test_retag_is_idempotent_once_labels_are_gone() {
        let pipeline = GazetaPipeline::new();
        let transforms = vec![
            Transform::ExciseAll(rules::TEXTO.to_string()),
            Transform::TruncateBeforeKeep(SUM.to_string()),
        ];

        let doc = pipeline.analyze("lixo inicial Texto Sumário: corpo útil Texto final");
        let once = pipeline.retag(doc, &transforms);
        let twice = pipeline.retag(once.clone(), &transforms);
        assert_eq!(once.text, twice.text);
        assert!(once.text.starts_with("Sumário"));
        assert!(!once.text.contains("Texto"));
    }

    #[test]
    fn test_batch_failures_do_not_halt() {
        let pipeline = GazetaPipeline::new();
        let texts = vec![
            GAZETA.to_string(),
            "nada estruturado".to_string(),
        ];
        let results = pipeline.process_batch(&texts);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_filter_names_on_free_text() {
        let pipeline = GazetaPipeline::new();
        let names = pipeline.filter_names(
            "esteve presente Ana Luz Teixeira e o diretor regional; assina Rui Bento Castro.",
        );
        assert!(names.contains(&"Ana Luz Teixeira".to_string()));
        assert!(names.contains(&"Rui Bento Castro".to_string()));
    }
}
