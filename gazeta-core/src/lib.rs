//! # gazeta-core — Extração de estrutura de diários oficiais
//!
//! Este crate reconstrói a estrutura latente de documentos do Jornal Oficial
//! (II Série) convertidos de imagem para texto: seções de secretaria contendo
//! atos administrativos numerados (despachos, avisos, editais), cada um
//! enriquecido com a lista limpa de nomes de pessoa mencionados.
//!
//! ## Arquitetura
//!
//! O processamento é em lote, um documento por vez, num fluxo linear:
//!
//! 1. **Tokenização** ([`tokenizer`]): o texto é dividido em tokens com
//!    offsets de byte e flags linguísticas.
//! 2. **Marcação** ([`pattern`] + [`recognizer`]): níveis ordenados de regras
//!    sobre tokens, por cima dos spans do reconhecedor estatístico.
//! 3. **Resolução** ([`document`]): precedência e sobreposição entre
//!    candidatos produzem a lista final de spans, ordenada e sem conflitos.
//! 4. **Fronteiras** ([`boundary`]): primitivas puras de recorte do texto
//!    delimitadas por rótulos (entre, truncar, excisar).
//! 5. **Hierarquia** ([`sections`]): partição do sumário em grupos
//!    (secretarias) e itens (atos), com conteúdo por item.
//! 6. **Nomes** ([`names`]): limpeza em cinco estágios dos candidatos PER.
//!
//! O texto nunca é editado no lugar: transformações destrutivas produzem um
//! documento novo e re-marcado ([`pipeline::GazetaPipeline::retag`]).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use gazeta_core::GazetaPipeline;
//!
//! let pipeline = GazetaPipeline::new();
//! let texto = "Sumário: SECRETARIA REGIONAL DE EDUCAÇÃO \
//!     Despacho n.º 10 designa João Filipe de Sousa \
//!     2 - S 28 de janeiro de 2025 corpo";
//!
//! match pipeline.process(texto) {
//!     Ok(tree) => {
//!         for (secretaria, itens) in tree.groups() {
//!             println!("{}: {} atos", secretaria, itens.len());
//!         }
//!     }
//!     Err(motivo) => eprintln!("documento pulado: {}", motivo),
//! }
//! ```

pub mod boundary;
pub mod cleanup;
pub mod document;
pub mod names;
pub mod pattern;
pub mod pipeline;
pub mod recognizer;
pub mod rules;
pub mod sections;
pub mod tokenizer;

pub use document::{Document, EntitySpan};
pub use pipeline::{GazetaPipeline, ProcessError, Transform};
pub use recognizer::{EntityRecognizer, LexiconRecognizer};
pub use sections::{ItemRecord, SectionTree};
pub use tokenizer::Token;
