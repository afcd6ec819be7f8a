//! # Construtor de seções hierárquicas
//!
//! Particiona um subdocumento (já isolado pelas operações de fronteira) na
//! árvore de duas camadas do diário: secretarias (rótulo de grupo) contendo
//! despachos/avisos (rótulo de item), cada item com o texto que o segue.
//!
//! Itens que aparecem antes da primeira secretaria não têm onde ser colocados
//! e são descartados — política documentada, não acidente: várias passagens
//! independentes do processamento dependem dela.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::names;
use crate::recognizer::EntityRecognizer;
use crate::tokenizer::tokenize;

/// Registro de um item (despacho/aviso) dentro de um grupo.
///
/// Os nomes e o aninhamento dos campos são contrato de compatibilidade com os
/// consumidores do JSON exportado: `data`, `despachos`, `serie` e `secretaria`
/// são reservados para enriquecimento posterior e saem vazios.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub chunk: String,
    pub data: String,
    pub autor: Vec<String>,
    pub pessoas: Vec<String>,
    pub despachos: String,
    pub serie: String,
    pub secretaria: String,
}

/// Árvore de seções: grupos em ordem de primeira aparição, cada um com seus
/// itens em ordem de documento. Serializa como objeto JSON aninhado, chaveado
/// pelo texto do grupo e do item.
///
/// Implementada sobre vetores porque a ordem de inserção é invariante do
/// formato; chaves repetidas sobrescrevem o valor mantendo a posição original.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionTree {
    groups: Vec<(String, Vec<(String, ItemRecord)>)>,
}

impl SectionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Grupos na ordem de primeira aparição.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[(String, ItemRecord)])> {
        self.groups.iter().map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    /// Itens de um grupo, se o grupo existir.
    pub fn get(&self, group: &str) -> Option<&[(String, ItemRecord)]> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, items)| items.as_slice())
    }

    /// Total de itens em todos os grupos.
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }

    /// Acesso mutável a todos os itens, para passes de enriquecimento.
    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut ItemRecord> {
        self.groups
            .iter_mut()
            .flat_map(|(_, items)| items.iter_mut().map(|(_, record)| record))
    }

    fn insert_group(&mut self, name: String, items: Vec<(String, ItemRecord)>) {
        if let Some(existing) = self.groups.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = items;
        } else {
            self.groups.push((name, items));
        }
    }
}

impl Serialize for SectionTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (group, items) in &self.groups {
            map.serialize_entry(group, &OrderedItems(items))?;
        }
        map.end()
    }
}

struct OrderedItems<'a>(&'a [(String, ItemRecord)]);

impl Serialize for OrderedItems<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (title, record) in self.0 {
            map.serialize_entry(title, record)?;
        }
        map.end()
    }
}

/// Constrói a árvore de seções de um subdocumento.
///
/// Percorre, em ordem de token, a lista fundida de spans de grupo e de item.
/// Um span de grupo fecha o grupo corrente (se tiver acumulado itens) e abre
/// um novo; um span de item sem grupo corrente é descartado. O conteúdo de um
/// item vai do fim do seu span até o início da próxima entrada fundida (ou o
/// fim do subdocumento), com o texto literal do grupo corrente removido — um
/// remendo para o artefato de fatiamento em que o cabeçalho do grupo vaza
/// para o primeiro item — e espaço em branco das bordas aparado.
pub fn build_sections(
    doc: &Document,
    group_label: &str,
    item_label: &str,
    recognizer: &dyn EntityRecognizer,
) -> SectionTree {
    let mut merged: Vec<_> = doc
        .spans
        .iter()
        .filter(|s| s.label == group_label || s.label == item_label)
        .collect();
    merged.sort_by_key(|s| s.start_token);

    let mut tree = SectionTree::new();
    let mut current_group: Option<String> = None;
    let mut current_items: Vec<(String, ItemRecord)> = Vec::new();

    for (i, span) in merged.iter().enumerate() {
        if span.label == group_label {
            if let Some(group) = current_group.take() {
                if !current_items.is_empty() {
                    tree.insert_group(group, std::mem::take(&mut current_items));
                }
            }
            current_items.clear();
            current_group = Some(span.text.trim().to_string());
        } else if let Some(group) = &current_group {
            let content_start = span.end;
            let content_end = merged
                .get(i + 1)
                .map(|next| next.start)
                .unwrap_or(doc.text.len());
            let raw = &doc.text[content_start..content_end];
            let chunk = raw.replace(group.as_str(), "").trim().to_string();

            let autor = extract_people_from_chunk(recognizer, &chunk);
            let record = ItemRecord {
                chunk,
                autor,
                ..ItemRecord::default()
            };
            upsert_item(&mut current_items, span.text.trim().to_string(), record);
        } else {
            tracing::debug!(item = %span.text, "item antes do primeiro grupo descartado");
        }
    }

    if let Some(group) = current_group {
        if !current_items.is_empty() {
            tree.insert_group(group, current_items);
        }
    }

    tree
}

/// Chave de item repetida dentro do mesmo grupo sobrescreve (última vence).
fn upsert_item(items: &mut Vec<(String, ItemRecord)>, title: String, record: ItemRecord) {
    if let Some(existing) = items.iter_mut().find(|(t, _)| *t == title) {
        existing.1 = record;
    } else {
        items.push((title, record));
    }
}

/// Roda o reconhecedor sobre um trecho isolado e filtra os candidatos PER.
pub fn extract_people_from_chunk(recognizer: &dyn EntityRecognizer, chunk: &str) -> Vec<String> {
    let tokens = tokenize(chunk);
    let raw: Vec<String> = recognizer
        .recognize(chunk, &tokens)
        .into_iter()
        .filter(|s| s.label == crate::recognizer::PER)
        .map(|s| s.text.trim().to_string())
        .collect();
    names::filter_names(raw)
}
