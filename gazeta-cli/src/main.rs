//! Processador em lote: lê os `.txt` de um diretório de entrada, roda o
//! pipeline de extração por documento e grava um `.json` por edição no
//! diretório de saída. Falhas por documento são registradas e não param o
//! lote.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use tracing::{error, info, warn};

use gazeta_core::{cleanup, GazetaPipeline};

#[derive(Parser)]
#[command(name = "gazeta", about = "Extrai a estrutura de edições do diário oficial para JSON")]
struct Args {
    /// Diretório com os .txt extraídos dos PDFs
    input_dir: PathBuf,

    /// Diretório onde gravar os .json (criado se não existir)
    #[arg(short, long, default_value = "json_exports")]
    output_dir: PathBuf,

    /// Normaliza parágrafos (quebras de linha do OCR) antes de processar
    #[arg(long)]
    clean_paragraphs: bool,

    /// JSON com indentação em vez de compacto
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("criando diretório de saída {}", args.output_dir.display()))?;

    let mut files: Vec<PathBuf> = fs::read_dir(&args.input_dir)
        .with_context(|| format!("lendo diretório de entrada {}", args.input_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();

    if files.is_empty() {
        warn!(dir = %args.input_dir.display(), "nenhum .txt encontrado");
        return Ok(());
    }
    info!(total = files.len(), "iniciando lote");

    // O pipeline é somente leitura e partilhado entre os workers
    let pipeline = GazetaPipeline::new();

    let outcomes: Vec<bool> = files
        .par_iter()
        .map(|path| match process_file(&pipeline, path, &args) {
            Ok(()) => true,
            Err(e) => {
                error!(file = %path.display(), error = %e, "documento falhou");
                false
            }
        })
        .collect();

    let ok = outcomes.iter().filter(|&&b| b).count();
    info!(ok, falhas = outcomes.len() - ok, "lote concluído");
    Ok(())
}

fn process_file(pipeline: &GazetaPipeline, path: &Path, args: &Args) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("lendo {}", path.display()))?;
    let text = if args.clean_paragraphs {
        cleanup::clean_into_paragraphs(&raw)
    } else {
        raw
    };

    let tree = match pipeline.process(&text) {
        Ok(tree) => tree,
        Err(motivo) => {
            // Documento malformado rende saída vazia, não aborta o lote
            warn!(file = %path.display(), motivo = %motivo, "documento pulado");
            return Ok(());
        }
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&tree)?
    } else {
        serde_json::to_string(&tree)?
    };

    let stem = path
        .file_stem()
        .context("nome de arquivo sem radical")?
        .to_string_lossy();
    let out_path = args.output_dir.join(format!("{stem}.json"));
    fs::write(&out_path, json)
        .with_context(|| format!("gravando {}", out_path.display()))?;

    info!(file = %out_path.display(), grupos = tree.len(), "JSON gravado");
    Ok(())
}
