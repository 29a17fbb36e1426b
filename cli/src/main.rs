use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use core::cleanup::{
    self, create_stop_word_list_by_frequency, load_stop_word_list, load_stopwords_json,
    save_stopwords_json, StopwordList,
};
use core::extraction::extract_collection;
use core::models::{InvertedIndexBooleanModel, LinearBooleanModel, ModelKind, RetrievalModel};
use core::persist::{load_collection, save_collection};
use core::stemming::stem_all_documents;
use core::Document;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "irtool")]
#[command(about = "Extract, prepare and query a boolean-retrieval document collection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelArg {
    Linear,
    Inverted,
    Signature,
    Vector,
    Fuzzy,
}

impl ModelArg {
    fn kind(self) -> ModelKind {
        match self {
            ModelArg::Linear => ModelKind::LinearBoolean,
            ModelArg::Inverted => ModelKind::InvertedIndexBoolean,
            ModelArg::Signature => ModelKind::SignatureBoolean,
            ModelArg::Vector => ModelKind::VectorSpace,
            ModelArg::Fuzzy => ModelKind::FuzzySet,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a flat corpus text file into a JSON collection
    Extract {
        /// Corpus text file (fable format)
        #[arg(long)]
        input: PathBuf,
        /// Output collection JSON file
        #[arg(long)]
        output: PathBuf,
    },
    /// Generate a stop word list, from term frequencies or a raw word file
    Stopwords {
        /// Collection JSON to derive frequencies from
        #[arg(long, conflicts_with = "raw")]
        collection: Option<PathBuf>,
        /// Raw stop word file, one word per line
        #[arg(long)]
        raw: Option<PathBuf>,
        /// Output stop word JSON file
        #[arg(long)]
        output: PathBuf,
    },
    /// Populate filtered and stemmed term views of a collection
    Prepare {
        /// Collection JSON file, rewritten in place unless --output is given
        #[arg(long)]
        collection: PathBuf,
        /// Stop word JSON file
        #[arg(long)]
        stopwords: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run a query against the collection with the chosen model
    Search {
        #[arg(long)]
        collection: PathBuf,
        #[arg(long, value_enum, default_value_t = ModelArg::Inverted)]
        model: ModelArg,
        /// Query string; the inverted model understands AND/OR/NOT
        #[arg(long)]
        query: String,
        /// Stop word JSON file backing --filter-stopwords
        #[arg(long)]
        stopwords: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        filter_stopwords: bool,
        #[arg(long, default_value_t = false)]
        stemming: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { input, output } => {
            let collection = extract_collection(&input)?;
            if collection.is_empty() {
                bail!("no documents extracted from {}", input.display());
            }
            save_collection(&collection, &output)?;
            println!("extracted {} documents -> {}", collection.len(), output.display());
            Ok(())
        }
        Commands::Stopwords { collection, raw, output } => {
            let stopwords = match (collection, raw) {
                (Some(path), None) => {
                    let docs = load_collection(&path)?;
                    if docs.is_empty() {
                        bail!("collection {} is empty", path.display());
                    }
                    create_stop_word_list_by_frequency(&docs)
                }
                (None, Some(path)) => load_stop_word_list(&path)?,
                _ => bail!("pass exactly one of --collection or --raw"),
            };
            save_stopwords_json(&stopwords, &output)?;
            println!("wrote {} stop words -> {}", stopwords.len(), output.display());
            Ok(())
        }
        Commands::Prepare { collection, stopwords, output } => {
            let mut docs = load_collection(&collection)?;
            if docs.is_empty() {
                bail!("collection {} is empty", collection.display());
            }
            let stopword_list = load_stopwords_json(&stopwords)?;
            cleanup::filter_collection(&mut docs, &stopword_list);
            stem_all_documents(&mut docs);
            let target = output.unwrap_or(collection);
            save_collection(&docs, &target)?;
            println!("prepared {} documents -> {}", docs.len(), target.display());
            Ok(())
        }
        Commands::Search {
            collection,
            model,
            query,
            stopwords,
            filter_stopwords,
            stemming,
        } => {
            let docs = load_collection(&collection)?;
            if docs.is_empty() {
                bail!("collection {} is empty", collection.display());
            }
            let stopword_list = stopwords
                .as_deref()
                .map(load_stopwords_json)
                .transpose()
                .context("loading stop word list")?;
            if filter_stopwords && stopword_list.is_none() {
                tracing::warn!("--filter-stopwords set without --stopwords; precomputed filtered_terms views will be used where present");
            }
            run_search(model, &query, &docs, stopword_list, filter_stopwords, stemming)
        }
    }
}

fn run_search(
    model: ModelArg,
    query: &str,
    docs: &[Document],
    stopwords: Option<StopwordList>,
    filter_stopwords: bool,
    stemming: bool,
) -> Result<()> {
    match model.kind() {
        ModelKind::LinearBoolean => {
            let linear = LinearBooleanModel::new(stopwords);
            let query_repr = linear.query_to_representation(query)?;
            let mut scored: Vec<(&Document, f64)> = Vec::new();
            for document in docs {
                let doc_repr =
                    linear.document_to_representation(document, filter_stopwords, stemming);
                let score = linear.match_score(&doc_repr, &query_repr)?;
                if score > 0.0 {
                    scored.push((document, score));
                }
            }
            // Descending score; collection order breaks ties.
            scored.sort_by(|a, b| b.1.total_cmp(&a.1));
            println!("{} of {} documents match", scored.len(), docs.len());
            for (document, score) in scored {
                println!("{:.4}  [{}] {}", score, document.document_id, document.title);
            }
        }
        ModelKind::InvertedIndexBoolean => {
            let mut inverted = InvertedIndexBooleanModel::new(stopwords);
            inverted.index_collection(docs, filter_stopwords, stemming);
            let hits = inverted.search(query, docs)?;
            println!("{} of {} documents match", hits.len(), docs.len());
            for document in hits {
                println!("[{}] {}", document.document_id, document.title);
            }
        }
        other => {
            // Construction fails for the declared-only model kinds.
            other.build(None)?;
            unreachable!("{other} constructed unexpectedly");
        }
    }
    Ok(())
}
