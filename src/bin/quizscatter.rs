//! Print a text dendrogram of quiz questions, then a scattered question order.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use quizscatter::{
    load_questions, EmbeddingTable, LanguageResources, Linkage, MecabTokenizer, ScatterConfig,
    Scatterer,
};

#[derive(Parser)]
#[command(
    name = "quizscatter",
    about = "Cluster quiz questions by meaning and order them so similar ones are far apart"
)]
struct Cli {
    /// Newline-delimited question file
    questions: PathBuf,

    /// Word embeddings in word2vec text format
    #[arg(long)]
    embeddings: PathBuf,

    /// MeCab executable
    #[arg(long, default_value = "mecab")]
    mecab: String,

    /// MeCab system dictionary directory (e.g. mecab-ipadic-neologd)
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Linkage method: single, complete, average, weighted, ward, centroid, median
    #[arg(long, default_value_t = Linkage::Ward)]
    linkage: Linkage,

    /// Number of best word pairs summed per question pair
    #[arg(long, default_value_t = quizscatter::distance::DEFAULT_TOP_K)]
    top_k: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let questions = load_questions(&cli.questions)
        .with_context(|| format!("reading questions from {}", cli.questions.display()))?;
    log::info!("{} questions from {}", questions.len(), cli.questions.display());

    let embeddings = EmbeddingTable::load(&cli.embeddings)
        .with_context(|| format!("loading embeddings from {}", cli.embeddings.display()))?;

    let mut tokenizer = MecabTokenizer::new().with_program(&cli.mecab);
    if let Some(dir) = &cli.dictionary {
        tokenizer = tokenizer.with_dictionary(dir);
    }
    let resources = LanguageResources::new(tokenizer, embeddings);

    let config = ScatterConfig::new()
        .with_top_k(cli.top_k)
        .with_linkage(cli.linkage);
    let report = Scatterer::new(&resources)
        .with_config(config)
        .run(questions)
        .context("scattering questions")?;

    for line in report.dendrogram_lines() {
        println!("{line}");
    }
    for line in report.scatter_lines() {
        println!("{line}");
    }
    Ok(())
}
