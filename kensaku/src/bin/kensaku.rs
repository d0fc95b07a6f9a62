//! Command-line front end: loads a corpus file (one document per line),
//! runs a search and prints ranked results as text or JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use kensaku::{Algorithm, Corpus, SearchEngine, SearchResponse};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kensaku", version, about = "Multilingual TF-IDF document search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search a corpus file for the best-matching documents
    Search {
        /// Corpus file, one document per line
        file: PathBuf,
        /// Free-text query (English, Japanese or mixed)
        query: String,
        /// Ranking algorithm
        #[arg(short, long, default_value = "tfidf_ultra")]
        algorithm: String,
        /// Number of results to show
        #[arg(short = 'n', long, default_value_t = 5)]
        top: usize,
        /// Emit a JSON object instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the available ranking algorithms
    Algorithms,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Search {
            file,
            query,
            algorithm,
            top,
            json,
        } => {
            let algorithm: Algorithm = algorithm.parse()?;
            let corpus = Corpus::load(&file)
                .with_context(|| format!("failed to load corpus from {}", file.display()))?;

            let engine = SearchEngine::new();
            let response = engine.search(corpus.documents(), &query, algorithm, top)?;

            if json {
                print_json(&response, corpus.len())?;
            } else {
                print_text(&response, corpus.len());
            }
        }
        Command::Algorithms => {
            for algorithm in Algorithm::ALL {
                println!("{algorithm}");
            }
        }
    }

    Ok(())
}

fn print_text(response: &SearchResponse, corpus_size: usize) {
    if response.hits.is_empty() {
        println!("No results found.");
    } else {
        for (rank, hit) in response.hits.iter().enumerate() {
            println!("{}. score {:.4}  (document {})", rank + 1, hit.score, hit.index);
            println!("   {}", hit.text);
        }
    }

    println!();
    println!("algorithm:     {}", response.algorithm);
    println!("hits:          {}/{}", response.hits.len(), corpus_size);
    println!("vocabulary:    {}", response.vocab_size);
    println!("elapsed:       {:.1}ms", response.elapsed.as_secs_f64() * 1000.0);
    if let Some(preprocessing) = response.preprocessing {
        println!("preprocessing: {:.1}ms", preprocessing.as_secs_f64() * 1000.0);
    }
}

fn print_json(response: &SearchResponse, corpus_size: usize) -> anyhow::Result<()> {
    let payload = serde_json::json!({
        "algorithm": response.algorithm.name(),
        "results": &response.hits,
        "hit_count": response.hits.len(),
        "corpus_size": corpus_size,
        "vocab_size": response.vocab_size,
        "elapsed_ms": response.elapsed.as_secs_f64() * 1000.0,
        "preprocessing_ms": response.preprocessing.map(|d| d.as_secs_f64() * 1000.0),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
