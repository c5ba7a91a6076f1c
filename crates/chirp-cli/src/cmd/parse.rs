use crate::output::print_json;
use anyhow::Context;
use chirp_core::config::CorpusSchema;
use chirp_core::corpus::Corpus;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ParseSubcommand {
    /// Parse an alternating header/body corpus (header = major-unit label,
    /// body = `:`-separated minor units with embedded labels)
    Paired {
        /// Raw corpus text file
        input: PathBuf,
        /// Corpus JSON output path
        output: PathBuf,
        #[arg(long, default_value = "units")]
        minor_list_key: String,
        #[arg(long, default_value = "text")]
        text_key: String,
        #[arg(long, default_value = "label")]
        major_label_key: String,
        #[arg(long, default_value = "label")]
        minor_label_key: String,
    },
    /// Parse a marker-delimited corpus (marker lines open major units,
    /// other lines are minor units)
    Marked {
        /// Raw corpus text file
        input: PathBuf,
        /// Corpus JSON output path
        output: PathBuf,
        /// Line prefix that opens a new major unit
        #[arg(long)]
        marker: String,
        #[arg(long, default_value = "units")]
        minor_list_key: String,
        #[arg(long, default_value = "text")]
        text_key: String,
        #[arg(long, default_value = "label")]
        major_label_key: String,
    },
}

#[derive(serde::Serialize)]
struct ParseSummary {
    major_units: usize,
    minor_units: usize,
    output: PathBuf,
}

pub fn run(subcommand: ParseSubcommand, json: bool) -> anyhow::Result<()> {
    let (corpus, schema, output) = match subcommand {
        ParseSubcommand::Paired {
            input,
            output,
            minor_list_key,
            text_key,
            major_label_key,
            minor_label_key,
        } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let corpus = chirp_core::parse::parse_paired(&text)?;
            let schema = CorpusSchema {
                minor_list: minor_list_key,
                text: text_key,
                major_label: major_label_key,
                minor_label: Some(minor_label_key),
            };
            (corpus, schema, output)
        }
        ParseSubcommand::Marked {
            input,
            output,
            marker,
            minor_list_key,
            text_key,
            major_label_key,
        } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let corpus = chirp_core::parse::parse_marked(&text, &marker)?;
            let schema = CorpusSchema {
                minor_list: minor_list_key,
                text: text_key,
                major_label: major_label_key,
                minor_label: None,
            };
            (corpus, schema, output)
        }
    };

    write_corpus(&corpus, &schema, &output)?;

    let summary = ParseSummary {
        major_units: corpus.majors.len(),
        minor_units: corpus.total_minors(),
        output,
    };
    if json {
        return print_json(&summary);
    }
    println!(
        "wrote {} major units ({} minor units) to {}",
        summary.major_units,
        summary.minor_units,
        summary.output.display()
    );
    Ok(())
}

fn write_corpus(corpus: &Corpus, schema: &CorpusSchema, output: &PathBuf) -> anyhow::Result<()> {
    let value = corpus.to_value(schema);
    chirp_core::io::atomic_write(output, serde_json::to_string_pretty(&value)?.as_bytes())?;
    Ok(())
}
