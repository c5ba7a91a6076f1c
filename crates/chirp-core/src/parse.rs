//! Offline corpus builders: raw text in, corpus JSON out.
//!
//! Two source layouts are supported. "Paired" corpora alternate a header
//! line (major-unit label) with a single body line holding `:`-separated
//! minor units, each prefixed by its own label token. "Marked" corpora open
//! a major unit with a marker line and treat every following line as one
//! minor unit with no embedded label.

use crate::corpus::{Corpus, MajorUnit, MinorUnit};
use crate::error::{ChirpError, Result};

fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

fn label_token(line: &str) -> Result<&str> {
    line.split_whitespace()
        .nth(1)
        .ok_or_else(|| ChirpError::CorpusInvalid(format!("header '{line}' has no label token")))
}

/// Parse a paired header/body corpus.
///
/// The header's second whitespace token is the major-unit label. The body
/// splits on `:`; within each unit the first token is the embedded minor
/// label and the remainder is the text.
pub fn parse_paired(text: &str) -> Result<Corpus> {
    let lines: Vec<&str> = content_lines(text).collect();
    if lines.len() % 2 != 0 {
        return Err(ChirpError::CorpusInvalid(
            "paired corpus must alternate header and body lines".to_string(),
        ));
    }

    let mut majors = Vec::with_capacity(lines.len() / 2);
    for pair in lines.chunks(2) {
        let label = label_token(pair[0])?;
        let minors = pair[1]
            .split(':')
            .map(str::trim)
            .filter(|unit| !unit.is_empty())
            .map(|unit| {
                let mut tokens = unit.splitn(2, ' ');
                let label = tokens.next().unwrap_or("").to_string();
                let text = tokens.next().unwrap_or("").trim().to_string();
                MinorUnit {
                    text,
                    label: Some(label),
                }
            })
            .collect();
        majors.push(MajorUnit {
            label: label.to_string(),
            minors,
        });
    }
    Ok(Corpus { majors })
}

/// Parse a marker-delimited corpus.
///
/// Lines starting with `marker` open a new major unit (second whitespace
/// token is its label); every other line becomes one minor unit.
pub fn parse_marked(text: &str, marker: &str) -> Result<Corpus> {
    let mut majors: Vec<MajorUnit> = Vec::new();
    for line in content_lines(text) {
        if line.starts_with(marker) {
            majors.push(MajorUnit {
                label: label_token(line)?.to_string(),
                minors: Vec::new(),
            });
        } else {
            let Some(major) = majors.last_mut() else {
                return Err(ChirpError::CorpusInvalid(
                    "content line before the first major-unit marker".to_string(),
                ));
            };
            major.minors.push(MinorUnit {
                text: line.to_string(),
                label: None,
            });
        }
    }
    Ok(Corpus { majors })
}
