use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::Chunk;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SENTENCE_TERMINATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

/// Greedy bin-packing of sentences by character length, not semantic
/// boundary. Chunks never split a sentence: a single sentence longer than
/// the size bound forms its own oversized chunk.
pub struct SentenceSplitter {
    max_chunk_size: usize,
}

impl SentenceSplitter {
    pub fn new(max_chunk_size: usize) -> Self {
        Self { max_chunk_size }
    }

    fn pack(&self, text: &str) -> Vec<Chunk> {
        let normalized = WHITESPACE_RUN.replace_all(text, " ");
        let normalized = normalized.trim();

        let mut chunks: Vec<String> = Vec::new();
        let mut current = String::new();

        for sentence in SENTENCE_TERMINATOR.split(normalized) {
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }

            // A tie on the exact size bound favors packing into the current
            // chunk.
            let candidate = format!("{current} {sentence}.");
            if candidate.len() <= self.max_chunk_size {
                current = candidate;
            } else {
                if !current.is_empty() {
                    chunks.push(current.trim().to_string());
                }
                current = format!("{sentence}.");
            }
        }

        if !current.is_empty() {
            chunks.push(current.trim().to_string());
        }

        chunks
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chunk::new(i + 1, text))
            .collect()
    }
}

#[async_trait]
impl TextSplitter for SentenceSplitter {
    async fn split(&self, text: &str) -> Result<Vec<Chunk>, TextSplitterError> {
        Ok(self.pack(text))
    }
}
