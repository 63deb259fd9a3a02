//! ExtractiveSummarizer — picks the most central contract sentences.
//!
//! Sentences are ranked with TextRank over word-overlap vectors, then boosted
//! by their word overlap with the retrieved knowledge context. The top
//! `max_sentences` are returned in document order.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use covenant_core::errors::CovenantResult;
use covenant_core::traits::ICompletionProvider;
use regex::Regex;

const DAMPING: f64 = 0.85;
const CONVERGENCE: f64 = 1e-6;
const MAX_ITERATIONS: usize = 100;

/// Sentence terminators: Latin punctuation followed by whitespace or end of
/// text, CJK full stops, and line breaks.
static SENTENCE_END: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[.!?]+(?:\s+|$)|[。！？]+|\n+").ok());

#[derive(Debug, Clone, Copy)]
pub struct ExtractiveSummarizer {
    max_sentences: usize,
}

impl ExtractiveSummarizer {
    /// `max_sentences` is clamped to at least 1.
    pub fn new(max_sentences: usize) -> Self {
        Self {
            max_sentences: max_sentences.max(1),
        }
    }

    pub fn max_sentences(&self) -> usize {
        self.max_sentences
    }

    pub fn summarize(&self, text: &str, context: &str) -> String {
        let sentences = split_sentences(text);
        if sentences.len() <= self.max_sentences {
            return sentences.join(" ");
        }

        let centrality = rank_sentences(&sentences);
        let context_words = words(context).collect::<HashSet<_>>();
        let mut scored: Vec<(usize, f64)> = sentences
            .iter()
            .zip(centrality)
            .enumerate()
            .map(|(i, (s, rank))| (i, rank * (1.0 + context_overlap(s, &context_words))))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut top: Vec<usize> = scored
            .iter()
            .take(self.max_sentences)
            .map(|(i, _)| *i)
            .collect();
        top.sort_unstable();

        top.iter()
            .map(|&i| sentences[i].as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self::new(covenant_core::config::defaults::DEFAULT_SUMMARY_SENTENCES)
    }
}

impl ICompletionProvider for ExtractiveSummarizer {
    fn complete_summary(&self, text: &str, context: &str) -> CovenantResult<String> {
        Ok(self.summarize(text, context))
    }

    fn name(&self) -> &str {
        "extractive"
    }
}

pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let Some(re) = SENTENCE_END.as_ref() else {
        let whole = text.trim();
        return if whole.is_empty() { Vec::new() } else { vec![whole.to_string()] };
    };

    let mut sentences = Vec::new();
    let mut start = 0;
    for m in re.find_iter(text) {
        push_trimmed(&mut sentences, &text[start..m.end()]);
        start = m.end();
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Share of a sentence's words that also occur in the context.
fn context_overlap(sentence: &str, context_words: &HashSet<String>) -> f64 {
    if context_words.is_empty() {
        return 0.0;
    }
    let (hits, total) = words(sentence).fold((0usize, 0usize), |(h, t), w| {
        (h + usize::from(context_words.contains(&w)), t + 1)
    });
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

/// PageRank over the cosine-similarity graph of sentence word counts.
fn rank_sentences(sentences: &[String]) -> Vec<f64> {
    let n = sentences.len();
    if n <= 1 {
        return vec![1.0; n];
    }

    let vectors = word_vectors(sentences);
    let mut sim = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let s = cosine(&vectors[i], &vectors[j]);
            sim[i][j] = s;
            sim[j][i] = s;
        }
    }
    let out_sums: Vec<f64> = sim.iter().map(|row| row.iter().sum()).collect();

    let mut scores = vec![1.0 / n as f64; n];
    for _ in 0..MAX_ITERATIONS {
        let mut max_diff = 0.0f64;
        let next: Vec<f64> = (0..n)
            .map(|i| {
                let inbound: f64 = (0..n)
                    .filter(|&j| j != i && out_sums[j] > f64::EPSILON)
                    .map(|j| sim[j][i] * scores[j] / out_sums[j])
                    .sum();
                let value = (1.0 - DAMPING) / n as f64 + DAMPING * inbound;
                max_diff = max_diff.max((value - scores[i]).abs());
                value
            })
            .collect();
        scores = next;
        if max_diff < CONVERGENCE {
            break;
        }
    }
    scores
}

fn word_vectors(sentences: &[String]) -> Vec<HashMap<String, f64>> {
    sentences
        .iter()
        .map(|s| {
            let mut counts = HashMap::new();
            for w in words(s) {
                *counts.entry(w).or_insert(0.0) += 1.0;
            }
            counts
        })
        .collect()
}

fn cosine(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(w, x)| b.get(w).map(|y| x * y))
        .sum();
    let norm = |v: &HashMap<String, f64>| v.values().map(|x| x * x).sum::<f64>().sqrt();
    let denom = norm(a) * norm(b);
    if denom < f64::EPSILON {
        0.0
    } else {
        dot / denom
    }
}
