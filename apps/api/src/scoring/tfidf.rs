//! TF-IDF vectorization over a small in-memory corpus.

use std::collections::{BTreeSet, HashMap};

use crate::scoring::AnalysisError;

/// TF-IDF weighting with raw term counts, smoothed IDF and L2-normalized rows.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// Tokens shorter than this (in characters) are not part of the vocabulary.
    pub min_token_chars: usize,
    /// idf = ln((1 + n) / (1 + df)) + 1 when set, ln(n / df) + 1 otherwise.
    pub smooth_idf: bool,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self {
            min_token_chars: 2,
            smooth_idf: true,
        }
    }
}

/// Document-term matrix. Columns follow `vocabulary`, which is sorted.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    pub vocabulary: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl TfidfVectorizer {
    pub fn fit_transform(&self, documents: &[&str]) -> Result<TfidfMatrix, AnalysisError> {
        let tokenized: Vec<Vec<&str>> = documents.iter().map(|d| self.tokenize(d)).collect();

        let vocabulary: Vec<String> = tokenized
            .iter()
            .flatten()
            .copied()
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(String::from)
            .collect();
        if vocabulary.is_empty() {
            return Err(AnalysisError::EmptyVocabulary);
        }
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let counts: Vec<Vec<f64>> = tokenized
            .iter()
            .map(|tokens| {
                let mut row = vec![0.0; vocabulary.len()];
                for token in tokens {
                    row[index[token]] += 1.0;
                }
                row
            })
            .collect();

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = (0..vocabulary.len())
            .map(|col| {
                let df = counts.iter().filter(|row| row[col] > 0.0).count() as f64;
                if self.smooth_idf {
                    ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
                } else {
                    (n_docs / df).ln() + 1.0
                }
            })
            .collect();

        let rows = counts
            .into_iter()
            .map(|row| {
                let weighted: Vec<f64> = row.iter().zip(&idf).map(|(tf, w)| tf * w).collect();
                l2_normalize(weighted)
            })
            .collect();

        Ok(TfidfMatrix { vocabulary, rows })
    }

    fn tokenize<'a>(&self, document: &'a str) -> Vec<&'a str> {
        document
            .split_whitespace()
            .filter(|token| token.chars().count() >= self.min_token_chars)
            .collect()
    }
}

fn l2_normalize(mut row: Vec<f64>) -> Vec<f64> {
    let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|v| *v /= norm);
    }
    row
}

/// Cosine of the angle between `a` and `b`. Zero when either vector is all zeros.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
