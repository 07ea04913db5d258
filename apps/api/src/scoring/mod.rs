//! Resume vs job-description scoring.
//!
//! `AppState` holds an `Arc<dyn TextScorer>`. The default backend is
//! `TfidfScorer`: normalize both texts, fit TF-IDF on the pair, take the
//! cosine similarity and list job-description lemmas absent from the resume.

pub mod tfidf;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::nlp::Normalizer;
use crate::scoring::tfidf::{cosine_similarity, TfidfVectorizer};

/// At most this many missing keywords are named in the suggestion.
const SUGGESTION_KEYWORD_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("empty vocabulary; perhaps the documents only contain stop words")]
    EmptyVocabulary,
}

/// Response body of a successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Percentage in [0, 100], rounded to two decimals.
    pub similarity_score: f64,
    /// Job-description lemmas not present in the resume, in order of first appearance.
    pub missing_keywords: Vec<String>,
    pub summary: String,
    pub suggestion: String,
}

pub trait TextScorer: Send + Sync {
    fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, AnalysisError>;
}

#[derive(Default)]
pub struct TfidfScorer {
    normalizer: Normalizer,
    vectorizer: TfidfVectorizer,
}

impl TfidfScorer {
    pub fn new(normalizer: Normalizer, vectorizer: TfidfVectorizer) -> Self {
        Self {
            normalizer,
            vectorizer,
        }
    }
}

impl TextScorer for TfidfScorer {
    fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let resume_clean = self.normalizer.clean(resume_text);
        let jd_clean = self.normalizer.clean(job_description);

        let matrix = self
            .vectorizer
            .fit_transform(&[resume_clean.as_str(), jd_clean.as_str()])?;
        let cosine = cosine_similarity(&matrix.rows[0], &matrix.rows[1]);
        let similarity_score = round2(cosine * 100.0).clamp(0.0, 100.0);

        tracing::debug!(
            vocabulary = matrix.vocabulary.len(),
            resume_terms = resume_clean.split_whitespace().count(),
            jd_terms = jd_clean.split_whitespace().count(),
            "Computed TF-IDF similarity"
        );

        let missing_keywords = missing_keywords(&resume_clean, &jd_clean);

        Ok(AnalysisResult {
            similarity_score,
            summary: build_summary(similarity_score),
            suggestion: build_suggestion(&missing_keywords),
            missing_keywords,
        })
    }
}

/// Tokens of `jd_clean` that never occur in `resume_clean`, deduplicated.
fn missing_keywords(resume_clean: &str, jd_clean: &str) -> Vec<String> {
    let resume_terms: HashSet<&str> = resume_clean.split_whitespace().collect();
    let mut seen = HashSet::new();
    jd_clean
        .split_whitespace()
        .filter(|term| !resume_terms.contains(term) && seen.insert(*term))
        .map(String::from)
        .collect()
}

fn build_summary(score: f64) -> String {
    // Debug keeps the fractional part: 0.0 and 100.0 rather than 0 and 100
    format!("Resume matches {score:?}% with job description.")
}

fn build_suggestion(missing: &[String]) -> String {
    if missing.is_empty() {
        return "Excellent keyword match!".to_string();
    }
    let top: Vec<&str> = missing
        .iter()
        .take(SUGGESTION_KEYWORD_LIMIT)
        .map(String::as_str)
        .collect();
    format!("Consider including: {}", top.join(", "))
}

/// Two decimals, ties to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
