//! Genre-based content similarity.
//!
//! Each movie is a document whose terms are its genre labels. Documents are
//! weighted with smoothed TF-IDF, L2-normalized, and compared pairwise with
//! cosine similarity.

use ndarray::{Array2, ArrayView1, Axis};
use std::collections::{BTreeSet, HashMap};

/// TF-IDF weighting over a term vocabulary learned from the documents
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Term → column mapping; columns follow sorted term order
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Learns the vocabulary and idf weights, then returns the
    /// `documents × terms` TF-IDF matrix with L2-normalized rows.
    ///
    /// idf(t) = ln((1 + n) / (1 + df(t))) + 1
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[Vec<S>]) -> Array2<f64> {
        let terms: BTreeSet<&str> = documents
            .iter()
            .flat_map(|doc| doc.iter().map(|t| t.as_ref()))
            .collect();
        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(col, term)| (term.to_string(), col))
            .collect();

        let n_docs = documents.len();
        let n_terms = self.vocabulary.len();
        let mut matrix = Array2::<f64>::zeros((n_docs, n_terms));

        for (row, doc) in documents.iter().enumerate() {
            for term in doc {
                if let Some(&col) = self.vocabulary.get(term.as_ref()) {
                    matrix[[row, col]] += 1.0;
                }
            }
        }

        let mut df = vec![0usize; n_terms];
        for row in matrix.rows() {
            for (col, &count) in row.iter().enumerate() {
                if count > 0.0 {
                    df[col] += 1;
                }
            }
        }

        self.idf = df
            .iter()
            .map(|&d| ((1.0 + n_docs as f64) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        for mut row in matrix.rows_mut() {
            for (col, value) in row.iter_mut().enumerate() {
                *value *= self.idf[col];
            }
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|v| v / norm);
            }
        }

        tracing::debug!(documents = n_docs, terms = n_terms, "TF-IDF matrix built");
        matrix
    }
}

/// Dense, symmetric all-pairs cosine similarity over catalog positions
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    values: Array2<f64>,
}

impl SimilarityMatrix {
    /// Cosine similarity of every pair of (already L2-normalized) rows.
    ///
    /// The diagonal is 1 even for all-zero rows; off-diagonal entries
    /// are clamped to [0, 1].
    pub fn from_tfidf(tfidf: &Array2<f64>) -> Self {
        let n = tfidf.len_of(Axis(0));
        let mut values = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            values[[i, i]] = 1.0;
            let a = tfidf.row(i);
            for j in (i + 1)..n {
                let sim = cosine(a, tfidf.row(j)).clamp(0.0, 1.0);
                values[[i, j]] = sim;
                values[[j, i]] = sim;
            }
        }

        tracing::info!(movies = n, "Similarity matrix computed");
        Self { values }
    }

    /// Vectorizes genre documents and builds their similarity matrix
    pub fn from_genres<S: AsRef<str>>(documents: &[Vec<S>]) -> Self {
        let tfidf = TfidfVectorizer::new().fit_transform(documents);
        Self::from_tfidf(&tfidf)
    }

    pub fn len(&self) -> usize {
        self.values.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.values[[a, b]]
    }

    pub fn row(&self, a: usize) -> ArrayView1<'_, f64> {
        self.values.row(a)
    }
}

fn cosine(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let denom = a.dot(&a).sqrt() * b.dot(&b).sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    a.dot(&b) / denom
}
