//! TF-IDF vector space and cosine similarity over a set of documents.
//!
//! The vocabulary is built from scratch on every call, so scores always
//! reflect exactly the documents being compared.

use crate::error::SimilarityError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// Runs of two or more word characters
static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Symmetric pairwise similarity, indexed by input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    /// Number of documents (rows and columns)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Similarity between documents `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }
}

/// Lowercases and splits text into vectorizer tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Computes the pairwise cosine similarity of TF-IDF vectors
///
/// Term weights are raw counts scaled by the smoothed inverse document
/// frequency `ln((1 + n) / (1 + df)) + 1`, and every vector is L2-normalized.
/// The diagonal is exactly 1.0; a document with no terms scores 0.0 against
/// every other document.
pub fn similarity_matrix<S: AsRef<str>>(
    documents: &[S],
) -> Result<SimilarityMatrix, SimilarityError> {
    let n = documents.len();
    if n < 2 {
        return Err(SimilarityError::TooFewDocuments(n));
    }

    let term_counts: Vec<HashMap<String, usize>> = documents
        .iter()
        .map(|doc| {
            let mut counts = HashMap::new();
            for token in tokenize(doc.as_ref()) {
                *counts.entry(token).or_insert(0) += 1;
            }
            counts
        })
        .collect();

    // term -> document frequency, sorted for a stable column order
    let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
    for counts in &term_counts {
        for term in counts.keys() {
            *document_frequency.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    if document_frequency.is_empty() {
        return Err(SimilarityError::DegenerateCorpus);
    }

    ::log::debug!(
        "Built vocabulary of {} terms over {} documents",
        document_frequency.len(),
        n
    );

    let columns: HashMap<&str, (usize, f64)> = document_frequency
        .iter()
        .enumerate()
        .map(|(column, (term, df))| {
            let idf = ((1.0 + n as f64) / (1.0 + *df as f64)).ln() + 1.0;
            (*term, (column, idf))
        })
        .collect();

    let vectors: Vec<Vec<f64>> = term_counts
        .iter()
        .map(|counts| {
            let mut vector = vec![0.0; columns.len()];
            for (term, count) in counts {
                let (column, idf) = columns[term.as_str()];
                vector[column] = *count as f64 * idf;
            }
            l2_normalize(&mut vector);
            vector
        })
        .collect();

    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let score = dot(&vectors[i], &vectors[j]).clamp(0.0, 1.0);
            values[i][j] = score;
            values[j][i] = score;
        }
    }

    Ok(SimilarityMatrix { values })
}

fn l2_normalize(vector: &mut [f64]) {
    let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Rust's borrow-checker, a 2nd look!"),
            vec!["rust", "borrow", "checker", "2nd", "look"]
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize("a b c").is_empty());
    }

    #[test]
    fn test_self_similarity_is_exact() {
        let docs = ["quick brown fox", "quick brown fox"];
        let matrix = similarity_matrix(&docs).unwrap();
        assert_eq!(matrix.get(0, 0), 1.0);
        assert_eq!(matrix.get(1, 1), 1.0);
        assert!((matrix.get(0, 1) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_known_value() {
        // idf(apple) = 1, idf(banana) = idf(cherry) = ln(1.5) + 1
        let matrix = similarity_matrix(&["apple banana", "apple cherry"]).unwrap();
        let idf = 1.5f64.ln() + 1.0;
        let expected = 1.0 / (1.0 + idf * idf);
        assert!((matrix.get(0, 1) - expected).abs() < EPSILON);
    }

    #[test]
    fn test_disjoint_documents() {
        let matrix = similarity_matrix(&["apple banana", "cherry durian"]).unwrap();
        assert_eq!(matrix.get(0, 1), 0.0);
    }

    #[test]
    fn test_symmetry_and_range() {
        let docs = [
            "rust ownership borrowing lifetimes",
            "rust traits generics lifetimes lifetimes",
            "python decorators generators",
            "ownership traits",
        ];
        let matrix = similarity_matrix(&docs).unwrap();
        assert_eq!(matrix.len(), 4);
        for i in 0..4 {
            assert_eq!(matrix.get(i, i), 1.0);
            for j in 0..4 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
                assert!((0.0..=1.0).contains(&matrix.get(i, j)));
            }
        }
        assert!(matrix.get(0, 1) > matrix.get(0, 2));
    }

    #[test]
    fn test_order_determines_indexing() {
        let forward = similarity_matrix(&["alpha beta", "alpha gamma", "delta"]).unwrap();
        let reversed = similarity_matrix(&["delta", "alpha gamma", "alpha beta"]).unwrap();
        assert!((forward.get(0, 1) - reversed.get(2, 1)).abs() < EPSILON);
        assert_eq!(forward.get(0, 2), 0.0);
    }

    #[test]
    fn test_empty_corpus_is_degenerate() {
        assert_eq!(
            similarity_matrix(&["", ""]),
            Err(SimilarityError::DegenerateCorpus)
        );
        // single-character tokens never reach the vocabulary
        assert_eq!(
            similarity_matrix(&["a b", "c"]),
            Err(SimilarityError::DegenerateCorpus)
        );
    }

    #[test]
    fn test_one_empty_document() {
        let matrix = similarity_matrix(&["", "content here"]).unwrap();
        assert_eq!(matrix.get(0, 0), 1.0);
        assert_eq!(matrix.get(0, 1), 0.0);
    }

    #[test]
    fn test_too_few_documents() {
        assert_eq!(
            similarity_matrix(&["only one"]),
            Err(SimilarityError::TooFewDocuments(1))
        );
        assert_eq!(
            similarity_matrix::<&str>(&[]),
            Err(SimilarityError::TooFewDocuments(0))
        );
    }
}
