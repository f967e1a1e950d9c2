//! BM25 (Okapi) lexical scoring over a tokenized corpus.
//!
//! Constants are fixed so rankings are reproducible:
//! - `k1 = 1.5` term frequency saturation
//! - `b = 0.75` document length normalization
//! - `epsilon = 0.25` floor for negative idf, as a fraction of the mean idf
//!
//! All per-term statistics live in ordered maps, so every floating point sum
//! runs in the same order on every run and scores are bit-for-bit stable.

use std::collections::BTreeMap;

pub const K1: f64 = 1.5;
pub const B: f64 = 0.75;
pub const EPSILON: f64 = 0.25;

/// Scores a tokenized query against every document of a corpus.
pub trait LexicalScorer: Send + Sync {
    /// One score per document, in corpus order.
    fn score(&self, query: &[String]) -> Vec<f64>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct Bm25Index {
    /// Per document term counts
    doc_freqs: Vec<BTreeMap<String, u32>>,
    doc_lens: Vec<usize>,
    avgdl: f64,
    idf: BTreeMap<String, f64>,
}

impl Bm25Index {
    pub fn new(corpus: &[Vec<String>]) -> Self {
        let mut doc_freqs = Vec::with_capacity(corpus.len());
        let mut doc_lens = Vec::with_capacity(corpus.len());
        // number of documents containing each term
        let mut df: BTreeMap<String, u32> = BTreeMap::new();
        let mut total_len = 0usize;

        for doc in corpus {
            let mut freqs: BTreeMap<String, u32> = BTreeMap::new();
            for token in doc {
                *freqs.entry(token.clone()).or_insert(0) += 1;
            }
            for term in freqs.keys() {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
            total_len += doc.len();
            doc_lens.push(doc.len());
            doc_freqs.push(freqs);
        }

        let avgdl = if corpus.is_empty() {
            0.0
        } else {
            total_len as f64 / corpus.len() as f64
        };

        Self {
            idf: compute_idf(&df, corpus.len()),
            doc_freqs,
            doc_lens,
            avgdl,
        }
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(term).copied()
    }
}

fn compute_idf(df: &BTreeMap<String, u32>, n_docs: usize) -> BTreeMap<String, f64> {
    let n = n_docs as f64;
    let mut idf = BTreeMap::new();
    let mut idf_sum = 0.0;
    let mut negative = Vec::new();

    for (term, &freq) in df {
        let freq = freq as f64;
        let value = ((n - freq + 0.5) / (freq + 0.5)).ln();
        idf_sum += value;
        if value < 0.0 {
            negative.push(term.clone());
        }
        idf.insert(term.clone(), value);
    }

    if !idf.is_empty() {
        let floor = EPSILON * idf_sum / idf.len() as f64;
        for term in negative {
            idf.insert(term, floor);
        }
    }

    idf
}

impl LexicalScorer for Bm25Index {
    fn score(&self, query: &[String]) -> Vec<f64> {
        let mut scores = vec![0.0f64; self.doc_freqs.len()];
        if scores.is_empty() || self.avgdl == 0.0 {
            return scores;
        }

        for term in query {
            let Some(idf) = self.idf(term) else {
                continue;
            };

            for (i, freqs) in self.doc_freqs.iter().enumerate() {
                let tf = freqs.get(term).copied().unwrap_or(0) as f64;
                if tf == 0.0 {
                    continue;
                }
                let norm = 1.0 - B + B * self.doc_lens[i] as f64 / self.avgdl;
                scores[i] += idf * (tf * (K1 + 1.0) / (tf + K1 * norm));
            }
        }

        scores
    }

    fn len(&self) -> usize {
        self.doc_freqs.len()
    }
}
