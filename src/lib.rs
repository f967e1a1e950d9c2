//! # reporank
//!
//! Indexes the text of a repository and answers natural-language questions
//! with the files most likely to be relevant.
//!
//! ```text
//!   question ──► tokenize ──► BM25 over every chunk ──► top 1000 chunks
//!                                                            │
//!   question ──► embed ──► cosine vs candidate embeddings ◄──┘
//!                                   │
//!                          top 100 chunks ──► sum per file ──► top k files
//! ```
//!
//! - [`search::chunker`] splits files into overlapping line windows
//! - [`search::lexical`] BM25 scoring behind the [`search::LexicalScorer`] trait
//! - [`search::embedder`] dense embeddings behind the [`search::Embedder`] trait
//! - [`search::rerank`] and [`search::aggregate`] the second stage and file ranking
//! - [`search::index`] and [`search::store`] the index lifecycle and its artifact
//! - [`search::acquire`] local checkout of the repository
//! - [`search::evaluate`] Recall@k over a labeled dataset

pub mod cli;
pub mod config;
pub mod error;
pub mod search;

pub use error::{RankError, Result};
