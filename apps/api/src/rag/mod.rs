//! Retrieval-augmented answering over a single uploaded resume.
//!
//! Pipeline: PDF bytes -> extracted text -> overlapping chunks -> embeddings
//! -> in-memory vector index. Questions embed the query, retrieve the top-K
//! chunks by cosine similarity, and ground the generated answer in them.

pub mod answer;
pub mod chunk;
pub mod embed;
pub mod extract;
pub mod handlers;
pub mod index;
pub mod pipeline;
pub mod prompts;
pub mod retrieve;
