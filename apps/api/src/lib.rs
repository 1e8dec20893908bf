//! Resume analyzer API: upload a resume PDF, ask questions about it, get
//! answers grounded in the document via a retrieval-augmented pipeline.

pub mod config;
pub mod errors;
pub mod openai_client;
pub mod rag;
pub mod routes;
pub mod state;
