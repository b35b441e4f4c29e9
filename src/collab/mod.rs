//! Collaborators the checks exercise
//!
//! - **credentials**: API keys and `.env` loading
//! - **documents**: PDF loading (one document per page)
//! - **chunking**: recursive character text splitter
//! - **embeddings**: embedding model resolution on the Hugging Face hub
//! - **vector**: Pinecone index listing
//! - **llm**: Gemini `generateContent`
//! - **http**: shared blocking client and error-body handling
//!
//! None of these know about the check runner; checklists wire them into steps.

pub mod chunking;
pub mod credentials;
pub mod documents;
pub mod embeddings;
pub mod http;
pub mod llm;
pub mod vector;
