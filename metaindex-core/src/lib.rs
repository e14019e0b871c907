// metaindex-core/src/lib.rs

// 1. Documentation is not mandatory yet
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts towards the outside world (entity store).
pub mod ports;

// 2. Domain
// Catalog entities, search documents, connection variants.
// Depends on NOTHING else (neither infra nor app).
pub mod domain;

// 3. Infrastructure (Adapters)
// In-memory catalog store, config files, atomic output.
pub mod infrastructure;

// 4. Application (Use Cases)
// Test case indexing, connection migration.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use metaindex_core::MetaindexError;
pub use error::MetaindexError;
