//! Graph construction and representation
//!
//! This module provides the sentence-similarity graph: a dense matrix for
//! inspection and a CSR view for ranking.

pub mod builder;
pub mod csr;
pub mod similarity;
