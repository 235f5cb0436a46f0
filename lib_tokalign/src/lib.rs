pub mod aligner;
pub mod alignment_configuration;
pub mod alignment_matrix;
pub mod alignment_result;
pub mod costs;
pub mod error;
pub mod interner;
pub mod statistics;
