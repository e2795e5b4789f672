//! SEO audit engine: per-page scoring and batch aggregation

pub mod engine;
pub mod rules;
pub mod scoring;

pub use engine::PageAuditor;
