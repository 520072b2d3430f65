//! ESG scoring client
//!
//! Everything "intelligent" in this service is delegated to a hosted
//! LLM. This module owns the two request/response contracts: full
//! report analysis and single-news-item impact scoring. One outbound
//! call per operation, no retry, no caching.

#[cfg(test)]
mod tests;

mod llm;

pub use llm::{LlmProvider, LlmScorer};

use crate::error::Result;
use crate::types::{AnalysisResult, NewsImpact};
use async_trait::async_trait;

/// The scoring service boundary. The server holds this as a trait
/// object so tests can stand in a scripted scorer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EsgScorer: Send + Sync {
    /// Score a free-text report across the three ESG dimensions.
    async fn analyze_report(&self, text: &str) -> Result<AnalysisResult>;

    /// Classify the most-affected dimension of a news item and its
    /// signed score impact.
    async fn score_news_impact(&self, title: &str, summary: &str) -> Result<NewsImpact>;

    /// Provider label for logs.
    fn name(&self) -> &str;
}
