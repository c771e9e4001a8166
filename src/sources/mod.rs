//! Curated directory of credible news outlets.
//!
//! Static reference data consulted by reviewers and the report surface.
//! The directory is seeded once at startup; user-added sources default
//! to unverified until reviewed manually.

use crate::db::ProjectStore;
use crate::types::{NewsSource, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Credibility profile for a named source; unknown sources get the
/// fixed low-trust fallback.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SourceCredibility {
    pub credibility_rating: f64,
    pub bias_rating: String,
    pub fact_check_rating: String,
    pub is_verified: bool,
}

struct DefaultSource {
    name: &'static str,
    url: &'static str,
    credibility_rating: f64,
    bias_rating: &'static str,
}

const DEFAULT_SOURCES: &[DefaultSource] = &[
    DefaultSource {
        name: "Reuters",
        url: "https://www.reuters.com",
        credibility_rating: 0.95,
        bias_rating: "center",
    },
    DefaultSource {
        name: "Associated Press (AP)",
        url: "https://apnews.com",
        credibility_rating: 0.94,
        bias_rating: "center",
    },
    DefaultSource {
        name: "BBC News",
        url: "https://www.bbc.com/news",
        credibility_rating: 0.90,
        bias_rating: "center",
    },
    DefaultSource {
        name: "NPR",
        url: "https://www.npr.org",
        credibility_rating: 0.89,
        bias_rating: "center",
    },
    DefaultSource {
        name: "Wall Street Journal",
        url: "https://www.wsj.com",
        credibility_rating: 0.87,
        bias_rating: "center",
    },
    DefaultSource {
        name: "The Guardian",
        url: "https://www.theguardian.com",
        credibility_rating: 0.85,
        bias_rating: "left",
    },
    DefaultSource {
        name: "The New York Times",
        url: "https://www.nytimes.com",
        credibility_rating: 0.84,
        bias_rating: "left",
    },
    DefaultSource {
        name: "FactCheck.org",
        url: "https://www.factcheck.org",
        credibility_rating: 0.96,
        bias_rating: "center",
    },
    DefaultSource {
        name: "Snopes",
        url: "https://www.snopes.com",
        credibility_rating: 0.93,
        bias_rating: "center",
    },
    DefaultSource {
        name: "PolitiFact",
        url: "https://www.politifact.com",
        credibility_rating: 0.91,
        bias_rating: "center",
    },
];

pub struct SourceDirectory {
    store: Arc<ProjectStore>,
}

impl SourceDirectory {
    pub fn new(store: Arc<ProjectStore>) -> Self {
        Self { store }
    }

    /// Seed the default verified outlets. Idempotent: a populated table
    /// is left untouched.
    pub async fn initialize_default_sources(&self) -> Result<()> {
        if self.store.count_sources().await? > 0 {
            return Ok(());
        }

        for source in DEFAULT_SOURCES {
            self.store
                .insert_source(
                    source.name,
                    Some(source.url),
                    source.credibility_rating,
                    source.bias_rating,
                    "high",
                    true,
                )
                .await?;
        }

        tracing::info!(count = DEFAULT_SOURCES.len(), "seeded default news sources");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<NewsSource>> {
        self.store.list_sources().await
    }

    /// Verified sources at or above the credibility floor.
    pub async fn credible_sources(&self, min_credibility: f64) -> Result<Vec<NewsSource>> {
        Ok(self
            .store
            .list_sources()
            .await?
            .into_iter()
            .filter(|source| source.credibility_rating >= min_credibility && source.is_verified)
            .collect())
    }

    /// Assess a source by name; unknown sources rate low and unverified.
    pub async fn assess_source(&self, name: &str) -> Result<SourceCredibility> {
        match self.store.get_source_by_name(name).await? {
            Some(source) => Ok(SourceCredibility {
                credibility_rating: source.credibility_rating,
                bias_rating: source.bias_rating,
                fact_check_rating: source.fact_check_rating,
                is_verified: source.is_verified,
            }),
            None => Ok(SourceCredibility {
                credibility_rating: 0.3,
                bias_rating: "unknown".to_string(),
                fact_check_rating: "low".to_string(),
                is_verified: false,
            }),
        }
    }

    /// Register a new outlet. New sources need manual verification.
    pub async fn add_source(
        &self,
        name: &str,
        url: Option<&str>,
        credibility_rating: f64,
        bias_rating: &str,
        fact_check_rating: &str,
    ) -> Result<NewsSource> {
        self.store
            .insert_source(
                name,
                url,
                credibility_rating.clamp(0.0, 1.0),
                bias_rating,
                fact_check_rating,
                false,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let store = Arc::new(ProjectStore::new_memory().await.unwrap());
        let directory = SourceDirectory::new(Arc::clone(&store));

        directory.initialize_default_sources().await.unwrap();
        directory.initialize_default_sources().await.unwrap();

        assert_eq!(directory.list().await.unwrap().len(), DEFAULT_SOURCES.len());
    }

    #[tokio::test]
    async fn test_credible_sources_filter() {
        let store = Arc::new(ProjectStore::new_memory().await.unwrap());
        let directory = SourceDirectory::new(Arc::clone(&store));
        directory.initialize_default_sources().await.unwrap();

        let credible = directory.credible_sources(0.9).await.unwrap();
        assert!(!credible.is_empty());
        assert!(credible
            .iter()
            .all(|s| s.credibility_rating >= 0.9 && s.is_verified));
    }

    #[tokio::test]
    async fn test_unknown_source_rates_low() {
        let store = Arc::new(ProjectStore::new_memory().await.unwrap());
        let directory = SourceDirectory::new(store);

        let assessment = directory.assess_source("Totally Real News").await.unwrap();
        assert_eq!(assessment.credibility_rating, 0.3);
        assert!(!assessment.is_verified);
        assert_eq!(assessment.bias_rating, "unknown");
    }

    #[tokio::test]
    async fn test_added_sources_start_unverified() {
        let store = Arc::new(ProjectStore::new_memory().await.unwrap());
        let directory = SourceDirectory::new(store);

        let source = directory
            .add_source("Neighborhood Gazette", None, 0.6, "mixed", "medium")
            .await
            .unwrap();
        assert!(!source.is_verified);

        let assessment = directory.assess_source("Neighborhood Gazette").await.unwrap();
        assert_eq!(assessment.credibility_rating, 0.6);
        assert!(!assessment.is_verified);
    }
}
