//! Core domain types
//!
//! Shared data shapes for companies, ESG dimensions, scores, news
//! sentiment and analysis results. Wire names follow the external
//! scoring contract, so these types deserialize the model output
//! directly.

use crate::error::{EsgError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three ESG axes. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EsgDimension {
    Environment,
    Social,
    Governance,
}

impl EsgDimension {
    pub const ALL: [EsgDimension; 3] = [
        EsgDimension::Environment,
        EsgDimension::Social,
        EsgDimension::Governance,
    ];

    /// Human-readable axis name.
    pub fn label(&self) -> &'static str {
        match self {
            EsgDimension::Environment => "Environmental",
            EsgDimension::Social => "Social",
            EsgDimension::Governance => "Governance",
        }
    }
}

impl fmt::Display for EsgDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall letter rating, AAA (best) down to CCC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "BBB")]
    Bbb,
    #[serde(rename = "BB")]
    Bb,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "CCC")]
    Ccc,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Aaa => "AAA",
            Rating::Aa => "AA",
            Rating::A => "A",
            Rating::Bbb => "BBB",
            Rating::Bb => "BB",
            Rating::B => "B",
            Rating::Ccc => "CCC",
        }
    }

    /// Badge color used by dashboard clients.
    pub fn color(&self) -> &'static str {
        match self {
            Rating::Aaa => "#059669",
            Rating::Aa => "#10b981",
            Rating::A => "#34d399",
            Rating::Bbb => "#eab308",
            Rating::Bb => "#f97316",
            Rating::B => "#ef4444",
            Rating::Ccc => "#b91c1c",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = EsgError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "AAA" => Ok(Rating::Aaa),
            "AA" => Ok(Rating::Aa),
            "A" => Ok(Rating::A),
            "BBB" => Ok(Rating::Bbb),
            "BB" => Ok(Rating::Bb),
            "B" => Ok(Rating::B),
            "CCC" => Ok(Rating::Ccc),
            other => Err(EsgError::InvalidResponse(format!(
                "unknown rating {other:?}"
            ))),
        }
    }
}

/// One 0-100 score per ESG dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub environmental: f64,
    pub social: f64,
    pub governance: f64,
}

impl DimensionScores {
    pub fn get(&self, dimension: EsgDimension) -> f64 {
        match dimension {
            EsgDimension::Environment => self.environmental,
            EsgDimension::Social => self.social,
            EsgDimension::Governance => self.governance,
        }
    }

    /// Rounded mean of the three scores, the only aggregate the
    /// dashboard displays.
    pub fn average(&self) -> i64 {
        ((self.environmental + self.social + self.governance) / 3.0).round() as i64
    }

    pub fn validate(&self) -> Result<()> {
        for dimension in EsgDimension::ALL {
            let score = self.get(dimension);
            if !(0.0..=100.0).contains(&score) || !score.is_finite() {
                return Err(EsgError::InvalidResponse(format!(
                    "{} score {} outside 0-100",
                    dimension.label(),
                    score
                )));
            }
        }
        Ok(())
    }
}

/// Carbon footprint figures shown on the market overview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarbonData {
    /// Tons of CO2 per million of revenue.
    pub intensity: f64,
    /// Year-over-year change, percent. Negative is improving.
    pub trend: f64,
}

/// A scored news event affecting one ESG dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsSentiment {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub dimension: EsgDimension,
    /// Signed adjustment, -20..+20. Negative for bad news.
    pub impact_score: f64,
    pub source: String,
    pub date: NaiveDate,
}

/// Company profile seeded at startup. This repository has no write
/// path back into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyEsgProfile {
    pub id: String,
    pub name: String,
    pub ticker: String,
    pub industry: String,
    pub scores: DimensionScores,
    pub overall_rating: Rating,
    pub carbon_data: CarbonData,
    pub news_feed: Vec<NewsSentiment>,
}

impl CompanyEsgProfile {
    pub fn average_score(&self) -> i64 {
        self.scores.average()
    }
}

/// Output of a full-report scoring call. Field names match the
/// external JSON contract exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub scores: DimensionScores,
    /// 2-3 sentence briefing.
    pub executive_summary: String,
    /// Detailed findings.
    pub summary: String,
    pub suggested_rating: Rating,
    pub risk_warnings: Vec<String>,
}

impl AnalysisResult {
    /// Range checks on top of what deserialization already enforces.
    /// An out-of-range score from the model is rejected, not stored.
    pub fn validate(&self) -> Result<()> {
        self.scores.validate()
    }
}

/// Output of a single-news-item scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewsImpact {
    pub dimension: EsgDimension,
    pub impact: f64,
}

impl NewsImpact {
    pub fn validate(&self) -> Result<()> {
        if !(-20.0..=20.0).contains(&self.impact) || !self.impact.is_finite() {
            return Err(EsgError::InvalidResponse(format!(
                "impact {} outside -20..+20",
                self.impact
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_wire_names() {
        assert_eq!(
            serde_json::to_string(&EsgDimension::Environment).unwrap(),
            "\"ENVIRONMENT\""
        );
        assert_eq!(
            serde_json::from_str::<EsgDimension>("\"GOVERNANCE\"").unwrap(),
            EsgDimension::Governance
        );
        assert!(serde_json::from_str::<EsgDimension>("\"CLIMATE\"").is_err());
    }

    #[test]
    fn test_rating_round_trip() {
        for text in ["AAA", "AA", "A", "BBB", "BB", "B", "CCC"] {
            let rating: Rating = text.parse().unwrap();
            assert_eq!(rating.as_str(), text);
            assert_eq!(
                serde_json::to_string(&rating).unwrap(),
                format!("\"{text}\"")
            );
        }
        assert!("AAAA".parse::<Rating>().is_err());
        assert!("D".parse::<Rating>().is_err());
    }

    #[test]
    fn test_rating_ordering() {
        assert!(Rating::Aaa < Rating::Ccc);
        assert!(Rating::A < Rating::Bbb);
    }

    #[test]
    fn test_average_rounds_half_up() {
        let scores = DimensionScores {
            environmental: 88.0,
            social: 75.0,
            governance: 82.0,
        };
        assert_eq!(scores.average(), 82);

        let scores = DimensionScores {
            environmental: 70.0,
            social: 60.0,
            governance: 55.0,
        };
        assert_eq!(scores.average(), 62);
    }

    #[test]
    fn test_score_validation() {
        let mut scores = DimensionScores {
            environmental: 50.0,
            social: 50.0,
            governance: 50.0,
        };
        assert!(scores.validate().is_ok());

        scores.social = 101.0;
        assert!(scores.validate().is_err());

        scores.social = -1.0;
        assert!(scores.validate().is_err());
    }

    #[test]
    fn test_impact_validation() {
        let mut impact = NewsImpact {
            dimension: EsgDimension::Environment,
            impact: -15.0,
        };
        assert!(impact.validate().is_ok());

        impact.impact = -25.0;
        assert!(impact.validate().is_err());

        impact.impact = f64::NAN;
        assert!(impact.validate().is_err());
    }

    #[test]
    fn test_analysis_result_wire_names() {
        let json = r#"{
            "scores": {"environmental": 70, "social": 60, "governance": 55},
            "executiveSummary": "ok",
            "summary": "ok",
            "suggestedRating": "A",
            "riskWarnings": []
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.suggested_rating, Rating::A);
        assert!(result.risk_warnings.is_empty());
        assert!(result.validate().is_ok());

        let back = serde_json::to_value(&result).unwrap();
        assert!(back.get("executiveSummary").is_some());
        assert!(back.get("suggestedRating").is_some());
    }
}
