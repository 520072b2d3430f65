//! Static reference data
//!
//! Seed companies and industry labels for the market overview. The
//! profiles are created once at startup and never mutated; scoring
//! results live in their own transient state.

use crate::types::{
    CarbonData, CompanyEsgProfile, DimensionScores, EsgDimension, NewsSentiment, Rating,
};
use chrono::NaiveDate;
use serde::Serialize;

pub const INDUSTRIES: [&str; 6] = [
    "Technology",
    "Energy",
    "Finance",
    "Healthcare",
    "Manufacturing",
    "Consumer Goods",
];

/// One row of the top-performer leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformerEntry {
    pub name: String,
    pub score: i64,
    pub rating: Rating,
}

/// Average the three dimension scores per company, sort descending and
/// keep the best `limit`. The only aggregation the overview performs.
pub fn top_performers(companies: &[CompanyEsgProfile], limit: usize) -> Vec<PerformerEntry> {
    let mut entries: Vec<PerformerEntry> = companies
        .iter()
        .map(|c| PerformerEntry {
            name: c.name.clone(),
            score: c.average_score(),
            rating: c.overall_rating,
        })
        .collect();
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(limit);
    entries
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

/// The demonstration universe shown on the market overview.
pub fn seed_companies() -> Vec<CompanyEsgProfile> {
    vec![
        CompanyEsgProfile {
            id: "1".to_string(),
            name: "EcoTech Solutions".to_string(),
            ticker: "ECTH".to_string(),
            industry: "Technology".to_string(),
            scores: DimensionScores {
                environmental: 88.0,
                social: 75.0,
                governance: 82.0,
            },
            overall_rating: Rating::Aa,
            carbon_data: CarbonData {
                intensity: 45.0,
                trend: -12.0,
            },
            news_feed: vec![NewsSentiment {
                id: "n1".to_string(),
                title: "EcoTech launches new zero-waste hardware initiative".to_string(),
                summary: "A bold move towards circular economy in electronics manufacturing."
                    .to_string(),
                dimension: EsgDimension::Environment,
                impact_score: 5.0,
                source: "Green Business Journal".to_string(),
                date: date(2024, 3, 15),
            }],
        },
        CompanyEsgProfile {
            id: "3".to_string(),
            name: "Future FinServ".to_string(),
            ticker: "FIFS".to_string(),
            industry: "Finance".to_string(),
            scores: DimensionScores {
                environmental: 65.0,
                social: 88.0,
                governance: 92.0,
            },
            overall_rating: Rating::Aaa,
            carbon_data: CarbonData {
                intensity: 12.0,
                trend: -5.0,
            },
            news_feed: vec![],
        },
        CompanyEsgProfile {
            id: "4".to_string(),
            name: "Pure Water Systems".to_string(),
            ticker: "PWS".to_string(),
            industry: "Manufacturing".to_string(),
            scores: DimensionScores {
                environmental: 78.0,
                social: 70.0,
                governance: 75.0,
            },
            overall_rating: Rating::A,
            carbon_data: CarbonData {
                intensity: 110.0,
                trend: -8.0,
            },
            news_feed: vec![],
        },
        CompanyEsgProfile {
            id: "5".to_string(),
            name: "BioHeal Lab".to_string(),
            ticker: "BHLB".to_string(),
            industry: "Healthcare".to_string(),
            scores: DimensionScores {
                environmental: 72.0,
                social: 85.0,
                governance: 68.0,
            },
            overall_rating: Rating::A,
            carbon_data: CarbonData {
                intensity: 85.0,
                trend: -4.0,
            },
            news_feed: vec![],
        },
        CompanyEsgProfile {
            id: "6".to_string(),
            name: "Logistics Prime".to_string(),
            ticker: "LPRM".to_string(),
            industry: "Consumer Goods".to_string(),
            scores: DimensionScores {
                environmental: 58.0,
                social: 72.0,
                governance: 65.0,
            },
            overall_rating: Rating::Bbb,
            carbon_data: CarbonData {
                intensity: 220.0,
                trend: -3.0,
            },
            news_feed: vec![],
        },
        CompanyEsgProfile {
            id: "2".to_string(),
            name: "Global Petroleum Corp".to_string(),
            ticker: "GLPC".to_string(),
            industry: "Energy".to_string(),
            scores: DimensionScores {
                environmental: 32.0,
                social: 45.0,
                governance: 68.0,
            },
            overall_rating: Rating::Bb,
            carbon_data: CarbonData {
                intensity: 450.0,
                trend: 2.0,
            },
            news_feed: vec![NewsSentiment {
                id: "n2".to_string(),
                title: "Fines imposed on Global Petroleum for offshore leakage".to_string(),
                summary:
                    "Regulators have issued a $50M fine following a pipeline leak in the North Sea."
                        .to_string(),
                dimension: EsgDimension::Environment,
                impact_score: -15.0,
                source: "Reuters".to_string(),
                date: date(2024, 4, 10),
            }],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_universe_shape() {
        let companies = seed_companies();
        assert_eq!(companies.len(), 6);
        for company in &companies {
            assert!(company.scores.validate().is_ok());
            assert!(company.carbon_data.intensity >= 0.0);
            assert!(INDUSTRIES.contains(&company.industry.as_str()));
        }
    }

    #[test]
    fn test_ecotech_average() {
        let companies = seed_companies();
        let ecotech = companies.iter().find(|c| c.ticker == "ECTH").unwrap();
        assert_eq!(ecotech.average_score(), 82);
    }

    #[test]
    fn test_top_performers_sorted_and_capped() {
        let companies = seed_companies();
        let top = top_performers(&companies, 5);
        assert_eq!(top.len(), 5);
        for pair in top.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        // EcoTech and Future FinServ tie at 82; the stable sort keeps
        // seed order, so EcoTech stays on top.
        assert_eq!(top[0].name, "EcoTech Solutions");
        assert_eq!(top[0].score, 82);
        assert_eq!(top[1].name, "Future FinServ");
        // Global Petroleum (48) is the one cut from six.
        assert!(!top.iter().any(|e| e.name == "Global Petroleum Corp"));
    }
}
