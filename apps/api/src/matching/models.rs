use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::investor::InvestorRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvestorCategory {
    #[serde(rename = "VC")]
    Vc,
    Angel,
    Accelerator,
    #[serde(rename = "PE")]
    PrivateEquity,
    Grant,
    Other,
}

impl InvestorCategory {
    /// Lenient parse of the free-text category stored by the admin workflow.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "vc" | "venture" | "venture capital" => InvestorCategory::Vc,
            "angel" | "angel investor" => InvestorCategory::Angel,
            "accelerator" | "incubator" => InvestorCategory::Accelerator,
            "pe" | "private equity" => InvestorCategory::PrivateEquity,
            "grant" | "government grant" => InvestorCategory::Grant,
            _ => InvestorCategory::Other,
        }
    }
}

/// Normalized shape of every investor the model may be asked to rank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateInvestor {
    pub id: String,
    pub name: String,
    pub category: InvestorCategory,
    pub focus: BTreeSet<String>,
    pub description: String,
    pub investment_range: String,
}

impl From<InvestorRow> for CandidateInvestor {
    fn from(row: InvestorRow) -> Self {
        Self {
            id: row.id.to_string(),
            name: row.name.trim().to_string(),
            category: InvestorCategory::parse(&row.category),
            focus: normalize_focus(row.focus),
            description: row.description.trim().to_string(),
            investment_range: row.investment_range.trim().to_string(),
        }
    }
}

/// Trims sector tags and drops blanks; the set keeps prompt output sorted.
pub fn normalize_focus<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Startup fields used to drive a match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartupBrief {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub description: String,
}

impl StartupBrief {
    fn is_blank(&self) -> bool {
        [&self.name, &self.sector, &self.stage, &self.description]
            .iter()
            .all(|f| f.trim().is_empty())
    }
}

/// What a match request is about: a startup profile or a free-text search.
#[derive(Debug, Clone)]
pub enum MatchQuery {
    Startup(StartupBrief),
    Text(String),
}

/// Request body for `POST /api/v1/matches`. Exactly one field must be set.
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub startup: Option<StartupBrief>,
    pub query: Option<String>,
}

impl MatchRequest {
    pub fn into_query(self) -> Result<MatchQuery, AppError> {
        match (self.startup, self.query) {
            (Some(_), Some(_)) => Err(AppError::Validation(
                "Provide either 'startup' or 'query', not both".to_string(),
            )),
            (None, None) => Err(AppError::Validation(
                "Provide a 'startup' profile or a 'query' string".to_string(),
            )),
            (Some(brief), None) => {
                if brief.is_blank() {
                    return Err(AppError::Validation(
                        "startup profile has no usable fields".to_string(),
                    ));
                }
                Ok(MatchQuery::Startup(brief))
            }
            (None, Some(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(AppError::Validation("query cannot be empty".to_string()));
                }
                Ok(MatchQuery::Text(text.to_string()))
            }
        }
    }
}

/// A validated match joined back to its full candidate record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub investor: CandidateInvestor,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_lenient() {
        assert_eq!(InvestorCategory::parse("VC"), InvestorCategory::Vc);
        assert_eq!(InvestorCategory::parse(" venture capital "), InvestorCategory::Vc);
        assert_eq!(InvestorCategory::parse("Angel"), InvestorCategory::Angel);
        assert_eq!(InvestorCategory::parse("Private Equity"), InvestorCategory::PrivateEquity);
        assert_eq!(InvestorCategory::parse("family office"), InvestorCategory::Other);
    }

    #[test]
    fn test_category_serializes_with_short_names() {
        assert_eq!(serde_json::to_string(&InvestorCategory::Vc).unwrap(), r#""VC""#);
        assert_eq!(
            serde_json::to_string(&InvestorCategory::PrivateEquity).unwrap(),
            r#""PE""#
        );
    }

    #[test]
    fn test_normalize_focus_trims_and_dedupes() {
        let focus = normalize_focus(vec![" Fintech", "Fintech", "", "AI "]);
        assert_eq!(focus.into_iter().collect::<Vec<_>>(), vec!["AI", "Fintech"]);
    }

    #[test]
    fn test_match_request_requires_exactly_one_input() {
        let both = MatchRequest {
            startup: Some(StartupBrief {
                sector: "Fintech".to_string(),
                ..Default::default()
            }),
            query: Some("payments".to_string()),
        };
        assert!(matches!(both.into_query(), Err(AppError::Validation(_))));

        let neither = MatchRequest {
            startup: None,
            query: None,
        };
        assert!(matches!(neither.into_query(), Err(AppError::Validation(_))));

        let blank_query = MatchRequest {
            startup: None,
            query: Some("   ".to_string()),
        };
        assert!(matches!(blank_query.into_query(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_match_request_accepts_startup_profile() {
        let request: MatchRequest =
            serde_json::from_str(r#"{"startup": {"sector": "Fintech", "stage": "Seed"}}"#).unwrap();
        match request.into_query().unwrap() {
            MatchQuery::Startup(brief) => {
                assert_eq!(brief.sector, "Fintech");
                assert!(brief.name.is_empty());
            }
            MatchQuery::Text(_) => panic!("expected startup query"),
        }
    }
}
