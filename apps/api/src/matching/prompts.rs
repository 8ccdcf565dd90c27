// Matching engine LLM prompt templates.
// All prompts for the matching module are defined here.

use crate::errors::AppError;
use crate::llm_client::prompts::{
    sanitize_for_prompt, JSON_ONLY_SYSTEM, UNTRUSTED_INPUT_INSTRUCTION,
};
use crate::llm_client::RenderedPrompt;
use crate::matching::models::{CandidateInvestor, MatchQuery};

/// Number of matches the model is told to return.
pub const REQUIRED_MATCHES: usize = 3;

const MATCH_SYSTEM_ROLE: &str = "You are an experienced investment analyst who pairs \
    startups with the investors most likely to fund them.";

const NOT_PROVIDED: &str = "(not provided)";

/// Renders a match request and the candidate pool into a model-ready prompt.
///
/// Output is a pure function of the inputs: the pool is serialized in the
/// order given and focus tags are already sorted.
pub fn build_match_prompt(
    query: &MatchQuery,
    pool: &[CandidateInvestor],
) -> Result<RenderedPrompt, AppError> {
    if pool.is_empty() {
        return Err(AppError::EmptyPool);
    }

    let candidates = serde_json::to_string_pretty(pool)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize candidates: {e}")))?;

    let (query_section, reason_rule) = match query {
        MatchQuery::Startup(brief) => (
            format!(
                "STARTUP:\nName: {}\nSector: {}\nStage: {}\nDescription: {}",
                field(&brief.name),
                field(&brief.sector),
                field(&brief.stage),
                field(&brief.description),
            ),
            "Each reason must cite this startup's sector and stage and the investor's \
             matching focus or check size.",
        ),
        MatchQuery::Text(text) => (
            format!("QUERY:\n{}", field(text)),
            "Each reason must cite the specific search terms from the query and the \
             investor's matching focus.",
        ),
    };

    let user = format!(
        r#"Select the best investors for the request below from the CANDIDATES list.

{query_section}

CANDIDATES (JSON):
{candidates}

OUTPUT SCHEMA (return exactly this structure):
{{
  "matches": [
    {{"id": "<candidate id copied exactly from CANDIDATES>", "reason": "<one or two sentences>"}}
  ]
}}

RULES:
1. Return exactly {REQUIRED_MATCHES} entries in "matches", best match first.
2. Every "id" must be copied verbatim from the CANDIDATES list. Never invent investors.
3. Do not repeat an investor.
4. {reason_rule} Generic praise such as "great fit" is not acceptable.
5. Return ONLY the JSON object. No code fences, no commentary."#
    );

    Ok(RenderedPrompt {
        system: format!("{MATCH_SYSTEM_ROLE} {UNTRUSTED_INPUT_INSTRUCTION} {JSON_ONLY_SYSTEM}"),
        user,
    })
}

fn field(value: &str) -> String {
    let cleaned = sanitize_for_prompt(value);
    if cleaned.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::catalog::reference_catalog;
    use crate::matching::models::StartupBrief;

    fn fintech_startup() -> MatchQuery {
        MatchQuery::Startup(StartupBrief {
            name: "LedgerLoop".to_string(),
            sector: "Fintech".to_string(),
            stage: "Seed".to_string(),
            description: String::new(),
        })
    }

    #[test]
    fn test_empty_pool_is_rejected() {
        let err = build_match_prompt(&fintech_startup(), &[]).unwrap_err();
        assert!(matches!(err, AppError::EmptyPool));
    }

    #[test]
    fn test_prompt_contains_role_query_pool_and_contract() {
        let pool = reference_catalog();
        let prompt = build_match_prompt(&fintech_startup(), &pool).unwrap();

        assert!(prompt.system.contains("investment analyst"));
        assert!(prompt.system.contains("valid JSON only"));
        assert!(prompt.user.contains("Sector: Fintech"));
        assert!(prompt.user.contains("Stage: Seed"));
        assert!(prompt.user.contains("Description: (not provided)"));
        assert!(prompt.user.contains("\"matches\""));
        assert!(prompt.user.contains("exactly 3 entries"));
        for candidate in &pool {
            assert!(prompt.user.contains(&candidate.id));
        }
    }

    #[test]
    fn test_text_query_asks_for_search_terms_in_reason() {
        let pool = reference_catalog();
        let query = MatchQuery::Text("climate hardware grants".to_string());
        let prompt = build_match_prompt(&query, &pool).unwrap();
        assert!(prompt.user.contains("QUERY:\nclimate hardware grants"));
        assert!(prompt.user.contains("search terms"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let pool = reference_catalog();
        let a = build_match_prompt(&fintech_startup(), &pool).unwrap();
        let b = build_match_prompt(&fintech_startup(), &pool).unwrap();
        assert_eq!(a, b);
    }
}
