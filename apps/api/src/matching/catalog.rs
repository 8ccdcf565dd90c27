//! Static reference catalog merged into every candidate pool.
//!
//! Guarantees matching has something to rank before any investor has been
//! approved. Ids carry a `catalog-` prefix so they never look like row UUIDs.

use crate::matching::models::{normalize_focus, CandidateInvestor, InvestorCategory};

struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    category: InvestorCategory,
    focus: &'static [&'static str],
    description: &'static str,
    investment_range: &'static str,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "catalog-y-combinator",
        name: "Y Combinator",
        category: InvestorCategory::Accelerator,
        focus: &["B2B", "Consumer", "Fintech", "HealthTech", "AI"],
        description: "Three-month accelerator program with a standard deal for pre-seed companies and a large alumni network.",
        investment_range: "$500K standard deal",
    },
    CatalogEntry {
        id: "catalog-techstars",
        name: "Techstars",
        category: InvestorCategory::Accelerator,
        focus: &["SaaS", "Mobility", "Fintech", "Sustainability"],
        description: "Mentorship-driven accelerator running sector and city programs worldwide.",
        investment_range: "$20K - $120K",
    },
    CatalogEntry {
        id: "catalog-sequoia-capital",
        name: "Sequoia Capital",
        category: InvestorCategory::Vc,
        focus: &["Enterprise", "AI", "Fintech", "Consumer"],
        description: "Venture firm investing from seed through growth in category-defining technology companies.",
        investment_range: "$1M - $100M",
    },
    CatalogEntry {
        id: "catalog-andreessen-horowitz",
        name: "Andreessen Horowitz",
        category: InvestorCategory::Vc,
        focus: &["AI", "Crypto", "Bio", "Fintech", "Gaming"],
        description: "Multi-stage venture firm with dedicated funds for infrastructure, bio and health, and crypto.",
        investment_range: "$1M - $50M",
    },
    CatalogEntry {
        id: "catalog-angel-network",
        name: "Regional Angel Network",
        category: InvestorCategory::Angel,
        focus: &["HealthTech", "EdTech", "Consumer", "Local Services"],
        description: "Syndicate of experienced operators writing first cheques into local pre-seed teams.",
        investment_range: "$25K - $250K",
    },
    CatalogEntry {
        id: "catalog-climate-grant",
        name: "Climate Innovation Grant Fund",
        category: InvestorCategory::Grant,
        focus: &["CleanTech", "Sustainability", "Energy", "AgriTech"],
        description: "Non-dilutive grants for early climate and energy technology pilots.",
        investment_range: "$50K - $500K non-dilutive",
    },
    CatalogEntry {
        id: "catalog-growth-partners",
        name: "Growth Equity Partners",
        category: InvestorCategory::PrivateEquity,
        focus: &["SaaS", "Healthcare", "Logistics"],
        description: "Private equity investor backing profitable companies scaling past $10M ARR.",
        investment_range: "$10M - $75M",
    },
];

/// Builds the reference catalog in its normalized candidate shape.
pub fn reference_catalog() -> Vec<CandidateInvestor> {
    CATALOG
        .iter()
        .map(|entry| CandidateInvestor {
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            category: entry.category,
            focus: normalize_focus(entry.focus.iter().copied()),
            description: entry.description.to_string(),
            investment_range: entry.investment_range.to_string(),
        })
        .collect()
}
