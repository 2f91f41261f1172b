//! Known funds.
//!
//! The feed has no listing endpoint for these, so the catalog is fixed.

use crate::domain::{Fund, FundId, RiskType};

/// The funds offered by the dashboard, in display order.
pub fn catalog() -> Vec<Fund> {
    vec![
        Fund::new(186, "Risky Norris", RiskType::Aggressive),
        Fund::new(187, "Moderate Pitt", RiskType::Moderate),
        Fund::new(188, "Conservative Clooney", RiskType::Conservative),
        Fund::new(15077, "Very Conservative Streep", RiskType::VeryConservative),
    ]
}

pub fn find_fund(id: FundId) -> Option<Fund> {
    catalog().into_iter().find(|f| f.id == id)
}

/// Catalog entry for `id`, or an unlisted placeholder.
pub fn fund_or_unlisted(id: FundId) -> Fund {
    find_fund(id).unwrap_or_else(|| Fund::unlisted(id))
}

/// Funds of the given risk type (all of them for `None`).
pub fn funds_by_risk(risk: Option<RiskType>) -> Vec<Fund> {
    catalog()
        .into_iter()
        .filter(|f| risk.is_none() || f.risk == risk)
        .collect()
}
