//! Groups flat evaluation KPIs into the five chat categories.

use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::types::{CategoryContext, ChatContext, EvaluationResult, KpiOutput};

const ATTENTION_KPIS: [&str; 3] = ["avg_percentage_viewed", "stayed_vs_swiped", "avg_view_duration"];
const VIRALITY_KPIS: [&str; 2] = ["predicted_shares", "predicted_saves"];
const CONVERSION_KPIS: [&str; 3] = ["promo_code_redemptions", "predicted_cpa", "roi_confidence_range"];
const RISK_KPIS: [&str; 3] = [
    "brand_safety_score",
    "controversy_probability",
    "fake_follower_probability",
];
const AUDIENCE_KPIS: [&str; 5] = [
    "engagement_quality",
    "engagement_rate",
    "comment_sentiment_quality",
    "authenticity_score",
    "audience_brand_fit",
];

/// Parse the leading numeric portion of a KPI value.
///
/// Values arrive as raw numbers or as formatted strings (`"45%"`,
/// `"72/100"`, `"2.5x - 3.5x"`); the conclusion rules only care about the
/// number at the front. Unparseable values yield `None`, never an error.
fn leading_number(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => {
            let prefix: String = s
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            prefix.parse().ok()
        }
        _ => None,
    }
}

fn collect<'a>(kpis: &'a [KpiOutput], allowed: &[&str]) -> Vec<KpiOutput> {
    allowed
        .iter()
        .filter_map(|id| kpis.iter().find(|k| k.kpi_id == *id))
        .cloned()
        .collect()
}

fn find<'a>(kpis: &'a [KpiOutput], id: &str) -> Option<&'a KpiOutput> {
    kpis.iter().find(|k| k.kpi_id == id)
}

/// Build the category-grouped chat context from one evaluation result.
///
/// Every category is always present, possibly with an empty metric list;
/// each conclusion falls back to its neutral default when the driving
/// metric is absent or unparseable.
pub fn build_chat_context(result: &EvaluationResult) -> ChatContext {
    let kpis = &result.kpis;

    let attention_conclusion = match find(kpis, "avg_percentage_viewed").and_then(|k| leading_number(&k.value)) {
        Some(v) if v > 40.0 => "Strong depth of viewing indicates high content resonance.",
        Some(v) if v < 20.0 => "Content is failing to hold attention past the hook.",
        _ => "Audience attention is inconsistent.",
    };

    let virality_conclusion = match find(kpis, "predicted_shares").and_then(|k| leading_number(&k.value)) {
        Some(v) if v > 500.0 => "High shareability suggests potential for organic reach multiplier.",
        _ => "Low viral potential detected.",
    };

    let conversion_conclusion = match find(kpis, "roi_confidence_range").and_then(|k| leading_number(&k.value)) {
        Some(lower) if lower > 2.0 => "Projected ROI is healthy and positive.",
        Some(_) => "ROI margins are tight; optimization needed.",
        None => "ROI is uncertain.",
    };

    let risk_conclusion = match find(kpis, "brand_safety_score").and_then(|k| leading_number(&k.value)) {
        Some(v) if v < 70.0 => "CAUTION: Brand safety score is below recommended threshold.",
        _ => "Risk profile is acceptable.",
    };

    let audience_conclusion = match find(kpis, "engagement_quality").and_then(|k| leading_number(&k.value)) {
        Some(v) if v > 70.0 => "High engagement quality suggests deep community trust.",
        _ => "Audience quality is solid.",
    };

    let mut categories = BTreeMap::new();
    for (name, allowed, conclusion) in [
        ("Attention", &ATTENTION_KPIS[..], attention_conclusion),
        ("Virality", &VIRALITY_KPIS[..], virality_conclusion),
        ("Conversion", &CONVERSION_KPIS[..], conversion_conclusion),
        ("Risk", &RISK_KPIS[..], risk_conclusion),
        ("Audience", &AUDIENCE_KPIS[..], audience_conclusion),
    ] {
        categories.insert(
            name.to_string(),
            CategoryContext {
                metrics: collect(kpis, allowed),
                conclusion: conclusion.to_string(),
            },
        );
    }

    ChatContext {
        influencer_id: result.influencer_id.clone(),
        niche: result.niche.clone(),
        goal: result.goal.clone(),
        categories,
        executive_summary: result.decision_summary.clone(),
    }
}
