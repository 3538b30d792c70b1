//! Consultant-layer enrichment: wraps one metric in a definition, a
//! niche-aware importance line, a score verdict and a goal-aware business
//! implication.

use lazy_static::lazy_static;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::types::{CardContext, ConsultantCard};

struct Definition {
    definition: &'static str,
    base_importance: &'static str,
}

lazy_static! {
    static ref METRIC_DEFINITIONS: BTreeMap<&'static str, Definition> = BTreeMap::from([
        (
            "engagement_rate",
            Definition {
                definition: "Engagement rate measures active interaction (likes, comments, shares) relative to followers.",
                base_importance: "High engagement signals that the audience is real and interested.",
            },
        ),
        (
            "avg_percentage_viewed",
            Definition {
                definition: "Completion rate / Avg % Viewed measures how well the content holds attention until the end.",
                base_importance: "The ultimate 'truth' metric for content quality.",
            },
        ),
        (
            "stayed_vs_swiped",
            Definition {
                definition: "Stayed vs. Swiped measures the influencer's ability to stop the scroll.",
                base_importance: "If users swipe away instantly, your brand message is never seen.",
            },
        ),
        (
            "predicted_saves",
            Definition {
                definition: "Saves indicate high intent and future purchase potential.",
                base_importance: "A strong signal for utility and product interest.",
            },
        ),
        (
            "predicted_shares",
            Definition {
                definition: "Shares represent 'earned' reach and personal endorsement.",
                base_importance: "Shows the content resonated enough to recommend to others.",
            },
        ),
        (
            "promo_code_redemptions",
            Definition {
                definition: "The most direct way to measure ROI and tie collaboration to revenue.",
                base_importance: "Critical for bottom-line performance measurement.",
            },
        ),
        (
            "avg_view_duration",
            Definition {
                definition: "Average View Duration (AVD) checks if viewers stayed long enough to reach the hook.",
                base_importance: "Vital for ensuring your product mention is actually seen.",
            },
        ),
        (
            "comment_sentiment_quality",
            Definition {
                definition: "Qualitative proof of engagement looking for product-specific questions.",
                base_importance: "Distinguishes between fan-girling and actual buyer intent.",
            },
        ),
        (
            "brand_safety_score",
            Definition {
                definition: "Measures the risk of association with controversial topics.",
                base_importance: "Protects brand reputation.",
            },
        ),
        (
            "fake_follower_probability",
            Definition {
                definition: "Bot percentage reveals the authenticity of the audience.",
                base_importance: "High bots mean you are paying for ghost eyes.",
            },
        ),
    ]);
}

const FALLBACK_DEFINITION: Definition = Definition {
    definition: "Key performance indicator.",
    base_importance: "Important for overall performance.",
};

/// Stateless consultant layer between raw metrics and the user.
pub struct MetricEnricher;

impl MetricEnricher {
    pub fn new() -> Self {
        Self
    }

    /// Build the consultant card for one metric.
    ///
    /// `category` is the influencer's niche and `goal` the campaign goal;
    /// unknown metric keys fall back to a generic definition rather than
    /// failing.
    pub fn enrich_metric(
        &self,
        metric_key: &str,
        value: &JsonValue,
        score_normalized: f64,
        category: &str,
        goal: &str,
    ) -> ConsultantCard {
        let def = METRIC_DEFINITIONS.get(metric_key).unwrap_or(&FALLBACK_DEFINITION);

        ConsultantCard {
            metric_name: title_case(metric_key),
            value: display_value(value),
            context: CardContext {
                definition: def.definition.to_string(),
                importance_reason: importance_for(metric_key, def.base_importance, category),
                performance_verdict: verdict_for(score_normalized).to_string(),
                business_implication: business_impact(metric_key, score_normalized, goal),
            },
        }
    }
}

impl Default for MetricEnricher {
    fn default() -> Self {
        Self::new()
    }
}

/// Niche-specific nuance, falling back to the metric's base importance.
fn importance_for(metric: &str, base_reason: &str, category: &str) -> String {
    let cat = category.to_lowercase();

    if metric.contains("saves") {
        if cat.contains("tech") {
            return "For Tech, saves are critical as users often bookmark tutorials and specs for later reference.".to_string();
        }
        if cat.contains("fashion") {
            return "For Fashion, saves often act as a 'wishlist' for future shopping trips.".to_string();
        }
        if cat.contains("food") {
            return "For Food, saves usually indicate users planning to cook this recipe.".to_string();
        }
    }

    if metric.contains("engagement") {
        if cat.contains("beauty") {
            return "For Beauty, high engagement is crucial as it signals trust in specific product recommendations.".to_string();
        }
        if cat.contains("gaming") {
            return "For Gaming, community interaction is the primary driver of loyalty.".to_string();
        }
    }

    base_reason.to_string()
}

fn verdict_for(score: f64) -> &'static str {
    if score >= 85.0 {
        "Market-Leading (Excellent)"
    } else if score >= 70.0 {
        "Strong (Good)"
    } else if score >= 50.0 {
        "Average (Acceptable)"
    } else if score >= 40.0 {
        "Below Average (Concerning)"
    } else {
        "Critical Risk (Poor)"
    }
}

/// Connects the metric back to the campaign goal.
fn business_impact(metric: &str, score: f64, goal: &str) -> String {
    let is_good = score >= 50.0;
    let goal = goal.to_lowercase();

    if goal.contains("awareness") {
        if metric.contains("view") || metric.contains("impression") || metric.contains("reach") {
            return if is_good {
                "High views are perfect here, as your primary goal is Awareness.".to_string()
            } else {
                "Low reach effectively fails the primary Awareness objective.".to_string()
            };
        }
        if metric.contains("engagement") {
            return if is_good {
                "Engagement helps algorithmic reach, amplifying your Awareness goal.".to_string()
            } else {
                "Low engagement might limit the viral spread needed for Awareness.".to_string()
            };
        }
    }

    if goal.contains("conversion") {
        if metric.contains("view") {
            return "High views are nice, but without interactions, they may not drive your Conversion goal.".to_string();
        }
        if metric.contains("engagement") || metric.contains("save") || metric.contains("redemption") {
            return if is_good {
                "This high intent directly supports your Conversion goal.".to_string()
            } else {
                "The low intent signals here are a red flag for Conversion campaigns.".to_string()
            };
        }
    }

    "This directly impacts campaign efficiency.".to_string()
}

/// `promo_code_redemptions` becomes `Promo Code Redemptions`.
pub(crate) fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formatted strings stay as-is; raw values are stringified.
pub(crate) fn display_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
