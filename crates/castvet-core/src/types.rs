//! Data model for the evaluation pipeline.
//!
//! Everything that crosses a component boundary is an explicit record.
//! KPI values stay `serde_json::Value` because the wire format mixes raw
//! counts with formatted strings (`"45%"`, `"72/100"`, `"38s"`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Content-type selector for profile generation.
///
/// Parsing is total: anything outside the closed set is treated as `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    All,
    Short,
    Long,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::All => "all",
            ContentType::Short => "short",
            ContentType::Long => "long",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "short" => ContentType::Short,
            "long" => ContentType::Long,
            _ => ContentType::All,
        })
    }
}

/// Flat pricing card derived from followers and niche/platform multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub post: f64,
    pub story: f64,
    pub reel: f64,
}

/// Engagement-quality block of the detailed metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementQuality {
    /// Completion rate as a percentage in [0, 100], one decimal.
    pub completion_rate: f64,
    /// Average view duration formatted as `"<int>s"`.
    pub avg_view_duration: String,
    pub like_to_view_ratio: f64,
    pub comment_to_view_ratio: f64,
    pub share_to_view_ratio: f64,
    /// 0-100 score.
    pub comment_sentiment_quality: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceCredibility {
    /// 0-100 score.
    pub audience_quality_score: f64,
    pub bot_follower_pct: f64,
    pub real_engagement_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentConversion {
    /// Saves per 100 impressions.
    pub save_rate: f64,
    pub click_through_rate: f64,
    /// Fraction of impressions redeeming a promo code.
    pub promo_redemption_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyLoyalty {
    /// 0-100 score.
    pub retention_score: u32,
    pub posting_consistency: f64,
    pub loyal_viewer_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandReadiness {
    /// 0-100 score.
    pub brand_safety_score: u32,
    pub content_quality_score: u32,
    /// Count of past incidents.
    pub controversy_history: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthMomentum {
    pub follower_growth_rate_90d: f64,
    pub predicted_growth_6m: u64,
    /// Viral posts per month.
    pub viral_post_frequency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiForecasting {
    pub predicted_cpa: f64,
    pub predicted_roas: f64,
    /// 0-100 score.
    pub cost_efficiency_score: u32,
}

/// Seven-category nested metric block describing a profile's behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedMetrics {
    pub engagement_quality: EngagementQuality,
    pub audience_credibility: AudienceCredibility,
    pub intent_conversion: IntentConversion,
    pub consistency_loyalty: ConsistencyLoyalty,
    pub brand_readiness: BrandReadiness,
    pub growth_momentum: GrowthMomentum,
    pub roi_forecasting: RoiForecasting,
}

/// A synthetic influencer profile.
///
/// Immutable once generated: regenerating the same identifier with the
/// same content type must reproduce this record byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluencerProfile {
    pub id: String,
    pub handle: String,
    pub platform: String,
    pub niche: String,
    pub followers: u64,
    pub pricing: Pricing,
    pub detailed_metrics: DetailedMetrics,
    pub content_type_context: ContentType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetAudience {
    pub age_range: String,
    pub interests: Vec<String>,
}

/// A campaign brief. Not identifier-bound and not reproducible across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignBrief {
    pub id: String,
    pub brand_name: String,
    pub category: String,
    pub budget: u64,
    pub goal: String,
    pub platform_preference: Vec<String>,
    pub target_audience: TargetAudience,
}

/// One named, scored, explained metric produced by a role simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiOutput {
    pub kpi_id: String,
    pub value: JsonValue,
    /// Always clamped to [0, 100] by the producer.
    pub score_normalized: f64,
    pub explanation: String,
    /// In [0, 1].
    pub confidence_score: f64,
}

impl KpiOutput {
    pub fn new(
        kpi_id: impl Into<String>,
        value: JsonValue,
        score_normalized: f64,
        explanation: impl Into<String>,
        confidence_score: f64,
    ) -> Self {
        Self {
            kpi_id: kpi_id.into(),
            value,
            score_normalized: score_normalized.clamp(0.0, 100.0),
            explanation: explanation.into(),
            confidence_score: confidence_score.clamp(0.0, 1.0),
        }
    }
}

/// Short narrative attached to each analyst report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisNarrative {
    pub headline: String,
    /// Signed delta vs baseline, e.g. `"+12% vs 30d baseline"`.
    pub magnitude: String,
    pub drivers: Vec<String>,
    pub hypotheses: Vec<String>,
    pub next_actions: Vec<String>,
    pub confidence_score: f64,
}

/// One analyst perspective: a KPI list plus a narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalystReport {
    pub role: String,
    pub kpis: Vec<KpiOutput>,
    pub analysis: AnalysisNarrative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "TEST")]
    Test,
    #[serde(rename = "NO-GO")]
    NoGo,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Decision::Go => "GO",
            Decision::Test => "TEST",
            Decision::NoGo => "NO-GO",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiPrediction {
    pub min: f64,
    pub max: f64,
    pub confidence: f64,
}

/// Final cross-role decision.
///
/// Invariant enforced by the synthesizer: `risk_level == High` implies
/// `decision == NoGo`, regardless of what was drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveDecision {
    pub decision: Decision,
    pub roi_prediction: RoiPrediction,
    pub risk_level: RiskLevel,
    pub executive_summary: String,
    pub top_flags: Vec<String>,
}

/// The assembled output of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub decision_summary: ExecutiveDecision,
    /// Union of all role KPI lists, in fixed role order
    /// (Performance, Risk, Audience).
    pub kpis: Vec<KpiOutput>,
    pub analyst_reports: Vec<AnalystReport>,
    pub influencer_id: String,
    pub campaign_id: String,
    pub niche: String,
    pub goal: String,
    pub evaluated_at: DateTime<Utc>,
}

/// Input context handed to every role simulator.
///
/// The serialized form of this struct (field order is declaration order)
/// is part of each role's seed payload, so the field layout is a
/// compatibility surface within one algorithm version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationContext {
    pub influencer: InfluencerProfile,
    pub campaign: CampaignBrief,
    pub content_type: ContentType,
}

/// One category slice of the chat context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryContext {
    pub metrics: Vec<KpiOutput>,
    pub conclusion: String,
}

/// Category-grouped view of an evaluation, rebuilt per chat request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatContext {
    pub influencer_id: String,
    pub niche: String,
    pub goal: String,
    pub categories: BTreeMap<String, CategoryContext>,
    pub executive_summary: ExecutiveDecision,
}

/// Consultant-layer context attached to a single metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardContext {
    pub definition: String,
    pub importance_reason: String,
    pub performance_verdict: String,
    pub business_implication: String,
}

/// Metric-specific answer card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultantCard {
    pub metric_name: String,
    pub value: String,
    pub context: CardContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardMetric {
    pub label: String,
    pub value: String,
}

/// Category-level (or fallback) answer card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisCard {
    pub title: String,
    pub verdict: String,
    pub content: String,
    pub metrics: Vec<CardMetric>,
}

/// Presentation payload returned by the chat layer. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Card {
    #[serde(rename = "consultant_card")]
    Consultant(ConsultantCard),
    #[serde(rename = "analysis_card")]
    Analysis(AnalysisCard),
}
