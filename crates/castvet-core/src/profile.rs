//! Deterministic profile generation.
//!
//! One seeded stream per identifier drives every draw. The draw sequence
//! is fixed and must not be reordered: the content-type selector changes
//! uniform-range *endpoints* only, never the number or order of draws, so
//! niche, platform and followers are identical for the same identifier
//! across content types.

use rand::seq::IndexedRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp};

use crate::seeder::stream_for;
use crate::types::{
    AudienceCredibility, BrandReadiness, ConsistencyLoyalty, ContentType, DetailedMetrics,
    EngagementQuality, GrowthMomentum, InfluencerProfile, IntentConversion, Pricing,
    RoiForecasting,
};

/// Closed niche set. Draw order over this list is part of the stream contract.
pub const NICHES: [&str; 7] = [
    "Tech", "Beauty", "Fitness", "Gaming", "Fashion", "Food", "Travel",
];

/// Closed platform set.
pub const PLATFORMS: [&str; 3] = ["Instagram", "TikTok", "YouTube"];

const FOLLOWER_MEAN: f64 = 500_000.0;
const FOLLOWER_FLOOR: u64 = 10_000;
const FOLLOWER_CAP: u64 = 10_000_000;

const HANDLE_PREFIXES: [&str; 5] = ["the", "real", "official", "daily", "just"];
const HANDLE_SUFFIXES: [&str; 5] = ["life", "world", "vlogs", "reviews", "gram"];

/// Generates reproducible influencer profiles from opaque identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileGenerator;

impl ProfileGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate the full profile for `identifier`.
    ///
    /// Infallible: any string is a legal identifier, and content types
    /// outside the closed set have already collapsed to [`ContentType::All`]
    /// at parse time.
    pub fn generate(&self, identifier: &str, content_type: ContentType) -> InfluencerProfile {
        let mut rng = stream_for(identifier);

        // Draws 1-4: identity and the latent quality trait. These come
        // first so they are content-type invariant.
        let niche = choose(&mut rng, &NICHES);
        let platform = choose(&mut rng, &PLATFORMS);
        let followers = draw_followers(&mut rng);
        let quality_factor = rng.random_range(0.6..1.0);

        // Draws 5-7: content-sensitive engagement block.
        let (completion_lo, completion_hi) = completion_range(content_type);
        let completion_frac = rng.random_range(completion_lo..completion_hi) * quality_factor;

        let (duration_lo, duration_hi) = duration_range(content_type);
        let duration_secs = rng.random_range(duration_lo..duration_hi) * quality_factor;

        let like_to_view = rng.random_range(0.02..0.09) * quality_factor;
        // Comment and share ratios are fixed fractions of like-to-view,
        // not independent draws.
        let comment_to_view = like_to_view * 0.12;
        let share_to_view = like_to_view * 0.08;

        let comment_sentiment = (rng.random_range(55.0..95.0) * quality_factor).round() as u32;

        let engagement_quality = EngagementQuality {
            completion_rate: clamp_pct(round1(completion_frac * 100.0)),
            avg_view_duration: format!("{}s", duration_secs as u64),
            like_to_view_ratio: round4(like_to_view),
            comment_to_view_ratio: round4(comment_to_view),
            share_to_view_ratio: round4(share_to_view),
            comment_sentiment_quality: comment_sentiment.min(100),
        };

        // Remaining category draws, fixed order: credibility, intent,
        // loyalty, brand, growth, roi.
        let bot_follower_pct = round1(rng.random_range(2.0..30.0));
        let audience_credibility = AudienceCredibility {
            audience_quality_score: clamp_pct(round1((100.0 - bot_follower_pct) * quality_factor)),
            bot_follower_pct,
            real_engagement_pct: round1(100.0 - bot_follower_pct),
        };

        let intent_conversion = IntentConversion {
            save_rate: round2(rng.random_range(1.0..6.0) * quality_factor),
            click_through_rate: round2(rng.random_range(0.5..3.0) * quality_factor),
            promo_redemption_rate: round4(rng.random_range(0.005..0.035) * quality_factor),
        };

        let consistency_loyalty = ConsistencyLoyalty {
            retention_score: ((rng.random_range(50.0..95.0) * quality_factor).round() as u32)
                .min(100),
            posting_consistency: clamp_pct(round1(rng.random_range(40.0..98.0))),
            loyal_viewer_pct: clamp_pct(round1(rng.random_range(10.0..60.0) * quality_factor)),
        };

        let brand_readiness = BrandReadiness {
            brand_safety_score: ((rng.random_range(55.0..98.0) * quality_factor).round() as u32)
                .min(100),
            content_quality_score: ((rng.random_range(50.0..95.0) * quality_factor).round()
                as u32)
                .min(100),
            controversy_history: rng.random_range(0..4),
        };

        let growth_momentum = GrowthMomentum {
            follower_growth_rate_90d: round1(rng.random_range(-2.0..15.0) * quality_factor),
            predicted_growth_6m: (followers as f64
                * rng.random_range(0.01..0.25)
                * quality_factor) as u64,
            viral_post_frequency: round1(rng.random_range(0.0..3.0)),
        };

        let roi_forecasting = RoiForecasting {
            predicted_cpa: round2(rng.random_range(2.0..25.0) / quality_factor),
            predicted_roas: round2(rng.random_range(1.0..4.5) * quality_factor),
            cost_efficiency_score: ((rng.random_range(40.0..95.0) * quality_factor).round()
                as u32)
                .min(100),
        };

        // Handle draws come last so identity draws stay aligned.
        let handle = generate_handle(&mut rng, niche);

        InfluencerProfile {
            id: identifier.to_string(),
            handle,
            platform: platform.to_string(),
            niche: niche.to_string(),
            followers,
            pricing: compute_pricing(followers, niche, platform),
            detailed_metrics: DetailedMetrics {
                engagement_quality,
                audience_credibility,
                intent_conversion,
                consistency_loyalty,
                brand_readiness,
                growth_momentum,
                roi_forecasting,
            },
            content_type_context: content_type,
        }
    }
}

fn choose<'a>(rng: &mut ChaCha8Rng, items: &'a [&'a str]) -> &'a str {
    // The slices are non-empty consts, so choose never returns None.
    items.choose(rng).copied().unwrap_or(items[0])
}

fn draw_followers(rng: &mut ChaCha8Rng) -> u64 {
    let exp = Exp::new(1.0 / FOLLOWER_MEAN).expect("exponential rate is a positive constant");
    let draw = exp.sample(rng) as u64;
    (draw + FOLLOWER_FLOOR).min(FOLLOWER_CAP)
}

/// Completion-rate fraction range per content type, before quality scaling.
fn completion_range(content_type: ContentType) -> (f64, f64) {
    match content_type {
        ContentType::Short => (0.45, 0.75),
        ContentType::Long => (0.20, 0.45),
        ContentType::All => (0.30, 0.60),
    }
}

/// View-duration seconds range per content type, before quality scaling.
/// Short stays under 50s even at full quality so the formatted value lands
/// in [15, 50).
fn duration_range(content_type: ContentType) -> (f64, f64) {
    match content_type {
        ContentType::Short => (25.0, 50.0),
        ContentType::Long => (180.0, 480.0),
        ContentType::All => (60.0, 240.0),
    }
}

fn generate_handle(rng: &mut ChaCha8Rng, niche: &str) -> String {
    let prefix = choose(rng, &HANDLE_PREFIXES);
    let suffix = choose(rng, &HANDLE_SUFFIXES);
    let n: u32 = rng.random_range(1..=99);
    format!("{}_{}_{}_{}", prefix, niche.to_lowercase(), suffix, n)
}

/// Pricing is pure arithmetic over followers and multipliers: no draws.
fn compute_pricing(followers: u64, niche: &str, platform: &str) -> Pricing {
    let mut cpm = 10.0;
    if niche == "Tech" || niche == "Finance" {
        cpm *= 1.5;
    }
    if platform == "YouTube" {
        cpm *= 2.0;
    }
    let post = ((followers as f64 / 1000.0) * cpm / 10.0).round() * 10.0;
    Pricing {
        post,
        story: post * 0.4,
        reel: post * 1.2,
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

fn clamp_pct(x: f64) -> f64 {
    x.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_identifier_same_profile() {
        let generator = ProfileGenerator::new();
        let a = generator.generate("demo-1", ContentType::Short);
        let b = generator.generate("demo-1", ContentType::Short);
        assert_eq!(a, b);
        // Byte-identical once serialized, too.
        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
    }

    #[test]
    fn test_content_type_does_not_move_identity_fields() {
        let generator = ProfileGenerator::new();
        let short = generator.generate("demo-1", ContentType::Short);
        let long = generator.generate("demo-1", ContentType::Long);
        let all = generator.generate("demo-1", ContentType::All);

        assert_eq!(short.niche, long.niche);
        assert_eq!(short.platform, long.platform);
        assert_eq!(short.followers, long.followers);
        assert_eq!(all.niche, short.niche);
        assert_eq!(all.followers, short.followers);
        assert_eq!(short.handle, long.handle);
    }

    #[test]
    fn test_short_duration_band() {
        let generator = ProfileGenerator::new();
        for id in ["demo-1", "demo-2", "top-tech-1", "x"] {
            let profile = generator.generate(id, ContentType::Short);
            let raw = &profile.detailed_metrics.engagement_quality.avg_view_duration;
            let secs: u64 = raw
                .strip_suffix('s')
                .expect("duration ends in 's'")
                .parse()
                .expect("duration prefix is an integer");
            assert!((15..50).contains(&secs), "{id}: {raw}");
        }
    }

    #[test]
    fn test_derived_ratios_are_fractions_of_like_to_view() {
        let eq = ProfileGenerator::new()
            .generate("demo-1", ContentType::All)
            .detailed_metrics
            .engagement_quality;
        assert!(eq.comment_to_view_ratio < eq.like_to_view_ratio);
        assert!(eq.share_to_view_ratio < eq.comment_to_view_ratio);
    }

    #[test]
    fn test_pricing_multipliers() {
        // Pricing is deterministic arithmetic, so check it directly.
        let base = compute_pricing(100_000, "Food", "Instagram");
        let tech = compute_pricing(100_000, "Tech", "Instagram");
        let youtube = compute_pricing(100_000, "Food", "YouTube");
        assert_eq!(base.post, 1000.0);
        assert_eq!(tech.post, 1500.0);
        assert_eq!(youtube.post, 2000.0);
        assert_eq!(base.reel, base.post * 1.2);
        assert_eq!(base.story, base.post * 0.4);
    }

    proptest! {
        #[test]
        fn prop_profiles_are_deterministic(id in ".{0,40}") {
            let generator = ProfileGenerator::new();
            let a = generator.generate(&id, ContentType::All);
            let b = generator.generate(&id, ContentType::All);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_bounds_hold(id in "[a-z0-9-]{1,24}") {
            let generator = ProfileGenerator::new();
            for ct in [ContentType::All, ContentType::Short, ContentType::Long] {
                let p = generator.generate(&id, ct);
                prop_assert!((10_000..=10_000_000).contains(&p.followers));
                let m = &p.detailed_metrics;
                prop_assert!((0.0..=100.0).contains(&m.engagement_quality.completion_rate));
                prop_assert!(m.engagement_quality.like_to_view_ratio >= 0.0);
                prop_assert!((0.0..=100.0).contains(&m.audience_credibility.audience_quality_score));
                prop_assert!(m.brand_readiness.brand_safety_score <= 100);
                prop_assert!(m.consistency_loyalty.retention_score <= 100);
                prop_assert!(m.roi_forecasting.predicted_cpa >= 0.0);
            }
        }
    }
}
