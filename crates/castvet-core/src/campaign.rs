//! Campaign brief generation and the curated landing set.

use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

use crate::profile::{ProfileGenerator, PLATFORMS};
use crate::types::{CampaignBrief, ContentType, InfluencerProfile, TargetAudience};

const BRAND_CATEGORIES: [&str; 4] = ["Fashion", "Tech", "Beauty", "Fitness"];
const BRAND_SUFFIXES: [&str; 4] = ["Gear", "Wear", "Tech", "Skin"];
const BUDGETS: [u64; 4] = [5_000, 15_000, 50_000, 100_000];
const GOALS: [&str; 2] = ["Awareness", "Conversion"];

/// Per-rank follower floors for the curated set, best rank first.
const CURATED_FLOORS: [u64; 3] = [1_000_000, 750_000, 500_000];

/// Generates campaign briefs from its own OS-seeded stream.
///
/// Briefs are intentionally *not* reproducible across calls; only profiles
/// are identifier-bound.
#[derive(Debug)]
pub struct CampaignGenerator {
    rng: ChaCha8Rng,
    profiles: ProfileGenerator,
}

impl CampaignGenerator {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
            profiles: ProfileGenerator::new(),
        }
    }

    /// Fixed seed variant for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            profiles: ProfileGenerator::new(),
        }
    }

    /// Draw a fresh randomized brief.
    pub fn generate_brief(&mut self) -> CampaignBrief {
        let category = pick(&mut self.rng, &BRAND_CATEGORIES);
        let budget = *BUDGETS.choose(&mut self.rng).unwrap_or(&BUDGETS[0]);
        CampaignBrief {
            id: uuid::Uuid::new_v4().to_string(),
            brand_name: format!("Nova{}", pick(&mut self.rng, &BRAND_SUFFIXES)),
            category: category.clone(),
            budget,
            goal: pick(&mut self.rng, &GOALS),
            platform_preference: vec![pick(&mut self.rng, &PLATFORMS)],
            target_audience: TargetAudience {
                age_range: "18-34".to_string(),
                interests: vec![category, "Lifestyle".to_string()],
            },
        }
    }

    /// Curated top performers per niche for the landing surface.
    ///
    /// Profiles come from the deterministic identifiers `top-{niche}-{n}`,
    /// then `followers` is floored per rank. The override happens strictly
    /// after generation: pricing and every other derived field keep the
    /// values computed from the original follower draw.
    pub fn curated_set(&self, niches: &[String]) -> BTreeMap<String, Vec<InfluencerProfile>> {
        let mut out = BTreeMap::new();
        for niche in niches {
            let key = niche.to_lowercase();
            let mut ranked = Vec::with_capacity(CURATED_FLOORS.len());
            for (rank, floor) in CURATED_FLOORS.iter().enumerate() {
                let identifier = format!("top-{}-{}", key, rank + 1);
                let mut profile = self.profiles.generate(&identifier, ContentType::All);
                profile.followers = profile.followers.max(*floor);
                ranked.push(profile);
            }
            out.insert(niche.clone(), ranked);
        }
        out
    }
}

impl Default for CampaignGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn pick(rng: &mut ChaCha8Rng, items: &[&str]) -> String {
    items.choose(rng).copied().unwrap_or(items[0]).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brief_fields_come_from_closed_sets() {
        let mut generator = CampaignGenerator::with_seed(7);
        for _ in 0..16 {
            let brief = generator.generate_brief();
            assert!(BUDGETS.contains(&brief.budget));
            assert!(BRAND_CATEGORIES.contains(&brief.category.as_str()));
            assert!(GOALS.contains(&brief.goal.as_str()));
            assert!(brief.brand_name.starts_with("Nova"));
            assert_eq!(brief.platform_preference.len(), 1);
            assert_eq!(brief.target_audience.interests[0], brief.category);
        }
    }

    #[test]
    fn test_curated_set_applies_rank_floors() {
        let generator = CampaignGenerator::with_seed(7);
        let set = generator.curated_set(&["Tech".to_string(), "Food".to_string()]);
        assert_eq!(set.len(), 2);
        for ranked in set.values() {
            assert_eq!(ranked.len(), 3);
            for (rank, profile) in ranked.iter().enumerate() {
                assert!(profile.followers >= CURATED_FLOORS[rank]);
            }
        }
    }

    #[test]
    fn test_curated_override_leaves_other_fields_alone() {
        let generator = CampaignGenerator::with_seed(7);
        let set = generator.curated_set(&["Tech".to_string()]);
        let curated = &set["Tech"][0];

        // Same identifier regenerated without the override.
        let raw = ProfileGenerator::new().generate("top-tech-1", ContentType::All);
        assert_eq!(curated.handle, raw.handle);
        assert_eq!(curated.niche, raw.niche);
        assert_eq!(curated.pricing, raw.pricing);
        assert_eq!(curated.detailed_metrics, raw.detailed_metrics);
        assert!(curated.followers >= raw.followers);
    }
}
