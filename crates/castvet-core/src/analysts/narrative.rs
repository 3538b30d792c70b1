//! Shared narrative generator for analyst reports.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::types::AnalysisNarrative;

const HEADLINES: [&str; 4] = [
    "Performance is stabilizing vs baseline.",
    "Significant volatility detected in key metrics.",
    "Efficiency metrics are outperforming benchmarks.",
    "Engagement quality shows downward trend.",
];

const SEGMENTS: [&str; 5] = [
    "Gen Z (18-24)",
    "Tier 1 Cities",
    "Android Users",
    "New Followers",
    "Loyalists",
];

const HYPOTHESES: [&str; 4] = [
    "Content format aligns well with current algorithm preference.",
    "Posting time caused initial reach suppression.",
    "Creative fatigue likely setting in for core audience.",
    "High shareability drove viral uplift.",
];

const ACTIONS: [&str; 4] = [
    "Verify lift with a Brand Lift Study.",
    "A/B test hook variations for retention.",
    "Deep dive into negative sentiment clusters.",
    "Scale budget in top-performing geo.",
];

const NARRATIVE_CONFIDENCE: f64 = 0.85;

/// Build one analysis narrative from the caller's stream.
///
/// Drivers, hypotheses and next actions are sampled without replacement
/// (shuffle-and-take), so no narrative ever repeats an element. Callers
/// may only rely on "2 distinct items from the declared list", not on any
/// particular order.
pub fn build_analysis(rng: &mut ChaCha8Rng) -> AnalysisNarrative {
    let headline = pick(rng, &HEADLINES);

    let delta: i32 = rng.random_range(-15..=25);
    let magnitude = if delta > 0 {
        format!("+{}% vs 30d baseline", delta)
    } else {
        format!("{}% vs 30d baseline", delta)
    };

    // Each driver template binds its own segment draw before the take, so
    // the draw count stays fixed no matter which two survive.
    let drivers = vec![
        format!("Strong adoption in {} segment.", pick(rng, &SEGMENTS)),
        format!("Drop-off detected in {} cohort.", pick(rng, &SEGMENTS)),
        format!("High retention among {}.", pick(rng, &SEGMENTS)),
    ];

    AnalysisNarrative {
        headline,
        magnitude,
        drivers: take_two(rng, drivers),
        hypotheses: take_two(rng, HYPOTHESES.iter().map(|s| s.to_string()).collect()),
        next_actions: take_two(rng, ACTIONS.iter().map(|s| s.to_string()).collect()),
        confidence_score: NARRATIVE_CONFIDENCE,
    }
}

fn pick(rng: &mut ChaCha8Rng, items: &[&str]) -> String {
    items.choose(rng).copied().unwrap_or(items[0]).to_string()
}

/// Sample two distinct items via shuffle-and-take.
fn take_two(rng: &mut ChaCha8Rng, mut items: Vec<String>) -> Vec<String> {
    items.shuffle(rng);
    items.truncate(2);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeder::stream_for;

    #[test]
    fn test_narrative_is_deterministic() {
        let a = build_analysis(&mut stream_for("narrative-test"));
        let b = build_analysis(&mut stream_for("narrative-test"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_duplicates_within_one_narrative() {
        for i in 0..32 {
            let narrative = build_analysis(&mut stream_for(&format!("seed-{i}")));
            assert_eq!(narrative.drivers.len(), 2);
            assert_ne!(narrative.drivers[0], narrative.drivers[1]);
            assert_eq!(narrative.hypotheses.len(), 2);
            assert_ne!(narrative.hypotheses[0], narrative.hypotheses[1]);
            assert_eq!(narrative.next_actions.len(), 2);
            assert_ne!(narrative.next_actions[0], narrative.next_actions[1]);
        }
    }

    #[test]
    fn test_elements_come_from_declared_lists() {
        let narrative = build_analysis(&mut stream_for("list-check"));
        assert!(HEADLINES.contains(&narrative.headline.as_str()));
        for h in &narrative.hypotheses {
            assert!(HYPOTHESES.contains(&h.as_str()));
        }
        for a in &narrative.next_actions {
            assert!(ACTIONS.contains(&a.as_str()));
        }
        assert!(narrative.magnitude.ends_with("% vs 30d baseline"));
        assert_eq!(narrative.confidence_score, 0.85);
    }

    #[test]
    fn test_magnitude_stays_in_band() {
        for i in 0..64 {
            let narrative = build_analysis(&mut stream_for(&format!("band-{i}")));
            let digits: String = narrative
                .magnitude
                .chars()
                .take_while(|c| *c != '%')
                .collect();
            let delta: i32 = digits.trim_start_matches('+').parse().unwrap();
            assert!((-15..=25).contains(&delta));
        }
    }
}
