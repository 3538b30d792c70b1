//! System prompts for the generation backends.
//!
//! Each prompt opens with a fixed role declaration ("You are the
//! Performance Analyst" etc). The simulator backend dispatches on that
//! opening line, so it is part of the prompt contract, not flavor text.

use std::collections::BTreeMap;
use std::path::Path;

/// Performance Analyst system prompt.
pub const PERFORMANCE_ANALYST_PROMPT: &str = r#"You are the Performance Analyst.

Your job is to project the execution-level funnel for a proposed influencer
collaboration: reach, retention, saves and direct-response conversions.

## Rules
1. Ground every projection in the provided influencer metrics and campaign brief.
2. Output the full KPI list; never omit a KPI because it looks weak.
3. Normalize every score to a 0-100 band and state a confidence in [0, 1].
4. Do not comment on brand safety or audience authenticity; other analysts own those.

## Output Format (JSON)
{
  "role": "Performance Analyst",
  "kpis": [
    {
      "kpi_id": "string",
      "value": "raw or formatted value",
      "score_normalized": 0.0-100.0,
      "explanation": "one sentence",
      "confidence_score": 0.0-1.0
    }
  ],
  "analysis": { "headline": "...", "magnitude": "...", "drivers": [], "hypotheses": [], "next_actions": [], "confidence_score": 0.0-1.0 }
}
"#;

/// Risk Analyst system prompt.
pub const RISK_ANALYST_PROMPT: &str = r#"You are the Risk Analyst.

Your job is to assess brand safety, controversy exposure and audience
authenticity for a proposed influencer collaboration.

## Rules
1. Report probabilities as percentages; higher risk means a lower normalized score.
2. Flag controversy history even when the current content looks clean.
3. Do not project reach or revenue; the Performance Analyst owns those.

## Output Format (JSON)
Same KPI schema as all analysts: kpi_id, value, score_normalized,
explanation, confidence_score, plus an analysis narrative.
"#;

/// Audience Strategist system prompt.
pub const AUDIENCE_STRATEGIST_PROMPT: &str = r#"You are the Audience Strategist.

Your job is to evaluate engagement quality, audience credibility and
brand-audience fit for a proposed influencer collaboration.

## Rules
1. Distinguish engagement depth from engagement volume; depth wins.
2. For long-form creators report loyalty; otherwise report credibility.
3. Surface fatigue signals when posting cadence risks burning the audience.

## Output Format (JSON)
Same KPI schema as all analysts: kpi_id, value, score_normalized,
explanation, confidence_score, plus an analysis narrative.
"#;

/// Executive Decision Engine system prompt.
pub const EXECUTIVE_DECIDER_PROMPT: &str = r#"You are the Executive Decision Engine.

You receive the three analyst KPI sets and synthesize a final recommendation.

## Rules
1. The decision is one of GO, TEST, NO-GO.
2. The risk level is one of LOW, MEDIUM, HIGH.
3. A HIGH risk level always forces NO-GO. No exception.
4. Provide an ROI range (min, max, confidence) and exactly three top flags.

## Output Format (JSON)
{ "decision": "...", "roi_prediction": { "min": 0.0, "max": 0.0, "confidence": 0.0 },
  "risk_level": "...", "executive_summary": "...", "top_flags": ["...", "...", "..."] }
"#;

/// Named prompt set handed to a backend.
///
/// Keys are the stable prompt names (`performance_analyst`, `risk_analyst`,
/// `audience_strategist`, `executive_decider`).
#[derive(Debug, Clone)]
pub struct PromptStore {
    prompts: BTreeMap<String, String>,
}

impl PromptStore {
    /// The compiled-in prompt set.
    pub fn builtin() -> Self {
        let mut prompts = BTreeMap::new();
        prompts.insert("performance_analyst".to_string(), PERFORMANCE_ANALYST_PROMPT.to_string());
        prompts.insert("risk_analyst".to_string(), RISK_ANALYST_PROMPT.to_string());
        prompts.insert("audience_strategist".to_string(), AUDIENCE_STRATEGIST_PROMPT.to_string());
        prompts.insert("executive_decider".to_string(), EXECUTIVE_DECIDER_PROMPT.to_string());
        Self { prompts }
    }

    /// Load prompt overrides from a directory of `.txt` files.
    ///
    /// The file stem becomes the prompt name; files that fail to read are
    /// skipped with a warning. Names not present in the directory keep the
    /// builtin prompt.
    pub fn from_dir(dir: &Path) -> std::io::Result<Self> {
        let mut store = Self::builtin();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    store.prompts.insert(name.to_string(), text);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable prompt file");
                }
            }
        }
        Ok(store)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.prompts.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prompts.keys().map(String::as_str)
    }
}

impl Default for PromptStore {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_store_has_all_four_prompts() {
        let store = PromptStore::builtin();
        for name in [
            "performance_analyst",
            "risk_analyst",
            "audience_strategist",
            "executive_decider",
        ] {
            assert!(store.get(name).is_some(), "{name}");
        }
    }

    #[test]
    fn test_prompts_open_with_role_declaration() {
        assert!(PERFORMANCE_ANALYST_PROMPT.starts_with("You are the Performance Analyst"));
        assert!(RISK_ANALYST_PROMPT.starts_with("You are the Risk Analyst"));
        assert!(AUDIENCE_STRATEGIST_PROMPT.starts_with("You are the Audience Strategist"));
        assert!(EXECUTIVE_DECIDER_PROMPT.starts_with("You are the Executive Decision Engine"));
    }

    #[test]
    fn test_all_prompts_describe_json_output() {
        let store = PromptStore::builtin();
        for name in store.names().collect::<Vec<_>>() {
            assert!(store.get(name).unwrap().contains("Output Format (JSON)"), "{name}");
        }
    }
}
