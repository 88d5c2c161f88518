use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::RouterConfig;
use crate::types::{Department, DepartmentScoreMap, Priority};

/// Final assignment of a report: where it goes and how urgent it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Selected departments, never empty.
    pub departments: Vec<String>,
    pub priority: Priority,
    /// The (coerced) scores the decision was made from.
    pub scores: DepartmentScoreMap,
}

impl RoutingDecision {
    /// Decision used when there is nothing to route.
    pub fn unknown() -> Self {
        Self {
            departments: vec![Department::UNKNOWN.to_string()],
            priority: Priority::Low,
            scores: DepartmentScoreMap::new(),
        }
    }
}

/// Threshold policy turning department scores into a decision.
#[derive(Debug, Clone, Default)]
pub struct Router {
    config: RouterConfig,
}

impl Router {
    pub fn new(config: RouterConfig) -> Self { Self { config } }

    #[inline] pub fn config(&self) -> &RouterConfig { &self.config }

    /// Select departments and a priority. Never fails: an empty map routes to
    /// `"Unknown"` at low priority.
    pub fn route(&self, scores: &DepartmentScoreMap) -> RoutingDecision {
        if scores.is_empty() { return RoutingDecision::unknown() }

        let coerced = scores.coerced();
        if coerced != *scores {
            warn!(?scores, "non-finite department scores coerced to 0.0");
        }

        let mut selected = coerced.iter()
            .filter(|&(_, score)| score > self.config.primary_threshold)
            .collect::<Vec<_>>();

        if selected.is_empty() {
            selected = self.fallback(&coerced);
            warn!(?selected, "no department above {}, using fallback", self.config.primary_threshold);
        }

        let max_score = selected.iter().map(|&(_, s)| s).fold(f64::NEG_INFINITY, f64::max).max(0.0);
        let priority = Priority::from_score(max_score, self.config.medium_priority, self.config.high_priority);

        RoutingDecision {
            departments: selected.into_iter().map(|(name, _)| name.to_string()).collect(),
            priority,
            scores: coerced,
        }
    }

    /// Top department, plus the runner-up when it is a near tie with a meaningful score.
    fn fallback<'a>(&self, scores: &'a DepartmentScoreMap) -> Vec<(&'a str, f64)> {
        let mut ranked = scores.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut selected = ranked.iter().copied().take(1).collect::<Vec<_>>();
        if let [(_, top), second @ (_, runner_up), ..] = ranked[..] {
            if runner_up > self.config.fallback_min_score && top - runner_up < self.config.fallback_max_gap {
                selected.push(second);
            }
        }
        selected
    }
}

/// Route with the default thresholds.
pub fn route(scores: &DepartmentScoreMap) -> RoutingDecision {
    Router::default().route(scores)
}
