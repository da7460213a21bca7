//! Step events.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of decision a step records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Greedy: an unvisited city considered from the current city.
    CandidateEdge,
    /// Greedy: the nearest candidate was chosen.
    Decision,
    /// Greedy: the chosen edge was committed to the route.
    EdgeAdded,
    /// Greedy: the return edge to the start city was added.
    RouteClosed,
    /// Greedy / brute force: terminal step carrying the result.
    FinalResult,
    /// 2-opt: a segment reversal is being tested.
    Compare,
    /// 2-opt: a segment reversal was accepted.
    Swap,
    /// 2-opt: terminal step carrying the locally optimal route.
    Final,
    /// Brute force: a permutation was evaluated.
    PermutationCheck,
    /// Brute force: a new best permutation was found.
    BestFound,
}

impl StepKind {
    /// Returns `true` for the kinds that end a trace.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepKind::FinalResult | StepKind::Final)
    }
}

/// One recorded decision.
///
/// # Examples
///
/// ```
/// use tsp_stepper::trace::{Step, StepKind};
///
/// let step = Step::new(StepKind::EdgeAdded, "Travel from 0 to 2")
///     .with_edge(0, 2)
///     .with_meta("distance", 4.5);
/// assert_eq!(step.from_city, Some(0));
/// assert_eq!(step.metadata["distance"], 4.5);
/// assert!(!step.kind.is_terminal());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// What kind of decision this is.
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Source city of the edge under consideration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_city: Option<usize>,
    /// Target city of the edge under consideration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_city: Option<usize>,
    /// Algorithm-specific values (distances, indices, counters).
    pub metadata: BTreeMap<String, Value>,
    /// Human-readable description.
    pub explanation: String,
    /// Closed route to display with this step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<usize>>,
    /// Length of `path`, or the distance this step is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Step {
    /// Creates a step with only a kind and an explanation.
    pub fn new(kind: StepKind, explanation: impl Into<String>) -> Self {
        Self {
            kind,
            from_city: None,
            to_city: None,
            metadata: BTreeMap::new(),
            explanation: explanation.into(),
            path: None,
            distance: None,
        }
    }

    /// Sets the edge this step is about.
    pub fn with_edge(mut self, from: usize, to: usize) -> Self {
        self.from_city = Some(from);
        self.to_city = Some(to);
        self
    }

    /// Sets the route to display.
    pub fn with_path(mut self, path: Vec<usize>) -> Self {
        self.path = Some(path);
        self
    }

    /// Sets the distance.
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Adds a metadata entry.
    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Returns `true` if this step ends its trace.
    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_kinds() {
        assert!(StepKind::FinalResult.is_terminal());
        assert!(StepKind::Final.is_terminal());
        assert!(!StepKind::Swap.is_terminal());
        assert!(!StepKind::BestFound.is_terminal());
    }

    #[test]
    fn test_serialized_shape() {
        let step = Step::new(StepKind::PermutationCheck, "check")
            .with_path(vec![0, 1, 0])
            .with_distance(2.0)
            .with_meta("checked", 1usize);
        let json = serde_json::to_value(&step).expect("serializable");
        assert_eq!(json["type"], "permutation_check");
        assert_eq!(json["path"], serde_json::json!([0, 1, 0]));
        assert_eq!(json["metadata"]["checked"], 1);
        assert!(json.get("from_city").is_none());
    }
}
