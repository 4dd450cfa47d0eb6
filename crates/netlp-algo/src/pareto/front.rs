//! Non-dominated points and the accumulated frontier.

use netlp_core::{ArcAttribute, ArcKey, NetlpError, NetlpResult, Network};
use serde::Serialize;
use std::collections::BTreeSet;

/// Slack allowed when comparing objective values of consecutive points.
const OBJECTIVE_TOLERANCE: f64 = 1e-9;

/// One (weakly) non-dominated point and a path realizing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoPoint {
    /// (primary length, secondary length)
    pub objectives: (f64, f64),
    /// Arcs of the realizing path
    pub arcs: BTreeSet<ArcKey>,
    /// The same arcs in travel order from source to sink
    pub path: Vec<ArcKey>,
}

impl ParetoPoint {
    /// Build a point from a path, summing both lengths along it.
    pub fn from_path(network: &Network, path: Vec<ArcKey>) -> Self {
        let primary = network.sum_over(&path, ArcAttribute::Length);
        let secondary = network.sum_over(&path, ArcAttribute::SecondaryLength);
        Self {
            objectives: (primary, secondary),
            arcs: path.iter().copied().collect(),
            path,
        }
    }

    #[inline]
    pub fn primary(&self) -> f64 {
        self.objectives.0
    }

    #[inline]
    pub fn secondary(&self) -> f64 {
        self.objectives.1
    }

    /// Better in both objectives.
    pub fn strictly_dominates(&self, other: &ParetoPoint) -> bool {
        self.primary() < other.primary() && self.secondary() < other.secondary()
    }

    /// At least as good in both objectives and better in one.
    pub fn dominates(&self, other: &ParetoPoint) -> bool {
        self.primary() <= other.primary()
            && self.secondary() <= other.secondary()
            && (self.primary() < other.primary() || self.secondary() < other.secondary())
    }
}

/// Points in discovery order.
///
/// The front only grows: secondary values strictly decrease and primary
/// values never decrease along it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParetoFront {
    points: Vec<ParetoPoint>,
}

impl ParetoFront {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point, rejecting one that breaks the ordering of the front.
    pub fn push(&mut self, point: ParetoPoint) -> NetlpResult<()> {
        if let Some(last) = self.points.last() {
            if point.secondary() >= last.secondary() - OBJECTIVE_TOLERANCE
                || point.primary() < last.primary() - OBJECTIVE_TOLERANCE
            {
                return Err(NetlpError::Solver(format!(
                    "point {:?} does not extend front ending at {:?}",
                    point.objectives, last.objectives
                )));
            }
        }
        self.points.push(point);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ParetoPoint] {
        &self.points
    }

    pub fn first(&self) -> Option<&ParetoPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&ParetoPoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParetoPoint> {
        self.points.iter()
    }

    /// Objective pairs in discovery order.
    pub fn objectives(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| p.objectives).collect()
    }

    /// Format a human-readable summary
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Pareto Front\n{}\n", "=".repeat(40)));
        s.push_str(&format!("Points: {}\n", self.len()));
        for (i, point) in self.points.iter().enumerate() {
            s.push_str(&format!(
                "  #{:<3} primary {:>10.2}  secondary {:>10.2}  ({} arcs)\n",
                i + 1,
                point.primary(),
                point.secondary(),
                point.path.len()
            ));
        }
        s
    }
}

impl IntoIterator for ParetoFront {
    type Item = ParetoPoint;
    type IntoIter = std::vec::IntoIter<ParetoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParetoFront {
    type Item = &'a ParetoPoint;
    type IntoIter = std::slice::Iter<'a, ParetoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(primary: f64, secondary: f64) -> ParetoPoint {
        ParetoPoint {
            objectives: (primary, secondary),
            arcs: BTreeSet::new(),
            path: Vec::new(),
        }
    }

    #[test]
    fn test_push_enforces_ordering() {
        let mut front = ParetoFront::new();
        front.push(point(3.0, 9.0)).unwrap();
        front.push(point(3.0, 7.0)).unwrap();
        front.push(point(5.0, 2.0)).unwrap();

        // secondary must strictly decrease
        assert!(front.push(point(6.0, 2.0)).is_err());
        // primary must not decrease
        assert!(front.push(point(4.0, 1.0)).is_err());

        assert_eq!(front.len(), 3);
        assert_eq!(front.objectives(), vec![(3.0, 9.0), (3.0, 7.0), (5.0, 2.0)]);
    }

    #[test]
    fn test_dominance() {
        let a = point(1.0, 1.0);
        let b = point(2.0, 2.0);
        let c = point(1.0, 2.0);

        assert!(a.strictly_dominates(&b));
        assert!(!a.strictly_dominates(&c));
        assert!(a.dominates(&c));
        assert!(!c.dominates(&a));
        assert!(!a.dominates(&a));
    }

    #[test]
    fn test_summary_lists_points() {
        let mut front = ParetoFront::new();
        front.push(point(1.0, 4.0)).unwrap();
        front.push(point(2.0, 3.0)).unwrap();

        let summary = front.summary();
        assert!(summary.contains("Points: 2"));
        assert!(summary.contains("#2"));
        assert_eq!(front.iter().count(), 2);
        assert_eq!(front.into_iter().last().map(|p| p.objectives), Some((2.0, 3.0)));
    }

    #[test]
    fn test_front_serializes_to_json() {
        let mut front = ParetoFront::new();
        front.push(point(1.0, 4.0)).unwrap();

        let json = serde_json::to_value(&front).unwrap();
        assert_eq!(json["points"][0]["objectives"], serde_json::json!([1.0, 4.0]));
        assert_eq!(json["points"][0]["path"], serde_json::json!([]));
    }
}
