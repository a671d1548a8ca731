//! Record normalization.
//!
//! Rules run in a fixed order so the same malformed record always loses the
//! same attributes:
//!
//! 1. horizontal over-determination (`centerX > right > left > width`)
//! 2. baseline targets that are not siblings
//! 3. baseline over `top`/`bottom`
//! 4. `centerX` over `left` when `centerY` is also set
//! 5. percentage edges collapse to zero
//! 6. sibling-anchored edges collapse to their absolute offset
//! 7. `centerY`, which a vertical stack cannot honor

use std::fmt;

use anchor_core::{Attribute, ConstraintRecord, EdgeAnchor, NodeId};
use smallvec::SmallVec;

/// Horizontal attributes in keep-priority order.
const HORIZONTAL_PRIORITY: [Attribute; 4] = [
    Attribute::CenterX,
    Attribute::Right,
    Attribute::Left,
    Attribute::Width,
];

/// At most this many horizontal attributes determine the axis unambiguously.
const MAX_HORIZONTAL: usize = 2;

const EDGES: [Attribute; 4] = [
    Attribute::Left,
    Attribute::Right,
    Attribute::Top,
    Attribute::Bottom,
];

/// The rule that caused an attribute to be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    HorizontalOverDetermined,
    BaselineTarget,
    BaselineOverridesOffset,
    CenterOverridesLeft,
    RelativeEdge,
    SiblingEdge,
    CenterYInStack,
}

impl Rule {
    fn reason(&self) -> &'static str {
        match self {
            Rule::HorizontalOverDetermined => {
                "left, right, centerX and width over-determine the horizontal axis"
            }
            Rule::BaselineTarget => "the baseline target is not a sibling placed ahead of it",
            Rule::BaselineOverridesOffset => "baseline takes precedence over vertical offsets",
            Rule::CenterOverridesLeft => "centerX takes precedence when centerX and centerY are set",
            Rule::RelativeEdge => "percentages are not supported, the edge collapses to zero",
            Rule::SiblingEdge => "sibling references are managed by the stack, only the offset is kept",
            Rule::CenterYInStack => "the stack controls the vertical axis",
        }
    }
}

/// A recoverable problem found while normalizing a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// The node whose record was repaired
    pub node: NodeId,
    /// The attribute that was dropped or reduced
    pub attribute: Attribute,
    /// Why it was dropped
    pub rule: Rule,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unsupported layout data on {}: dropped {} ({})",
            self.node,
            self.attribute,
            self.rule.reason()
        )
    }
}

/// A sanitized record and the repairs that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub record: ConstraintRecord,
    pub diagnostics: SmallVec<[Diagnostic; 2]>,
}

impl Normalized {
    /// Whether the input was already valid.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Repairs constraint records for children of one stack container.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer<'a> {
    siblings: Option<&'a [NodeId]>,
}

impl<'a> Normalizer<'a> {
    /// Create a normalizer without sibling context.
    ///
    /// Baseline targets are then only checked for self-reference.
    pub fn new() -> Self {
        Self { siblings: None }
    }

    /// Create a normalizer for the children of one container.
    pub fn with_siblings(siblings: &'a [NodeId]) -> Self {
        Self {
            siblings: Some(siblings),
        }
    }

    /// Sanitize a record, returning the repaired copy and one diagnostic per drop.
    pub fn normalize(&self, node: NodeId, record: &ConstraintRecord) -> Normalized {
        let mut pass = Pass {
            node,
            record: *record,
            diagnostics: SmallVec::new(),
        };

        pass.limit_horizontal();
        pass.check_baseline_target(self.siblings);
        pass.baseline_over_offsets();
        pass.center_over_left();
        pass.collapse_edges();
        pass.drop_center_y();

        Normalized {
            record: pass.record,
            diagnostics: pass.diagnostics,
        }
    }
}

struct Pass {
    node: NodeId,
    record: ConstraintRecord,
    diagnostics: SmallVec<[Diagnostic; 2]>,
}

impl Pass {
    fn drop(&mut self, attribute: Attribute, rule: Rule) {
        if self.record.clear(attribute) {
            self.diagnostics.push(Diagnostic {
                node: self.node,
                attribute,
                rule,
            });
        }
    }

    fn limit_horizontal(&mut self) {
        let excess: SmallVec<[Attribute; 4]> = HORIZONTAL_PRIORITY
            .into_iter()
            .filter(|a| self.record.is_set(*a))
            .skip(MAX_HORIZONTAL)
            .collect();
        for attribute in excess {
            self.drop(attribute, Rule::HorizontalOverDetermined);
        }
    }

    fn check_baseline_target(&mut self, siblings: Option<&[NodeId]>) {
        let Some(target) = self.record.baseline else {
            return;
        };
        let foreign = siblings.is_some_and(|s| !s.contains(&target));
        if target == self.node || foreign {
            self.drop(Attribute::Baseline, Rule::BaselineTarget);
        }
    }

    fn baseline_over_offsets(&mut self) {
        if self.record.baseline.is_some() {
            self.drop(Attribute::Top, Rule::BaselineOverridesOffset);
            self.drop(Attribute::Bottom, Rule::BaselineOverridesOffset);
        }
    }

    fn center_over_left(&mut self) {
        if self.record.center_x.is_some() && self.record.center_y.is_some() {
            self.drop(Attribute::Left, Rule::CenterOverridesLeft);
        }
    }

    /// Pin relative edges to the container; the edge itself stays set.
    fn collapse_edges(&mut self) {
        for attribute in EDGES {
            let Some(slot) = self.record.edge_mut(attribute) else {
                continue;
            };
            let Some(edge) = slot.as_mut() else {
                continue;
            };
            let rule = match edge.anchor {
                EdgeAnchor::Container => continue,
                EdgeAnchor::Percent(_) => {
                    edge.offset = 0.0;
                    Rule::RelativeEdge
                }
                EdgeAnchor::Sibling(_) => Rule::SiblingEdge,
            };
            edge.anchor = EdgeAnchor::Container;
            self.diagnostics.push(Diagnostic {
                node: self.node,
                attribute,
                rule,
            });
        }
    }

    fn drop_center_y(&mut self) {
        self.drop(Attribute::CenterY, Rule::CenterYInStack);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_core::{Dimension, Edge};
    use proptest::prelude::*;

    const NODE: NodeId = NodeId(7);

    fn attributes(normalized: &Normalized) -> Vec<(Attribute, Rule)> {
        normalized
            .diagnostics
            .iter()
            .map(|d| (d.attribute, d.rule))
            .collect()
    }

    #[test]
    fn test_valid_record_untouched() {
        let record = ConstraintRecord::new()
            .with_left(Edge::offset(10.0))
            .with_width(Dimension::Absolute(100.0))
            .with_top(Edge::offset(4.0))
            .with_height(Dimension::Percent(50.0));
        let normalized = Normalizer::new().normalize(NODE, &record);
        assert!(normalized.is_clean());
        assert_eq!(normalized.record, record);
    }

    #[test]
    fn test_left_right_width_drops_width() {
        let record = ConstraintRecord::new()
            .with_left(Edge::offset(0.0))
            .with_right(Edge::offset(0.0))
            .with_width(Dimension::Absolute(0.0));
        let normalized = Normalizer::new().normalize(NODE, &record);
        assert_eq!(
            attributes(&normalized),
            vec![(Attribute::Width, Rule::HorizontalOverDetermined)]
        );
        assert!(normalized.record.left.is_some());
        assert!(normalized.record.right.is_some());
    }

    #[test]
    fn test_center_left_right_drops_left() {
        let record = ConstraintRecord::new()
            .with_center_x(0.0)
            .with_left(Edge::offset(1.0))
            .with_right(Edge::offset(2.0));
        let normalized = Normalizer::new().normalize(NODE, &record);
        assert_eq!(
            attributes(&normalized),
            vec![(Attribute::Left, Rule::HorizontalOverDetermined)]
        );
        assert_eq!(normalized.record.right, Some(Edge::offset(2.0)));
    }

    #[test]
    fn test_baseline_wins_over_top() {
        let siblings = [NodeId(1), NODE];
        let record = ConstraintRecord::new()
            .with_baseline(NodeId(1))
            .with_top(Edge::offset(10.0));
        let normalized = Normalizer::with_siblings(&siblings).normalize(NODE, &record);
        assert_eq!(
            attributes(&normalized),
            vec![(Attribute::Top, Rule::BaselineOverridesOffset)]
        );
        assert_eq!(normalized.record.baseline, Some(NodeId(1)));
        assert!(normalized.record.top.is_none());
    }

    #[test]
    fn test_baseline_must_target_sibling() {
        let siblings = [NODE, NodeId(2)];
        let record = ConstraintRecord::new()
            .with_baseline(NodeId(99))
            .with_top(Edge::offset(3.0));
        let normalized = Normalizer::with_siblings(&siblings).normalize(NODE, &record);
        assert_eq!(
            attributes(&normalized),
            vec![(Attribute::Baseline, Rule::BaselineTarget)]
        );
        assert_eq!(normalized.record.top, Some(Edge::offset(3.0)));

        let record = ConstraintRecord::new().with_baseline(NODE);
        let normalized = Normalizer::new().normalize(NODE, &record);
        assert!(normalized.record.baseline.is_none());
    }

    #[test]
    fn test_center_x_center_y_left() {
        let record = ConstraintRecord::new()
            .with_center_x(10.0)
            .with_center_y(10.0)
            .with_left(Edge::offset(10.0));
        let normalized = Normalizer::new().normalize(NODE, &record);
        assert_eq!(
            attributes(&normalized),
            vec![
                (Attribute::Left, Rule::CenterOverridesLeft),
                (Attribute::CenterY, Rule::CenterYInStack),
            ]
        );
        assert_eq!(normalized.record, ConstraintRecord::new().with_center_x(10.0));
    }

    #[test]
    fn test_percentage_edges_collapse_to_zero() {
        let record = ConstraintRecord::new()
            .with_left(Edge::percent_offset(10.0, 0.0))
            .with_right(Edge::percent(10.0))
            .with_width(Dimension::Absolute(0.0));
        let normalized = Normalizer::new().normalize(NODE, &record);
        assert_eq!(normalized.diagnostics.len(), 3);
        assert_eq!(
            normalized.record,
            ConstraintRecord::new()
                .with_left(Edge::offset(0.0))
                .with_right(Edge::offset(0.0))
        );
    }

    #[test]
    fn test_compound_percentage_drops_offset() {
        let record = ConstraintRecord::new()
            .with_left(Edge::percent_offset(10.0, 5.0))
            .with_top(Edge::percent_offset(25.0, -8.0));
        let normalized = Normalizer::new().normalize(NODE, &record);
        assert_eq!(
            attributes(&normalized),
            vec![
                (Attribute::Left, Rule::RelativeEdge),
                (Attribute::Top, Rule::RelativeEdge),
            ]
        );
        assert_eq!(normalized.record.left, Some(Edge::offset(0.0)));
        assert_eq!(normalized.record.top, Some(Edge::offset(0.0)));
    }

    #[test]
    fn test_sibling_edges_keep_offset() {
        let record = ConstraintRecord::new().with_left(Edge::sibling(NodeId(1), 10.0));
        let normalized = Normalizer::new().normalize(NODE, &record);
        assert_eq!(
            attributes(&normalized),
            vec![(Attribute::Left, Rule::SiblingEdge)]
        );
        assert_eq!(normalized.record.left, Some(Edge::offset(10.0)));
    }

    #[test]
    fn test_diagnostic_message() {
        let diagnostic = Diagnostic {
            node: NODE,
            attribute: Attribute::CenterY,
            rule: Rule::CenterYInStack,
        };
        assert_eq!(
            diagnostic.to_string(),
            "Unsupported layout data on #7: dropped centerY (the stack controls the vertical axis)"
        );
    }

    fn edge() -> impl Strategy<Value = Option<Edge>> {
        prop_oneof![
            Just(None),
            (-50i32..50).prop_map(|o| Some(Edge::offset(o as f64))),
            (0i32..100).prop_map(|p| Some(Edge::percent(p as f64))),
            (0u64..4, -20i32..20).prop_map(|(id, o)| Some(Edge::sibling(NodeId(id), o as f64))),
        ]
    }

    fn dimension() -> impl Strategy<Value = Option<Dimension>> {
        prop_oneof![
            Just(None),
            (0i32..200).prop_map(|v| Some(Dimension::Absolute(v as f64))),
        ]
    }

    fn offset() -> impl Strategy<Value = Option<f64>> {
        prop::option::of((-20i32..20).prop_map(|v| v as f64))
    }

    prop_compose! {
        fn record()(
            left in edge(), right in edge(), top in edge(), bottom in edge(),
            width in dimension(), height in dimension(),
            center_x in offset(), center_y in offset(),
            baseline in prop::option::of((0u64..4).prop_map(NodeId)),
        ) -> ConstraintRecord {
            ConstraintRecord { left, right, top, bottom, width, height, center_x, center_y, baseline }
        }
    }

    proptest! {
        #[test]
        fn prop_normalized_records_are_stable(record in record()) {
            let siblings = [NodeId(0), NodeId(1), NodeId(2), NodeId(3), NODE];
            let normalizer = Normalizer::with_siblings(&siblings);
            let first = normalizer.normalize(NODE, &record);
            let second = normalizer.normalize(NODE, &first.record);
            prop_assert!(second.is_clean());
            prop_assert_eq!(second.record, first.record);
        }

        #[test]
        fn prop_normalization_is_deterministic(record in record()) {
            let a = Normalizer::new().normalize(NODE, &record);
            let b = Normalizer::new().normalize(NODE, &record);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_horizontal_axis_never_over_determined(record in record()) {
            let normalized = Normalizer::new().normalize(NODE, &record);
            let set = HORIZONTAL_PRIORITY
                .iter()
                .filter(|a| normalized.record.is_set(**a))
                .count();
            prop_assert!(set <= MAX_HORIZONTAL);
            prop_assert!(normalized.record.center_y.is_none());
        }
    }
}
