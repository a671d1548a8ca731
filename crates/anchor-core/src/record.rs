//! The per-child declarative constraint record.
//!
//! Records are plain data: setters never validate. Conflicting combinations
//! are allowed to exist until the normalizer sanitizes them at flush time.

use crate::types::{Attribute, Dimension, Edge, NodeId};

/// Declarative positioning attributes of a single child.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ConstraintRecord {
    pub left: Option<Edge>,
    pub right: Option<Edge>,
    pub top: Option<Edge>,
    pub bottom: Option<Edge>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    /// Offset of the horizontal center from the parent's center axis
    pub center_x: Option<f64>,
    /// Offset of the vertical center from the parent's center axis
    pub center_y: Option<f64>,
    /// Sibling whose text baseline this child aligns to
    pub baseline: Option<NodeId>,
}

impl ConstraintRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the left edge.
    pub fn with_left(mut self, left: Edge) -> Self {
        self.left = Some(left);
        self
    }

    /// Set the right edge.
    pub fn with_right(mut self, right: Edge) -> Self {
        self.right = Some(right);
        self
    }

    /// Set the top edge.
    pub fn with_top(mut self, top: Edge) -> Self {
        self.top = Some(top);
        self
    }

    /// Set the bottom edge.
    pub fn with_bottom(mut self, bottom: Edge) -> Self {
        self.bottom = Some(bottom);
        self
    }

    /// Set the width.
    pub fn with_width(mut self, width: Dimension) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the height.
    pub fn with_height(mut self, height: Dimension) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the horizontal center offset.
    pub fn with_center_x(mut self, offset: f64) -> Self {
        self.center_x = Some(offset);
        self
    }

    /// Set the vertical center offset.
    pub fn with_center_y(mut self, offset: f64) -> Self {
        self.center_y = Some(offset);
        self
    }

    /// Align the text baseline with a sibling.
    pub fn with_baseline(mut self, sibling: NodeId) -> Self {
        self.baseline = Some(sibling);
        self
    }

    /// Fill the parent horizontally (`left: 0, right: 0`).
    pub fn stretch_x(self) -> Self {
        self.with_left(Edge::offset(0.0)).with_right(Edge::offset(0.0))
    }

    /// Fill the available space vertically (`top: 0, bottom: 0`).
    pub fn stretch_y(self) -> Self {
        self.with_top(Edge::offset(0.0)).with_bottom(Edge::offset(0.0))
    }

    /// Stretch on both axes.
    pub fn stretch(self) -> Self {
        self.stretch_x().stretch_y()
    }

    /// Check whether an attribute is set.
    pub fn is_set(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::Left => self.left.is_some(),
            Attribute::Right => self.right.is_some(),
            Attribute::Top => self.top.is_some(),
            Attribute::Bottom => self.bottom.is_some(),
            Attribute::Width => self.width.is_some(),
            Attribute::Height => self.height.is_some(),
            Attribute::CenterX => self.center_x.is_some(),
            Attribute::CenterY => self.center_y.is_some(),
            Attribute::Baseline => self.baseline.is_some(),
        }
    }

    /// Unset an attribute. Returns true if it was set.
    pub fn clear(&mut self, attribute: Attribute) -> bool {
        let was_set = self.is_set(attribute);
        match attribute {
            Attribute::Left => self.left = None,
            Attribute::Right => self.right = None,
            Attribute::Top => self.top = None,
            Attribute::Bottom => self.bottom = None,
            Attribute::Width => self.width = None,
            Attribute::Height => self.height = None,
            Attribute::CenterX => self.center_x = None,
            Attribute::CenterY => self.center_y = None,
            Attribute::Baseline => self.baseline = None,
        }
        was_set
    }

    /// Iterate over the attributes that are currently set.
    pub fn set_attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        Attribute::ALL.into_iter().filter(|a| self.is_set(*a))
    }

    /// Whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.set_attributes().next().is_none()
    }

    /// Mutable slot for one of the four edge attributes.
    pub fn edge_mut(&mut self, attribute: Attribute) -> Option<&mut Option<Edge>> {
        match attribute {
            Attribute::Left => Some(&mut self.left),
            Attribute::Right => Some(&mut self.right),
            Attribute::Top => Some(&mut self.top),
            Attribute::Bottom => Some(&mut self.bottom),
            _ => None,
        }
    }

    /// Absolute offset of the top edge, zero if unset.
    pub fn top_offset(&self) -> f64 {
        self.top.map_or(0.0, |e| e.offset)
    }

    /// Absolute offset of the bottom edge, zero if unset.
    pub fn bottom_offset(&self) -> f64 {
        self.bottom.map_or(0.0, |e| e.offset)
    }

    /// Whether any of `left`, `right`, or `centerX` pins the horizontal position.
    pub fn has_horizontal_position(&self) -> bool {
        self.left.is_some() || self.right.is_some() || self.center_x.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = ConstraintRecord::new()
            .with_left(Edge::offset(10.0))
            .with_width(Dimension::Absolute(100.0));

        assert!(record.is_set(Attribute::Left));
        assert!(record.is_set(Attribute::Width));
        assert!(!record.is_set(Attribute::Right));
        assert_eq!(
            record.set_attributes().collect::<Vec<_>>(),
            vec![Attribute::Left, Attribute::Width]
        );
    }

    #[test]
    fn test_record_clear() {
        let mut record = ConstraintRecord::new().with_baseline(NodeId(1));
        assert!(record.clear(Attribute::Baseline));
        assert!(!record.clear(Attribute::Baseline));
        assert!(record.is_empty());
    }

    #[test]
    fn test_stretch_shorthands() {
        let record = ConstraintRecord::new().stretch_y();
        assert_eq!(record.top, Some(Edge::offset(0.0)));
        assert_eq!(record.bottom, Some(Edge::offset(0.0)));
        assert!(record.left.is_none());

        let record = ConstraintRecord::new().stretch();
        assert_eq!(record.set_attributes().count(), 4);
    }

    #[test]
    fn test_offsets_default_to_zero() {
        let record = ConstraintRecord::new().with_top(Edge::offset(12.0));
        assert_eq!(record.top_offset(), 12.0);
        assert_eq!(record.bottom_offset(), 0.0);
    }

    #[test]
    fn test_edge_access() {
        let mut record = ConstraintRecord::new().with_right(Edge::offset(4.0));
        assert!(record.edge_mut(Attribute::Width).is_none());
        if let Some(slot) = record.edge_mut(Attribute::Left) {
            *slot = Some(Edge::offset(1.0));
        }
        assert!(record.has_horizontal_position());
        assert_eq!(record.left, Some(Edge::offset(1.0)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_record_deserialize() {
        let record: ConstraintRecord = serde_json::from_str(
            r#"{"left": {"anchor": "container", "offset": 10.0}, "centerX": 5.0}"#,
        )
        .unwrap();
        assert_eq!(record.left, Some(Edge::offset(10.0)));
        assert_eq!(record.center_x, Some(5.0));
        assert!(record.top.is_none());
    }
}
