//! Final constraint expressions handed back to the rendering host.

use std::fmt;

use crate::record::ConstraintRecord;
use crate::types::{Dimension, Edge, NodeId};

/// A fully resolved constraint set for one child.
///
/// Unlike a [`ConstraintRecord`], sibling anchors here are produced by the
/// resolver and are always valid references within the same container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ResolvedConstraints {
    pub left: Option<Edge>,
    pub right: Option<Edge>,
    pub top: Option<Edge>,
    pub bottom: Option<Edge>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub center_x: Option<f64>,
    pub center_y: Option<f64>,
    pub baseline: Option<NodeId>,
}

impl ResolvedConstraints {
    /// Create an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a record's attributes over unchanged.
    pub fn from_record(record: &ConstraintRecord) -> Self {
        Self {
            left: record.left,
            right: record.right,
            top: record.top,
            bottom: record.bottom,
            width: record.width,
            height: record.height,
            center_x: record.center_x,
            center_y: record.center_y,
            baseline: record.baseline,
        }
    }

    pub fn with_left(mut self, left: Edge) -> Self {
        self.left = Some(left);
        self
    }

    pub fn with_right(mut self, right: Edge) -> Self {
        self.right = Some(right);
        self
    }

    pub fn with_top(mut self, top: Edge) -> Self {
        self.top = Some(top);
        self
    }

    pub fn with_bottom(mut self, bottom: Edge) -> Self {
        self.bottom = Some(bottom);
        self
    }

    pub fn with_width(mut self, width: Dimension) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: Dimension) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_center_x(mut self, offset: f64) -> Self {
        self.center_x = Some(offset);
        self
    }

    pub fn with_baseline(mut self, sibling: NodeId) -> Self {
        self.baseline = Some(sibling);
        self
    }
}

impl fmt::Display for ResolvedConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(top) = self.top {
            parts.push(format!("top: {}", top));
        }
        if let Some(bottom) = self.bottom {
            parts.push(format!("bottom: {}", bottom));
        }
        if let Some(baseline) = self.baseline {
            parts.push(format!("baseline: {}", baseline));
        }
        if let Some(center_y) = self.center_y {
            parts.push(format!("centerY: {}", center_y));
        }
        if let Some(left) = self.left {
            parts.push(format!("left: {}", left));
        }
        if let Some(right) = self.right {
            parts.push(format!("right: {}", right));
        }
        if let Some(center_x) = self.center_x {
            parts.push(format!("centerX: {}", center_x));
        }
        if let Some(width) = self.width {
            parts.push(format!("width: {}", width));
        }
        if let Some(height) = self.height {
            parts.push(format!("height: {}", height));
        }
        write!(f, "{{{}}}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_compact_form() {
        let resolved = ResolvedConstraints::new()
            .with_top(Edge::sibling(NodeId(3), 16.0))
            .with_left(Edge::offset(0.0))
            .with_width(Dimension::Absolute(100.0));
        assert_eq!(resolved.to_string(), "{top: [#3, 16], left: 0, width: 100}");
        assert_eq!(ResolvedConstraints::new().to_string(), "{}");
    }

    #[test]
    fn test_from_record_copies_everything() {
        let record = ConstraintRecord::new()
            .with_left(Edge::percent(10.0))
            .with_center_y(4.0)
            .with_baseline(NodeId(9));
        let resolved = ResolvedConstraints::from_record(&record);
        assert_eq!(resolved.left, Some(Edge::percent(10.0)));
        assert_eq!(resolved.center_y, Some(4.0));
        assert_eq!(resolved.baseline, Some(NodeId(9)));
    }
}
