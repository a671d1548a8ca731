//! Core value types for constraint records.

use std::fmt;

/// Stable handle for a node in a layout tree.
///
/// Handles are allocated monotonically and never reused, so an anchor that
/// outlives its target simply stops resolving instead of pointing elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an edge offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum EdgeAnchor {
    /// The matching edge of the parent container
    Container,
    /// A percentage of the parent's extent (0-100)
    Percent(f64),
    /// The opposite edge of a sibling
    Sibling(NodeId),
}

/// A single edge constraint: an anchor plus an offset from it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub anchor: EdgeAnchor,
    pub offset: f64,
}

impl Edge {
    /// An absolute offset from the parent edge.
    pub const fn offset(offset: f64) -> Self {
        Self {
            anchor: EdgeAnchor::Container,
            offset,
        }
    }

    /// A plain percentage of the parent's extent.
    pub const fn percent(percent: f64) -> Self {
        Self {
            anchor: EdgeAnchor::Percent(percent),
            offset: 0.0,
        }
    }

    /// A percentage of the parent's extent plus an absolute offset.
    pub const fn percent_offset(percent: f64, offset: f64) -> Self {
        Self {
            anchor: EdgeAnchor::Percent(percent),
            offset,
        }
    }

    /// An offset from a sibling's opposite edge.
    pub const fn sibling(sibling: NodeId, offset: f64) -> Self {
        Self {
            anchor: EdgeAnchor::Sibling(sibling),
            offset,
        }
    }

}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.anchor {
            EdgeAnchor::Container => write!(f, "{}", self.offset),
            EdgeAnchor::Percent(p) if self.offset == 0.0 => write!(f, "'{}%'", p),
            EdgeAnchor::Percent(p) => write!(f, "['{}%', {}]", p, self.offset),
            EdgeAnchor::Sibling(id) => write!(f, "[{}, {}]", id, self.offset),
        }
    }
}

/// A width or height value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Dimension {
    /// Fixed size in device-independent units
    Absolute(f64),
    /// Percentage of the parent's extent
    Percent(f64),
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Absolute(v) => write!(f, "{}", v),
            Dimension::Percent(p) => write!(f, "'{}%'", p),
        }
    }
}

/// The closed set of constraint attributes a record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Attribute {
    Left,
    Right,
    Top,
    Bottom,
    Width,
    Height,
    CenterX,
    CenterY,
    Baseline,
}

impl Attribute {
    /// All attributes in declaration order.
    pub const ALL: [Attribute; 9] = [
        Attribute::Left,
        Attribute::Right,
        Attribute::Top,
        Attribute::Bottom,
        Attribute::Width,
        Attribute::Height,
        Attribute::CenterX,
        Attribute::CenterY,
        Attribute::Baseline,
    ];

    /// The public attribute name, as used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Left => "left",
            Attribute::Right => "right",
            Attribute::Top => "top",
            Attribute::Bottom => "bottom",
            Attribute::Width => "width",
            Attribute::Height => "height",
            Attribute::CenterX => "centerX",
            Attribute::CenterY => "centerY",
            Attribute::Baseline => "baseline",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
