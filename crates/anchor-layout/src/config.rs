//! Stack layout configuration.
//!
//! A [`StackLayoutConfig`] is immutable once built. Containers take it from
//! [`StackOptions`], where shorthand `spacing`/`alignment` values override the
//! fields of an explicitly supplied layout.

use std::fmt;
use std::str::FromStr;

use anchor_core::ConfigError;

/// Default horizontal placement of stack children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Alignment {
    /// Pin children to the left edge
    #[default]
    Left,
    /// Pin children to the right edge
    Right,
    /// Center children on the vertical axis of the container
    CenterX,
    /// Stretch children between both edges unless they have a width
    StretchX,
}

impl Alignment {
    pub fn name(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::CenterX => "centerX",
            Alignment::StretchX => "stretchX",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Alignment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Alignment::Left),
            "right" => Ok(Alignment::Right),
            "centerX" => Ok(Alignment::CenterX),
            "stretchX" => Ok(Alignment::StretchX),
            other => Err(ConfigError::UnknownAlignment {
                value: other.to_string(),
            }),
        }
    }
}

/// Spacing and alignment of a vertical stack.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StackLayoutConfig {
    spacing: f64,
    alignment: Alignment,
}

impl StackLayoutConfig {
    /// The configuration used when nothing else is specified.
    pub const DEFAULT: StackLayoutConfig = StackLayoutConfig {
        spacing: 0.0,
        alignment: Alignment::Left,
    };

    /// Create a validated configuration.
    pub fn new(spacing: f64, alignment: Alignment) -> Result<Self, ConfigError> {
        Ok(Self {
            spacing: validate_spacing(spacing)?,
            alignment,
        })
    }

    /// Gap inserted between consecutive children.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Default horizontal placement of children.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Build a new configuration with the given fields replaced.
    pub fn merged(
        &self,
        spacing: Option<f64>,
        alignment: Option<Alignment>,
    ) -> Result<Self, ConfigError> {
        Self::new(
            spacing.unwrap_or(self.spacing),
            alignment.unwrap_or(self.alignment),
        )
    }
}

impl Default for StackLayoutConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for StackLayoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StackLayout spacing='{}' alignment='{}'",
            self.spacing, self.alignment
        )
    }
}

fn validate_spacing(spacing: f64) -> Result<f64, ConfigError> {
    if !spacing.is_finite() {
        return Err(ConfigError::NonFiniteSpacing { spacing });
    }
    if spacing < 0.0 {
        return Err(ConfigError::NegativeSpacing { spacing });
    }
    Ok(spacing)
}

/// The layout engine attached to a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Layout {
    /// Vertical stack resolved by this crate
    Stack(StackLayoutConfig),
    /// Free-form constraints, passed through to the host's engine
    Constraint,
}

impl Layout {
    pub fn name(&self) -> &'static str {
        match self {
            Layout::Stack(_) => "stack",
            Layout::Constraint => "constraint",
        }
    }

    /// The stack configuration, if this is a stack layout.
    pub fn as_stack(&self) -> Option<&StackLayoutConfig> {
        match self {
            Layout::Stack(config) => Some(config),
            Layout::Constraint => None,
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Stack(StackLayoutConfig::DEFAULT)
    }
}

/// Construction-time options of a stack container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StackOptions {
    /// Explicit layout instance
    #[cfg_attr(feature = "serde", serde(skip))]
    pub layout: Option<Layout>,
    /// Shorthand spacing, wins over `layout`
    pub spacing: Option<f64>,
    /// Shorthand alignment, wins over `layout`
    pub alignment: Option<Alignment>,
}

impl StackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit layout instance.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Set the spacing shorthand.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    /// Set the alignment shorthand.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Merge the options into a validated configuration.
    ///
    /// Fails without side effects if the layout is not a stack layout or a
    /// value is out of range.
    pub fn into_config(self) -> Result<StackLayoutConfig, ConfigError> {
        let base = match self.layout {
            None => StackLayoutConfig::DEFAULT,
            Some(Layout::Stack(config)) => config,
            Some(other) => {
                return Err(ConfigError::IncompatibleLayout {
                    layout: other.name(),
                })
            }
        };
        base.merged(self.spacing, self.alignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StackLayoutConfig::default();
        assert_eq!(config.spacing(), 0.0);
        assert_eq!(config.alignment(), Alignment::Left);
        assert_eq!(config, StackLayoutConfig::DEFAULT);
    }

    #[test]
    fn test_override_defaults() {
        let config = StackLayoutConfig::new(2.0, Alignment::Right).unwrap();
        assert_eq!(config.spacing(), 2.0);
        assert_eq!(config.alignment(), Alignment::Right);
    }

    #[test]
    fn test_invalid_spacing() {
        assert_eq!(
            StackLayoutConfig::new(-1.0, Alignment::Left),
            Err(ConfigError::NegativeSpacing { spacing: -1.0 })
        );
        assert!(matches!(
            StackLayoutConfig::new(f64::NAN, Alignment::Left),
            Err(ConfigError::NonFiniteSpacing { .. })
        ));
        assert!(StackLayoutConfig::new(f64::INFINITY, Alignment::Left).is_err());
    }

    #[test]
    fn test_alignment_parse() {
        assert_eq!("centerX".parse::<Alignment>(), Ok(Alignment::CenterX));
        assert_eq!("stretchX".parse::<Alignment>(), Ok(Alignment::StretchX));
        assert_eq!(
            "middle".parse::<Alignment>(),
            Err(ConfigError::UnknownAlignment {
                value: "middle".to_string()
            })
        );
        assert_eq!(Alignment::StretchX.to_string(), "stretchX");
    }

    #[test]
    fn test_shorthand_only() {
        let config = StackOptions::new().with_spacing(2.0).into_config().unwrap();
        assert_eq!(config.spacing(), 2.0);
        assert_eq!(config.alignment(), Alignment::Left);

        let config = StackOptions::new()
            .with_alignment(Alignment::Right)
            .into_config()
            .unwrap();
        assert_eq!(config.spacing(), 0.0);
        assert_eq!(config.alignment(), Alignment::Right);
    }

    #[test]
    fn test_shorthand_wins_over_layout() {
        let layout = Layout::Stack(StackLayoutConfig::new(8.0, Alignment::CenterX).unwrap());
        let config = StackOptions::new()
            .with_layout(layout)
            .with_spacing(4.0)
            .into_config()
            .unwrap();
        assert_eq!(config.spacing(), 4.0);
        assert_eq!(config.alignment(), Alignment::CenterX);

        let config = StackOptions::new().with_layout(layout).into_config().unwrap();
        assert_eq!(config.spacing(), 8.0);
    }

    #[test]
    fn test_constraint_layout_rejected() {
        let result = StackOptions::new()
            .with_layout(Layout::Constraint)
            .with_spacing(4.0)
            .into_config();
        assert_eq!(
            result,
            Err(ConfigError::IncompatibleLayout {
                layout: "constraint"
            })
        );
    }

    #[test]
    fn test_display_includes_alignment() {
        let config = StackLayoutConfig::new(0.0, Alignment::Right).unwrap();
        assert_eq!(config.to_string(), "StackLayout spacing='0' alignment='right'");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_from_json() {
        let options: StackOptions =
            serde_json::from_str(r#"{"spacing": 16.0, "alignment": "stretchX"}"#).unwrap();
        let config = options.into_config().unwrap();
        assert_eq!(config.spacing(), 16.0);
        assert_eq!(config.alignment(), Alignment::StretchX);

        let options: StackOptions = serde_json::from_str(r#"{"spacing": -3.0}"#).unwrap();
        assert!(options.into_config().is_err());
    }
}
