//! Tunables for the particle backdrop.
//!
//! Every field has a default matching the stock animation, so an empty JSON
//! object (or no configuration at all) reproduces it exactly.

use serde::Deserialize;

use crate::color::Color;
use crate::error::ConfigError;

pub const DEFAULT_PARTICLE_COUNT: usize = 50;
pub const DEFAULT_SCENE_URL: &str = "https://prod.spline.design/b1R9sgmJL5c7PZ3K/scene.splinecode";

/// Half-open numeric range `[min, max)`.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const RADIUS: Span = Span::new(1.0, 3.0);
    pub const OPACITY: Span = Span::new(0.2, 0.7);

    pub const fn new(min: f64, max: f64) -> Span {
        Span { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min < self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                field,
                min: self.min,
                max: self.max,
            })
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    pub particle_count: usize,
    pub palette: Vec<Color>,
    /// Each velocity component is drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    pub radius: Span,
    /// Soft band the opacity oscillates in.
    pub opacity: Span,
    /// Each opacity step is drawn from `[-max_opacity_step, max_opacity_step)`.
    pub max_opacity_step: f64,
    /// `None` leaves the 3D scene layer empty.
    pub scene_url: Option<String>,
    /// Fixed seed for reproducible particle layouts.
    pub seed: Option<u64>,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        BackgroundConfig {
            particle_count: DEFAULT_PARTICLE_COUNT,
            palette: Color::palette(),
            max_speed: 0.1,
            radius: Span::RADIUS,
            opacity: Span::OPACITY,
            max_opacity_step: 0.01,
            scene_url: Some(DEFAULT_SCENE_URL.to_owned()),
            seed: None,
        }
    }
}

impl BackgroundConfig {
    pub fn from_json(json: &str) -> Result<BackgroundConfig, ConfigError> {
        let config: BackgroundConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        for &(field, value) in &[
            ("max_speed", self.max_speed),
            ("max_opacity_step", self.max_opacity_step),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        self.radius.check("radius")?;
        self.opacity.check("opacity")?;
        if self.opacity.max > 1.0 {
            return Err(ConfigError::InvalidRange {
                field: "opacity",
                min: self.opacity.min,
                max: self.opacity.max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = BackgroundConfig::from_json("{}").unwrap();
        assert_eq!(config, BackgroundConfig::default());
        assert_eq!(config.particle_count, 50);
        assert_eq!(config.palette, vec![Color::TEAL, Color::BLUE, Color::WHITE]);
        assert_eq!(config.opacity, Span::new(0.2, 0.7));
    }

    #[test]
    fn overrides_fields() {
        let config = BackgroundConfig::from_json(
            r##"{"particle_count": 12, "palette": ["#ff0000"], "seed": 7, "scene_url": null}"##,
        )
        .unwrap();
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.palette, vec![Color::from_u32(0xff0000ff)]);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.scene_url, None);
        assert_eq!(config.radius, Span::RADIUS);
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = BackgroundConfig::from_json(r#"{"particles": 3}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_bad_palette_entry() {
        let err = BackgroundConfig::from_json(r#"{"palette": ["teal"]}"#).unwrap_err();
        assert!(err.to_string().contains("teal"));
    }

    #[test]
    fn validation_errors() {
        let zero = BackgroundConfig {
            particle_count: 0,
            ..BackgroundConfig::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::NoParticles)));

        let no_palette = BackgroundConfig {
            palette: Vec::new(),
            ..BackgroundConfig::default()
        };
        assert!(matches!(no_palette.validate(), Err(ConfigError::EmptyPalette)));

        let inverted = BackgroundConfig {
            radius: Span::new(3.0, 1.0),
            ..BackgroundConfig::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::InvalidRange { field: "radius", .. })
        ));

        let too_opaque = BackgroundConfig {
            opacity: Span::new(0.5, 1.5),
            ..BackgroundConfig::default()
        };
        assert!(too_opaque.validate().is_err());

        let negative_speed = BackgroundConfig {
            max_speed: -1.0,
            ..BackgroundConfig::default()
        };
        assert!(matches!(
            negative_speed.validate(),
            Err(ConfigError::InvalidValue { field: "max_speed", .. })
        ));
    }
}
