//! Particle animator configuration. Every field has a default, so a partial
//! JSON object from the page (camelCase keys) is enough.

use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Bounds in ascending order, so a swapped config still samples.
    pub fn ordered(&self) -> (f64, f64) {
        if self.min <= self.max { (self.min, self.max) } else { (self.max, self.min) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleOptions {
    pub particle_count: usize,
    pub particle_size: Range,
    /// Only `max` drives motion: each axis samples `[-max/2, max/2]`.
    pub particle_speed: Range,
    pub particle_opacity: Range,
    /// Explicit `#rrggbb`; when absent the theme's `--secondary-color` is used.
    pub color: Option<String>,
    pub connection_distance: f64,
    pub show_connections: bool,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            particle_count: 5,
            particle_size: Range::new(1.0, 3.0),
            particle_speed: Range::new(0.2, 0.3),
            particle_opacity: Range::new(0.1, 0.3),
            color: None,
            connection_distance: 1.0,
            show_connections: false,
        }
    }
}

impl ParticleOptions {
    /// Preset used for the decorative grey page sections.
    pub fn section_preset() -> Self {
        Self {
            particle_count: 40,
            particle_size: Range::new(1.0, 4.0),
            particle_speed: Range::new(0.2, 1.0),
            particle_opacity: Range::new(0.1, 0.4),
            connection_distance: 120.0,
            ..Self::default()
        }
    }

    /// Parse page-supplied JSON over `base`. Missing or malformed input keeps
    /// `base` and logs a warning for the malformed case.
    pub fn from_json_or(json: Option<&str>, base: ParticleOptions) -> ParticleOptions {
        let Some(text) = json.map(str::trim).filter(|t| !t.is_empty()) else {
            return base;
        };
        // Overlay onto `base` rather than onto the class defaults.
        let mut merged = match serde_json::to_value(&base) {
            Ok(v) => v,
            Err(_) => return base,
        };
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(serde_json::Value::Object(overrides)) => {
                if let serde_json::Value::Object(target) = &mut merged {
                    target.extend(overrides);
                }
            }
            Ok(_) => {
                log::warn!("particle options must be a JSON object; using defaults");
                return base;
            }
            Err(e) => {
                log::warn!("invalid particle options ({e}); using defaults");
                return base;
            }
        }
        serde_json::from_value(merged).unwrap_or_else(|e| {
            log::warn!("invalid particle options ({e}); using defaults");
            base
        })
    }
}
