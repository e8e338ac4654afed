use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{ShadowcastError, ShadowcastResult};

/// Light direction and shear limits driving the shadow projection.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightParams {
    /// Cast direction in degrees, clockwise in image space (0 = right, 90 = down).
    pub angle: f64,
    /// Light elevation in degrees; 90 is directly overhead and casts the shortest shadow.
    pub elevation: f64,
    /// Multiplier on the shadow length.
    pub shadow_scale: f64,
    /// Hard cap on the shear magnitude.
    pub max_shear: f64,
    /// Smallest allowed `|1 + k·dy|` before the shear is pulled back.
    pub min_denominator: f64,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            angle: 45.0,
            elevation: 45.0,
            shadow_scale: 1.0,
            max_shear: 5.0,
            min_denominator: 0.2,
        }
    }
}

/// Falloff lengths of the two shadow tiers, as fractions of the maximum shadow extent.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FadeParams {
    /// Falloff fraction of the sharp contact shadow.
    pub contact_fade: f64,
    /// Falloff fraction of the soft ambient shadow.
    pub soft_fade: f64,
}

impl Default for FadeParams {
    fn default() -> Self {
        Self {
            contact_fade: 0.15,
            soft_fade: 1.0,
        }
    }
}

/// Complete parameter set for one compose call.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadowParams {
    /// Projection parameters.
    pub light: LightParams,
    /// Falloff parameters.
    pub fade: FadeParams,
}

impl ShadowParams {
    /// Parse a JSON parameter document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ShadowcastResult<Self> {
        let params: Self = serde_json::from_str(json)
            .map_err(|e| ShadowcastError::validation(format!("invalid parameter json: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    /// Read and parse a JSON parameter file.
    pub fn from_path(path: impl AsRef<Path>) -> ShadowcastResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read parameter file '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Build parameters from flat, form-style string fields.
    ///
    /// Recognized names are `angle`, `elevation`, `shadow_scale`, `max_shear`,
    /// `contact_fade` and `soft_fade`. A field that is absent, empty or not a number keeps
    /// its default.
    pub fn from_fields<'a>(mut field: impl FnMut(&str) -> Option<&'a str>) -> Self {
        let light = LightParams::default();
        let fade = FadeParams::default();
        let mut read = |name: &str, default: f64| read_form_float(field(name), default);
        Self {
            light: LightParams {
                angle: read("angle", light.angle),
                elevation: read("elevation", light.elevation),
                shadow_scale: read("shadow_scale", light.shadow_scale),
                max_shear: read("max_shear", light.max_shear),
                min_denominator: light.min_denominator,
            },
            fade: FadeParams {
                contact_fade: read("contact_fade", fade.contact_fade),
                soft_fade: read("soft_fade", fade.soft_fade),
            },
        }
    }

    /// Reject values the geometry cannot work with.
    pub fn validate(&self) -> ShadowcastResult<()> {
        let finite = [
            ("angle", self.light.angle),
            ("elevation", self.light.elevation),
            ("shadow_scale", self.light.shadow_scale),
            ("max_shear", self.light.max_shear),
            ("min_denominator", self.light.min_denominator),
            ("contact_fade", self.fade.contact_fade),
            ("soft_fade", self.fade.soft_fade),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(ShadowcastError::validation(format!(
                    "'{name}' must be finite, got {v}"
                )));
            }
        }
        if self.light.min_denominator <= 0.0 {
            return Err(ShadowcastError::validation("'min_denominator' must be > 0"));
        }
        Ok(())
    }
}

/// Lenient float parsing for request fields: absent, blank or malformed input yields `default`.
pub fn read_form_float(value: Option<&str>, default: f64) -> f64 {
    match value.map(str::trim) {
        None | Some("") => default,
        Some(v) => v.parse::<f64>().unwrap_or(default),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/params.rs"]
mod tests;
