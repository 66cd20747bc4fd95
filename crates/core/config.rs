//! Configuration for the listing query engine.
//!
//! Every field has a serde default, so an empty document is a valid config.
use serde::de::Error;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Expanding-ring nearest-neighbor search settings
    #[serde(default)]
    pub ring: RingConfig,

    /// Listings returned by the preview listing when no limit is given
    #[serde(default = "Config::default_list_limit")]
    pub default_list_limit: usize,

    /// Upper bound on any requested preview limit
    #[serde(default = "Config::default_max_list_limit")]
    pub max_list_limit: usize,
}

/// Radius growth and tie-breaking for nearest-with-predicate searches.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RingConfig {
    /// Radius of the first ring, in meters
    #[serde(default = "RingConfig::default_initial_radius_m")]
    pub initial_radius_m: f64,

    /// Factor applied to the radius after each empty ring
    #[serde(default = "RingConfig::default_growth_factor")]
    pub growth_factor: f64,

    /// Candidates within this many meters of the closest are tied and broken by id
    #[serde(default = "RingConfig::default_tie_tolerance_m")]
    pub tie_tolerance_m: f64,
}

impl RingConfig {
    const fn default_initial_radius_m() -> f64 {
        500.0
    }

    const fn default_growth_factor() -> f64 {
        2.0
    }

    const fn default_tie_tolerance_m() -> f64 {
        1e-6
    }

    pub fn with_initial_radius_m(mut self, radius: f64) -> Self {
        self.initial_radius_m = radius;
        self
    }

    pub fn with_growth_factor(mut self, factor: f64) -> Self {
        self.growth_factor = factor;
        self
    }

    pub fn with_tie_tolerance_m(mut self, tolerance: f64) -> Self {
        self.tie_tolerance_m = tolerance;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_radius_m.is_finite() && self.initial_radius_m > 0.0) {
            return Err(format!(
                "Ring initial radius must be positive and finite, got: {}",
                self.initial_radius_m
            ));
        }

        if !(self.growth_factor.is_finite() && self.growth_factor > 1.0) {
            return Err(format!(
                "Ring growth factor must be greater than 1, got: {}",
                self.growth_factor
            ));
        }

        if !(self.tie_tolerance_m.is_finite() && self.tie_tolerance_m >= 0.0) {
            return Err(format!(
                "Tie tolerance must be non-negative and finite, got: {}",
                self.tie_tolerance_m
            ));
        }

        Ok(())
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            initial_radius_m: Self::default_initial_radius_m(),
            growth_factor: Self::default_growth_factor(),
            tie_tolerance_m: Self::default_tie_tolerance_m(),
        }
    }
}

impl Config {
    const fn default_list_limit() -> usize {
        1000
    }

    const fn default_max_list_limit() -> usize {
        10_000
    }

    pub fn with_ring(mut self, ring: RingConfig) -> Self {
        self.ring = ring;
        self
    }

    pub fn with_list_limits(mut self, default_limit: usize, max_limit: usize) -> Self {
        self.default_list_limit = default_limit;
        self.max_list_limit = max_limit;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        self.ring.validate()?;

        if self.max_list_limit == 0 {
            return Err("Max list limit must be greater than zero".to_string());
        }

        if self.default_list_limit > self.max_list_limit {
            return Err(format!(
                "Default list limit {} exceeds max list limit {}",
                self.default_list_limit, self.max_list_limit
            ));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ring: RingConfig::default(),
            default_list_limit: Self::default_list_limit(),
            max_list_limit: Self::default_max_list_limit(),
        }
    }
}
