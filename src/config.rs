//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_ATTRIBUTION_PATH, DEFAULT_PORT, DEFAULT_REPORT_DATA_PATH, DEFAULT_TOP_N,
    DEFAULT_TOP_N_MAX, DEFAULT_TOP_N_MIN,
};

/// Inclusive bound on the high-risk list size, plus the slider default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopNBounds {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl Default for TopNBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_TOP_N_MIN,
            max: DEFAULT_TOP_N_MAX,
            default: DEFAULT_TOP_N,
        }
    }
}

impl TopNBounds {
    pub fn new(min: u32, max: u32, default: u32) -> Option<Self> {
        if min == 0 || min > max || default < min || default > max {
            return None;
        }
        Some(Self { min, max, default })
    }

    pub fn contains(&self, n: i64) -> bool {
        n >= i64::from(self.min) && n <= i64::from(self.max)
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Tabular report artifact
    pub report_data_path: PathBuf,

    /// Serialized attribution bundle
    pub attribution_path: PathBuf,

    /// Server port
    pub port: u16,

    /// High-risk slider bounds
    pub top_n: TopNBounds,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_u32 = |key: &str, fallback: u32| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(fallback)
        };

        let min = parse_u32("TOP_N_MIN", DEFAULT_TOP_N_MIN);
        let max = parse_u32("TOP_N_MAX", DEFAULT_TOP_N_MAX);
        let default = parse_u32("TOP_N_DEFAULT", DEFAULT_TOP_N);
        let top_n = TopNBounds::new(min, max, default).unwrap_or_else(|| {
            tracing::warn!(
                "Ignoring invalid top-n bounds min={} max={} default={}",
                min, max, default
            );
            TopNBounds::default()
        });

        Self {
            report_data_path: lookup("REPORT_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DATA_PATH)),

            attribution_path: lookup("ATTRIBUTION_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ATTRIBUTION_PATH)),

            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),

            top_n,

            environment: lookup("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),
        }
    }
}
