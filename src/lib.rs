//! ZÉNA RPS engine: psychosocial risk and burnout scoring from free text
//!
//! Text → dimension scores + burnout/motivation → patterns → protocol,
//! with a red-flag scan that overrides everything else.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use error::{EngineError, Result};

// =============================================================================
// DIMENSION SCORING
// =============================================================================

/// Neutral score every dimension starts from
pub const DIMENSION_BASELINE: i32 = 50;

/// Added per matched `high` keyword
pub const DIMENSION_WEIGHT_HIGH: i32 = 8;

/// Added per matched `medium` keyword
pub const DIMENSION_WEIGHT_MEDIUM: i32 = 4;

/// Subtracted per matched `low` (protective) keyword
pub const DIMENSION_WEIGHT_LOW: i32 = 5;

/// Score at or above which a dimension raises a high-risk alert
pub const DIMENSION_ALERT_HIGH: u8 = 70;

/// Score at or above which a dimension is flagged for monitoring
pub const DIMENSION_ALERT_MONITOR: u8 = 50;

// =============================================================================
// BURNOUT (Maslach-inspired) AND MOTIVATION
// =============================================================================

pub const BURNOUT_WEIGHT_EXHAUSTION: u8 = 4;
pub const BURNOUT_WEIGHT_DEPERSONALIZATION: u8 = 5;
pub const BURNOUT_WEIGHT_ACCOMPLISHMENT: u8 = 5;

/// Sub-score ceilings, applied before summing (sum = 100)
pub const BURNOUT_CAP_EXHAUSTION: u8 = 40;
pub const BURNOUT_CAP_DEPERSONALIZATION: u8 = 30;
pub const BURNOUT_CAP_ACCOMPLISHMENT: u8 = 30;

pub const MOTIVATION_BASELINE: i32 = 50;
pub const MOTIVATION_WEIGHT_POSITIVE: i32 = 8;
pub const MOTIVATION_WEIGHT_NEGATIVE: i32 = 10;

// =============================================================================
// GLOBAL RISK LEVEL
// =============================================================================

pub const GLOBAL_CRITICAL_BURNOUT: u8 = 76;
pub const GLOBAL_CRITICAL_MEAN: f64 = 75.0;
pub const GLOBAL_HIGH_BURNOUT: u8 = 51;
pub const GLOBAL_HIGH_MEAN: f64 = 65.0;
pub const GLOBAL_MODERATE_BURNOUT: u8 = 26;
pub const GLOBAL_MODERATE_MEAN: f64 = 55.0;

// =============================================================================
// PATTERN THRESHOLDS
// =============================================================================

pub const PATTERN_OVERLOAD_INTENSITY: u8 = 70;
pub const PATTERN_ISOLATION_SOCIAL: u8 = 60;
pub const PATTERN_MEANING_VALUES: u8 = 65;
pub const PATTERN_BURNOUT_SCORE: u8 = 51;
pub const PATTERN_DEMOTIVATION_INDEX: u8 = 30;
pub const PATTERN_AUTONOMY_DEFICIT: u8 = 65;

// =============================================================================
// CONVERSATIONAL (0-10 scale)
// =============================================================================

/// Added to a signal score per keyword hit
pub const SIGNAL_WEIGHT: f64 = 3.0;

/// Ceiling for stress / fatigue / isolation / energy
pub const SIGNAL_MAX: f64 = 10.0;

/// Energy assumed when no self-report is given
pub const ENERGY_DEFAULT: f64 = 5.0;

/// Energy moved per positive or fatigue keyword
pub const ENERGY_STEP: f64 = 2.0;

/// A signal is "detected" at or above this score
pub const SIGNAL_THRESHOLD: f64 = 3.0;

pub const COMBINED_CRITICAL: f64 = 8.0;
pub const COMBINED_HIGH: f64 = 6.0;
pub const COMBINED_MODERATE: f64 = 3.0;

/// Combined stress at or below this gets the soft tone
pub const COMBINED_SOFT_MAX: f64 = 2.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
