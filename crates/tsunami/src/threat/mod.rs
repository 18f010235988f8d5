//! Tsunami threat classification.
//!
//! A pure table lookup on magnitude and depth. Location plays no part here;
//! coastal proximity is the arrival estimator's concern.

mod classifier;
mod types;

pub use classifier::{
    classify, classify_parameters, threat_distribution, ThreatRule, CLASSIFICATION_TABLE,
};
pub use types::ThreatLevel;
