//! Compliance report derived from a verification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::compliance::Verification;

/// Issuer recorded on every report
pub const REPORT_ISSUER: &str = "AYUSH Compliance System";

/// Minimum score for AYUSH compliance
pub const AYUSH_THRESHOLD: u8 = 80;

/// Minimum score for fair-trade certification
pub const FAIR_TRADE_THRESHOLD: u8 = 85;

/// Minimum score for organic certification
pub const ORGANIC_THRESHOLD: u8 = 90;

/// Certification summary for a batch. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Batch the report covers
    pub batch_id: String,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
    /// Issuing system
    pub generated_by: String,
    /// Score >= 80
    pub ayush_compliance: bool,
    /// Score >= 90
    pub organic_certified: bool,
    /// Score >= 85
    pub fair_trade: bool,
    /// The compliance score
    pub sustainability_score: u8,
    /// Violations carried over from verification
    pub violations: Vec<String>,
}

impl ComplianceReport {
    /// Build a report from a verification result
    #[must_use]
    pub fn from_verification(batch_id: &str, verification: &Verification) -> Self {
        let score = verification.compliance_score;
        Self {
            batch_id: batch_id.to_string(),
            generated_at: Utc::now(),
            generated_by: REPORT_ISSUER.to_string(),
            ayush_compliance: score >= AYUSH_THRESHOLD,
            organic_certified: score >= ORGANIC_THRESHOLD,
            fair_trade: score >= FAIR_TRADE_THRESHOLD,
            sustainability_score: score,
            violations: verification.violations.clone(),
        }
    }
}
