//! Recurrence policy table.
//!
//! Fixed, closed key set. Raw keys coming from the data layer go through the
//! string-keyed lookups, which tolerate drift; typed callers use
//! [`Recurrence`] directly.

use serde::{Deserialize, Serialize};

use crate::error::BillingError;

/// Installment cap used when a raw key is not in the table.
pub const DEFAULT_MAX_INSTALLMENTS: u32 = 6;

/// Billing cadence classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Mensal,
    Bimestral,
    Trimestral,
    Semestral,
    Anual,
}

impl Recurrence {
    pub const ALL: [Recurrence; 5] = [
        Recurrence::Mensal,
        Recurrence::Bimestral,
        Recurrence::Trimestral,
        Recurrence::Semestral,
        Recurrence::Anual,
    ];

    /// Parse a raw key. Returns `None` for anything outside the closed set.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "mensal" => Some(Recurrence::Mensal),
            "bimestral" => Some(Recurrence::Bimestral),
            "trimestral" => Some(Recurrence::Trimestral),
            "semestral" => Some(Recurrence::Semestral),
            "anual" => Some(Recurrence::Anual),
            _ => None,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            Recurrence::Mensal => "mensal",
            Recurrence::Bimestral => "bimestral",
            Recurrence::Trimestral => "trimestral",
            Recurrence::Semestral => "semestral",
            Recurrence::Anual => "anual",
        }
    }

    /// Display name for the billing cadence.
    pub fn label(&self) -> &'static str {
        match self {
            Recurrence::Mensal => "Mensalidade",
            Recurrence::Bimestral => "Bimestralidade",
            Recurrence::Trimestral => "Trimestralidade",
            Recurrence::Semestral => "Semestralidade",
            Recurrence::Anual => "Anuidade",
        }
    }

    /// Calendar months one billing cycle spans.
    pub fn months_per_cycle(&self) -> u32 {
        match self {
            Recurrence::Mensal => 1,
            Recurrence::Bimestral => 2,
            Recurrence::Trimestral => 3,
            Recurrence::Semestral => 6,
            Recurrence::Anual => 12,
        }
    }

    /// Upper bound of installments the billing UI should offer.
    pub fn max_recommended_installments(&self) -> u32 {
        match self {
            Recurrence::Mensal => 12,
            Recurrence::Bimestral => 6,
            Recurrence::Trimestral => 4,
            Recurrence::Semestral => 2,
            Recurrence::Anual => 2,
        }
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Label for a raw recurrence key.
///
/// Unknown keys pass through unchanged so the UI stays renderable under data
/// drift.
pub fn label_of(key: &str) -> String {
    match Recurrence::parse(key) {
        Some(recurrence) => recurrence.label().to_string(),
        None => key.to_string(),
    }
}

/// Recommended installment cap for a raw recurrence key.
///
/// Advisory only; unknown keys fall back to [`DEFAULT_MAX_INSTALLMENTS`].
pub fn max_installments_of(key: &str) -> u32 {
    Recurrence::parse(key)
        .map(|r| r.max_recommended_installments())
        .unwrap_or(DEFAULT_MAX_INSTALLMENTS)
}

/// Months per billing cycle for a raw recurrence key.
///
/// Unknown keys are an error, never a default: this value feeds payment
/// scheduling, and guessing here corrupts the schedule.
pub fn months_per_cycle(key: &str) -> Result<u32, BillingError> {
    Recurrence::parse(key)
        .map(|r| r.months_per_cycle())
        .ok_or_else(|| BillingError::UnknownRecurrence(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        let expected = [
            ("mensal", "Mensalidade", 1, 12),
            ("bimestral", "Bimestralidade", 2, 6),
            ("trimestral", "Trimestralidade", 3, 4),
            ("semestral", "Semestralidade", 6, 2),
            ("anual", "Anuidade", 12, 2),
        ];

        for (key, label, months, max) in expected {
            assert_eq!(label_of(key), label);
            assert_eq!(months_per_cycle(key).unwrap(), months);
            assert_eq!(max_installments_of(key), max);
        }
    }

    #[test]
    fn test_unknown_key_label_passes_through() {
        assert_eq!(label_of("xyz"), "xyz");
    }

    #[test]
    fn test_unknown_key_installments_default() {
        assert_eq!(max_installments_of("xyz"), DEFAULT_MAX_INSTALLMENTS);
    }

    #[test]
    fn test_unknown_key_months_is_an_error() {
        let err = months_per_cycle("xyz").unwrap_err();
        assert!(matches!(err, BillingError::UnknownRecurrence(key) if key == "xyz"));
    }

    #[test]
    fn test_key_round_trip() {
        for recurrence in Recurrence::ALL {
            assert_eq!(Recurrence::parse(recurrence.as_key()), Some(recurrence));
        }
    }
}
