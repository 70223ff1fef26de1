//! Commission schema and policy reference records
//!
//! Both are read-only from the engine's point of view. Matching rules live
//! here so every store implementation applies the same interval semantics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The only policy type the engine matches against by default
pub const POLICY_TYPE_QUARTER: &str = "quarter";

/// Dated ruleset tying an account type to a set of commission policies
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use commission_engine_core_rs::CommissionSchema;
///
/// let schema = CommissionSchema {
///     id: "schema1".to_string(),
///     name: "Standard 2024".to_string(),
///     account_type: "standard".to_string(),
///     effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     effective_to: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
///     is_active: true,
/// };
///
/// // Both ends of the interval are inclusive
/// assert!(schema.matches("standard", NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
/// assert!(!schema.matches("premium", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionSchema {
    pub id: String,
    pub name: String,
    pub account_type: String,
    pub effective_from: NaiveDate,
    pub effective_to: NaiveDate,
    pub is_active: bool,
}

impl CommissionSchema {
    /// True if `date` falls within `[effective_from, effective_to]`
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_from <= date && date <= self.effective_to
    }

    /// Active, same account type, and effective on `date`
    pub fn matches(&self, account_type: &str, date: NaiveDate) -> bool {
        self.is_active && self.account_type == account_type && self.is_effective_on(date)
    }
}

/// Price-banded commission rate under a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionPolicy {
    pub id: String,
    pub commission_schema_id: String,
    /// Lower band bound (inclusive)
    pub min_price: f64,
    /// Upper band bound (inclusive)
    pub max_price: f64,
    pub policy_type: String,
    /// Policy rate as a percentage
    pub commission: f64,
}

impl CommissionPolicy {
    /// True if `price` lies within `[min_price, max_price]`
    pub fn covers(&self, price: f64) -> bool {
        self.min_price <= price && price <= self.max_price
    }

    pub fn matches(&self, schema_id: &str, policy_type: &str, price: f64) -> bool {
        self.commission_schema_id == schema_id
            && self.policy_type == policy_type
            && self.covers(price)
    }

    /// Whether two bands share at least one price
    pub fn overlaps(&self, other: &CommissionPolicy) -> bool {
        self.min_price <= other.max_price && other.min_price <= self.max_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(min: f64, max: f64) -> CommissionPolicy {
        CommissionPolicy {
            id: "p".to_string(),
            commission_schema_id: "s".to_string(),
            min_price: min,
            max_price: max,
            policy_type: POLICY_TYPE_QUARTER.to_string(),
            commission: 2.5,
        }
    }

    #[test]
    fn test_band_bounds_inclusive() {
        let p = policy(500_001.0, 1_000_000.0);
        assert!(p.covers(500_001.0));
        assert!(p.covers(1_000_000.0));
        assert!(!p.covers(500_000.0));
        assert!(!p.covers(1_000_000.01));
    }

    #[test]
    fn test_policy_type_must_match() {
        let p = policy(0.0, 10.0);
        assert!(p.matches("s", "quarter", 5.0));
        assert!(!p.matches("s", "annual", 5.0));
        assert!(!p.matches("other", "quarter", 5.0));
    }

    #[test]
    fn test_touching_bands_overlap() {
        assert!(policy(0.0, 500_000.0).overlaps(&policy(500_000.0, 600_000.0)));
        assert!(!policy(0.0, 500_000.0).overlaps(&policy(500_001.0, 600_000.0)));
    }

    #[test]
    fn test_inactive_schema_never_matches() {
        let schema = CommissionSchema {
            id: "s".to_string(),
            name: "Retired".to_string(),
            account_type: "standard".to_string(),
            effective_from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            effective_to: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            is_active: false,
        };
        assert!(!schema.matches("standard", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
    }
}
