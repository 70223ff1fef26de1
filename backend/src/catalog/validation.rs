// Catalog Validation
//
// Load-time consistency checks over a commission catalog:
// - Schema and policy id uniqueness
// - Well-formed effective intervals and price bands
// - Policy back-references
// - Overlapping active schemas per account type
// - Overlapping price bands per schema and policy type
//
// None of these change lookup behavior; first match in catalog order still wins.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use thiserror::Error;

use super::memory::InMemoryCatalog;
use crate::models::{CommissionPolicy, CommissionSchema};

/// Catalog consistency problems
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogIssue {
    #[error("Duplicate schema ID: {0}")]
    DuplicateSchemaId(String),

    #[error("Duplicate policy ID: {0}")]
    DuplicatePolicyId(String),

    #[error("Schema {schema_id} is effective from {from} after its end date {to}")]
    InvertedEffectiveInterval {
        schema_id: String,
        from: NaiveDate,
        to: NaiveDate,
    },

    #[error("Policy {policy_id} has min_price {min_price} above max_price {max_price}")]
    InvertedPriceBand {
        policy_id: String,
        min_price: f64,
        max_price: f64,
    },

    #[error("Policy {policy_id} has a negative or non-finite price bound")]
    InvalidPriceBound { policy_id: String },

    #[error("Policy {policy_id} references unknown schema {schema_id}")]
    UnknownSchema { policy_id: String, schema_id: String },

    #[error("Active schemas {first} and {second} overlap for account type {account_type}")]
    OverlappingSchemas {
        account_type: String,
        first: String,
        second: String,
    },

    #[error("Policies {first} and {second} overlap under schema {schema_id} ({policy_type})")]
    OverlappingBands {
        schema_id: String,
        policy_type: String,
        first: String,
        second: String,
    },
}

/// Validation result
pub type CatalogValidationResult = Result<(), Vec<CatalogIssue>>;

/// Validate a catalog before it is used for matching
///
/// Runs every check and returns all issues found, in a stable order.
///
/// # Example
///
/// ```rust
/// use commission_engine_core_rs::catalog::{validate_catalog, CatalogIssue, InMemoryCatalog};
///
/// let json = r#"{
///   "schemas": [{"id": "s1", "name": "Standard", "account_type": "standard",
///                "effective_from": "2024-01-01", "effective_to": "2024-12-31",
///                "is_active": true}],
///   "policies": [
///     {"id": "p1", "commission_schema_id": "s1", "min_price": 0,
///      "max_price": 500000, "policy_type": "quarter", "commission": 2.5},
///     {"id": "p2", "commission_schema_id": "s1", "min_price": 500000,
///      "max_price": 900000, "policy_type": "quarter", "commission": 3.0}
///   ]
/// }"#;
/// let catalog = InMemoryCatalog::from_json_str(json).unwrap();
///
/// // 500,000 sits in both bands; p1 wins at lookup time, but it is reported here
/// let issues = validate_catalog(&catalog).unwrap_err();
/// assert!(matches!(issues[0], CatalogIssue::OverlappingBands { .. }));
/// ```
pub fn validate_catalog(catalog: &InMemoryCatalog) -> CatalogValidationResult {
    let mut issues = Vec::new();

    issues.extend(check_id_uniqueness(catalog));
    issues.extend(check_intervals(catalog.schemas()));
    issues.extend(check_bands(catalog.policies()));
    issues.extend(check_references(catalog));
    issues.extend(check_schema_overlaps(catalog.schemas()));
    issues.extend(check_band_overlaps(catalog.policies()));

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

// ============================================================================
// Structural Checks
// ============================================================================

fn check_id_uniqueness(catalog: &InMemoryCatalog) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    for schema in catalog.schemas() {
        if !seen.insert(schema.id.as_str()) {
            issues.push(CatalogIssue::DuplicateSchemaId(schema.id.clone()));
        }
    }

    let mut seen = HashSet::new();
    for policy in catalog.policies() {
        if !seen.insert(policy.id.as_str()) {
            issues.push(CatalogIssue::DuplicatePolicyId(policy.id.clone()));
        }
    }

    issues
}

fn check_intervals(schemas: &[CommissionSchema]) -> Vec<CatalogIssue> {
    schemas
        .iter()
        .filter(|s| s.effective_from > s.effective_to)
        .map(|s| CatalogIssue::InvertedEffectiveInterval {
            schema_id: s.id.clone(),
            from: s.effective_from,
            to: s.effective_to,
        })
        .collect()
}

fn check_bands(policies: &[CommissionPolicy]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    for policy in policies {
        let bounds_valid = [policy.min_price, policy.max_price]
            .iter()
            .all(|bound| bound.is_finite() && *bound >= 0.0);

        if !bounds_valid {
            issues.push(CatalogIssue::InvalidPriceBound {
                policy_id: policy.id.clone(),
            });
        } else if policy.min_price > policy.max_price {
            issues.push(CatalogIssue::InvertedPriceBand {
                policy_id: policy.id.clone(),
                min_price: policy.min_price,
                max_price: policy.max_price,
            });
        }
    }

    issues
}

fn check_references(catalog: &InMemoryCatalog) -> Vec<CatalogIssue> {
    let known: HashSet<&str> = catalog.schemas().iter().map(|s| s.id.as_str()).collect();

    catalog
        .policies()
        .iter()
        .filter(|p| !known.contains(p.commission_schema_id.as_str()))
        .map(|p| CatalogIssue::UnknownSchema {
            policy_id: p.id.clone(),
            schema_id: p.commission_schema_id.clone(),
        })
        .collect()
}

// ============================================================================
// Overlap Checks
// ============================================================================

/// Pairs of active schemas for the same account type whose intervals intersect
fn check_schema_overlaps(schemas: &[CommissionSchema]) -> Vec<CatalogIssue> {
    let mut by_account: HashMap<&str, Vec<&CommissionSchema>> = HashMap::new();
    let mut account_order = Vec::new();

    for schema in schemas.iter().filter(|s| s.is_active) {
        let entry = by_account.entry(schema.account_type.as_str()).or_default();
        if entry.is_empty() {
            account_order.push(schema.account_type.as_str());
        }
        entry.push(schema);
    }

    let mut issues = Vec::new();
    for account_type in account_order {
        let group = &by_account[account_type];
        for (i, first) in group.iter().enumerate() {
            for second in &group[i + 1..] {
                let intersects = first.effective_from <= second.effective_to
                    && second.effective_from <= first.effective_to;
                if intersects {
                    issues.push(CatalogIssue::OverlappingSchemas {
                        account_type: account_type.to_string(),
                        first: first.id.clone(),
                        second: second.id.clone(),
                    });
                }
            }
        }
    }

    issues
}

/// Pairs of bands under one schema and policy type that share a price
fn check_band_overlaps(policies: &[CommissionPolicy]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    for (i, first) in policies.iter().enumerate() {
        for second in &policies[i + 1..] {
            if first.commission_schema_id == second.commission_schema_id
                && first.policy_type == second.policy_type
                && first.overlaps(second)
            {
                issues.push(CatalogIssue::OverlappingBands {
                    schema_id: first.commission_schema_id.clone(),
                    policy_type: first.policy_type.clone(),
                    first: first.id.clone(),
                    second: second.id.clone(),
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schema(id: &str, from: NaiveDate, to: NaiveDate) -> CommissionSchema {
        CommissionSchema {
            id: id.to_string(),
            name: id.to_string(),
            account_type: "standard".to_string(),
            effective_from: from,
            effective_to: to,
            is_active: true,
        }
    }

    #[test]
    fn test_adjacent_years_do_not_overlap() {
        let schemas = vec![
            schema("s2023", date(2023, 1, 1), date(2023, 12, 31)),
            schema("s2024", date(2024, 1, 1), date(2024, 12, 31)),
        ];
        assert!(check_schema_overlaps(&schemas).is_empty());
    }

    #[test]
    fn test_inactive_schema_ignored_for_overlap() {
        let mut retired = schema("old", date(2024, 1, 1), date(2024, 12, 31));
        retired.is_active = false;
        let schemas = vec![retired, schema("new", date(2024, 1, 1), date(2024, 12, 31))];
        assert!(check_schema_overlaps(&schemas).is_empty());
    }

    #[test]
    fn test_nan_bound_reported_once() {
        let policy = CommissionPolicy {
            id: "p".to_string(),
            commission_schema_id: "s".to_string(),
            min_price: f64::NAN,
            max_price: 10.0,
            policy_type: "quarter".to_string(),
            commission: 1.0,
        };
        let issues = check_bands(&[policy]);
        assert_eq!(
            issues,
            vec![CatalogIssue::InvalidPriceBound {
                policy_id: "p".to_string()
            }]
        );
    }
}
