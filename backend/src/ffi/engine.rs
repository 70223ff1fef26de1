//! PyO3 wrapper for CommissionEngine
//!
//! This module provides the Python interface to the Rust engine.

use chrono::{DateTime, Utc};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{parse_deal_input, result_to_py};
use crate::catalog::InMemoryCatalog;
use crate::core::clock::{Clock, FixedClock, SystemClock};
use crate::engine::{CommissionEngine as RustEngine, EngineConfig};
use crate::input::validate_deal;

/// Python wrapper for Rust CommissionEngine
///
/// # Example (from Python)
///
/// ```python
/// from commission_engine_core_rs import CommissionEngine
///
/// engine = CommissionEngine(open("catalog.json").read())
/// result = engine.calculate({
///     "deal_id": "D-100",
///     "unit_price": 300000,
///     "project_id": "PRJ-1",
///     "developer_id": "DEV-1",
///     "agents": [{"id": "A-1", "name": "Dana", "account_type": "standard", "commission": 10}],
/// }, as_of="2024-04-10T08:00:00Z")
/// for sql in result["sql_queries"]:
///     print(sql)
/// ```
#[pyclass(name = "CommissionEngine")]
pub struct PyCommissionEngine {
    inner: RustEngine<InMemoryCatalog>,
}

#[pymethods]
impl PyCommissionEngine {
    /// Create an engine from a catalog JSON document and optional config JSON
    ///
    /// # Errors
    ///
    /// Raises ValueError if the catalog or config cannot be decoded, or the
    /// catalog fails validation under `strict_catalog`.
    #[new]
    #[pyo3(signature = (catalog_json, config_json=None))]
    fn new(catalog_json: &str, config_json: Option<&str>) -> PyResult<Self> {
        let catalog = InMemoryCatalog::from_json_str(catalog_json).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Invalid catalog: {}", e))
        })?;
        let config = match config_json {
            Some(json) => EngineConfig::from_json_str(json),
            None => Ok(EngineConfig::default()),
        }
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;

        let inner = RustEngine::from_catalog(catalog, config)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;

        Ok(PyCommissionEngine { inner })
    }

    /// Calculate commissions for a deal
    ///
    /// # Arguments
    ///
    /// * `deal` - Dict with deal fields and an `agents` list
    /// * `as_of` - Optional RFC 3339 instant freezing the clock
    ///
    /// # Returns
    ///
    /// Dict with `agents`, `sql_queries`, `validation_errors`, `statements`
    #[pyo3(signature = (deal, as_of=None))]
    fn calculate(
        &self,
        py: Python,
        deal: &Bound<'_, PyDict>,
        as_of: Option<&str>,
    ) -> PyResult<Py<PyDict>> {
        let deal = parse_deal_input(deal)?;
        validate_deal(&deal)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;

        let clock: Box<dyn Clock> = match as_of {
            Some(text) => {
                let instant = DateTime::parse_from_rfc3339(text).map_err(|e| {
                    PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                        "Invalid as_of '{}': {}",
                        text, e
                    ))
                })?;
                Box::new(FixedClock::new(instant.with_timezone(&Utc)))
            }
            None => Box::new(SystemClock),
        };

        let result = self.inner.calculate_at(&deal, clock.as_ref()).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Calculation failed: {}",
                e
            ))
        })?;

        result_to_py(py, &result)
    }

    /// SHA-256 fingerprint of the loaded catalog
    fn fingerprint(&self) -> Option<String> {
        self.inner.fingerprint().map(str::to_string)
    }
}
