//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList).

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::models::{
    Agent, AgentCalculation, CalculationResult, CommissionPolicy, CommissionSchema, DealInput,
};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict with clear error messages.
///
/// # Errors
/// Returns PyValueError if the field is missing or has the wrong type
///
/// # Example
/// ```ignore
/// let unit_price: f64 = extract_required(&py_dict, "unit_price")?;
/// ```
fn extract_required<T>(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<T>
where
    T: for<'py> FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Missing required field '{}'",
                key
            ))
        })?
        .extract()
}

// ========================================================================
// Input Parsers
// ========================================================================

/// Convert Python dict to DealInput
///
/// Expected shape:
/// `{"deal_id", "unit_price", "project_id", "developer_id", "agents": [...]}`
pub fn parse_deal_input(py_deal: &Bound<'_, PyDict>) -> PyResult<DealInput> {
    let py_agents: Bound<'_, PyList> = py_deal
        .get_item("agents")?
        .ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>("Missing required field 'agents'")
        })?
        .downcast_into()?;

    let mut agents = Vec::with_capacity(py_agents.len());
    for py_agent in py_agents.iter() {
        let agent_dict: Bound<'_, PyDict> = py_agent.downcast_into()?;
        agents.push(parse_agent(&agent_dict)?);
    }

    Ok(DealInput {
        deal_id: extract_required(py_deal, "deal_id")?,
        unit_price: extract_required(py_deal, "unit_price")?,
        project_id: extract_required(py_deal, "project_id")?,
        developer_id: extract_required(py_deal, "developer_id")?,
        agents,
    })
}

fn parse_agent(py_agent: &Bound<'_, PyDict>) -> PyResult<Agent> {
    Ok(Agent {
        id: extract_required(py_agent, "id")?,
        name: extract_required(py_agent, "name")?,
        account_type: extract_required(py_agent, "account_type")?,
        commission: extract_required(py_agent, "commission")?,
    })
}

// ========================================================================
// Output Converters
// ========================================================================

/// Convert CalculationResult to Python dict
///
/// Keys: `agents`, `sql_queries`, `validation_errors`, `statements`
/// (each statement as `{"sql": str, "params_json": str}`).
pub fn result_to_py(py: Python, result: &CalculationResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    let agents = PyList::empty(py);
    for calc in &result.agents {
        agents.append(calculation_to_py(py, calc)?)?;
    }
    dict.set_item("agents", agents)?;
    dict.set_item("sql_queries", result.sql_queries.clone())?;
    dict.set_item("validation_errors", result.validation_errors.clone())?;

    let statements = PyList::empty(py);
    for statement in &result.statements {
        let stmt_dict = PyDict::new(py);
        stmt_dict.set_item("sql", &statement.sql)?;
        let params = serde_json::to_string(&statement.params).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Failed to encode statement params: {}",
                e
            ))
        })?;
        stmt_dict.set_item("params_json", params)?;
        statements.append(stmt_dict)?;
    }
    dict.set_item("statements", statements)?;

    Ok(dict.unbind())
}

fn calculation_to_py<'py>(
    py: Python<'py>,
    calc: &AgentCalculation,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("agent_info", agent_to_py(py, &calc.agent_info)?)?;
    dict.set_item("matched_schema", schema_to_py(py, &calc.matched_schema)?)?;
    dict.set_item("matched_policy", policy_to_py(py, &calc.matched_policy)?)?;
    dict.set_item("policy_percentage", calc.policy_percentage)?;
    dict.set_item("policy_amount", calc.policy_amount)?;
    dict.set_item("crm_percentage", calc.crm_percentage)?;
    dict.set_item("net_profit", calc.net_profit)?;
    dict.set_item("unit_price", calc.unit_price)?;
    dict.set_item("commission_percentage", calc.commission_percentage)?;
    dict.set_item("policy_factor", calc.policy_factor)?;
    dict.set_item("factor", calc.factor)?;

    Ok(dict)
}

fn agent_to_py<'py>(py: Python<'py>, agent: &Agent) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("id", &agent.id)?;
    dict.set_item("name", &agent.name)?;
    dict.set_item("account_type", &agent.account_type)?;
    dict.set_item("commission", agent.commission)?;
    Ok(dict)
}

fn schema_to_py<'py>(py: Python<'py>, schema: &CommissionSchema) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("id", &schema.id)?;
    dict.set_item("name", &schema.name)?;
    dict.set_item("account_type", &schema.account_type)?;
    dict.set_item("effective_from", schema.effective_from.to_string())?;
    dict.set_item("effective_to", schema.effective_to.to_string())?;
    dict.set_item("is_active", schema.is_active)?;
    Ok(dict)
}

fn policy_to_py<'py>(py: Python<'py>, policy: &CommissionPolicy) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("id", &policy.id)?;
    dict.set_item("commission_schema_id", &policy.commission_schema_id)?;
    dict.set_item("min_price", policy.min_price)?;
    dict.set_item("max_price", policy.max_price)?;
    dict.set_item("policy_type", &policy.policy_type)?;
    dict.set_item("commission", policy.commission)?;
    Ok(dict)
}
