//! Plain-text rendering of a calculation result

use std::fmt::{self, Write};

use crate::models::{AgentCalculation, CalculationResult};
use crate::statements::format::format_money_grouped;

/// Render a result as a human-readable summary
///
/// Amounts are shown as `$1,234.56`, rates as `2.50%`, the scaling factor
/// to six decimals. Validation errors follow the agents.
pub fn render_text(result: &CalculationResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    if write_report(&mut out, result).is_err() {
        out.clear();
    }
    out
}

/// Write the summary into any formatter sink
pub fn write_report(out: &mut impl Write, result: &CalculationResult) -> fmt::Result {
    if result.agents.is_empty() {
        writeln!(out, "No commissions calculated.")?;
    }

    for (idx, calc) in result.agents.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        write_agent(out, calc)?;
    }

    if !result.validation_errors.is_empty() {
        write!(out, "\nValidation errors:\n")?;
        for error in &result.validation_errors {
            writeln!(out, "  - {}", error)?;
        }
    }

    Ok(())
}

fn write_agent(out: &mut impl Write, calc: &AgentCalculation) -> fmt::Result {
    let agent = &calc.agent_info;
    writeln!(out, "{} ({}) [{}]", agent.name, agent.id, agent.account_type)?;
    writeln!(
        out,
        "  Schema:        {} ({})",
        calc.matched_schema.name, calc.matched_schema.id
    )?;
    writeln!(
        out,
        "  Policy:        {} [{} - {}]",
        calc.matched_policy.id,
        currency(calc.matched_policy.min_price),
        currency(calc.matched_policy.max_price)
    )?;
    writeln!(out, "  Unit price:    {}", currency(calc.unit_price))?;
    writeln!(out, "  CRM rate:      {}", percentage(calc.crm_percentage))?;
    writeln!(out, "  Policy rate:   {}", percentage(calc.policy_percentage))?;
    writeln!(out, "  Policy amount: {}", currency(calc.policy_amount))?;
    writeln!(out, "  Net profit:    {}", currency(calc.net_profit))?;
    writeln!(out, "  Policy factor: {:.4}", calc.policy_factor)?;
    writeln!(out, "  Factor:        {:.6}", calc.factor)
}

fn currency(amount: f64) -> String {
    let grouped = format_money_grouped(amount, ',');
    match grouped.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", grouped),
    }
}

fn percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_format() {
        assert_eq!(currency(1_500_000.0), "$1,500,000.00");
        assert_eq!(currency(0.3), "$0.30");
        assert_eq!(currency(-12.5), "-$12.50");
    }

    #[test]
    fn test_empty_result() {
        let text = render_text(&CalculationResult::new());
        assert_eq!(text, "No commissions calculated.\n");
    }

    /// Sink that rejects every write
    struct ClosedSink;

    impl Write for ClosedSink {
        fn write_str(&mut self, _s: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_write_error_propagates() {
        assert_eq!(write_report(&mut ClosedSink, &CalculationResult::new()), Err(fmt::Error));
    }

    #[test]
    fn test_write_report_matches_render() {
        let mut result = CalculationResult::new();
        result.validation_errors.push("No matching policy found".to_string());
        let mut out = String::new();
        write_report(&mut out, &result).unwrap();
        assert_eq!(out, render_text(&result));
    }

    #[test]
    fn test_errors_listed() {
        let mut result = CalculationResult::new();
        result
            .validation_errors
            .push("No active schema found for agent Ann (a1) with account type gold".to_string());
        let text = render_text(&result);
        assert!(text.contains("Validation errors:\n  - No active schema found for agent Ann (a1)"));
    }
}
