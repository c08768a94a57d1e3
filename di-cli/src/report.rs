//! Plain-text reports for the terminal.

use di_core::State;
use di_core::calculations::common::ratio_or_zero;
use di_core::calculations::{DisposableIncomeResult, TaxResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::profiles::ProfileResult;
use crate::utils::{fixed, format_dollars, format_percent};

const BANNER_WIDTH: usize = 55;
const SUMMARY_WIDTH: usize = 75;
const RATE_TABLE_WIDTH: usize = 58;

/// Categories whose essential amount is at or below this are left out of the
/// report.
const MIN_REPORTED_ESSENTIAL: Decimal = dec!(10);

const LOW_DI_FRACTION: Decimal = dec!(0.10);

/// Formats one calculation as a multi-line report, optionally under a title
/// banner.
pub fn format_result(
    result: &DisposableIncomeResult,
    title: Option<&str>,
) -> String {
    let gross = result.gross_income;
    let of_gross = |amount: Decimal| format_percent(ratio_or_zero(amount, gross), 1);

    let mut lines = Vec::new();
    if let Some(title) = title {
        lines.push(String::new());
        lines.push("=".repeat(BANNER_WIDTH));
        lines.push(format!("  {title}"));
        lines.push("=".repeat(BANNER_WIDTH));
    }

    lines.push(format!("  Gross Income:          ${:>12}", format_dollars(gross)));
    lines.push(format!("  Age: {}   State: {}", result.age, result.state));
    lines.push(format!(
        "  Age Group: {:<15}  Region: {}",
        result.age_group.label(),
        result.region
    ));
    lines.push(format!("  Income vs. age avg:    {:>8}×", fixed(result.income_ratio, 2)));

    // ─── taxes ───
    let taxes = &result.taxes;
    lines.push(String::new());
    lines.push("  ── TAXES ──────────────────────────────".to_string());
    lines.push(format!(
        "    Federal income tax:  ${:>10}  ({})",
        format_dollars(taxes.federal),
        of_gross(taxes.federal)
    ));
    lines.push(format!(
        "    Social Security:     ${:>10}  ({})",
        format_dollars(taxes.fica.social_security),
        of_gross(taxes.fica.social_security)
    ));
    lines.push(format!(
        "    Medicare:            ${:>10}  ({})",
        format_dollars(taxes.fica.medicare_total),
        of_gross(taxes.fica.medicare_total)
    ));
    lines.push(format!(
        "    State ({:<12}):${:>10}  ({})",
        result.state.label(),
        format_dollars(taxes.state),
        of_gross(taxes.state)
    ));
    lines.push("    ─────────────────────────────────────".to_string());
    lines.push(format!(
        "    TOTAL TAXES:         ${:>10}  ({})",
        format_dollars(result.total_tax),
        format_percent(result.effective_tax_rate, 1)
    ));

    // ─── essential expenses ───
    lines.push(String::new());
    lines.push("  ── ESSENTIAL EXPENSES ──────────────────".to_string());
    for item in &result.expenses.by_category {
        if item.essential > MIN_REPORTED_ESSENTIAL {
            lines.push(format!(
                "    {:<35} ${:>8}  (α={})",
                item.category.label(),
                format_dollars(item.essential),
                format_percent(item.essential_fraction, 0)
            ));
        }
    }
    lines.push("    ─────────────────────────────────────".to_string());
    lines.push(format!(
        "    TOTAL ESSENTIAL:     ${:>10}  ({})",
        format_dollars(result.total_essential),
        of_gross(result.total_essential)
    ));

    // ─── disposable income ───
    lines.push(String::new());
    lines.push("  ── DISPOSABLE INCOME ───────────────────".to_string());
    lines.push(format!(
        "    DISPOSABLE INCOME:   ${:>10}  ({} of gross)",
        format_dollars(result.disposable_income),
        format_percent(result.di_fraction, 1)
    ));
    if result.disposable_income < Decimal::ZERO {
        lines.push("    ⚠ Negative DI: income below living cost threshold".to_string());
    } else if result.di_fraction < LOW_DI_FRACTION {
        lines.push("    ⚠ Very low DI fraction (<10% of income)".to_string());
    }

    lines.join("\n")
}

/// One line per profile: tax, essential and disposable shares of salary.
pub fn summary_table(results: &[ProfileResult]) -> String {
    let mut lines = vec![
        "=".repeat(SUMMARY_WIDTH),
        "SUMMARY TABLE".to_string(),
        "=".repeat(SUMMARY_WIDTH),
        format!(
            "{:<7} {:>4} {:>10} {:<14} {:>6} {:>6} {:>10} {:>6}",
            "Profile", "Age", "Salary", "State", "Tax%", "Ess%", "DI", "DI%"
        ),
        "-".repeat(SUMMARY_WIDTH),
    ];

    for profile in results {
        let result = &profile.result;
        lines.push(format!(
            "{:<7} {:>4} ${:>9} {:<14} {:>6} {:>6} ${:>9} {:>6}",
            profile.label,
            result.age,
            format_dollars(result.gross_income),
            result.state.label(),
            format_percent(result.effective_tax_rate, 1),
            format_percent(ratio_or_zero(result.total_essential, result.gross_income), 1),
            format_dollars(result.disposable_income),
            format_percent(result.di_fraction, 1),
        ));
    }

    lines.join("\n")
}

/// Effective federal, FICA, state and total rates for each state at one
/// income.
pub fn tax_rate_table(
    income: Decimal,
    rows: &[(State, TaxResult)],
) -> String {
    let mut lines = vec![
        format!("Effective total tax rates at ${} by state:", format_dollars(income)),
        format!(
            "{:<20} {:>10} {:>8} {:>8} {:>8}",
            "State", "Federal", "FICA", "State", "Total"
        ),
        "-".repeat(RATE_TABLE_WIDTH),
    ];

    for (state, taxes) in rows {
        lines.push(format!(
            "{:<20} {:>10} {:>8} {:>8} {:>8}",
            state.label(),
            format_percent(taxes.effective_federal_rate, 1),
            format_percent(ratio_or_zero(taxes.fica.total, income), 1),
            format_percent(taxes.effective_state_rate, 1),
            format_percent(taxes.effective_total_rate, 1),
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use di_core::calculations::{DisposableIncomeCalculator, TaxCalculator};
    use di_core::calibration::Calibration;
    use di_core::{AgeGroup, Category, ExpenditureTable, Region};
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // Helpers
    // =========================================================================

    /// $1,000 in every category everywhere, with a $60,000 mean income.
    fn uniform_table() -> ExpenditureTable {
        let mut table = ExpenditureTable::new();
        for category in Category::ALL {
            for age_group in AgeGroup::ALL {
                table.set_age_group_amount(age_group, category, dec!(1000));
            }
            for region in Region::ALL {
                table.set_region_amount(region, category, dec!(1000));
            }
        }
        for age_group in AgeGroup::ALL {
            table.mean_income_by_age_group.insert(age_group, dec!(60000));
        }
        table
    }

    fn texas_at(salary: Decimal) -> DisposableIncomeResult {
        let calibration = Calibration::default();
        let table = uniform_table();
        DisposableIncomeCalculator::new(&calibration, &table)
            .calculate(salary, 40, State::Texas, true)
            .unwrap()
    }

    fn line_starting<'a>(
        report: &'a str,
        prefix: &str,
    ) -> &'a str {
        report
            .lines()
            .find(|line| line.starts_with(prefix))
            .unwrap_or_else(|| panic!("no line starting with {prefix:?} in:\n{report}"))
    }

    // =========================================================================
    // format_result
    // =========================================================================

    #[test]
    fn format_result_header_lines() {
        let report = format_result(&texas_at(dec!(60000)), None);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "  Gross Income:          $      60,000");
        assert_eq!(lines[1], "  Age: 40   State: Texas");
        assert_eq!(lines[2], "  Age Group: 35-44            Region: South");
        assert_eq!(lines[3], "  Income vs. age avg:        1.00×");
    }

    #[test]
    fn format_result_tax_lines() {
        let report = format_result(&texas_at(dec!(60000)), None);

        assert_eq!(
            line_starting(&report, "    Federal income tax:"),
            "    Federal income tax:  $     5,162  (8.6%)"
        );
        assert_eq!(
            line_starting(&report, "    Social Security:"),
            "    Social Security:     $     3,720  (6.2%)"
        );
        assert_eq!(
            line_starting(&report, "    Medicare:"),
            "    Medicare:            $       870  (1.5%)"
        );
        assert_eq!(
            line_starting(&report, "    State ("),
            "    State (Texas       ):$         0  (0.0%)"
        );
        assert_eq!(
            line_starting(&report, "    TOTAL TAXES:"),
            "    TOTAL TAXES:         $     9,752  (16.3%)"
        );
    }

    #[test]
    fn format_result_lists_only_material_essentials() {
        let report = format_result(&texas_at(dec!(60000)), None);

        assert!(report.contains(&format!("    {:<35} $     700  (α=70%)", "Food")));
        assert!(report.contains(&format!("    {:<35} $     100  (α=10%)", "Personal insurance")));
        assert!(!report.contains("Entertainment"));
        assert!(!report.contains("Miscellaneous"));
        assert_eq!(
            line_starting(&report, "    TOTAL ESSENTIAL:"),
            "    TOTAL ESSENTIAL:     $     7,850  (13.1%)"
        );
    }

    #[test]
    fn format_result_disposable_income_without_warning() {
        let report = format_result(&texas_at(dec!(60000)), None);

        assert_eq!(
            line_starting(&report, "    DISPOSABLE INCOME:"),
            "    DISPOSABLE INCOME:   $    42,399  (70.7% of gross)"
        );
        assert!(!report.contains('⚠'));
    }

    #[test]
    fn format_result_warns_on_negative_disposable_income() {
        let report = format_result(&texas_at(Decimal::ZERO), None);

        assert!(report.contains("⚠ Negative DI: income below living cost threshold"));
        assert_eq!(
            line_starting(&report, "    Federal income tax:"),
            "    Federal income tax:  $         0  (0.0%)"
        );
    }

    #[test]
    fn format_result_with_title_banner() {
        let report = format_result(&texas_at(dec!(60000)), Some("P0: test"));
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(55));
        assert_eq!(lines[2], "  P0: test");
        assert_eq!(lines[3], "=".repeat(55));
        assert!(lines[4].starts_with("  Gross Income:"));
    }

    // =========================================================================
    // summary_table
    // =========================================================================

    #[test]
    fn summary_table_row_per_profile() {
        let results = vec![
            ProfileResult {
                label: "P1",
                archetype: "first",
                result: texas_at(dec!(60000)),
            },
            ProfileResult {
                label: "P2",
                archetype: "second",
                result: texas_at(dec!(0)),
            },
        ];

        let table = summary_table(&results);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1], "SUMMARY TABLE");
        assert!(lines[3].starts_with("Profile  Age"));
        assert_eq!(
            lines[5],
            format!(
                "{:<7} {:>4} ${:>9} {:<14} {:>6} {:>6} ${:>9} {:>6}",
                "P1", 40, "60,000", "Texas", "16.3%", "13.1%", "42,399", "70.7%"
            )
        );
        assert!(lines[6].starts_with("P2"));
        assert!(lines[6].contains("$   -7,850"));
    }

    // =========================================================================
    // tax_rate_table
    // =========================================================================

    #[test]
    fn tax_rate_table_rows() {
        let calibration = Calibration::default();
        let calculator = TaxCalculator::new(&calibration);
        let income = dec!(65000);
        let rows: Vec<(State, TaxResult)> = [State::Texas, State::Illinois]
            .into_iter()
            .map(|state| (state, calculator.calculate(income, state).unwrap()))
            .collect();

        let table = tax_rate_table(income, &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Effective total tax rates at $65,000 by state:");
        assert_eq!(lines[2], "-".repeat(58));
        // 5,914 federal and 4,972.50 FICA on 65,000
        assert_eq!(
            lines[3],
            format!(
                "{:<20} {:>10} {:>8} {:>8} {:>8}",
                "Texas", "9.1%", "7.7%", "0.0%", "16.7%"
            )
        );
        assert!(lines[4].starts_with("Illinois"));
    }
}
