// Calculation engine: turns a validated TaxInput plus a year's budget
// table into an immutable BreakdownResult.
pub mod allocate;
pub mod budget;
pub mod compare;

pub use budget::{BudgetDefinition, BudgetStore};

use crate::error::TaxError;
use crate::types::{BreakdownResult, FicaBreakdown, FicaProgramBreakdown, TaxInput};

/// Compute the full breakdown for one calculation request.
///
/// Income tax is split over the category tree with remainder correction;
/// FICA (when supplied and the table has FICA data) gets the flat
/// advisory split; the national comparison degrades to absent when the
/// table has no averages.
pub fn calculate_breakdown(
    input: &TaxInput,
    budget: &BudgetDefinition,
) -> Result<BreakdownResult, TaxError> {
    input.validate()?;

    let total_tax = input.total_tax();
    let category_breakdown = allocate::allocate(input.income_tax, &budget.allocations);

    // The allocation invariant is the core contract; a violation here
    // means a bug upstream, surfaced as a calculation failure rather
    // than silently wrong output.
    let allocated: i64 = category_breakdown.iter().map(|c| c.amount).sum();
    if allocated != input.income_tax {
        return Err(TaxError::Calculation(format!(
            "allocated ${allocated} does not match income tax ${}",
            input.income_tax
        )));
    }

    let fica_breakdown = match (&input.fica, &budget.fica_allocations) {
        (Some(fica), Some(tables)) => Some(FicaBreakdown {
            social_security: FicaProgramBreakdown {
                total: fica.social_security,
                categories: allocate::allocate_flat(fica.social_security, &tables.social_security),
            },
            medicare: FicaProgramBreakdown {
                total: fica.medicare,
                categories: allocate::allocate_flat(fica.medicare, &tables.medicare),
            },
        }),
        _ => None,
    };

    let national_comparison =
        compare::compare(total_tax, input.year, budget.national_averages.as_ref());

    Ok(BreakdownResult {
        year: input.year,
        income_tax: input.income_tax,
        total_tax,
        fica: input.fica,
        category_breakdown,
        fica_breakdown,
        national_comparison,
        budget_total: budget.total_budget,
    })
}
