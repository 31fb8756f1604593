// Core data model shared by the parser, calculator, and export layers.
//
// All dollar amounts are whole dollars (i64); percentages are fractions
// in [0, 1]. Serialization is camelCase so exported JSON matches the
// shape consumed by the diagram renderer.
use serde::{Deserialize, Serialize};

use crate::error::TaxError;

/// Statutory sanity caps on self-reported FICA contributions.
pub const SOCIAL_SECURITY_CAP: i64 = 200_000;
pub const MEDICARE_CAP: i64 = 100_000;

/// Payroll contributions, tracked separately from income tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FicaContributions {
    pub social_security: i64,
    pub medicare: i64,
}

impl FicaContributions {
    pub fn total(&self) -> i64 {
        self.social_security + self.medicare
    }

    pub fn validate(&self) -> Result<(), TaxError> {
        if self.social_security < 0 || self.medicare < 0 {
            return Err(TaxError::InvalidInput(
                "FICA contributions cannot be negative".into(),
            ));
        }
        if self.social_security > SOCIAL_SECURITY_CAP {
            return Err(TaxError::InvalidInput(format!(
                "Social Security contribution exceeds ${SOCIAL_SECURITY_CAP} cap"
            )));
        }
        if self.medicare > MEDICARE_CAP {
            return Err(TaxError::InvalidInput(format!(
                "Medicare contribution exceeds ${MEDICARE_CAP} cap"
            )));
        }
        Ok(())
    }
}

/// What the user submitted for one calculation: either parsed from a
/// PDF or entered manually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxInput {
    pub income_tax: i64,
    pub year: u16,
    pub fica: Option<FicaContributions>,
}

impl TaxInput {
    pub fn validate(&self) -> Result<(), TaxError> {
        if self.income_tax < 0 {
            return Err(TaxError::InvalidInput(
                "income tax cannot be negative".into(),
            ));
        }
        if let Some(fica) = &self.fica {
            fica.validate()?;
        }
        Ok(())
    }

    /// Income tax plus FICA contributions (0 when absent).
    pub fn total_tax(&self) -> i64 {
        self.income_tax + self.fica.map_or(0, |f| f.total())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryEntry {
    pub name: String,
    pub percentage: f64,
    pub amount: i64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub name: String,
    pub percentage: f64,
    pub amount: i64,
    pub subcategories: Vec<SubcategoryEntry>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// One FICA program's advisory split. Amounts here are independently
/// rounded and need not sum to `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FicaProgramBreakdown {
    pub total: i64,
    pub categories: Vec<SubcategoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FicaBreakdown {
    pub social_security: FicaProgramBreakdown,
    pub medicare: FicaProgramBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalComparison {
    pub user_total: i64,
    pub national_average: i64,
    pub difference: i64,
    /// Rounded whole percent; 0 when the national average is 0.
    pub percent_difference: i64,
    /// Coarse bucket: 25, 50, 75, 90, 95, or 99. None when the budget
    /// table ships no percentile thresholds.
    pub percentile: Option<u8>,
    pub number_of_filers: Option<u64>,
    pub year: u16,
}

/// The full calculation output, immutable once produced. This is the
/// complete contract the diagram renderer and JSON export consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownResult {
    pub year: u16,
    pub income_tax: i64,
    pub total_tax: i64,
    pub fica: Option<FicaContributions>,
    pub category_breakdown: Vec<CategoryEntry>,
    pub fica_breakdown: Option<FicaBreakdown>,
    pub national_comparison: Option<NationalComparison>,
    /// The year's total federal budget, for scale context in the diagram.
    pub budget_total: i64,
}
