// Budget table loading, validation, and the per-session year cache.
//
// Tables live at <data-dir>/budget-<year>.json. Structural problems are
// load-time failures (BudgetDataMissing / BudgetDataInvalid), kept
// distinct from calculation-time failures.
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TaxError;

/// One weighted share of the budget. `percentage` is a fraction of the
/// parent total; list order matters because the last sibling absorbs
/// rounding remainder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAllocation {
    pub name: String,
    pub percentage: f64,
    pub subcategories: Vec<SubAllocation>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAllocation {
    pub name: String,
    pub percentage: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Advisory splits for the two payroll programs. These are not an
/// exhaustive partition, so no remainder correction applies to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FicaAllocations {
    pub social_security: Vec<SubAllocation>,
    pub medicare: Vec<SubAllocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentileData {
    pub p25: i64,
    pub p50: i64,
    pub p75: i64,
    pub p90: i64,
    pub p95: i64,
    pub p99: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalAverages {
    #[serde(default)]
    pub average_income_tax: i64,
    #[serde(default)]
    pub average_fica: i64,
    #[serde(default)]
    pub number_of_filers: Option<u64>,
    #[serde(default)]
    pub percentile_data: Option<PercentileData>,
}

/// A year's budget table, read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDefinition {
    #[serde(default)]
    pub name: Option<String>,
    pub total_budget: i64,
    pub allocations: Vec<CategoryAllocation>,
    #[serde(default)]
    pub fica_allocations: Option<FicaAllocations>,
    #[serde(default)]
    pub national_averages: Option<NationalAverages>,
}

impl BudgetDefinition {
    /// Structural validation beyond what serde enforces.
    pub fn validate(&self) -> Result<(), String> {
        if self.total_budget <= 0 {
            return Err("totalBudget must be positive".into());
        }
        if self.allocations.is_empty() {
            return Err("allocations list is empty".into());
        }
        for alloc in &self.allocations {
            if alloc.name.is_empty() {
                return Err("allocation with empty name".into());
            }
            check_fraction(&alloc.name, alloc.percentage)?;
            for sub in &alloc.subcategories {
                if sub.name.is_empty() {
                    return Err(format!("empty subcategory name under {}", alloc.name));
                }
                check_fraction(&sub.name, sub.percentage)?;
            }
        }
        Ok(())
    }
}

fn check_fraction(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(format!("percentage for {name} must be a fraction in [0, 1]"));
    }
    Ok(())
}

/// Year-keyed budget cache. Loads each table at most once per session;
/// `clear` exists so tests can force a reload.
#[derive(Debug)]
pub struct BudgetStore {
    data_dir: PathBuf,
    cache: HashMap<u16, BudgetDefinition>,
}

impl BudgetStore {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: HashMap::new(),
        }
    }

    pub fn budget_path(&self, year: u16) -> PathBuf {
        self.data_dir.join(format!("budget-{year}.json"))
    }

    pub fn is_cached(&self, year: u16) -> bool {
        self.cache.contains_key(&year)
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Load (or return the cached) budget table for a year.
    pub fn load(&mut self, year: u16) -> Result<&BudgetDefinition, TaxError> {
        if !self.cache.contains_key(&year) {
            let definition = load_budget_file(&self.budget_path(year), year)?;
            self.cache.insert(year, definition);
        }
        Ok(&self.cache[&year])
    }
}

fn load_budget_file(path: &Path, year: u16) -> Result<BudgetDefinition, TaxError> {
    let raw = fs::read_to_string(path).map_err(|_| TaxError::BudgetDataMissing {
        year,
        path: path.to_path_buf(),
    })?;

    let definition: BudgetDefinition =
        serde_json::from_str(&raw).map_err(|e| TaxError::BudgetDataInvalid {
            year,
            reason: e.to_string(),
        })?;

    definition
        .validate()
        .map_err(|reason| TaxError::BudgetDataInvalid { year, reason })?;

    Ok(definition)
}
