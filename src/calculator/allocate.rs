// Proportional dollar allocation with remainder correction.
//
// Rule (identical at category and subcategory level): every item except
// the last receives round(total * percentage), rounding half away from
// zero; the last item receives the exact remainder. Children therefore
// always sum exactly to their parent, with the last-listed sibling
// absorbing all rounding error. List order is semantically significant:
// the final bucket should conventionally be the largest or least
// rounding-sensitive one.
use crate::calculator::budget::{CategoryAllocation, SubAllocation};
use crate::types::{CategoryEntry, SubcategoryEntry};

fn round_share(total: i64, percentage: f64) -> i64 {
    (total as f64 * percentage).round() as i64
}

/// Split `total` across the category tree. The result sums to `total`
/// exactly; each category's subcategories sum to its amount exactly.
pub fn allocate(total: i64, allocations: &[CategoryAllocation]) -> Vec<CategoryEntry> {
    let mut remaining = total;
    let last = allocations.len().saturating_sub(1);

    allocations
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let amount = if i == last {
                remaining
            } else {
                round_share(total, category.percentage)
            };
            remaining -= amount;

            CategoryEntry {
                name: category.name.clone(),
                percentage: category.percentage,
                amount,
                subcategories: allocate_sub(amount, &category.subcategories),
                color: category.color.clone(),
                icon: category.icon.clone(),
            }
        })
        .collect()
}

/// Split one category's amount across its subcategories, same rule.
/// An empty list yields an empty breakdown; a single subcategory takes
/// the whole amount (it is simultaneously first and last).
pub fn allocate_sub(category_amount: i64, subcategories: &[SubAllocation]) -> Vec<SubcategoryEntry> {
    let mut remaining = category_amount;
    let last = subcategories.len().saturating_sub(1);

    subcategories
        .iter()
        .enumerate()
        .map(|(i, sub)| {
            let amount = if i == last {
                remaining
            } else {
                round_share(category_amount, sub.percentage)
            };
            remaining -= amount;

            SubcategoryEntry {
                name: sub.name.clone(),
                percentage: sub.percentage,
                amount,
                description: sub.description.clone(),
            }
        })
        .collect()
}

/// Independent advisory split used for FICA tables: every entry is its
/// own rounded share, no remainder correction. FICA percentages are
/// advisory rather than an exhaustive partition, so the amounts are not
/// required to sum to `total`. Deliberately not unified with `allocate`.
pub fn allocate_flat(total: i64, categories: &[SubAllocation]) -> Vec<SubcategoryEntry> {
    categories
        .iter()
        .map(|cat| SubcategoryEntry {
            name: cat.name.clone(),
            percentage: cat.percentage,
            amount: round_share(total, cat.percentage),
            description: cat.description.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(name: &str, pct: f64, subs: Vec<SubAllocation>) -> CategoryAllocation {
        CategoryAllocation {
            name: name.to_string(),
            percentage: pct,
            subcategories: subs,
            color: None,
            icon: None,
        }
    }

    fn sub(name: &str, pct: f64) -> SubAllocation {
        SubAllocation {
            name: name.to_string(),
            percentage: pct,
            description: None,
        }
    }

    fn thirds() -> Vec<CategoryAllocation> {
        vec![
            cat("A", 1.0 / 3.0, vec![]),
            cat("B", 1.0 / 3.0, vec![]),
            cat("C", 1.0 / 3.0, vec![]),
        ]
    }

    #[test]
    fn amounts_sum_to_total_exactly() {
        for total in [0, 1, 2, 99, 100, 12_345, 1_000_000, 99_999_999] {
            let entries = allocate(total, &thirds());
            let sum: i64 = entries.iter().map(|e| e.amount).sum();
            assert_eq!(sum, total, "total {total} drifted");
        }
    }

    #[test]
    fn last_entry_absorbs_remainder() {
        let entries = allocate(100, &thirds());
        assert_eq!(entries[0].amount, 33);
        assert_eq!(entries[1].amount, 33);
        assert_eq!(entries[2].amount, 34);
    }

    #[test]
    fn permutation_moves_sink_not_total() {
        let forward = allocate(100, &thirds());
        let mut reversed_alloc = thirds();
        reversed_alloc.reverse();
        let reversed = allocate(100, &reversed_alloc);

        let sum_f: i64 = forward.iter().map(|e| e.amount).sum();
        let sum_r: i64 = reversed.iter().map(|e| e.amount).sum();
        assert_eq!(sum_f, 100);
        assert_eq!(sum_r, 100);
        // The sink is positional: whichever entry is listed last takes
        // the extra dollar.
        assert_eq!(forward[2].name, "C");
        assert_eq!(forward[2].amount, 34);
        assert_eq!(reversed[2].name, "A");
        assert_eq!(reversed[2].amount, 34);
    }

    #[test]
    fn subcategories_sum_to_category() {
        let allocations = vec![
            cat(
                "Health",
                0.6,
                vec![sub("Medicaid", 0.55), sub("CHIP", 0.25), sub("Other", 0.20)],
            ),
            cat("Defense", 0.4, vec![]),
        ];
        for total in [0, 7, 101, 9_999, 54_321] {
            for entry in allocate(total, &allocations) {
                if !entry.subcategories.is_empty() {
                    let sub_sum: i64 = entry.subcategories.iter().map(|s| s.amount).sum();
                    assert_eq!(sub_sum, entry.amount);
                }
            }
        }
    }

    #[test]
    fn zero_total_allocates_zeros() {
        let entries = allocate(0, &thirds());
        assert!(entries.iter().all(|e| e.amount == 0));
    }

    #[test]
    fn single_category_takes_everything() {
        let entries = allocate(777, &[cat("Only", 1.0, vec![sub("Solo", 1.0)])]);
        assert_eq!(entries[0].amount, 777);
        assert_eq!(entries[0].subcategories[0].amount, 777);
    }

    #[test]
    fn empty_subcategories_is_empty_breakdown() {
        let entries = allocate(500, &[cat("Interest", 1.0, vec![])]);
        assert!(entries[0].subcategories.is_empty());
    }

    #[test]
    fn flat_split_has_no_remainder_correction() {
        let categories = vec![sub("OASI", 1.0 / 3.0), sub("DI", 1.0 / 3.0), sub("Admin", 1.0 / 3.0)];
        let entries = allocate_flat(100, &categories);
        // Every entry is independently rounded: 33 + 33 + 33 != 100.
        assert!(entries.iter().all(|e| e.amount == 33));
    }
}
