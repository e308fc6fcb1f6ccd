//! # Aggregation
//!
//! Pure recomputation of bucket totals from a record list. No side effects,
//! no clock access: the caller passes "today" in so results are
//! deterministic and order-independent.

use crate::domain::models::expense::{Expense, Totals};

/// Recompute month, today and per-category totals from `records`.
///
/// `today` is the current local day in "YYYY-MM-DD" form; records whose date
/// equals it count toward the today total. O(n), commutative sums, so the
/// record ordering never matters.
pub fn recalculate_totals(records: &[Expense], today: &str) -> Totals {
    let mut totals = Totals::default();

    for expense in records {
        let amount = u64::from(expense.amount);
        totals.month += amount;
        if expense.date == today {
            totals.today += amount;
        }
        totals.by_category.add(expense.category, amount);
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::expense::Category;

    fn expense(id: &str, date: &str, amount: u32, category: Category) -> Expense {
        Expense {
            id: id.to_string(),
            date: date.to_string(),
            amount,
            category,
            timestamp: 0,
            synced: false,
        }
    }

    #[test]
    fn test_empty_records_give_zero_totals() {
        let totals = recalculate_totals(&[], "2024-03-15");
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_month_today_and_category_sums() {
        let records = vec![
            expense("a", "2024-03-15", 500, Category::Food),
            expense("b", "2024-03-15", 300, Category::Transport),
            expense("c", "2024-03-02", 200, Category::Food),
        ];

        let totals = recalculate_totals(&records, "2024-03-15");
        assert_eq!(totals.month, 1000);
        assert_eq!(totals.today, 800);
        assert_eq!(totals.by_category.get(Category::Food), 700);
        assert_eq!(totals.by_category.get(Category::Transport), 300);
        assert_eq!(totals.by_category.get(Category::Daily), 0);
    }

    #[test]
    fn test_category_sums_add_up_to_month_total() {
        let records = vec![
            expense("a", "2024-03-01", 120, Category::Daily),
            expense("b", "2024-03-08", 4500, Category::Entertainment),
            expense("c", "2024-03-21", 999, Category::Other),
        ];
        let totals = recalculate_totals(&records, "2024-03-08");
        assert_eq!(totals.by_category.sum(), totals.month);
    }

    #[test]
    fn test_order_independence() {
        let records = vec![
            expense("a", "2024-03-15", 500, Category::Food),
            expense("b", "2024-03-14", 300, Category::Transport),
            expense("c", "2024-03-15", 200, Category::Daily),
            expense("d", "2024-03-01", 950, Category::Other),
        ];

        let forward = recalculate_totals(&records, "2024-03-15");

        let mut shuffled = records.clone();
        shuffled.reverse();
        shuffled.swap(0, 2);
        let reordered = recalculate_totals(&shuffled, "2024-03-15");

        assert_eq!(forward, reordered);
    }

    #[test]
    fn test_amounts_at_the_bounds() {
        let records = vec![
            expense("a", "2024-03-15", 1, Category::Food),
            expense("b", "2024-03-15", 1_000_000, Category::Food),
        ];
        let totals = recalculate_totals(&records, "2024-03-15");
        assert_eq!(totals.month, 1_000_001);
        assert_eq!(totals.today, 1_000_001);
    }
}
