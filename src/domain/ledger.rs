use super::{Amount, Expense};

/// Compute the total of a sequence of expenses.
/// Total = plain sum of each amount, 0.0 for an empty sequence.
pub fn compute_total(expenses: &[Expense]) -> Amount {
    expenses.iter().map(|e| e.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_expense(amount: Amount) -> Expense {
        Expense::new(1, "2024-01-01", "item", amount)
    }

    #[test]
    fn test_compute_total_empty() {
        assert_eq!(compute_total(&[]), 0.0);
    }

    #[test]
    fn test_compute_total_sums_amounts() {
        let expenses = vec![make_expense(3.50), make_expense(2.25)];
        assert_eq!(compute_total(&expenses), 5.75);
    }

    #[test]
    fn test_compute_total_includes_negative_amounts() {
        let expenses = vec![make_expense(10.0), make_expense(-2.50)];
        assert_eq!(compute_total(&expenses), 7.50);
    }

    #[test]
    fn test_compute_total_is_order_invariant() {
        let forward = vec![make_expense(1.25), make_expense(2.50), make_expense(4.0)];
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(compute_total(&forward), compute_total(&backward));
    }
}
