//! The net financial position shown on the dashboard and the expenses page.

/// Calculate the balance from the summary figures.
///
/// `balance = (earnings + deposits) - (expenses + utilities)`
///
/// A negative result is a deficit and is returned as is. No rounding or
/// validation is applied, so a NaN input produces a NaN balance.
pub fn calculate_balance(earnings: f64, deposits: f64, expenses: f64, utilities: f64) -> f64 {
    (earnings + deposits) - (expenses + utilities)
}

/// The share of the balance that remains after expenses, as a percentage.
///
/// Computed as `balance / (balance + total_expenses) * 100`.
/// Returns `None` if the result is not a finite number, e.g. when both values
/// are zero.
pub fn progress_percentage(balance: f64, total_expenses: f64) -> Option<f64> {
    let percentage = balance / (balance + total_expenses) * 100.0;

    percentage.is_finite().then_some(percentage)
}

#[cfg(test)]
mod tests {
    use super::{calculate_balance, progress_percentage};

    #[test]
    fn balance_is_income_minus_costs() {
        let cases = [
            (0.0, 0.0, 0.0, 0.0),
            (1.5, 2.25, 0.5, 0.125),
            (-10.0, 4.0, 7.0, -3.0),
            (1e9, 1e6, 3.3e8, 2.0),
        ];

        for (earnings, deposits, expenses, utilities) in cases {
            assert_eq!(
                calculate_balance(earnings, deposits, expenses, utilities),
                (earnings + deposits) - (expenses + utilities)
            );
        }
    }

    #[test]
    fn balance_is_symmetric_within_pairs() {
        let cases = [
            (1000.0, 500.0, 300.0, 200.0),
            (0.1, 0.2, 0.3, 0.4),
            (12.0, -4.0, 8.5, 1.0),
        ];

        for (earnings, deposits, expenses, utilities) in cases {
            assert_eq!(
                calculate_balance(earnings, deposits, expenses, utilities),
                calculate_balance(deposits, earnings, utilities, expenses)
            );
        }
    }

    #[test]
    fn zero_inputs_give_zero_balance() {
        assert_eq!(calculate_balance(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn worked_example() {
        assert_eq!(calculate_balance(1000.0, 500.0, 300.0, 200.0), 1000.0);
    }

    #[test]
    fn deficit_is_negative() {
        assert_eq!(calculate_balance(100.0, 0.0, 150.0, 0.0), -50.0);
    }

    #[test]
    fn nan_propagates() {
        assert!(calculate_balance(f64::NAN, 1.0, 2.0, 3.0).is_nan());
    }

    #[test]
    fn progress_percentage_of_balance() {
        assert_eq!(progress_percentage(750.0, 250.0), Some(75.0));
        assert_eq!(progress_percentage(0.0, 100.0), Some(0.0));
    }

    #[test]
    fn progress_percentage_is_none_for_empty_totals() {
        assert_eq!(progress_percentage(0.0, 0.0), None);
        assert_eq!(progress_percentage(100.0, -100.0), None);
    }
}
