//! Stock Calculator.

/// On-hand quantity derived from the opening balance and ledger totals.
///
/// Floored at zero: data-entry lag can make the ledger imply a negative
/// balance, which is never reported.
pub fn current_stock(opening_stock: f64, total_receipts: f64, total_consumptions: f64) -> f64 {
    let balance = opening_stock + total_receipts - total_consumptions;
    if balance > 0.0 { balance } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn opening_plus_receipts_minus_consumptions() {
        assert_eq!(current_stock(10.0, 25.0, 7.5), 27.5);
    }

    #[test]
    fn empty_ledger_reports_opening_stock() {
        assert_eq!(current_stock(4.0, 0.0, 0.0), 4.0);
    }

    #[test]
    fn over_consumption_floors_at_zero() {
        assert_eq!(current_stock(5.0, 2.0, 20.0), 0.0);
    }

    #[test]
    fn exact_depletion_is_zero() {
        assert_eq!(current_stock(5.0, 5.0, 10.0), 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: stock is never negative, whatever the ledger holds.
        #[test]
        fn stock_is_never_negative(
            opening in 0.0f64..10_000.0,
            receipts in 0.0f64..10_000.0,
            consumptions in 0.0f64..50_000.0,
        ) {
            let stock = current_stock(opening, receipts, consumptions);
            prop_assert!(stock >= 0.0);
            if opening + receipts >= consumptions {
                prop_assert_eq!(stock, opening + receipts - consumptions);
            }
        }
    }
}
