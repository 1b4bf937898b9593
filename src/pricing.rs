// Stay-length and price calculation

use chrono::NaiveDate;
use thiserror::Error;

// Errors for stay quoting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("check-out must fall after check-in")]
    EmptyRange,

    #[error("discount must be between 0 and 100, got {0}")]
    DiscountOutOfRange(f64),
}

// Result of quoting a stay. Amounts stay unrounded so multi-night totals do
// not accumulate rounding error; round only when presenting.
#[derive(Debug, Clone, PartialEq)]
pub struct StayQuote {
    pub nights: u32,
    pub unit_price: f64,
    pub total: f64,
}

impl StayQuote {
    // Presentation-time rounding to whole cents
    pub fn rounded_total(&self) -> f64 {
        (self.total * 100.0).round() / 100.0
    }
}

// Compute nights and total cost for a check-in/check-out pair at day
// granularity. Past check-ins are accepted here; the intake validator owns
// the submission-time rule.
pub fn quote_stay(
    check_in: NaiveDate,
    check_out: NaiveDate,
    base_price: f64,
    discount_percent: f64,
) -> Result<StayQuote, PricingError> {
    if !(0.0..=100.0).contains(&discount_percent) {
        return Err(PricingError::DiscountOutOfRange(discount_percent));
    }

    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        return Err(PricingError::EmptyRange);
    }

    let unit_price = base_price * (1.0 - discount_percent / 100.0);
    Ok(StayQuote {
        nights: nights as u32,
        unit_price,
        total: unit_price * nights as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_discounted_three_night_stay() {
        let quote = quote_stay(date(2024, 6, 1), date(2024, 6, 4), 100.0, 20.0).unwrap();

        assert_eq!(quote.nights, 3);
        assert!((quote.unit_price - 80.0).abs() < 1e-9);
        assert!((quote.total - 240.0).abs() < 1e-9);
        assert_eq!(quote.rounded_total(), 240.0);
    }

    #[test_case(date(2024, 6, 4), date(2024, 6, 4); "check-out equals check-in")]
    #[test_case(date(2024, 6, 4), date(2024, 6, 1); "check-out before check-in")]
    fn test_empty_range_is_rejected(check_in: NaiveDate, check_out: NaiveDate) {
        let result = quote_stay(check_in, check_out, 100.0, 0.0);
        assert_eq!(result, Err(PricingError::EmptyRange));
    }

    #[test_case(-5.0; "negative discount")]
    #[test_case(100.5; "discount above one hundred")]
    fn test_discount_out_of_range(discount: f64) {
        let result = quote_stay(date(2024, 6, 1), date(2024, 6, 2), 100.0, discount);
        assert_eq!(result, Err(PricingError::DiscountOutOfRange(discount)));
    }

    #[test]
    fn test_full_discount_prices_to_zero() {
        let quote = quote_stay(date(2024, 6, 1), date(2024, 6, 8), 199.0, 100.0).unwrap();
        assert_eq!(quote.nights, 7);
        assert_eq!(quote.total, 0.0);
    }

    #[test]
    fn test_no_rounding_during_accumulation() {
        // 33.335 per night over 30 nights; rounding per night would drift by cents
        let quote = quote_stay(date(2024, 6, 1), date(2024, 7, 1), 66.67, 50.0).unwrap();

        assert_eq!(quote.nights, 30);
        let exact = 66.67 * 0.5 * 30.0;
        assert!((quote.total - exact).abs() < 1e-9);
        assert_eq!(quote.rounded_total(), 1000.05);
    }

    #[test]
    fn test_past_dates_still_quote() {
        // Forecasting callers may quote stays that already happened
        let quote = quote_stay(date(2020, 1, 1), date(2020, 1, 3), 50.0, 0.0).unwrap();
        assert_eq!(quote.nights, 2);
        assert!((quote.total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_quote_spans_month_boundary() {
        let quote = quote_stay(date(2024, 1, 30), date(2024, 2, 2), 80.0, 25.0).unwrap();
        assert_eq!(quote.nights, 3);
        assert!((quote.total - 180.0).abs() < 1e-9);
    }
}
