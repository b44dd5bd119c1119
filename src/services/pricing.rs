use crate::config::PricingConfig;

/// Ticket pricing: a flat base price, a surcharge for row 1 only, and a fractional
/// student discount applied to the total.
///
/// The discounted amount is rounded half to even (`2.5 -> 2`, `3.5 -> 4`), once,
/// at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingPolicy {
    base_price: u32,
    front_row_extra: u32,
    student_discount: f64,
}

impl PricingPolicy {
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            base_price: config.base_price,
            front_row_extra: config.front_row_extra,
            student_discount: config.student_discount,
        }
    }

    /// Row validity is the caller's job; any row other than 1 is priced at base.
    pub fn price(&self, row: u32, is_student: bool) -> u32 {
        let mut price = self.base_price;
        if row == 1 {
            price = price.saturating_add(self.front_row_extra);
        }
        if !is_student {
            return price;
        }
        let discounted = f64::from(price) * (1.0 - self.student_discount);
        discounted.round_ties_even() as u32
    }
}
