use crate::error::DutchpayError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShareBreakdown {
    pub per_person: u64,
    pub total: u64,
}

/// Splits `total_amount` evenly across `num_people`, rounding half away
/// from zero to the nearest whole currency unit. Pure and deterministic, so
/// a view can re-derive the same breakdown on every render.
pub fn compute_share(total_amount: u64, num_people: u32) -> Result<ShareBreakdown, DutchpayError> {
    if num_people == 0 {
        return Err(DutchpayError::InvalidParticipantCount(num_people));
    }
    let per_person = (total_amount as f64 / num_people as f64).round() as u64;
    Ok(ShareBreakdown {
        per_person,
        total: total_amount,
    })
}

/// Thousands-separated display form, e.g. `1234567` -> `"1,234,567"`.
/// Formatting is layered beside the computation, not inside it.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
