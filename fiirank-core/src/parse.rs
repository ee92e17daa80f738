//! Locale-tolerant numeric parsing.
//!
//! The ranking site formats numbers with a comma decimal separator and a
//! trailing `%` on yield columns. Anything that does not parse becomes `0.0`,
//! which the quality gate downstream treats as "unusable".

/// Parse locale-formatted numeric text, returning `0.0` on any failure.
///
/// Trims whitespace, normalizes `,` to `.`, and strips `%` signs. Non-finite
/// results are also mapped to `0.0`.
pub fn parse_numeric(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let normalized = trimmed.replace(',', ".").replace('%', "");
    match normalized.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Compound a monthly yield percentage over twelve periods.
///
/// Returns a fraction: `1.0` (percent per month) becomes `(1.01)^12 - 1 ≈ 0.1268`.
pub fn annualize_monthly_yield(monthly_pct: f64) -> f64 {
    (1.0 + monthly_pct / 100.0).powi(12) - 1.0
}
