//! Reorder Recommender.

/// Fixed buffer applied to the whole gap-to-target quantity.
pub const REORDER_BUFFER: f64 = 1.2;

/// Suggested purchase quantity.
///
/// `(safety + forecast - current) * 1.2`, floored at zero when stock already
/// covers the target.
pub fn recommended_po(safety_stock: f64, monthly_forecast: f64, current_stock: f64) -> f64 {
    let gap = safety_stock + monthly_forecast - current_stock;
    let buffered = gap * REORDER_BUFFER;
    if buffered > 0.0 { buffered } else { 0.0 }
}
