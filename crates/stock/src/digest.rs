//! Low-stock digest: the text body of the daily low-stock notification.
//!
//! Delivery (mail, chat webhooks) belongs to the notification service; this
//! only renders the message.

use std::fmt::{self, Write};

use crate::enrichment::EnrichedMaterial;

const HEADER: &str = "Materials with low stock:";

/// Render the digest, or `None` when nothing is low.
pub fn low_stock_digest(low_stock: &[EnrichedMaterial]) -> Option<String> {
    if low_stock.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(64 + low_stock.len() * 160);
    render(&mut out, low_stock).ok()?;
    Some(out)
}

fn render(out: &mut String, low_stock: &[EnrichedMaterial]) -> fmt::Result {
    writeln!(out, "{HEADER}")?;
    writeln!(out)?;
    for item in low_stock {
        let m = &item.material;
        writeln!(out, "- {}: {} [{}]", m.code, m.name, item.stock_status)?;
        writeln!(out, "  Current stock: {} {}", item.current_stock, m.unit)?;
        writeln!(out, "  Safety stock: {} {}", m.safety_stock, m.unit)?;
        writeln!(out, "  Recommended order: {} {}", item.recommended_po, m.unit)?;
        writeln!(out)?;
    }
    Ok(())
}
