//! CSV export of orders.
//!
//! One header row, then one row per order, joined with `\n`. Totals are
//! recomputed from the campaign's current price. Dates are rendered in UTC.

use std::collections::HashMap;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::services::campaign::Campaign;
use crate::services::order::Order;
use crate::services::stats::order_revenue;
use crate::store::RecordId;

pub const CSV_HEADER: &str = "Order ID,Customer Name,Email,Product,Size,Quantity,Total,Date";
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("date formatting failed: {0}")]
    Format(#[from] time::error::Format),
}

impl crate::error::ErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Format(_) => "E_EXPORT_FORMAT",
        }
    }
}

/// Quote a field when it carries a delimiter, quote or line break.
#[must_use]
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render `orders` as CSV. Zero orders yields the header alone.
///
/// # Errors
///
/// Returns `Format` if a timestamp cannot be rendered.
pub fn orders_csv(orders: &[&Order], campaigns: &HashMap<RecordId, &Campaign>) -> Result<String, ExportError> {
    let mut lines = Vec::with_capacity(orders.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for order in orders {
        let product = campaigns.get(&order.campaign_id).map_or("Unknown", |c| c.product_type.as_str());
        let fields = [
            order.id.to_string(),
            csv_field(&order.customer_name),
            csv_field(&order.customer_email),
            product.to_string(),
            csv_field(&order.size),
            order.quantity.to_string(),
            format!("${:.2}", order_revenue(order, campaigns)),
            order.timestamp.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))?,
        ];
        lines.push(fields.join(","));
    }
    Ok(lines.join("\n"))
}

/// `orders-<yyyy-MM-dd>.csv` for the export date.
///
/// # Errors
///
/// Returns `Format` if the date cannot be rendered.
pub fn export_filename(now: OffsetDateTime) -> Result<String, ExportError> {
    Ok(format!("orders-{}.csv", now.format(format_description!("[year]-[month]-[day]"))?))
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
