//! Order confirmation rendering.

use crate::models::{Order, OrderItem};
use chrono::{DateTime, Utc};
use std::fmt::Write;

pub const CURRENCY_SYMBOL: &str = "₹";

/// Subject line for an order confirmation.
pub fn order_subject(order_id: &str) -> String {
    format!("Order Confirmation - #{}", order_id)
}

/// Whole amounts print without decimals ("500"), others in shortest form ("499.5").
pub fn format_amount(amount: f64) -> String {
    // -0.0 would otherwise print as "-0"
    if amount == 0.0 {
        return "0".to_string();
    }
    amount.to_string()
}

/// e.g. "10/16/2026, 9:30:00 AM"
pub fn format_order_date(date: DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// `<name> (<size>) x<qty> - ₹<price>`, without the surrounding tag.
pub fn item_line(item: &OrderItem) -> String {
    format!(
        "{} ({}) x{} - {}{}",
        escape_html(&item.name),
        escape_html(&item.size),
        item.quantity,
        CURRENCY_SYMBOL,
        format_amount(item.price)
    )
}

/// Render the confirmation body. `now` stands in for a missing order date.
pub fn render_order_confirmation(order: &Order, now: DateTime<Utc>) -> String {
    let mut items = String::new();
    for item in &order.items {
        // Writing to a String cannot fail.
        let _ = write!(items, "<p>{}</p>", item_line(item));
    }

    format!(
        "<h1>Thank you for your order!</h1>\n\
         <p>Order ID: {id}</p>\n\
         <p>Date: {date}</p>\n\
         <h3>Items:</h3>\n\
         {items}\n\
         <h2>Total: {currency}{total}</h2>\n\
         <p>We appreciate your business!</p>",
        id = escape_html(&order.id),
        date = format_order_date(order.order_date.unwrap_or(now)),
        items = items,
        currency = CURRENCY_SYMBOL,
        total = format_amount(order.total_price),
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
