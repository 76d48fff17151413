//! Booking invoices.
//!
//! An invoice has a single line item: the room, billed per night for the
//! booking's `days_of_stay`. Tax is not charged.

use serde::Serialize;

use crate::types::{DbId, Timestamp};

pub const DOCUMENT_TITLE: &str = "Room Booking INVOICE";
pub const BOTTOM_NOTICE: &str = "This is an auto generated invoice of your booking on BookIt.";
pub const SELLER_COMPANY: &str = "BookIt";

/// Data needed to build an invoice, gathered by the caller from the booking,
/// its room and its user.
#[derive(Debug, Clone)]
pub struct InvoiceSource<'a> {
    pub booking_id: DbId,
    pub client_name: &'a str,
    pub client_email: &'a str,
    pub room_name: &'a str,
    pub price_per_night_cents: i64,
    pub days_of_stay: i32,
    pub check_in_date: Timestamp,
    pub check_out_date: Timestamp,
    pub amount_paid_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceParty {
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceLineItem {
    pub description: String,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub tax_cents: i64,
    pub line_total_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub document_title: &'static str,
    pub invoice_number: String,
    pub issued_at: Timestamp,
    pub seller: InvoiceParty,
    pub client: InvoiceParty,
    pub check_in_date: Timestamp,
    pub check_out_date: Timestamp,
    pub items: Vec<InvoiceLineItem>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub amount_paid_cents: i64,
    pub bottom_notice: &'static str,
}

impl Invoice {
    pub fn build(source: &InvoiceSource<'_>, issued_at: Timestamp) -> Self {
        let quantity = source.days_of_stay.max(0);
        let line_total_cents = source
            .price_per_night_cents
            .saturating_mul(i64::from(quantity));

        let item = InvoiceLineItem {
            description: source.room_name.to_string(),
            quantity,
            unit_price_cents: source.price_per_night_cents,
            tax_cents: 0,
            line_total_cents,
        };

        let subtotal_cents = item.line_total_cents;
        let tax_cents = item.tax_cents;

        Self {
            document_title: DOCUMENT_TITLE,
            invoice_number: source.booking_id.to_string(),
            issued_at,
            seller: InvoiceParty {
                name: SELLER_COMPANY.to_string(),
                email: None,
            },
            client: InvoiceParty {
                name: source.client_name.to_string(),
                email: Some(source.client_email.to_string()),
            },
            check_in_date: source.check_in_date,
            check_out_date: source.check_out_date,
            items: vec![item],
            subtotal_cents,
            tax_cents,
            total_cents: subtotal_cents + tax_cents,
            amount_paid_cents: source.amount_paid_cents,
            bottom_notice: BOTTOM_NOTICE,
        }
    }
}
