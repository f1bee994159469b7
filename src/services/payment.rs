//! Payment service
//!
//! Records money received against invoices and money paid against bills.
//! A payment always marks its document Paid, whatever the amount.

use tracing::debug;

use crate::models::{
    Bill, BillId, BillStatus, Customer, Invoice, InvoiceId, InvoiceStatus, PaymentDetails,
    PaymentMade, PaymentReceived,
};
use crate::store::{display_number, Record, Snapshot};

/// Base of the `#PAY-` and `#PMT-` display numbers
const PAYMENT_NUMBER_BASE: usize = 100;

/// Shown when an invoice points at a customer that no longer exists
pub const UNKNOWN_CUSTOMER: &str = "Unknown";

/// Service for recording payments
pub struct PaymentService<'a> {
    snapshot: &'a mut Snapshot,
}

impl<'a> PaymentService<'a> {
    pub fn new(snapshot: &'a mut Snapshot) -> Self {
        Self { snapshot }
    }

    /// Record a payment received for an invoice and mark the invoice Paid
    ///
    /// Returns None, changing nothing, when the invoice doesn't exist.
    pub fn record_invoice_payment(
        &mut self,
        invoice_id: &InvoiceId,
        details: PaymentDetails,
    ) -> Option<Record<PaymentReceived>> {
        let Some(invoice) = self.snapshot.get::<Invoice>(invoice_id) else {
            debug!(%invoice_id, "payment for unknown invoice ignored");
            return None;
        };
        let customer_id = invoice.data.customer_id.clone();

        let customer_name = self
            .snapshot
            .get::<Customer>(&customer_id)
            .map(|customer| customer.data.name.clone())
            .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string());

        let payment = PaymentReceived {
            payment_id: display_number(
                "PAY",
                self.snapshot.payments_received.len(),
                PAYMENT_NUMBER_BASE,
            ),
            customer_id,
            customer_name,
            invoice_id: invoice_id.clone(),
            date: details.date,
            method: details.method,
            amount: details.amount,
        };

        self.snapshot
            .update::<Invoice, _>(invoice_id, |invoice| invoice.status = InvoiceStatus::Paid);
        Some(self.snapshot.insert(payment))
    }

    /// Record a payment made for a bill and mark the bill Paid
    ///
    /// Returns None, changing nothing, when the bill doesn't exist.
    pub fn record_bill_payment(
        &mut self,
        bill_id: &BillId,
        details: PaymentDetails,
    ) -> Option<Record<PaymentMade>> {
        let Some(bill) = self.snapshot.get::<Bill>(bill_id) else {
            debug!(%bill_id, "payment for unknown bill ignored");
            return None;
        };

        let payment = PaymentMade {
            payment_id: display_number("PMT", self.snapshot.payments_made.len(), PAYMENT_NUMBER_BASE),
            vendor_id: bill.data.vendor_id.clone(),
            bill_id: bill_id.clone(),
            date: details.date,
            method: details.method,
            amount: details.amount,
        };

        self.snapshot
            .update::<Bill, _>(bill_id, |bill| bill.status = BillStatus::Paid);
        Some(self.snapshot.insert(payment))
    }
}
