//! The ledger: owner of the current snapshot
//!
//! Every mutation runs against a copy of the snapshot. When it succeeds and
//! actually changed something, the copy is persisted and swapped in. A
//! failed save is logged and otherwise ignored; memory stays authoritative.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::error::LedgerResult;
use crate::models::{
    AccountId, Bill, BillId, Budget, Invoice, InvoiceId, Money, PaymentDetails, PaymentMade,
    PaymentReceived, PurchaseOrderId, SalesOrderId,
};
use crate::scheduler::{self, TickReport};
use crate::services::{
    AccountService, BudgetService, CascadeReport, ConversionService, PaymentService,
};
use crate::storage::{load_snapshot, SnapshotStore};
use crate::store::{Entity, EntityKind, Record, Snapshot};

/// Upper bound on scheduler passes in one `catch_up`
pub const MAX_CATCH_UP_TICKS: usize = 1000;

pub struct Ledger {
    snapshot: Snapshot,
    store: Box<dyn SnapshotStore>,
    clock: Box<dyn Clock>,
    loading: bool,
}

impl Ledger {
    /// Load the stored snapshot (or the defaults) and take ownership of the
    /// store and clock
    pub fn open(store: Box<dyn SnapshotStore>, clock: Box<dyn Clock>) -> Self {
        let mut ledger = Self {
            snapshot: Snapshot::default(),
            store,
            clock,
            loading: true,
        };
        ledger.snapshot = load_snapshot(ledger.store.as_ref());
        ledger.loading = false;
        info!(
            accounts = ledger.snapshot.accounts.len(),
            transactions = ledger.snapshot.transactions.len(),
            invoices = ledger.snapshot.invoices.len(),
            "ledger opened"
        );
        ledger
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// True only while the stored snapshot is being read
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Persist `next` and make it current
    fn commit(&mut self, action: &str, next: Snapshot) {
        if let Err(e) = self.store.save(&next) {
            error!(action, error = %e, "failed to persist ledger, keeping changes in memory");
        }
        self.snapshot = next;
        info!(action, "committed");
    }

    fn finish(&mut self, action: &str, next: Snapshot) {
        if next == self.snapshot {
            debug!(action, "no changes");
        } else {
            self.commit(action, next);
        }
    }

    /// Run an infallible change against a copy and commit it if it changed
    fn mutate<R>(&mut self, action: &str, f: impl FnOnce(&mut Snapshot) -> R) -> R {
        let mut next = self.snapshot.clone();
        let result = f(&mut next);
        self.finish(action, next);
        result
    }

    /// Like `mutate`, but an error discards the copy
    fn try_mutate<R>(
        &mut self,
        action: &str,
        f: impl FnOnce(&mut Snapshot) -> LedgerResult<R>,
    ) -> LedgerResult<R> {
        let mut next = self.snapshot.clone();
        let result = f(&mut next)?;
        self.finish(action, next);
        Ok(result)
    }

    // Generic collection operations

    pub fn create<T: Entity>(&mut self, data: T) -> LedgerResult<Record<T>> {
        self.try_mutate("create", |s| s.create::<T>(data))
    }

    pub fn update<T, F>(&mut self, id: &T::Id, f: F) -> Option<Record<T>>
    where
        T: Entity,
        F: FnOnce(&mut T),
    {
        self.mutate("update", |s| s.update::<T, F>(id, f))
    }

    pub fn patch<T: Entity>(&mut self, id: &T::Id, patch: &Value) -> LedgerResult<Option<Record<T>>> {
        self.try_mutate("patch", |s| s.patch::<T>(id, patch))
    }

    pub fn delete<T: Entity>(&mut self, id: &T::Id) -> bool {
        self.mutate("delete", |s| s.delete::<T>(id))
    }

    pub fn import_batch<T: Entity>(&mut self, items: Vec<T>) -> LedgerResult<Vec<Record<T>>> {
        self.try_mutate("import", |s| s.import_batch::<T>(items))
    }

    pub fn create_raw(&mut self, kind: EntityKind, data: Value) -> LedgerResult<Value> {
        self.try_mutate("create", |s| s.create_raw(kind, data))
    }

    pub fn patch_raw(&mut self, kind: EntityKind, id: &str, patch: &Value) -> LedgerResult<Option<Value>> {
        self.try_mutate("patch", |s| s.patch_raw(kind, id, patch))
    }

    pub fn delete_raw(&mut self, kind: EntityKind, id: &str) -> bool {
        self.mutate("delete", |s| s.delete_raw(kind, id))
    }

    pub fn import_raw(&mut self, kind: EntityKind, items: Vec<Value>) -> LedgerResult<Vec<Value>> {
        self.try_mutate("import", |s| s.import_raw(kind, items))
    }

    // Workflows

    /// Record a payment against an invoice and mark it Paid
    pub fn record_payment(
        &mut self,
        invoice_id: &InvoiceId,
        details: PaymentDetails,
    ) -> Option<Record<PaymentReceived>> {
        self.mutate("record_payment", |s| {
            PaymentService::new(s).record_invoice_payment(invoice_id, details)
        })
    }

    /// Record a payment against a bill and mark it Paid
    pub fn record_bill_payment(
        &mut self,
        bill_id: &BillId,
        details: PaymentDetails,
    ) -> Option<Record<PaymentMade>> {
        self.mutate("record_bill_payment", |s| {
            PaymentService::new(s).record_bill_payment(bill_id, details)
        })
    }

    pub fn delete_account_and_transactions(&mut self, account_id: &AccountId) -> CascadeReport {
        self.mutate("delete_account", |s| {
            AccountService::new(s).delete_with_transactions(account_id)
        })
    }

    pub fn add_budget_category(&mut self, category: &str, budget: Money) -> LedgerResult<Budget> {
        self.try_mutate("add_budget_category", |s| {
            BudgetService::new(s).add_category(category, budget)
        })
    }

    /// Returns the number of transactions moved to `Uncategorized`, or None
    /// when the category doesn't exist
    pub fn delete_budget_category(&mut self, category: &str) -> LedgerResult<Option<usize>> {
        self.try_mutate("delete_budget_category", |s| {
            BudgetService::new(s).delete_category(category)
        })
    }

    pub fn set_budget_ceiling(&mut self, category: &str, budget: Money) -> LedgerResult<Option<Budget>> {
        self.try_mutate("set_budget_ceiling", |s| {
            BudgetService::new(s).set_ceiling(category, budget)
        })
    }

    pub fn convert_sales_order_to_invoice(&mut self, id: &SalesOrderId) -> Option<Record<Invoice>> {
        let today = self.today();
        self.mutate("convert_sales_order", |s| {
            ConversionService::new(s, today).sales_order_to_invoice(id)
        })
    }

    pub fn convert_purchase_order_to_bill(&mut self, id: &PurchaseOrderId) -> Option<Record<Bill>> {
        let today = self.today();
        self.mutate("convert_purchase_order", |s| {
            ConversionService::new(s, today).purchase_order_to_bill(id)
        })
    }

    /// Replace everything with the default snapshot
    pub fn reset_all(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear stored ledger");
        }
        self.commit("reset", Snapshot::default());
    }

    // Scheduling

    /// One scheduler pass as of the clock's date
    pub fn refresh(&mut self) -> Option<TickReport> {
        let today = self.today();
        self.tick_at(today)
    }

    /// One scheduler pass as of `today`
    pub fn tick_at(&mut self, today: NaiveDate) -> Option<TickReport> {
        let outcome = scheduler::tick(&self.snapshot, today)?;
        info!(%today, report = %outcome.report, "scheduler tick");
        self.commit("tick", outcome.snapshot);
        Some(outcome.report)
    }

    /// Tick until nothing is due, generating every missed occurrence
    pub fn catch_up(&mut self) -> TickReport {
        let today = self.today();
        let mut total = TickReport::default();
        for _ in 0..MAX_CATCH_UP_TICKS {
            match self.tick_at(today) {
                Some(report) => total += report,
                None => return total,
            }
        }
        warn!(limit = MAX_CATCH_UP_TICKS, "catch-up stopped before the schedule was current");
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open(store: &MemoryStore, today: NaiveDate) -> (Ledger, FixedClock) {
        let clock = FixedClock::new(today);
        let ledger = Ledger::open(Box::new(store.clone()), Box::new(clock.clone()));
        (ledger, clock)
    }

    #[test]
    fn test_open_empty_store() {
        let store = MemoryStore::new();
        let (ledger, _) = open(&store, date(2024, 1, 1));
        assert!(!ledger.is_loading());
        assert_eq!(ledger.snapshot(), &Snapshot::default());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_mutations_persist_and_reload() {
        let store = MemoryStore::new();
        let (mut ledger, _) = open(&store, date(2024, 1, 1));

        let customer = ledger.create(Customer::new("Acme")).unwrap();
        ledger.update::<Customer, _>(&customer.id, |c| c.phone = "555".into());
        assert_eq!(store.save_count(), 2);

        let (reopened, _) = open(&store, date(2024, 1, 1));
        assert_eq!(reopened.snapshot(), ledger.snapshot());
        assert_eq!(reopened.snapshot().customers[0].data.phone, "555");
    }

    #[test]
    fn test_noops_and_failures_do_not_save() {
        let store = MemoryStore::new();
        let (mut ledger, _) = open(&store, date(2024, 1, 1));

        assert!(!ledger.delete::<Vendor>(&VendorId::from_raw("ven-x")));
        assert!(ledger.create(Vendor::new("")).is_err());
        assert!(ledger
            .record_payment(
                &InvoiceId::from_raw("inv-x"),
                PaymentDetails::new(Money::from_dollars(1), date(2024, 1, 1), PaymentMethod::PayPal),
            )
            .is_none());
        assert!(ledger.refresh().is_none());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_save_failure_keeps_memory_authoritative() {
        let store = MemoryStore::new();
        store.set_fail_saves(true);
        let (mut ledger, _) = open(&store, date(2024, 1, 1));

        let record = ledger.create(Customer::new("Acme")).unwrap();
        assert!(ledger.snapshot().get::<Customer>(&record.id).is_some());
        assert!(store.stored().is_none());

        store.set_fail_saves(false);
        ledger.create(Customer::new("Globex")).unwrap();
        let (reopened, _) = open(&store, date(2024, 1, 1));
        assert_eq!(reopened.snapshot().customers.len(), 2);
    }

    #[test]
    fn test_raw_operations_persist() {
        let store = MemoryStore::new();
        let (mut ledger, _) = open(&store, date(2024, 1, 1));

        let created = ledger
            .create_raw(EntityKind::Customers, json!({"name": "Acme"}))
            .unwrap();
        let id = created["id"].as_str().unwrap().to_string();
        ledger
            .patch_raw(EntityKind::Customers, &id, &json!({"email": "a@acme.test"}))
            .unwrap();
        let imported = ledger
            .import_raw(EntityKind::Vendors, vec![json!({"name": "V1"}), json!({"name": "V2"})])
            .unwrap();
        assert_eq!(imported.len(), 2);
        assert!(ledger.delete_raw(EntityKind::Customers, &id));
        assert_eq!(store.save_count(), 4);
    }

    #[test]
    fn test_example_month_of_activity() {
        let store = MemoryStore::new();
        let (mut ledger, clock) = open(&store, date(2024, 1, 1));

        let customer = ledger.create(Customer::new("Acme")).unwrap();
        let mut profile = RecurringInvoice::new(
            customer.id.clone(),
            vec![LineItem::new("Retainer", 1, Money::from_dollars(500)).unwrap()],
            Frequency::Monthly,
            date(2024, 1, 1),
        );
        profile.total = Money::from_dollars(500);
        ledger.create(profile).unwrap();

        let report = ledger.refresh().unwrap();
        assert_eq!(report.invoices_generated, 1);
        let invoice_id = ledger.snapshot().invoices[0].id.clone();
        assert!(ledger.refresh().is_none());

        ledger.update::<Invoice, _>(&invoice_id, |i| i.status = InvoiceStatus::Sent);
        clock.set(date(2024, 2, 1));
        let report = ledger.refresh().unwrap();
        assert_eq!(report.invoices_overdue, 1);
        assert_eq!(report.invoices_generated, 1);

        let payment = ledger
            .record_payment(
                &invoice_id,
                PaymentDetails::new(Money::from_dollars(500), date(2024, 2, 2), PaymentMethod::BankTransfer),
            )
            .unwrap();
        assert_eq!(payment.data.payment_id, "#PAY-100");
        assert_eq!(payment.data.customer_name, "Acme");
        assert_eq!(
            ledger.snapshot().get::<Invoice>(&invoice_id).unwrap().data.status,
            InvoiceStatus::Paid
        );
    }

    #[test]
    fn test_catch_up_backfills_and_terminates() {
        let store = MemoryStore::new();
        let (mut ledger, _) = open(&store, date(2024, 3, 20));
        let account = ledger.create(Account::new("Checking", AccountType::Bank)).unwrap();
        ledger
            .create(RecurringExpense::new(
                "Payroll",
                account.id,
                Money::from_dollars(100),
                Frequency::Weekly,
                date(2024, 3, 1),
            ))
            .unwrap();

        let report = ledger.catch_up();
        // Mar 1, 8, 15
        assert_eq!(report.transactions_generated, 3);
        assert!(ledger.refresh().is_none());
        assert_eq!(ledger.catch_up(), TickReport::default());
    }

    #[test]
    fn test_conversions_use_clock() {
        let store = MemoryStore::new();
        let (mut ledger, _) = open(&store, date(2024, 6, 1));
        let order = SalesOrder::new("#SO-103", CustomerId::from_raw("cus-1"), vec![], date(2024, 5, 1));
        let order_id = ledger.create(order).unwrap().id;

        let invoice = ledger.convert_sales_order_to_invoice(&order_id).unwrap();
        assert_eq!(invoice.data.date, date(2024, 6, 1));
        assert_eq!(invoice.data.due_date, date(2024, 7, 1));
        assert!(ledger.convert_sales_order_to_invoice(&order_id).is_none());

        let po = PurchaseOrder::new("#PO-503", VendorId::from_raw("v"), vec![], date(2024, 5, 1), date(2024, 6, 10));
        let po_id = ledger.create(po).unwrap().id;
        let bill = ledger.convert_purchase_order_to_bill(&po_id).unwrap();
        assert_eq!(bill.data.due_date, date(2024, 6, 10));
    }

    #[test]
    fn test_budget_workflows_and_cascade() {
        let store = MemoryStore::new();
        let (mut ledger, _) = open(&store, date(2024, 1, 1));

        ledger.add_budget_category("Travel", Money::from_dollars(250)).unwrap();
        let account = ledger.create(Account::new("Checking", AccountType::Bank)).unwrap();
        ledger
            .create(
                Transaction::outflow(date(2024, 1, 2), "Flight", Money::from_dollars(200))
                    .in_account(account.id.clone())
                    .in_category("Travel"),
            )
            .unwrap();

        assert_eq!(ledger.delete_budget_category("Travel").unwrap(), Some(1));
        assert_eq!(ledger.snapshot().transactions[0].data.category, UNCATEGORIZED);

        let report = ledger.delete_account_and_transactions(&account.id);
        assert!(report.account_removed);
        assert!(ledger.snapshot().transactions.is_empty());
    }

    #[test]
    fn test_reset_all() {
        let store = MemoryStore::new();
        let (mut ledger, _) = open(&store, date(2024, 1, 1));
        ledger.create(Customer::new("Acme")).unwrap();

        ledger.reset_all();
        assert_eq!(ledger.snapshot(), &Snapshot::default());
        let (reopened, _) = open(&store, date(2024, 1, 1));
        assert_eq!(reopened.snapshot(), &Snapshot::default());
    }
}
