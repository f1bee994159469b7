//! Customer and vendor CLI commands

use clap::Subcommand;

use crate::display::{format_customer_list, format_vendor_list};
use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::models::{Customer, Vendor};

#[derive(Subcommand)]
pub enum CustomerCommands {
    /// Add a customer
    Add {
        name: String,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        /// Billing address
        #[arg(long)]
        address: Option<String>,
    },
    /// List customers
    List,
}

#[derive(Subcommand)]
pub enum VendorCommands {
    /// Add a vendor
    Add {
        name: String,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        /// Payment terms, e.g. "Net 15"
        #[arg(short, long)]
        terms: Option<String>,
    },
    /// List vendors
    List,
}

pub fn handle_customer_command(ledger: &mut Ledger, cmd: CustomerCommands) -> LedgerResult<()> {
    match cmd {
        CustomerCommands::Add {
            name,
            email,
            phone,
            address,
        } => {
            let mut customer = Customer::new(name);
            if let Some(email) = email {
                customer = customer.with_email(email);
            }
            customer.phone = phone.unwrap_or_default();
            customer.billing_address = address.unwrap_or_default();

            let record = ledger.create(customer)?;
            println!("Added customer: {}", record.data.name);
            println!("  ID: {}", record.id);
        }
        CustomerCommands::List => {
            print!("{}", format_customer_list(&ledger.snapshot().customers));
        }
    }

    Ok(())
}

pub fn handle_vendor_command(ledger: &mut Ledger, cmd: VendorCommands) -> LedgerResult<()> {
    match cmd {
        VendorCommands::Add {
            name,
            email,
            phone,
            terms,
        } => {
            let mut vendor = Vendor::new(name);
            if let Some(email) = email {
                vendor = vendor.with_email(email);
            }
            if let Some(terms) = terms {
                vendor.payment_terms = terms;
            }
            vendor.phone = phone.unwrap_or_default();

            let record = ledger.create(vendor)?;
            println!("Added vendor: {}", record.data.name);
            println!("  ID: {}", record.id);
        }
        VendorCommands::List => {
            print!("{}", format_vendor_list(&ledger.snapshot().vendors));
        }
    }

    Ok(())
}
