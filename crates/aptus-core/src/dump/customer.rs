use aptus_browser::Browser;
use tracing::info;

use crate::error::Result;
use crate::extract::DetailTable;
use crate::links::CUSTOMER;
use crate::navigator::{landed_on, Navigator};
use crate::records::{Customer, CustomerDetails, Lookup};

use super::{dump_customer_contracts, dump_customer_keys, dump_customer_notes, dump_entry_phone};

/// Rows of the customer details table.
pub const CUSTOMER_LAYOUT: &[&str] = &[
    "Name",
    "Fritextf_lt_1",
    "Fritextf_lt_2",
    "Fritextf_lt_3",
    "Fritextf_lt_4",
    "IsCompany",
];

/// Dump a customer with everything attached to it.
///
/// Ids the portal does not know redirect away from the details page and come
/// back as [`Lookup::Absent`].
pub async fn dump_customer<B: Browser>(
    nav: &mut Navigator<B>,
    id: u32,
) -> Result<Lookup<Customer>> {
    let path = CUSTOMER.details_path(id);
    let url = nav.open(&path).await?;

    if !landed_on(&url, &path) {
        info!("Customer ID: {} does not exist", id);
        return Ok(Lookup::Absent);
    }

    info!("Customer ID: {}", id);

    let details = dump_customer_details(nav.browser(), id).await?;
    let keys = dump_customer_keys(nav, id).await?;
    let contracts = dump_customer_contracts(nav, id).await?;
    let entry_phone = dump_entry_phone(nav, id).await?.into_option();
    let notes = dump_customer_notes(nav, id).await?;

    Ok(Lookup::Found(Customer {
        id,
        details,
        keys,
        contracts,
        entry_phone,
        notes,
    }))
}

/// Read the details table of the customer page the browser is on.
pub async fn dump_customer_details<B: Browser + ?Sized>(
    browser: &B,
    id: u32,
) -> Result<CustomerDetails> {
    let table = DetailTable::load(browser, CUSTOMER_LAYOUT, format!("customer {}", id)).await?;

    Ok(CustomerDetails {
        name: table.text("Name").await?,
        free_text1: table.text("Fritextf_lt_1").await?,
        free_text2: table.text("Fritextf_lt_2").await?,
        free_text3: table.text("Fritextf_lt_3").await?,
        free_text4: table.text("Fritextf_lt_4").await?,
        is_company: table.flag("IsCompany").await?,
    })
}
