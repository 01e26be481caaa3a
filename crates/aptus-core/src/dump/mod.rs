//! Entity dumpers.
//!
//! Every dumper opens the pages it needs through the [`Navigator`] and reads
//! them with the extraction helpers. Dumpers run strictly one after another on
//! the single browser session.
//!
//! [`Navigator`]: crate::navigator::Navigator

mod authority;
mod contract;
mod customer;
mod entry_phone;
mod key;
mod note;

pub use authority::{dump_authority, dump_authority_index};
pub use contract::{dump_contract, dump_customer_contracts, CONTRACT_LAYOUT};
pub use customer::{dump_customer, dump_customer_details, CUSTOMER_LAYOUT};
pub use entry_phone::{dump_entry_phone, ENTRY_PHONE_LAYOUT};
pub use key::{dump_customer_keys, dump_key, KEY_LAYOUT};
pub use note::dump_customer_notes;

use aptus_browser::{Browser, Element};
use tracing::debug;

use crate::error::Result;
use crate::extract::{extract_table_rows, LIST_ROWS};
use crate::links::DetailLink;

/// List rows whose `onclick` links to a `link` details page, with the id.
///
/// Rows without a matching handler (headers, footers) are skipped.
pub(crate) async fn linked_rows<B: Browser + ?Sized>(
    browser: &B,
    link: &DetailLink,
) -> Result<Vec<(Element, String)>> {
    let mut linked = Vec::new();
    for row in extract_table_rows(browser, LIST_ROWS).await? {
        let Some(onclick) = browser.attribute(row, "onclick").await? else {
            continue;
        };
        if let Some(id) = link.id_from_onclick(&onclick) {
            linked.push((row, id));
        }
    }
    debug!("{} rows link to {}", linked.len(), link.section());
    Ok(linked)
}

#[cfg(test)]
#[path = "dump_tests.rs"]
mod tests;
