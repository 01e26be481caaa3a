use aptus_browser::Browser;
use tracing::info;

use crate::error::{Result, ScrapeError};
use crate::extract::{extract_cell, list_rows_without_header, row_columns, DetailTable, Flag, Text};
use crate::links::CUSTOMER_ENTRY_PHONE;
use crate::navigator::{landed_on, Navigator};
use crate::records::{EntryPhone, EntryPhoneName, Lookup};

/// Rows of the entry phone details table.
pub const ENTRY_PHONE_LAYOUT: &[&str] = &[
    "ObjectName",
    "PhoneNumber",
    "FirstName1",
    "Surname1",
    "FirstName2",
    "Surname2",
    "ShowInEntryPhoneDisplay",
    "ApartmentPhonePresent",
];

/// first name, surname, phone number, call code, show
const NAME_COLUMNS: usize = 5;

/// Dump the entry phone of a customer.
///
/// The index page redirects to the entry phone's details page when there is
/// one; staying on the index page means the customer has none.
pub async fn dump_entry_phone<B: Browser>(
    nav: &mut Navigator<B>,
    customer_id: u32,
) -> Result<Lookup<EntryPhone>> {
    let index_path = CUSTOMER_ENTRY_PHONE.index_path(customer_id);
    let url = nav.open(&index_path).await?;

    if landed_on(&url, &index_path) {
        info!("Does not have entry phone");
        return Ok(Lookup::Absent);
    }

    let id = CUSTOMER_ENTRY_PHONE.id_from_url(&url).ok_or_else(|| {
        ScrapeError::schema(
            format!("entry phone of customer {}", customer_id),
            format!("landed on unexpected page {}", url),
        )
    })?;

    info!("Entry phone ID: {}", id);

    let browser = nav.browser();
    let context = format!("entry phone {}", id);

    let mut entry_phone_names = Vec::new();
    for row in list_rows_without_header(browser, &context).await? {
        let columns = row_columns(browser, row, NAME_COLUMNS, &context).await?;
        entry_phone_names.push(EntryPhoneName {
            first_name: extract_cell::<Text, _>(browser, columns[0]).await?,
            surname: extract_cell::<Text, _>(browser, columns[1]).await?,
            phone_number: extract_cell::<Text, _>(browser, columns[2]).await?,
            call_code: extract_cell::<Text, _>(browser, columns[3]).await?,
            show: extract_cell::<Flag, _>(browser, columns[4]).await?,
        });
    }

    let table = DetailTable::load(browser, ENTRY_PHONE_LAYOUT, &context).await?;

    Ok(Lookup::Found(EntryPhone {
        id,
        object_name: table.text("ObjectName").await?,
        phone_number: table.text("PhoneNumber").await?,
        first_name1: table.text("FirstName1").await?,
        surname1: table.text("Surname1").await?,
        first_name2: table.text("FirstName2").await?,
        surname2: table.text("Surname2").await?,
        show_in_entry_phone_display: table.flag("ShowInEntryPhoneDisplay").await?,
        apartment_phone_present: table.flag("ApartmentPhonePresent").await?,
        entry_phone_names,
    }))
}
