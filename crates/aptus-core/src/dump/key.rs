use aptus_browser::Browser;
use tracing::info;

use crate::error::Result;
use crate::extract::{extract_cell, list_rows_without_header, row_columns, DetailTable, Flag, Text};
use crate::links::CUSTOMER_KEYS;
use crate::navigator::Navigator;
use crate::records::{Key, Permission};

use super::linked_rows;

/// Rows of the key details table.
pub const KEY_LAYOUT: &[&str] = &[
    "Name",
    "CardLabel",
    "Card",
    "Code",
    "Start",
    "Stop",
    "CreatedTime",
    "Blocked",
    "LimitedLogging",
    "Fritextf_lt_1",
];

/// permission, start, stop, blocked
const PERMISSION_COLUMNS: usize = 4;

/// Every key listed for a customer, in page order.
pub async fn dump_customer_keys<B: Browser>(
    nav: &mut Navigator<B>,
    customer_id: u32,
) -> Result<Vec<Key>> {
    nav.open(&CUSTOMER_KEYS.index_path(customer_id)).await?;

    let key_ids: Vec<String> = linked_rows(nav.browser(), &CUSTOMER_KEYS)
        .await?
        .into_iter()
        .map(|(_, id)| id)
        .collect();

    info!("Keys: {}", key_ids.len());

    let mut keys = Vec::with_capacity(key_ids.len());
    for key_id in &key_ids {
        keys.push(dump_key(nav, key_id).await?);
    }
    Ok(keys)
}

pub async fn dump_key<B: Browser>(nav: &mut Navigator<B>, id: &str) -> Result<Key> {
    nav.open(&CUSTOMER_KEYS.details_path(id)).await?;
    let browser = nav.browser();

    let context = format!("key {}", id);
    let table = DetailTable::load(browser, KEY_LAYOUT, &context).await?;

    info!("Key ID: {}", id);

    let mut permissions = Vec::new();
    for row in list_rows_without_header(browser, &context).await? {
        let columns = row_columns(browser, row, PERMISSION_COLUMNS, &context).await?;
        permissions.push(Permission {
            permission: extract_cell::<Text, _>(browser, columns[0]).await?,
            start: extract_cell::<Text, _>(browser, columns[1]).await?,
            stop: extract_cell::<Text, _>(browser, columns[2]).await?,
            blocked: extract_cell::<Flag, _>(browser, columns[3]).await?,
        });
    }

    Ok(Key {
        id: id.to_string(),
        name: table.text("Name").await?,
        card_label: table.text("CardLabel").await?,
        card: table.text("Card").await?,
        code: table.text("Code").await?,
        start: table.text("Start").await?,
        stop: table.text("Stop").await?,
        created_time: table.text("CreatedTime").await?,
        blocked: table.flag("Blocked").await?,
        limited_logging: table.flag("LimitedLogging").await?,
        free_text1: table.text("Fritextf_lt_1").await?,
        permissions,
    })
}
