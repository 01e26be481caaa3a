use aptus_browser::Browser;
use tracing::info;

use crate::error::Result;
use crate::extract::{extract_cell, list_rows_without_header, row_columns, Text};
use crate::links::CUSTOMER_NOTE;
use crate::navigator::Navigator;
use crate::records::Note;

/// note, created time, operator, and a trailing column that is not kept
const NOTE_COLUMNS: usize = 4;

pub async fn dump_customer_notes<B: Browser>(
    nav: &mut Navigator<B>,
    customer_id: u32,
) -> Result<Vec<Note>> {
    nav.open(&CUSTOMER_NOTE.index_path(customer_id)).await?;
    let browser = nav.browser();

    let context = format!("notes of customer {}", customer_id);
    let rows = list_rows_without_header(browser, &context).await?;

    info!("Notes: {}", rows.len());

    let mut notes = Vec::with_capacity(rows.len());
    for row in rows {
        let columns = row_columns(browser, row, NOTE_COLUMNS, &context).await?;
        notes.push(Note {
            note: extract_cell::<Text, _>(browser, columns[0]).await?,
            created_time: extract_cell::<Text, _>(browser, columns[1]).await?,
            operator: extract_cell::<Text, _>(browser, columns[2]).await?,
        });
    }
    Ok(notes)
}
