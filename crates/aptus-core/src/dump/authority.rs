use aptus_browser::{Browser, By};
use tracing::info;

use crate::error::Result;
use crate::extract::{extract_cell, Text};
use crate::links::AUTHORITY;
use crate::navigator::Navigator;
use crate::records::Authority;

use super::linked_rows;

/// Time zone cells on an authority details page.
const TIMEZONE_CELLS: &str = "div.listTableDiv > div > table.listTable > tbody > tr > td";

/// `(id, name)` of every authority on the index page, in page order.
pub async fn dump_authority_index<B: Browser>(
    nav: &mut Navigator<B>,
) -> Result<Vec<(String, String)>> {
    nav.open("Authority/Index").await?;
    let browser = nav.browser();

    let mut authorities = Vec::new();
    for (row, id) in linked_rows(browser, &AUTHORITY).await? {
        let name_cell = browser.find_element(Some(row), By::Css("td")).await?;
        let name = extract_cell::<Text, _>(browser, name_cell).await?;
        authorities.push((id, name));
    }

    info!("Authorities: {}", authorities.len());
    Ok(authorities)
}

pub async fn dump_authority<B: Browser>(
    nav: &mut Navigator<B>,
    id: &str,
    name: &str,
) -> Result<Authority> {
    nav.open(&AUTHORITY.details_path(id)).await?;
    let browser = nav.browser();

    let mut timezones = Vec::new();
    for cell in browser.find_elements(None, By::Css(TIMEZONE_CELLS)).await? {
        timezones.push(extract_cell::<Text, _>(browser, cell).await?);
    }

    info!("Authority {}, {}, {} timezones", id, name, timezones.len());

    Ok(Authority {
        id: id.to_string(),
        name: name.to_string(),
        timezones,
    })
}
