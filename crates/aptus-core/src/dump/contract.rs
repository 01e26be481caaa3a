use aptus_browser::Browser;
use tracing::info;

use crate::error::Result;
use crate::extract::DetailTable;
use crate::links::CUSTOMER_CONTRACT;
use crate::navigator::Navigator;
use crate::records::Contract;

use super::linked_rows;

/// Rows of the contract details table.
pub const CONTRACT_LAYOUT: &[&str] = &[
    "StartDate",
    "EndDate",
    "ObjectName",
    "EntryPhoneCallCode",
    "Floor",
    "FloorText",
    "ApartmentNo",
    "AddressName",
];

/// Every contract listed for a customer, in page order.
pub async fn dump_customer_contracts<B: Browser>(
    nav: &mut Navigator<B>,
    customer_id: u32,
) -> Result<Vec<Contract>> {
    nav.open(&CUSTOMER_CONTRACT.index_path(customer_id)).await?;

    let contract_ids: Vec<String> = linked_rows(nav.browser(), &CUSTOMER_CONTRACT)
        .await?
        .into_iter()
        .map(|(_, id)| id)
        .collect();

    info!("Contracts: {}", contract_ids.len());

    let mut contracts = Vec::with_capacity(contract_ids.len());
    for contract_id in &contract_ids {
        contracts.push(dump_contract(nav, contract_id).await?);
    }
    Ok(contracts)
}

pub async fn dump_contract<B: Browser>(nav: &mut Navigator<B>, id: &str) -> Result<Contract> {
    nav.open(&CUSTOMER_CONTRACT.details_path(id)).await?;

    let table = DetailTable::load(nav.browser(), CONTRACT_LAYOUT, format!("contract {}", id)).await?;

    info!("Contract ID: {}", id);

    Ok(Contract {
        id: id.to_string(),
        start_date: table.text("StartDate").await?,
        end_date: table.text("EndDate").await?,
        object_name: table.text("ObjectName").await?,
        entry_phone_call_code: table.text("EntryPhoneCallCode").await?,
        floor: table.text("Floor").await?,
        floor_text: table.text("FloorText").await?,
        apartment_no: table.text("ApartmentNo").await?,
        address_name: table.text("AddressName").await?,
    })
}
