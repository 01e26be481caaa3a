//! Records captured from the portal.
//!
//! Field names serialize in camelCase, matching the dump documents.

use serde::{Deserialize, Serialize};

/// Outcome of a dump whose target may legitimately not exist.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    Absent,
}

impl<T> Lookup<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Absent => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authority {
    pub id: String,
    pub name: String,
    pub timezones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u32,
    pub details: CustomerDetails,
    pub keys: Vec<Key>,
    pub contracts: Vec<Contract>,
    /// `null` when the customer has no entry phone.
    pub entry_phone: Option<EntryPhone>,
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub name: String,
    pub free_text1: String,
    pub free_text2: String,
    pub free_text3: String,
    pub free_text4: String,
    pub is_company: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    pub id: String,
    pub name: String,
    pub card_label: String,
    pub card: String,
    pub code: String,
    pub start: String,
    pub stop: String,
    pub created_time: String,
    pub blocked: bool,
    pub limited_logging: bool,
    pub free_text1: String,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub permission: String,
    pub start: String,
    pub stop: String,
    pub blocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub start_date: String,
    pub end_date: String,
    pub object_name: String,
    pub entry_phone_call_code: String,
    pub floor: String,
    pub floor_text: String,
    pub apartment_no: String,
    pub address_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPhone {
    pub id: String,
    pub object_name: String,
    pub phone_number: String,
    pub first_name1: String,
    pub surname1: String,
    pub first_name2: String,
    pub surname2: String,
    pub show_in_entry_phone_display: bool,
    pub apartment_phone_present: bool,
    pub entry_phone_names: Vec<EntryPhoneName>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPhoneName {
    pub first_name: String,
    pub surname: String,
    pub phone_number: String,
    pub call_code: String,
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub note: String,
    pub created_time: String,
    pub operator: String,
}
