//! Key write-back through the portal's edit form.

use aptus_browser::{Browser, BrowserError, By};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::error::{Result, ScrapeError};
use crate::extract::find_labeled_row;
use crate::links::CUSTOMER_KEYS;
use crate::navigator::Navigator;

/// Confirmation shown after a successful save.
const SAVED_MESSAGE: &str = "div.message > div.messageOk";

const SUBMIT_BUTTON: &str = "theSubmitButton";

/// Desired field values for one key. Fields left out are not touched.
///
/// Unknown fields are ignored, so an edited key dump can be fed back as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyUpdate {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text1: Option<String>,
}

impl KeyUpdate {
    /// `(form label, new value)` for every field present.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Code", &self.code),
            ("Name", &self.name),
            ("CardLabel", &self.card_label),
            ("Fritextf_lt_1", &self.free_text1),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }
}

fn id_from_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(id) => id,
        Id::Number(id) => id.to_string(),
    })
}

/// Parse a JSON array of key updates.
pub fn parse_key_updates(json: &str) -> Result<Vec<KeyUpdate>> {
    Ok(serde_json::from_str(json)?)
}

/// What `update_key` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Every field already had the requested value; nothing was submitted.
    Unchanged,
    /// The form was saved with these fields changed.
    Updated { changed: Vec<String> },
}

/// Bring one key's fields to the requested values.
///
/// The form is only submitted when a field actually differs, so repeating an
/// update is a no-op.
pub async fn update_key<B: Browser>(
    nav: &mut Navigator<B>,
    update: &KeyUpdate,
) -> Result<UpdateOutcome> {
    nav.open(&CUSTOMER_KEYS.edit_path(&update.id)).await?;
    let browser = nav.browser();

    info!("Updating key: {}", update.id);

    let mut changed = Vec::new();
    for (label, new_value) in update.fields() {
        let row = find_labeled_row(browser, label).await?;
        let input = match browser.find_element(Some(row), By::Css("input")).await {
            Ok(input) => input,
            Err(BrowserError::ElementNotFound(_)) => {
                return Err(ScrapeError::FieldNotFound {
                    label: label.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let old_value = browser.value(input).await?;
        if old_value != new_value {
            browser.set_value(input, new_value).await?;
            info!("Updating {} from: {} to: {}", label, old_value, new_value);
            changed.push(label.to_string());
        }
    }

    if changed.is_empty() {
        info!("No changes!");
        return Ok(UpdateOutcome::Unchanged);
    }

    let submit = browser.find_element(None, By::Id(SUBMIT_BUTTON)).await?;
    browser.click(submit).await?;

    match browser.find_element(None, By::Css(SAVED_MESSAGE)).await {
        Ok(_) => {
            info!("Saved successfully!");
            Ok(UpdateOutcome::Updated { changed })
        }
        Err(BrowserError::ElementNotFound(_)) => Err(ScrapeError::WriteNotAcknowledged {
            key_id: update.id.clone(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Apply updates in order, stopping at the first failure.
pub async fn update_keys<B: Browser>(
    nav: &mut Navigator<B>,
    updates: &[KeyUpdate],
) -> Result<Vec<UpdateOutcome>> {
    let mut outcomes = Vec::with_capacity(updates.len());
    for update in updates {
        outcomes.push(update_key(nav, update).await?);
    }
    Ok(outcomes)
}

#[cfg(test)]
#[path = "updater_tests.rs"]
mod tests;
