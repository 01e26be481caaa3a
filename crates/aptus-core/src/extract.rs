//! Turning rendered tables into typed values.
//!
//! Detail tables are two-column label/value tables with a fixed row order;
//! list tables have one header row followed by data rows. Both are checked
//! strictly: wrong row counts, column counts or labels abort the run.

use aptus_browser::{Browser, By, Element};

use crate::error::{Result, ScrapeError};

/// Rows of the label/value table on detail and edit pages.
pub const DETAIL_ROWS: &str = "div.detailsTableDiv > table.detailsTable > tbody > tr";

/// Rows of the list table on index pages.
pub const LIST_ROWS: &str = "div.listTableDiv > table.listTable > tbody > tr";

/// How a cell's text is interpreted.
pub trait CellKind {
    type Value;

    fn parse(raw: &str) -> Result<Self::Value>;
}

/// Cell text, trimmed.
pub struct Text;

impl CellKind for Text {
    type Value = String;

    fn parse(raw: &str) -> Result<String> {
        Ok(raw.trim().to_string())
    }
}

/// `Ja`/`Nej` boolean.
pub struct Flag;

impl CellKind for Flag {
    type Value = bool;

    fn parse(raw: &str) -> Result<bool> {
        match raw.trim() {
            "Ja" => Ok(true),
            "Nej" => Ok(false),
            other => Err(ScrapeError::MalformedValue {
                value: other.to_string(),
            }),
        }
    }
}

/// Read a cell as `K`.
///
/// The cell's text content is used, so `&amp;` in the page comes back as `&`,
/// the same as the value of an edit form input.
pub async fn extract_cell<K, B>(browser: &B, cell: Element) -> Result<K::Value>
where
    K: CellKind,
    B: Browser + ?Sized,
{
    let raw = browser.text(cell).await?;
    K::parse(&raw)
}

/// `for` attribute of the label in a row's first cell, if any.
async fn row_label<B: Browser + ?Sized>(browser: &B, label_cell: Element) -> Result<Option<String>> {
    match browser
        .find_elements(Some(label_cell), By::Css("label"))
        .await?
        .first()
    {
        Some(label) => Ok(browser.attribute(*label, "for").await?),
        None => Ok(None),
    }
}

/// Read the value cell of a label/value row after checking its label.
///
/// The label is verified before the value is parsed, so a mislabeled row is
/// always reported as a schema violation.
pub async fn extract_labeled_row<K, B>(
    browser: &B,
    row: Element,
    expected_label: &str,
    context: &str,
) -> Result<K::Value>
where
    K: CellKind,
    B: Browser + ?Sized,
{
    let cells = browser.find_elements(Some(row), By::Css("td")).await?;
    if cells.len() != 2 {
        return Err(ScrapeError::schema(
            context,
            format!(
                "expected 2 cells in {} row, found {}",
                expected_label,
                cells.len()
            ),
        ));
    }

    let actual = row_label(browser, cells[0]).await?;
    if actual.as_deref() != Some(expected_label) {
        return Err(ScrapeError::schema(
            context,
            format!(
                "expected label {}, found {}",
                expected_label,
                actual.as_deref().unwrap_or("<none>")
            ),
        ));
    }

    extract_cell::<K, B>(browser, cells[1]).await
}

/// All rows matching `selector`, in document order.
pub async fn extract_table_rows<B: Browser + ?Sized>(
    browser: &B,
    selector: &str,
) -> Result<Vec<Element>> {
    Ok(browser.find_elements(None, By::Css(selector)).await?)
}

/// The detail table of the current page, checked against a fixed row layout.
pub struct DetailTable<'a, B: ?Sized> {
    browser: &'a B,
    rows: Vec<Element>,
    labels: &'static [&'static str],
    context: String,
}

impl<'a, B: Browser + ?Sized> DetailTable<'a, B> {
    /// Load the detail rows; the count must equal `labels.len()`.
    pub async fn load(
        browser: &'a B,
        labels: &'static [&'static str],
        context: impl Into<String>,
    ) -> Result<Self> {
        let context = context.into();
        let rows = extract_table_rows(browser, DETAIL_ROWS).await?;

        if rows.len() != labels.len() {
            return Err(ScrapeError::schema(
                context,
                format!(
                    "expected {} rows in details table, found {}",
                    labels.len(),
                    rows.len()
                ),
            ));
        }

        Ok(Self {
            browser,
            rows,
            labels,
            context,
        })
    }

    /// Read the row whose position in the layout is that of `label`.
    pub async fn field<K: CellKind>(&self, label: &str) -> Result<K::Value> {
        let index = self
            .labels
            .iter()
            .position(|l| *l == label)
            .ok_or_else(|| {
                ScrapeError::schema(&self.context, format!("{} is not part of the layout", label))
            })?;

        extract_labeled_row::<K, B>(self.browser, self.rows[index], label, &self.context).await
    }

    pub async fn text(&self, label: &str) -> Result<String> {
        self.field::<Text>(label).await
    }

    pub async fn flag(&self, label: &str) -> Result<bool> {
        self.field::<Flag>(label).await
    }
}

/// List-table rows with the header row dropped.
///
/// A list without any row has lost its header and is a shape violation.
pub async fn list_rows_without_header<B: Browser + ?Sized>(
    browser: &B,
    context: &str,
) -> Result<Vec<Element>> {
    let mut rows = extract_table_rows(browser, LIST_ROWS).await?;
    if rows.is_empty() {
        return Err(ScrapeError::schema(context, "list table has no header row"));
    }
    rows.remove(0);
    Ok(rows)
}

/// The `td` cells of a list row; there must be exactly `expected`.
pub async fn row_columns<B: Browser + ?Sized>(
    browser: &B,
    row: Element,
    expected: usize,
    context: &str,
) -> Result<Vec<Element>> {
    let columns = browser.find_elements(Some(row), By::Css("td")).await?;
    if columns.len() != expected {
        return Err(ScrapeError::schema(
            context,
            format!(
                "expected {} columns in list table, found {}",
                expected,
                columns.len()
            ),
        ));
    }
    Ok(columns)
}

/// The single detail row labeled `label`.
pub async fn find_labeled_row<B: Browser + ?Sized>(browser: &B, label: &str) -> Result<Element> {
    let mut matches = Vec::new();

    for row in extract_table_rows(browser, DETAIL_ROWS).await? {
        let labels = browser.find_elements(Some(row), By::Css("td > label")).await?;
        if let Some(first) = labels.first() {
            if browser.attribute(*first, "for").await?.as_deref() == Some(label) {
                matches.push(row);
            }
        }
    }

    match matches.as_slice() {
        [row] => Ok(*row),
        _ => Err(ScrapeError::FieldNotFound {
            label: label.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
