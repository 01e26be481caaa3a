//! In-memory [`Browser`] serving static portal pages.
//!
//! Pages are parsed with `scraper` on every call; an [`Element`] is the
//! position of the element in document order, so handles stay valid until the
//! page changes, like node ids in the real browser.

use std::collections::HashMap;

use aptus_browser::{Browser, BrowserError, By, Element};
use async_trait::async_trait;
use parking_lot::Mutex;
use scraper::{ElementRef, Html, Selector};

pub const BASE: &str = "https://aptus.example.com/AptusPortal";
pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "hemligt";

const LOGIN_PATH: &str = "Account/Login";
const HOME_PATH: &str = "Home/Index";
const SAVED_PATH: &str = "Message/Saved";

const LOGIN_PAGE: &str = r#"<html><body><form>
<input id="Username" name="Username" type="text">
<input id="Password" name="Password" type="password">
<button id="btnLogin" type="submit">Logga in</button>
</form></body></html>"#;

const SAVED_PAGE: &str =
    r#"<html><body><div class="message"><div class="messageOk">Sparat</div></div></body></html>"#;

const EMPTY_PAGE: &str = "<html><body></body></html>";

struct FakeState {
    pages: HashMap<String, String>,
    redirects: HashMap<String, String>,
    require_login: bool,
    logged_in: bool,
    ack_submit: bool,
    current: String,
    values: HashMap<usize, String>,
    navigations: Vec<String>,
    set_values: Vec<(String, String)>,
    clicks: Vec<String>,
    closed: bool,
}

impl FakeState {
    fn html(&self) -> String {
        if let Some(html) = self.pages.get(&self.current) {
            return html.clone();
        }
        match self.current.as_str() {
            LOGIN_PATH => LOGIN_PAGE.to_string(),
            SAVED_PATH => SAVED_PAGE.to_string(),
            _ => EMPTY_PAGE.to_string(),
        }
    }

    fn load(&mut self, path: String) {
        self.current = path;
        self.values.clear();
    }
}

pub struct FakeBrowser {
    state: Mutex<FakeState>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                pages: HashMap::new(),
                redirects: HashMap::new(),
                require_login: false,
                logged_in: false,
                ack_submit: true,
                current: String::new(),
                values: HashMap::new(),
                navigations: Vec::new(),
                set_values: Vec::new(),
                clicks: Vec::new(),
                closed: false,
            }),
        }
    }

    /// Serve `html` at `path` (relative to [`BASE`]).
    pub fn page(self, path: &str, html: impl Into<String>) -> Self {
        self.state.lock().pages.insert(path.to_string(), html.into());
        self
    }

    /// Send requests for `from` to `to`.
    pub fn redirect(self, from: &str, to: &str) -> Self {
        self.state
            .lock()
            .redirects
            .insert(from.to_string(), to.to_string());
        self
    }

    /// Bounce every request to the login page until logged in.
    pub fn require_login(self) -> Self {
        self.state.lock().require_login = true;
        self
    }

    /// Leave the edit page without a confirmation when the form is submitted.
    pub fn reject_submit(self) -> Self {
        self.state.lock().ack_submit = false;
        self
    }

    /// Drop the portal session, as when it times out between pages.
    pub fn expire_session(&self) {
        let mut state = self.state.lock();
        state.require_login = true;
        state.logged_in = false;
    }

    /// Replace the page at `path`, e.g. to simulate a saved edit.
    pub fn set_page(&self, path: &str, html: impl Into<String>) {
        self.state.lock().pages.insert(path.to_string(), html.into());
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().navigations.clone()
    }

    /// `(element id, value)` for every `set_value` call.
    pub fn set_values(&self) -> Vec<(String, String)> {
        self.state.lock().set_values.clone()
    }

    /// Ids of clicked elements.
    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().clicks.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    fn with_document<R>(
        &self,
        f: impl for<'h> FnOnce(&'h Html, &[ElementRef<'h>], &mut FakeState) -> Result<R, BrowserError>,
    ) -> Result<R, BrowserError> {
        let mut state = self.state.lock();
        let html = Html::parse_document(&state.html());
        let all_selector = Selector::parse("*").unwrap();
        let all: Vec<ElementRef<'_>> = html.select(&all_selector).collect();
        f(&html, all.as_slice(), &mut *state)
    }

    fn lookup<'a>(all: &[ElementRef<'a>], element: Element) -> Result<ElementRef<'a>, BrowserError> {
        usize::try_from(element.id())
            .ok()
            .and_then(|index| all.get(index).copied())
            .ok_or(BrowserError::StaleElement(element.id()))
    }

    fn current_value(all: &[ElementRef<'_>], state: &FakeState, id: &str) -> String {
        all.iter()
            .position(|e| e.value().attr("id") == Some(id))
            .map(|index| {
                state
                    .values
                    .get(&index)
                    .cloned()
                    .or_else(|| all[index].value().attr("value").map(str::to_string))
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let path = url
            .strip_prefix(BASE)
            .unwrap_or(url)
            .trim_start_matches('/')
            .to_string();

        let mut state = self.state.lock();
        state.navigations.push(path.clone());

        let target = if state.require_login && !state.logged_in {
            LOGIN_PATH.to_string()
        } else {
            state.redirects.get(&path).cloned().unwrap_or(path)
        };
        state.load(target);
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        Ok(format!("{}/{}", BASE, self.state.lock().current))
    }

    async fn find_element(
        &self,
        scope: Option<Element>,
        by: By<'_>,
    ) -> Result<Element, BrowserError> {
        self.find_elements(scope, by)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BrowserError::ElementNotFound(by.to_string()))
    }

    async fn find_elements(
        &self,
        scope: Option<Element>,
        by: By<'_>,
    ) -> Result<Vec<Element>, BrowserError> {
        let selector = Selector::parse(&by.to_css())
            .map_err(|e| BrowserError::ActionFailed(format!("bad selector {}: {:?}", by, e)))?;

        self.with_document(|html, all, _| {
            let found: Vec<ElementRef<'_>> = match scope {
                None => html.select(&selector).collect(),
                Some(scope) => Self::lookup(all, scope)?.select(&selector).collect(),
            };

            Ok(found
                .iter()
                .filter_map(|m| all.iter().position(|e| std::ptr::eq(e.value(), m.value())))
                .map(|index| Element::new(index as i64))
                .collect())
        })
    }

    async fn attribute(
        &self,
        element: Element,
        name: &str,
    ) -> Result<Option<String>, BrowserError> {
        self.with_document(|_, all, _| {
            Ok(Self::lookup(all, element)?
                .value()
                .attr(name)
                .map(str::to_string))
        })
    }

    async fn text(&self, element: Element) -> Result<String, BrowserError> {
        self.with_document(|_, all, _| Ok(Self::lookup(all, element)?.text().collect()))
    }

    async fn value(&self, element: Element) -> Result<String, BrowserError> {
        self.with_document(|_, all, state| {
            let node = Self::lookup(all, element)?;
            let index = element.id() as usize;
            Ok(state
                .values
                .get(&index)
                .cloned()
                .or_else(|| node.value().attr("value").map(str::to_string))
                .unwrap_or_default())
        })
    }

    async fn set_value(&self, element: Element, value: &str) -> Result<(), BrowserError> {
        self.with_document(|_, all, state| {
            let node = Self::lookup(all, element)?;
            let id = node.value().attr("id").unwrap_or("").to_string();
            state.values.insert(element.id() as usize, value.to_string());
            state.set_values.push((id, value.to_string()));
            Ok(())
        })
    }

    async fn click(&self, element: Element) -> Result<(), BrowserError> {
        self.with_document(|_, all, state| {
            let node = Self::lookup(all, element)?;
            let id = node.value().attr("id").unwrap_or("").to_string();
            state.clicks.push(id.clone());

            match id.as_str() {
                "btnLogin" => {
                    let accepted = Self::current_value(all, state, "Username") == USERNAME
                        && Self::current_value(all, state, "Password") == PASSWORD;
                    if accepted {
                        state.logged_in = true;
                        state.load(HOME_PATH.to_string());
                    } else {
                        state.load(LOGIN_PATH.to_string());
                    }
                }
                "theSubmitButton" if state.ack_submit => state.load(SAVED_PATH.to_string()),
                _ => {}
            }
            Ok(())
        })
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.state.lock().closed = true;
        Ok(())
    }
}

/// Markup builders for portal pages.
pub mod pages {
    /// Wrap body markup in a document.
    pub fn page(body: &str) -> String {
        format!("<html><body>{}</body></html>", body)
    }

    /// Label/value detail table.
    pub fn detail_table(rows: &[(&str, &str)]) -> String {
        let rows: String = rows
            .iter()
            .map(|(label, value)| {
                format!(
                    r#"<tr><td><label for="{0}">{0}</label></td><td>  {1}  </td></tr>"#,
                    label, value
                )
            })
            .collect();
        format!(
            r#"<div class="detailsTableDiv"><table class="detailsTable"><tbody>{}</tbody></table></div>"#,
            rows
        )
    }

    /// Edit form: one text input per label, plus the save button.
    pub fn edit_form(fields: &[(&str, &str)]) -> String {
        let rows: String = fields
            .iter()
            .map(|(label, value)| {
                format!(
                    r#"<tr><td><label for="{0}">{0}</label></td><td><input id="{0}" name="{0}" type="text" value="{1}"></td></tr>"#,
                    label, value
                )
            })
            .collect();
        format!(
            r#"<div class="detailsTableDiv"><table class="detailsTable"><tbody>{}</tbody></table></div><input type="submit" id="theSubmitButton" value="Spara">"#,
            rows
        )
    }

    /// List table with a header row. Rows with an `onclick` link to details.
    pub fn list_table(header: &[&str], rows: &[(Option<&str>, Vec<&str>)]) -> String {
        let header: String = header.iter().map(|h| format!("<th>{}</th>", h)).collect();
        let rows: String = rows
            .iter()
            .map(|(onclick, cells)| {
                let cells: String = cells.iter().map(|c| format!("<td>{}</td>", c)).collect();
                match onclick {
                    Some(onclick) => format!(r#"<tr onclick="{}">{}</tr>"#, onclick, cells),
                    None => format!("<tr>{}</tr>", cells),
                }
            })
            .collect();
        format!(
            r#"<div class="listTableDiv"><table class="listTable"><tbody><tr>{}</tr>{}</tbody></table></div>"#,
            header, rows
        )
    }

    /// List table without any header row.
    pub fn headerless_list_table() -> String {
        r#"<div class="listTableDiv"><table class="listTable"><tbody></tbody></table></div>"#
            .to_string()
    }

    /// `onclick` handler the portal puts on index rows.
    pub fn details_onclick(section: &str, id: &str) -> String {
        format!(
            "document.location.href='/AptusPortal/{}/Details/{}'",
            section, id
        )
    }

    /// Time zone cells of an authority details page.
    pub fn timezone_table(timezones: &[&str]) -> String {
        let rows: String = timezones
            .iter()
            .map(|t| format!("<tr><td> {} </td></tr>", t))
            .collect();
        format!(
            r#"<div class="listTableDiv"><div><table class="listTable"><tbody>{}</tbody></table></div></div>"#,
            rows
        )
    }
}

/// Ready-made portal pages for dumper, orchestrator and updater tests.
pub mod fixtures {
    use super::pages::{detail_table, details_onclick, list_table, page};
    use super::FakeBrowser;

    pub fn customer_details(name: &str) -> String {
        page(&detail_table(&[
            ("Name", name),
            ("Fritextf_lt_1", "Trappa 2"),
            ("Fritextf_lt_2", ""),
            ("Fritextf_lt_3", ""),
            ("Fritextf_lt_4", ""),
            ("IsCompany", "Nej"),
        ]))
    }

    const KEY_ROWS: [(&str, &str); 10] = [
        ("Name", "Bricka"),
        ("CardLabel", "B-17"),
        ("Card", "0004711"),
        ("Code", "1234"),
        ("Start", "2021-01-01"),
        ("Stop", ""),
        ("CreatedTime", "2021-01-01 08:00"),
        ("Blocked", "Nej"),
        ("LimitedLogging", "Ja"),
        ("Fritextf_lt_1", "Lgh 1101"),
    ];

    fn permissions() -> String {
        list_table(
            &["Behörighet", "Start", "Stopp", "Spärrad"],
            &[
                (None, vec!["Tvättstuga", "", "", "Nej"]),
                (None, vec!["Garage", "2021-01-01", "2021-12-31", "Ja"]),
            ],
        )
    }

    pub fn key_details() -> String {
        page(&format!("{}{}", detail_table(&KEY_ROWS), permissions()))
    }

    /// Key details page that lost its last row.
    pub fn key_details_nine_rows() -> String {
        page(&format!("{}{}", detail_table(&KEY_ROWS[..9]), permissions()))
    }

    pub fn contract_details() -> String {
        page(&detail_table(&[
            ("StartDate", "2019-04-01"),
            ("EndDate", ""),
            ("ObjectName", "1101"),
            ("EntryPhoneCallCode", "0112"),
            ("Floor", "1"),
            ("FloorText", "1 tr"),
            ("ApartmentNo", "1101"),
            ("AddressName", "Storgatan 1"),
        ]))
    }

    pub fn entry_phone_details() -> String {
        let names = list_table(
            &["Förnamn", "Efternamn", "Telefon", "Anropskod", "Visa"],
            &[(None, vec!["Åsa", "Ek", "0701234567", "0112", "Ja"])],
        );
        let details = detail_table(&[
            ("ObjectName", "1101"),
            ("PhoneNumber", "0701234567"),
            ("FirstName1", "Åsa"),
            ("Surname1", "Ek"),
            ("FirstName2", ""),
            ("Surname2", ""),
            ("ShowInEntryPhoneDisplay", "Ja"),
            ("ApartmentPhonePresent", "Nej"),
        ]);
        page(&format!("{}{}", names, details))
    }

    /// Index page listing `ids` of `section`, plus a header row.
    pub fn index(section: &str, ids: &[&str]) -> String {
        let onclicks: Vec<String> = ids.iter().map(|id| details_onclick(section, id)).collect();
        let rows: Vec<(Option<&str>, Vec<&str>)> = onclicks
            .iter()
            .zip(ids)
            .map(|(onclick, id)| (Some(onclick.as_str()), vec![*id]))
            .collect();
        page(&list_table(&["Namn"], &rows))
    }

    pub fn notes(rows: &[(&str, &str, &str)]) -> String {
        let rows: Vec<(Option<&str>, Vec<&str>)> = rows
            .iter()
            .map(|(note, created, operator)| (None, vec![*note, *created, *operator, ""]))
            .collect();
        page(&list_table(&["Notering", "Skapad", "Operatör", ""], &rows))
    }

    /// Register customer `id` with the given keys, one contract, one note and
    /// no entry phone.
    pub fn with_customer(browser: FakeBrowser, id: u32, key_ids: &[&str]) -> FakeBrowser {
        let mut browser = browser
            .page(
                &format!("Customer/Details/{}", id),
                customer_details(&format!("Kund {}", id)),
            )
            .page(
                &format!("CustomerKeys/Index/{}", id),
                index("CustomerKeys", key_ids),
            )
            .page(
                &format!("CustomerContract/Index/{}", id),
                index("CustomerContract", &["9000"]),
            )
            .page("CustomerContract/Details/9000", contract_details())
            .page(
                &format!("CustomerNote/Index/{}", id),
                notes(&[("Ny bricka", "2022-03-01", "admin")]),
            );

        for key_id in key_ids {
            browser = browser.page(&format!("CustomerKeys/Details/{}", key_id), key_details());
        }
        browser
    }

    /// Make customer `id` unknown: its details page redirects to the index.
    pub fn without_customer(browser: FakeBrowser, id: u32) -> FakeBrowser {
        browser.redirect(&format!("Customer/Details/{}", id), "Customer/Index")
    }
}
