//! Whole-run dumps: every authority, every customer in the configured range.

use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use aptus_browser::Browser;
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, info};

use crate::dump::{dump_authority, dump_authority_index, dump_customer};
use crate::error::Result;
use crate::navigator::Navigator;
use crate::records::{Authority, Customer, Lookup};

/// A group of records written to one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DumpFamily {
    Authorities,
    Customers,
}

impl DumpFamily {
    /// All families, in the order they are dumped.
    pub const ALL: [DumpFamily; 2] = [DumpFamily::Authorities, DumpFamily::Customers];

    pub fn as_str(&self) -> &'static str {
        match self {
            DumpFamily::Authorities => "authorities",
            DumpFamily::Customers => "customers",
        }
    }

    /// Name of the document inside the dump directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            DumpFamily::Authorities => "authorities_dump.json",
            DumpFamily::Customers => "customer_dump.json",
        }
    }
}

impl fmt::Display for DumpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DumpFamily {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "authorities" => Ok(DumpFamily::Authorities),
            "customers" => Ok(DumpFamily::Customers),
            other => Err(format!(
                "unknown dump family '{}', expected authorities or customers",
                other
            )),
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, Default)]
pub struct DumpSummary {
    pub dump_dir: PathBuf,
    /// Authorities written, if that family ran.
    pub authorities: Option<usize>,
    /// Customers written, if that family ran.
    pub customers: Option<usize>,
    /// Customer ids in range that do not exist.
    pub absent_customers: usize,
    pub files: Vec<PathBuf>,
    pub logins: u32,
}

/// Runs dump families over one navigator and writes their documents.
pub struct Orchestrator<'a, B> {
    nav: &'a mut Navigator<B>,
    customer_ids: Range<u32>,
    dump_root: PathBuf,
}

impl<'a, B: Browser> Orchestrator<'a, B> {
    pub fn new(nav: &'a mut Navigator<B>, customer_ids: Range<u32>, dump_root: impl Into<PathBuf>) -> Self {
        Self {
            nav,
            customer_ids,
            dump_root: dump_root.into(),
        }
    }

    /// Dump the given families (all of them when empty) into a fresh dump
    /// directory.
    ///
    /// A family's document is written only once the whole family has been
    /// dumped; an error leaves no file behind for it.
    pub async fn dump_all(&mut self, families: &[DumpFamily]) -> Result<DumpSummary> {
        let mut families = if families.is_empty() {
            DumpFamily::ALL.to_vec()
        } else {
            families.to_vec()
        };
        families.sort();
        families.dedup();

        let dump_dir = create_dump_dir(&self.dump_root, Local::now()).await?;
        info!("Dumping {:?} into {}", families, dump_dir.display());

        let mut summary = DumpSummary {
            dump_dir: dump_dir.clone(),
            ..Default::default()
        };

        for family in families {
            let path = dump_dir.join(family.file_name());
            match family {
                DumpFamily::Authorities => {
                    let authorities = self.dump_authorities().await?;
                    write_document(&path, &authorities).await?;
                    summary.authorities = Some(authorities.len());
                }
                DumpFamily::Customers => {
                    let (customers, absent) = self.dump_customers().await?;
                    write_document(&path, &customers).await?;
                    summary.customers = Some(customers.len());
                    summary.absent_customers = absent;
                }
            }
            info!("Wrote {}", path.display());
            summary.files.push(path);
        }

        summary.logins = self.nav.logins();
        debug!("Session {:?} after {} logins", self.nav.state(), summary.logins);
        Ok(summary)
    }

    /// Every authority on the index page, in page order.
    pub async fn dump_authorities(&mut self) -> Result<Vec<Authority>> {
        let index = dump_authority_index(self.nav).await?;

        let mut authorities = Vec::with_capacity(index.len());
        for (id, name) in &index {
            authorities.push(dump_authority(self.nav, id, name).await?);
        }
        Ok(authorities)
    }

    /// Every existing customer in the id range, ascending, and the number of
    /// ids that turned out not to exist.
    pub async fn dump_customers(&mut self) -> Result<(Vec<Customer>, usize)> {
        let mut customers = Vec::new();
        let mut absent = 0;

        for id in self.customer_ids.clone() {
            match dump_customer(self.nav, id).await? {
                Lookup::Found(customer) => customers.push(customer),
                Lookup::Absent => absent += 1,
            }
        }

        info!("Customers: {} ({} ids without customer)", customers.len(), absent);
        Ok((customers, absent))
    }
}

/// Directory name for a run started at `now`, e.g. `2024-05-01-0930`.
pub fn dump_dir_name(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d-%H%M").to_string()
}

/// Create (or reuse) `<root>/<YYYY-MM-DD-HHMM>`.
pub async fn create_dump_dir(root: &Path, now: DateTime<Local>) -> Result<PathBuf> {
    let dir = root.join(dump_dir_name(now));
    tokio::fs::create_dir_all(&dir).await?;
    Ok(dir)
}

/// Write `value` as pretty-printed JSON (two-space indent, UTF-8 as is).
pub async fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
