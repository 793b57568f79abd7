//! Schema capability probing.
//!
//! Runs once when the store is opened. The resulting
//! [`SchemaCapabilities`] descriptor is the only thing the review writer
//! ever consults — no per-call introspection.

use std::collections::BTreeSet;

use arcadia_core::review::{RatingAttribute, SchemaCapabilities};

/// Inspect the `reviews` relation and report which optional columns this
/// deployment actually carries.
pub fn probe(conn: &rusqlite::Connection) -> rusqlite::Result<SchemaCapabilities> {
  let schema_version: u32 =
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

  let mut stmt = conn.prepare("PRAGMA table_info(reviews)")?;
  let columns = stmt
    .query_map([], |row| row.get::<_, String>(1))?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut ratings = BTreeSet::new();
  let mut report_count = false;
  for column in &columns {
    if column == "report_count" {
      report_count = true;
    } else if let Some(attr) = RatingAttribute::from_column_name(column) {
      ratings.insert(attr);
    }
  }

  Ok(SchemaCapabilities { schema_version, ratings, report_count })
}
