//! The city directory: a load-once table resolving city names to
//! coordinates from a semicolon-delimited dataset.

use once_cell::sync::OnceCell;

use crate::model::{CityRecord, Coordinates};

/// In-memory mapping from normalized city name to coordinates.
///
/// Construct one instance at application start and share it by handle; the
/// table is populated exactly once, on the first [`CityDirectory::load`]
/// call.
#[derive(Debug, Default)]
pub struct CityDirectory {
    records: OnceCell<Vec<CityRecord>>,
}

impl CityDirectory {
    pub fn new() -> Self {
        Self { records: OnceCell::new() }
    }

    /// Parse `text` into the directory.
    ///
    /// The first call wins; later calls return immediately without
    /// re-parsing. Rows that do not split into exactly six `;`-fields are
    /// skipped; the header row and empty lines are discarded.
    pub fn load(&self, text: &str) {
        self.records.get_or_init(|| parse_dataset(text));
    }

    pub fn is_loaded(&self) -> bool {
        self.records.get().is_some()
    }

    pub fn len(&self) -> usize {
        self.records.get().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> &[CityRecord] {
        self.records.get().map_or(&[], Vec::as_slice)
    }

    /// Exact-match lookup by lowercased, trimmed name; the first matching
    /// record wins. Always absent before `load` has run.
    ///
    /// The returned coordinates may be non-finite when the source row
    /// carried unparseable numerics; see [`Coordinates::is_finite`].
    pub fn resolve(&self, city_name: &str) -> Option<Coordinates> {
        let needle = city_name.trim().to_lowercase();
        self.records()
            .iter()
            .find(|record| record.city == needle)
            .map(|record| Coordinates { lat: record.lat, lon: record.lon })
    }
}

/// Single pass over `id;country;city;lat;lon;altitude` rows. The first line
/// is a header and is discarded.
fn parse_dataset(text: &str) -> Vec<CityRecord> {
    let mut records = Vec::new();

    for line in text.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(';').map(str::trim).collect();
        if fields.len() != 6 {
            tracing::debug!(row = line, "skipping malformed dataset row");
            continue;
        }

        records.push(CityRecord {
            id: fields[0].to_string(),
            country: fields[1].to_string(),
            city: fields[2].to_lowercase(),
            lat: parse_numeric(fields[3]),
            lon: parse_numeric(fields[4]),
            altitude: parse_numeric(fields[5]),
        });
    }

    records
}

/// Unparseable numerics become NaN rather than dropping the row; consumers
/// treat non-finite coordinates as absent.
fn parse_numeric(field: &str) -> f64 {
    field.parse().unwrap_or(f64::NAN)
}
