// 🏅 Sports Listings - load, filter, sort, summarize
//
// Entries come from a CSV file with a header row or a JSON array. Filters are
// case-insensitive substring matches; a filter with nothing selected passes
// every entry through unchanged.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportsEntry {
    pub name: String,
    pub country: String,
    pub sport: String,
    #[serde(default)]
    pub team: String,
    /// 1 is best; 0 when unranked
    #[serde(default, deserialize_with = "blank_as_default")]
    pub rank: u32,
    #[serde(default, deserialize_with = "blank_as_default")]
    pub score: f64,
}

/// Empty CSV cells and JSON nulls read as the type's default
fn blank_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// LOADING
// ============================================================================

pub fn load_csv(path: &Path) -> Result<Vec<SportsEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open sports CSV {}", path.display()))?;

    let mut entries = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        let entry: SportsEntry =
            result.with_context(|| format!("Bad sports row {} in {}", i + 2, path.display()))?;
        entries.push(entry);
    }
    Ok(entries)
}

pub fn load_json(path: &Path) -> Result<Vec<SportsEntry>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sports JSON {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid sports JSON in {}", path.display()))
}

/// Dispatch on extension: .json → JSON, anything else → CSV
pub fn load_entries(path: &Path) -> Result<Vec<SportsEntry>> {
    let entries = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path)?,
        _ => load_csv(path)?,
    };
    tracing::info!(path = %path.display(), count = entries.len(), "loaded sports entries");
    Ok(entries)
}

// ============================================================================
// FILTERING
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Match any of these; empty means no country filter
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sport: Option<String>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl EntryFilter {
    pub fn is_empty(&self) -> bool {
        self.countries.iter().all(|c| c.trim().is_empty())
            && non_blank(&self.name).is_none()
            && non_blank(&self.sport).is_none()
    }

    pub fn matches(&self, entry: &SportsEntry) -> bool {
        let countries: Vec<&String> = self.countries.iter().filter(|c| !c.trim().is_empty()).collect();
        if !countries.is_empty() && !countries.iter().any(|c| contains_ci(&entry.country, c)) {
            return false;
        }
        if let Some(name) = non_blank(&self.name) {
            if !contains_ci(&entry.name, name) {
                return false;
            }
        }
        if let Some(sport) = non_blank(&self.sport) {
            if !contains_ci(&entry.sport, sport) {
                return false;
            }
        }
        true
    }
}

pub fn filter_entries(entries: &[SportsEntry], filter: &EntryFilter) -> Vec<SportsEntry> {
    if filter.is_empty() {
        return entries.to_vec();
    }
    entries.iter().filter(|e| filter.matches(e)).cloned().collect()
}

// ============================================================================
// SORTING & SUMMARY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Rank,
    Name,
    Country,
    /// Highest first
    Score,
}

impl SortKey {
    pub fn next(&self) -> Self {
        match self {
            SortKey::Rank => SortKey::Name,
            SortKey::Name => SortKey::Country,
            SortKey::Country => SortKey::Score,
            SortKey::Score => SortKey::Rank,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Rank => "rank",
            SortKey::Name => "name",
            SortKey::Country => "country",
            SortKey::Score => "score",
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Rank
    }
}

/// Stable sort; unranked entries (rank 0) go last when sorting by rank
pub fn sort_entries(entries: &mut [SportsEntry], key: SortKey) {
    match key {
        SortKey::Rank => entries.sort_by_key(|e| if e.rank == 0 { u32::MAX } else { e.rank }),
        SortKey::Name => entries.sort_by_key(|e| e.name.to_lowercase()),
        SortKey::Country => entries.sort_by_key(|e| e.country.to_lowercase()),
        SortKey::Score => entries.sort_by(|a, b| b.score.total_cmp(&a.score)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country: String,
    pub entries: usize,
    /// None when no entry of the country is ranked
    pub best_rank: Option<u32>,
}

pub fn country_summary(entries: &[SportsEntry]) -> Vec<CountrySummary> {
    let mut by_country: BTreeMap<String, CountrySummary> = BTreeMap::new();
    for e in entries {
        let summary = by_country
            .entry(e.country.to_lowercase())
            .or_insert_with(|| CountrySummary {
                country: e.country.clone(),
                entries: 0,
                best_rank: None,
            });
        summary.entries += 1;
        if e.rank > 0 {
            summary.best_rank = Some(summary.best_rank.map_or(e.rank, |r| r.min(e.rank)));
        }
    }
    by_country.into_values().collect()
}

/// Distinct country names, alphabetical
pub fn countries(entries: &[SportsEntry]) -> Vec<String> {
    country_summary(entries).into_iter().map(|s| s.country).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn entry(name: &str, country: &str, sport: &str, rank: u32, score: f64) -> SportsEntry {
        SportsEntry {
            name: name.to_string(),
            country: country.to_string(),
            sport: sport.to_string(),
            team: String::new(),
            rank,
            score,
        }
    }

    fn roster() -> Vec<SportsEntry> {
        vec![
            entry("Ana Costa", "Brazil", "Football", 3, 88.5),
            entry("Liam Smith", "United States", "Basketball", 1, 92.0),
            entry("Kenji Sato", "Japan", "Judo", 2, 90.1),
            entry("Maria Silva", "Brazil", "Volleyball", 0, 75.0),
        ]
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let all = filter_entries(&roster(), &EntryFilter::default());
        assert_eq!(all, roster());

        let blank = EntryFilter {
            countries: vec!["  ".to_string()],
            name: Some(String::new()),
            sport: None,
        };
        assert_eq!(filter_entries(&roster(), &blank).len(), 4);
    }

    #[test]
    fn test_country_match_is_case_insensitive() {
        let filter = EntryFilter {
            countries: vec!["brazil".to_string()],
            ..Default::default()
        };
        let found = filter_entries(&roster(), &filter);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|e| e.country == "Brazil"));
    }

    #[test]
    fn test_any_selected_country_and_name() {
        let filter = EntryFilter {
            countries: vec!["JAPAN".to_string(), "united".to_string()],
            name: Some("sato".to_string()),
            sport: None,
        };
        let found = filter_entries(&roster(), &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Kenji Sato");
    }

    #[test]
    fn test_unknown_country_matches_nothing() {
        let filter = EntryFilter {
            countries: vec!["Atlantis".to_string()],
            ..Default::default()
        };
        assert!(filter_entries(&roster(), &filter).is_empty());
    }

    #[test]
    fn test_sorting() {
        let mut entries = roster();
        sort_entries(&mut entries, SortKey::Rank);
        let ranks: Vec<u32> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 0]);

        sort_entries(&mut entries, SortKey::Score);
        assert_eq!(entries[0].name, "Liam Smith");
        assert_eq!(entries[3].name, "Maria Silva");

        sort_entries(&mut entries, SortKey::Country);
        assert_eq!(entries[0].country, "Brazil");
    }

    #[test]
    fn test_country_summary() {
        let summary = country_summary(&roster());
        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].country, "Brazil");
        assert_eq!(summary[0].entries, 2);
        assert_eq!(summary[0].best_rank, Some(3));
        assert_eq!(countries(&roster()), vec!["Brazil", "Japan", "United States"]);
    }

    #[test]
    fn test_load_csv_and_json() {
        let mut csv_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(csv_file, "name,country,sport,team,rank,score").unwrap();
        writeln!(csv_file, "Ana Costa, Brazil ,Football,Santos,3,88.5").unwrap();
        csv_file.flush().unwrap();

        let entries = load_entries(csv_file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].country, "Brazil");
        assert_eq!(entries[0].team, "Santos");

        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            json_file,
            r#"[{{"name":"Kenji Sato","country":"Japan","sport":"Judo","rank":2}}]"#
        )
        .unwrap();
        json_file.flush().unwrap();

        let entries = load_entries(json_file.path()).unwrap();
        assert_eq!(entries[0].rank, 2);
        assert_eq!(entries[0].score, 0.0);
    }

    #[test]
    fn test_load_csv_blank_rank() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,country,sport,team,rank,score").unwrap();
        writeln!(file, "Maria Silva,Brazil,Volleyball,,,").unwrap();
        writeln!(file, "Ana,Brazil,Football,Santos,2,8.5").unwrap();
        file.flush().unwrap();

        let entries = load_csv(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rank, 0);
        assert_eq!(entries[0].score, 0.0);
        assert_eq!(entries[0].team, "");
        assert_eq!(entries[1].rank, 2);
    }

    #[test]
    fn test_load_csv_bad_row() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,country,sport,team,rank,score").unwrap();
        writeln!(file, "Ana,Brazil,Football,Santos,first,1.0").unwrap();
        file.flush().unwrap();

        let err = load_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("Bad sports row 2"));
    }
}
