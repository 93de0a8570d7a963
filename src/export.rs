// 📤 Export - CSV and rendered text reports
//
// Every calculator output projects itself through `Report`: a block of
// labelled summary values and an optional table. Numbers are formatted to
// two decimals before they leave the crate, so what is exported is what
// was displayed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Display projection shared by all calculator outputs
pub trait Report {
    /// Labelled headline values
    fn summary(&self) -> Vec<(String, String)>;

    /// Table header row (empty when the output has no table)
    fn headers(&self) -> Vec<String> {
        Vec::new()
    }

    /// Table body, already formatted
    fn rows(&self) -> Vec<Vec<String>> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Text,
}

impl ExportFormat {
    /// Guess from a file extension (".csv" → Csv, anything else → Text)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Text,
        }
    }
}

/// Two-decimal formatting used by every projection
pub fn fmt2(value: f64) -> String {
    let v = format!("{:.2}", value);
    if v == "-0.00" {
        "0.00".to_string()
    } else {
        v
    }
}

/// "$1,234.56" style money for summaries
pub fn money(value: f64) -> String {
    let formatted = fmt2(value.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

pub fn percent(value: f64) -> String {
    format!("{}%", fmt2(value))
}

/// Write the table (header row + rows) as CSV. Tables-less reports export
/// their summary as a two-column Field,Value table instead.
pub fn write_csv<W: Write>(writer: W, report: &dyn Report) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let headers = report.headers();

    if headers.is_empty() {
        wtr.write_record(["Field", "Value"])?;
        for (label, value) in report.summary() {
            wtr.write_record([label, value])?;
        }
    } else {
        wtr.write_record(&headers)?;
        for row in report.rows() {
            wtr.write_record(&row)?;
        }
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

pub fn csv_string(report: &dyn Report) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, report)?;
    String::from_utf8(buffer).context("CSV output was not UTF-8")
}

/// Plain-text report: title, summary block, aligned table
pub fn render_text_report(title: &str, report: &dyn Report) -> String {
    let mut out = String::new();
    let rule = "━".repeat(title.chars().count().max(40));

    out.push_str(title);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    let summary = report.summary();
    let label_width = summary.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    for (label, value) in &summary {
        out.push_str(&format!("{:<width$}  {}\n", label, value, width = label_width));
    }

    let headers = report.headers();
    if !headers.is_empty() {
        let rows = report.rows();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let line = |cells: &[String]| {
            cells
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{:>width$}", c, width = widths.get(i).copied().unwrap_or(0)))
                .collect::<Vec<_>>()
                .join("  ")
        };

        out.push('\n');
        out.push_str(&line(&headers));
        out.push('\n');
        out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
        out.push('\n');
        for row in &rows {
            out.push_str(&line(row));
            out.push('\n');
        }
    }

    out
}

/// Write `report` to `path` in the requested format, creating parent dirs
pub fn export_to_file(path: &Path, format: ExportFormat, title: &str, report: &dyn Report) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create export directory: {:?}", parent))?;
        }
    }

    match format {
        ExportFormat::Csv => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create CSV file: {:?}", path))?;
            write_csv(file, report)?;
        }
        ExportFormat::Text => {
            fs::write(path, render_text_report(title, report))
                .with_context(|| format!("Failed to write report: {:?}", path))?;
        }
    }

    tracing::info!(path = %path.display(), ?format, "exported report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        rows: Vec<(u32, f64, f64)>,
    }

    impl Report for Sample {
        fn summary(&self) -> Vec<(String, String)> {
            vec![
                ("Total".to_string(), money(1234567.891)),
                ("Rate".to_string(), percent(6.0)),
            ]
        }

        fn headers(&self) -> Vec<String> {
            vec!["Period".into(), "Interest".into(), "Balance".into()]
        }

        fn rows(&self) -> Vec<Vec<String>> {
            self.rows
                .iter()
                .map(|(p, i, b)| vec![p.to_string(), fmt2(*i), fmt2(*b)])
                .collect()
        }
    }

    struct SummaryOnly;

    impl Report for SummaryOnly {
        fn summary(&self) -> Vec<(String, String)> {
            vec![("Reversal potential".to_string(), "-64.95 mV".to_string())]
        }
    }

    fn sample() -> Sample {
        Sample {
            rows: vec![(1, 50.004, 10_050.0), (2, 50.2549, 10_100.25)],
        }
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234567.891), "$1,234,567.89");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(-42.5), "-$42.50");
        assert_eq!(money(999.999), "$1,000.00");
        assert_eq!(fmt2(-0.001), "0.00");
    }

    #[test]
    fn test_csv_round_trips_displayed_values() {
        let report = sample();
        let csv_text = csv_string(&report).unwrap();

        let mut rdr = csv::Reader::from_reader(csv_text.as_bytes());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["Period", "Interest", "Balance"]);

        let parsed: Vec<Vec<f64>> = rdr
            .records()
            .map(|r| r.unwrap().iter().map(|c| c.parse::<f64>().unwrap()).collect())
            .collect();

        for (row, (p, i, b)) in parsed.iter().zip(&report.rows) {
            assert_eq!(row[0], *p as f64);
            assert!((row[1] - i).abs() <= 0.005 + 1e-9);
            assert!((row[2] - b).abs() <= 0.005 + 1e-9);
        }
        assert_eq!(parsed[1][1], 50.25);
    }

    #[test]
    fn test_csv_for_summary_only_report() {
        let csv_text = csv_string(&SummaryOnly).unwrap();
        assert_eq!(csv_text, "Field,Value\nReversal potential,-64.95 mV\n");
    }

    #[test]
    fn test_text_report_layout() {
        let text = render_text_report("Loan Calculator", &sample());
        assert!(text.starts_with("Loan Calculator\n"));
        assert!(text.contains("Total  $1,234,567.89"));
        assert!(text.contains("Period  Interest   Balance"));
        assert!(text.contains("     2     50.25  10100.25"));
    }

    #[test]
    fn test_export_to_file_picks_format() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("out/loan.csv");
        let txt_path = dir.path().join("loan.txt");

        export_to_file(&csv_path, ExportFormat::from_path(&csv_path), "Loan", &sample()).unwrap();
        export_to_file(&txt_path, ExportFormat::from_path(&txt_path), "Loan", &sample()).unwrap();

        let csv_text = fs::read_to_string(&csv_path).unwrap();
        assert!(csv_text.starts_with("Period,Interest,Balance\n1,50.00,10050.00\n"));
        assert!(fs::read_to_string(&txt_path).unwrap().starts_with("Loan\n"));
    }
}
