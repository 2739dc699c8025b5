use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::{Read, Write};
use uuid::Uuid;

use crate::application::{AppError, TrackerService};
use crate::domain::{format_cents, parse_cents, MovementDraft, MovementKind};

const GRID_HEADER: [&str; 6] = ["id", "date", "category", "concept", "amount", "kind"];

/// Writes a user's movements as an editable CSV grid.
pub struct GridExporter<'a> {
    service: &'a TrackerService,
}

impl<'a> GridExporter<'a> {
    pub fn new(service: &'a TrackerService) -> Self {
        Self { service }
    }

    /// Export the grid. Amounts are written as decimals ("12.50") so the
    /// file is pleasant to edit by hand or in a spreadsheet.
    pub async fn export_movements_csv<W: Write>(&self, user: &str, writer: W) -> Result<usize> {
        let movements = self.service.list_movements(user).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(GRID_HEADER)?;

        let mut count = 0;
        for movement in &movements {
            csv_writer.write_record(&[
                movement.id.to_string(),
                movement.date.to_string(),
                movement.category.clone(),
                movement.concept.clone().unwrap_or_default(),
                format_cents(movement.amount_cents),
                movement.kind.as_str().to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }
}

/// Parses an edited grid back into movement drafts.
///
/// A blank `id` cell marks a fresh row to insert; a populated one targets the
/// existing row for an in-place update. The first malformed line rejects the
/// whole file, matching the all-or-nothing reconcile contract.
pub fn parse_grid<R: Read>(reader: R) -> Result<Vec<MovementDraft>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut drafts = Vec::new();

    for (line_num, result) in csv_reader.records().enumerate() {
        let line = line_num + 2; // header + 0-indexing
        let record = result.with_context(|| format!("CSV parse error on line {}", line))?;

        let id = match record.get(0).unwrap_or("") {
            "" => None,
            raw => Some(
                Uuid::parse_str(raw)
                    .with_context(|| format!("Invalid movement id on line {}", line))?,
            ),
        };

        let date = NaiveDate::parse_from_str(record.get(1).unwrap_or(""), "%Y-%m-%d")
            .with_context(|| format!("Invalid date on line {} (expected YYYY-MM-DD)", line))?;

        let category = record.get(2).unwrap_or("").to_string();

        let concept = record.get(3).and_then(|s| {
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        });

        let amount_cents = parse_cents(record.get(4).unwrap_or(""))
            .with_context(|| format!("Invalid amount on line {}", line))?;

        let kind_str = record.get(5).unwrap_or("");
        let kind = MovementKind::from_str(kind_str)
            .ok_or_else(|| AppError::InvalidKind(kind_str.to_string()))
            .with_context(|| format!("Invalid kind on line {}", line))?;

        drafts.push(MovementDraft {
            id,
            date,
            category,
            concept,
            amount_cents,
            kind,
        });
    }

    Ok(drafts)
}
