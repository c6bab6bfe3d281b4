//! CSV record store.
//!
//! One row per subject: `subject,grades,test_scores`, where the two value
//! fields hold comma-joined numbers. Fields are quoted only when they need it,
//! so a multi-valued row reads back as `Math,"4,4","85,75"`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{Grade, SubjectRecord, TestScore};

/// A row decoded from the record store, values included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub subject: String,
    pub grades: Vec<Grade>,
    pub test_scores: Vec<TestScore>,
}

/// Join values the way they are written into a single field.
pub fn join_values<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Split a value field back into typed values. An empty field is an empty list.
pub fn split_values<T>(field: &str) -> Result<Vec<T>, T::Err>
where
    T: std::str::FromStr,
{
    if field.trim().is_empty() {
        return Ok(Vec::new());
    }
    field.split(',').map(str::parse).collect()
}

fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to read subjects file: {}", path.display()))
}

/// Read the subject name of every row, in file order, duplicates included.
///
/// Rows without a subject name are skipped.
pub fn read_subject_names(path: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for (index, row) in reader(path)?.records().enumerate() {
        let row = row.with_context(|| {
            format!("failed to parse row {} of {}", index + 1, path.display())
        })?;
        match row.get(0) {
            Some(subject) if !subject.is_empty() => names.push(subject.to_string()),
            _ => tracing::warn!(
                path = %path.display(),
                row = index + 1,
                "skipping row without a subject name"
            ),
        }
    }
    Ok(names)
}

/// Read every row with its grades and test scores decoded.
pub fn read_records(path: &Path) -> Result<Vec<StoredRecord>> {
    let mut records = Vec::new();
    for (index, row) in reader(path)?.records().enumerate() {
        let row = row.with_context(|| {
            format!("failed to parse row {} of {}", index + 1, path.display())
        })?;
        let subject = match row.get(0) {
            Some(subject) if !subject.is_empty() => subject.to_string(),
            _ => {
                tracing::warn!(
                    path = %path.display(),
                    row = index + 1,
                    "skipping row without a subject name"
                );
                continue;
            }
        };
        let grades = split_values::<Grade>(row.get(1).unwrap_or_default()).with_context(|| {
            format!("invalid grades for {subject} in {}", path.display())
        })?;
        let test_scores =
            split_values::<TestScore>(row.get(2).unwrap_or_default()).with_context(|| {
                format!("invalid test scores for {subject} in {}", path.display())
            })?;
        records.push(StoredRecord {
            subject,
            grades,
            test_scores,
        });
    }
    Ok(records)
}

/// Overwrite `path` with one row per subject.
pub fn write_records<'a, I>(path: &Path, records: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a SubjectRecord)>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to write subjects file: {}", path.display()))?;

    for (subject, record) in records {
        writer
            .write_record([
                subject,
                join_values(record.grades()).as_str(),
                join_values(record.test_scores()).as_str(),
            ])
            .with_context(|| format!("failed to write row for {subject}"))?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush subjects file: {}", path.display()))?;
    Ok(())
}
