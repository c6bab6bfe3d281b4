//! The demo run: record a fixed set of grades and scores, then report on them.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use gradebook_core::journal::OperationLog;
use gradebook_core::Student;

/// `(subject, grade, test score)` entries recorded by the demo, in order.
const ENTRIES: &[(&str, i64, i64)] = &[
    ("Math", 4, 85),
    ("History", 5, 92),
    ("Math", 4, 75),
    ("Physics", 3, 50),
];

pub fn execute(subjects_file: &Path, student_name: &str, log: Arc<dyn OperationLog>) -> Result<()> {
    // The store is read before it is written, so a fresh path needs an empty file.
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(subjects_file)
        .with_context(|| format!("failed to create subjects file: {}", subjects_file.display()))?;

    let mut student = Student::open(student_name, subjects_file, log)?;

    for &(subject, grade, score) in ENTRIES {
        student.add_grade(subject, grade)?;
        student.add_test_score(subject, score)?;
    }

    println!("Average grade: {}", student.average_grade());
    println!(
        "Average Math test score: {}",
        student.average_test_score("Math")?
    );
    println!(
        "Average History test score: {}",
        student.average_test_score("History")?
    );

    student.save(subjects_file)?;
    println!("{student}");

    Ok(())
}
