//! The student entity: a validated name plus per-subject grades and test scores.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use indexmap::IndexMap;

use crate::error::{LookupError, ValidationError};
use crate::journal::OperationLog;
use crate::model::{validate_name, Grade, SubjectRecord, TestScore};
use crate::store;

/// One student and everything recorded for them.
///
/// Subjects are kept in the order they were first referenced.
pub struct Student {
    name: String,
    subjects: IndexMap<String, SubjectRecord>,
    log: Arc<dyn OperationLog>,
}

impl Student {
    /// Create a student with no subjects, without touching any file.
    pub fn new(name: &str, log: Arc<dyn OperationLog>) -> Result<Self, ValidationError> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            subjects: IndexMap::new(),
            log,
        })
    }

    /// Create a student backed by the record store at `path`.
    ///
    /// Subject names are loaded from the file and the file is rewritten right
    /// away. Only names are loaded, so any grades and test scores previously
    /// stored in `path` are dropped by the rewrite.
    pub fn open(name: &str, path: impl AsRef<Path>, log: Arc<dyn OperationLog>) -> Result<Self> {
        let path = path.as_ref();
        let mut student = Self::new(name, log)?;
        student.load(path)?;
        student.save(path)?;
        Ok(student)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the name. The old name is kept if the new one is invalid.
    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        validate_name(name)?;
        self.name = name.to_string();
        Ok(())
    }

    /// Subjects with their records, in insertion order.
    pub fn subjects(&self) -> impl Iterator<Item = (&str, &SubjectRecord)> {
        self.subjects.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn subject_names(&self) -> impl Iterator<Item = &str> {
        self.subjects.keys().map(String::as_str)
    }

    pub fn get_subject(&self, subject: &str) -> Option<&SubjectRecord> {
        self.subjects.get(subject)
    }

    /// Attribute-style access: an unknown subject is an error rather than `None`.
    pub fn subject(&self, subject: &str) -> Result<&SubjectRecord, LookupError> {
        self.subjects
            .get(subject)
            .ok_or_else(|| LookupError::SubjectNotFound(subject.to_string()))
    }

    fn entry(&mut self, subject: &str) -> &mut SubjectRecord {
        self.subjects.entry(subject.to_string()).or_default()
    }

    /// Append a grade, registering the subject first if needed.
    ///
    /// The subject stays registered even when the grade is rejected.
    pub fn add_grade(&mut self, subject: &str, grade: i64) -> Result<(), ValidationError> {
        let record = self.entry(subject);
        record.push_grade(Grade::try_from(grade)?);
        Ok(())
    }

    /// Append a test score, registering the subject first if needed.
    ///
    /// The subject stays registered even when the score is rejected.
    pub fn add_test_score(&mut self, subject: &str, score: i64) -> Result<(), ValidationError> {
        let record = self.entry(subject);
        record.push_test_score(TestScore::try_from(score)?);
        Ok(())
    }

    /// Mean of the test scores for `subject`, or 0 if it has none.
    pub fn average_test_score(&self, subject: &str) -> Result<f64, LookupError> {
        let record = self
            .subjects
            .get(subject)
            .ok_or_else(|| LookupError::UnknownSubject(subject.to_string()))?;
        Ok(mean(record.test_scores().iter().map(|t| t.value())))
    }

    /// Mean of every grade in every subject, or 0 if there are none.
    ///
    /// Each grade counts once, so subjects with more grades weigh more.
    pub fn average_grade(&self) -> f64 {
        mean(
            self.subjects
                .values()
                .flat_map(|record| record.grades().iter().map(|g| g.value())),
        )
    }

    /// Register every subject named in the record store at `path`.
    ///
    /// Existing subjects are left untouched; new ones start empty.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let names = store::read_subject_names(path)?;
        tracing::debug!(path = %path.display(), rows = names.len(), "loaded subjects");
        for name in names {
            self.subjects.entry(name).or_default();
        }
        Ok(())
    }

    /// Overwrite the record store at `path` with every subject.
    ///
    /// Each subject that has grades or test scores is noted in the operation log.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        store::write_records(path, self.subjects())?;
        for (subject, record) in self.subjects().filter(|(_, r)| !r.is_empty()) {
            self.log.info(&format!(
                "Entry has been created to file {} - Subject: {}, Grades: {:?}, Test_scores: {:?}",
                path.display(),
                subject,
                record.grade_values(),
                record.test_score_values(),
            ));
        }
        tracing::debug!(path = %path.display(), subjects = self.subjects.len(), "saved subjects");
        Ok(())
    }
}

fn mean(values: impl Iterator<Item = u8>) -> f64 {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), v| {
        (sum + u64::from(v), count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Student: {}", self.name)?;
        write!(
            f,
            "Subjects: {}",
            self.subject_names().collect::<Vec<_>>().join(", ")
        )
    }
}

impl fmt::Debug for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Student")
            .field("name", &self.name)
            .field("subjects", &self.subjects)
            .finish_non_exhaustive()
    }
}
