//! Core value types: grades, test scores, subject records, and student names.
//!
//! Every type here is validated on construction, so a `SubjectRecord` can
//! never hold an out-of-range value.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Lowest accepted grade.
pub const MIN_GRADE: u8 = 2;
/// Highest accepted grade.
pub const MAX_GRADE: u8 = 5;
/// Highest accepted test score. The lowest is 0.
pub const MAX_TEST_SCORE: u8 = 100;

/// A grade on the 2..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Grade(u8);

impl Grade {
    /// The grade as a plain number.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Grade {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(MIN_GRADE)..=i64::from(MAX_GRADE)).contains(&value) {
            Ok(Grade(value as u8))
        } else {
            Err(ValidationError::GradeOutOfRange(value))
        }
    }
}

impl TryFrom<f64> for Grade {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Grade::try_from(integral(value, "grade")?)
    }
}

impl FromStr for Grade {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grade::try_from(parse_integer(s, "grade")?)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A test result on the 0..=100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestScore(u8);

impl TestScore {
    /// The score as a plain number.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for TestScore {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..=i64::from(MAX_TEST_SCORE)).contains(&value) {
            Ok(TestScore(value as u8))
        } else {
            Err(ValidationError::TestScoreOutOfRange(value))
        }
    }
}

impl TryFrom<f64> for TestScore {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        TestScore::try_from(integral(value, "test score")?)
    }
}

impl FromStr for TestScore {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestScore::try_from(parse_integer(s, "test score")?)
    }
}

impl fmt::Display for TestScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn integral(value: f64, field: &'static str) -> Result<i64, ValidationError> {
    // Anything with a fractional part, or beyond i64, is not an integer we can store.
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e18 {
        Ok(value as i64)
    } else {
        Err(ValidationError::NotAnInteger {
            field,
            value: value.to_string(),
        })
    }
}

fn parse_integer(s: &str, field: &'static str) -> Result<i64, ValidationError> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAnInteger {
            field,
            value: s.to_string(),
        })
}

/// Grades and test scores recorded for one subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectRecord {
    grades: Vec<Grade>,
    test_scores: Vec<TestScore>,
}

impl SubjectRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grades in insertion order.
    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    /// Test scores in insertion order.
    pub fn test_scores(&self) -> &[TestScore] {
        &self.test_scores
    }

    pub fn push_grade(&mut self, grade: Grade) {
        self.grades.push(grade);
    }

    pub fn push_test_score(&mut self, score: TestScore) {
        self.test_scores.push(score);
    }

    /// `true` when neither grades nor test scores have been recorded.
    pub fn is_empty(&self) -> bool {
        self.grades.is_empty() && self.test_scores.is_empty()
    }

    /// Grades as plain numbers.
    pub fn grade_values(&self) -> Vec<u8> {
        self.grades.iter().map(|g| g.value()).collect()
    }

    /// Test scores as plain numbers.
    pub fn test_score_values(&self) -> Vec<u8> {
        self.test_scores.iter().map(|t| t.value()).collect()
    }
}

/// Check that `name` is made of letters and spaces and is title-cased.
///
/// Title case means an uppercase letter only ever starts a word and a
/// lowercase letter never does. Letters without case are accepted anywhere,
/// but at least one cased letter must be present.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidName(name.to_string());

    let mut letters = name.chars().filter(|c| *c != ' ').peekable();
    if letters.peek().is_none() || !letters.all(char::is_alphabetic) {
        return Err(invalid());
    }

    let mut previous_cased = false;
    let mut saw_cased = false;
    for c in name.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return Err(invalid());
            }
            previous_cased = true;
            saw_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return Err(invalid());
            }
            previous_cased = true;
            saw_cased = true;
        } else {
            previous_cased = false;
        }
    }

    if saw_cased {
        Ok(())
    } else {
        Err(invalid())
    }
}
