//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gradebook(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("gradebook").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("GRADEBOOK_LOG_FILE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn demo_on_fresh_file() {
    let dir = TempDir::new().unwrap();

    gradebook(&dir)
        .arg("subjects.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("Average grade: 4\n"))
        .stdout(predicate::str::contains("Average Math test score: 80\n"))
        .stdout(predicate::str::contains("Average History test score: 92\n"))
        .stdout(predicate::str::contains(
            "Student: Ivan Ivanov\nSubjects: Math, History, Physics",
        ));

    let content = std::fs::read_to_string(dir.path().join("subjects.csv")).unwrap();
    assert_eq!(
        content.lines().collect::<Vec<_>>(),
        vec![r#"Math,"4,4","85,75""#, "History,5,92", "Physics,3,50"]
    );
}

#[test]
fn demo_writes_operation_log() {
    let dir = TempDir::new().unwrap();

    gradebook(&dir).arg("subjects.csv").assert().success();

    let log = std::fs::read_to_string(dir.path().join("program.log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 5, "unexpected log:\n{log}");
    assert!(lines[0].ends_with(" - INFO - Program start"));
    assert!(lines[1].contains("Subject: Math, Grades: [4, 4], Test_scores: [85, 75]"));
    assert!(lines[2].contains("Subject: History, Grades: [5], Test_scores: [92]"));
    assert!(lines[3].contains("Subject: Physics, Grades: [3], Test_scores: [50]"));
    assert!(lines[4].ends_with(" - INFO - Program stop"));
}

#[test]
fn log_is_appended_across_runs() {
    let dir = TempDir::new().unwrap();

    gradebook(&dir).arg("subjects.csv").assert().success();
    gradebook(&dir).arg("subjects.csv").assert().success();

    let log = std::fs::read_to_string(dir.path().join("program.log")).unwrap();
    assert_eq!(log.matches("Program start").count(), 2);
    assert_eq!(log.matches("Program stop").count(), 2);
}

#[test]
fn existing_subjects_come_first_and_lose_history() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("subjects.csv"), "Art,\"5,5\",99\nMath,4,85\n").unwrap();

    gradebook(&dir)
        .arg("subjects.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("Subjects: Art, Math, History, Physics"));

    let content = std::fs::read_to_string(dir.path().join("subjects.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Art,,");
    assert_eq!(lines[1], r#"Math,"4,4","85,75""#);
}

#[test]
fn log_file_flag_overrides_destination() {
    let dir = TempDir::new().unwrap();

    gradebook(&dir)
        .arg("subjects.csv")
        .arg("--log-file")
        .arg("custom.log")
        .assert()
        .success();

    assert!(dir.path().join("custom.log").exists());
    assert!(!dir.path().join("program.log").exists());
}

#[test]
fn config_file_sets_student_name() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("gradebook.toml"),
        "student_name = \"Anna Petrova\"\nlog_file = \"run.log\"\n",
    )
    .unwrap();

    gradebook(&dir)
        .arg("subjects.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("Student: Anna Petrova"));

    assert!(dir.path().join("run.log").exists());
}

#[test]
fn invalid_student_name_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("gradebook.toml"), "student_name = \"ivan\"\n").unwrap();

    gradebook(&dir)
        .arg("subjects.csv")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("capital letter"));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();

    gradebook(&dir)
        .arg("subjects.csv")
        .arg("--config")
        .arg("nope.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn malformed_subjects_file_is_logged_as_failure() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("subjects.csv"), b"Math,\xff\n").unwrap();

    gradebook(&dir).arg("subjects.csv").assert().failure().code(1);

    let log = std::fs::read_to_string(dir.path().join("program.log")).unwrap();
    assert!(log.contains("Program start"));
    assert!(log.contains(" - ERROR - Program failed"));
    assert!(!log.contains("Program stop"));
}

#[test]
fn missing_argument_fails() {
    let dir = TempDir::new().unwrap();

    gradebook(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();

    gradebook(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Track a student's grades"));
}
