use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SAMPLE_PAGE: &str = r#"<html>
<h2>114學年 上學期 資訊管理學系</h2>
<script>
var data = [
  {"CourseNo": "A001", "SemesterCourseName": "<b>系統分析</b>",
   "SemesterCourseENGName": "Systems Analysis", "Teacher": "王小明,李大同", "Credit": 3},
  {"CourseNo": "A002", "SemesterCourseName": "資料庫",
   "SemesterCourseENGName": "Databases", "Teacher": "陳老師", "Credit": 2}
];
</script>
</html>"#;

fn coursedump() -> Command {
    Command::cargo_bin("coursedump").unwrap()
}

#[test]
fn help_prints_usage_and_skips_extraction() {
    coursedump()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("coursedump"));
}

#[test]
fn help_wins_over_other_arguments() {
    coursedump()
        .args(["definitely-missing-file", "-h"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn missing_input_exits_with_not_found_code() {
    let temp_dir = TempDir::new().unwrap();

    coursedump()
        .current_dir(temp_dir.path())
        .arg("missing.html")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not found"));

    // No output files left behind.
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_record_block_exits_with_block_code() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("page.html"), "<html>114學年</html>").unwrap();

    coursedump()
        .current_dir(temp_dir.path())
        .arg("page.html")
        .assert()
        .code(5);

    let leftovers = fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name().to_string_lossy().to_string();
            name.ends_with(".json") || name.ends_with(".csv")
        })
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn extracts_catalog_to_json_and_csv() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("page.html"), SAMPLE_PAGE).unwrap();

    coursedump()
        .current_dir(temp_dir.path())
        .arg("page.html")
        .assert()
        .success();

    let json_path = temp_dir.path().join("courses_114_上學期.json");
    let csv_path = temp_dir.path().join("courses_114_上學期.csv");
    assert!(json_path.exists());
    assert!(csv_path.exists());

    let json = fs::read_to_string(json_path).unwrap();
    assert!(json.contains("\"totalCourses\": 2"));
    assert!(json.contains("114學年上學期"));

    let csv = fs::read_to_string(csv_path).unwrap();
    assert_eq!(csv.split('\n').count(), 3);
    assert!(csv.contains("\"王小明,李大同\""));
    assert!(csv.contains("\"系統分析\""));
}

#[test]
fn output_prefix_argument_prefixes_file_names() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("page.html"), SAMPLE_PAGE).unwrap();

    coursedump()
        .current_dir(temp_dir.path())
        .args(["page.html", "114_1_"])
        .assert()
        .success();

    assert!(temp_dir
        .path()
        .join("114_1_courses_114_上學期.json")
        .exists());
}

#[test]
fn dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("page.html"), SAMPLE_PAGE).unwrap();

    coursedump()
        .current_dir(temp_dir.path())
        .args(["page.html", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run completed successfully"));

    let outputs = fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name().to_string_lossy().to_string();
            name.ends_with(".json") || name.ends_with(".csv")
        })
        .count();
    assert_eq!(outputs, 0);
}

#[test]
fn generate_config_writes_sample_file() {
    let temp_dir = TempDir::new().unwrap();

    coursedump()
        .current_dir(temp_dir.path())
        .arg("--generate-config")
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join("coursedump.toml")).unwrap();
    assert!(content.contains("[extract]"));
    assert!(content.contains("[csv]"));
}

#[test]
fn courses2csv_reprojects_existing_json() {
    let temp_dir = TempDir::new().unwrap();
    let json = r#"{
  "semester": "未知學年上學期",
  "department": "資訊管理學系",
  "totalCourses": 1,
  "courses": [
    {"CourseNo": "A001", "SemesterCourseName": "系統分析", "Teacher": "王小明,李大同"}
  ]
}"#;
    fs::write(temp_dir.path().join("courses_unknown_上學期.json"), json).unwrap();

    Command::cargo_bin("courses2csv")
        .unwrap()
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 course records"));

    let csv = fs::read_to_string(temp_dir.path().join("courses_114_1_with_links.csv")).unwrap();
    assert_eq!(csv.split('\n').count(), 2);
    assert!(csv.contains("\"王小明,李大同\""));
}

#[test]
fn courses2csv_fails_without_input() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("courses2csv")
        .unwrap()
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
