use crate::error::{CourseDumpError, Result};
use crate::scanner::CourseRecord;
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed column labels of the CSV projection, in output order.
pub const CSV_HEADER: [&str; 16] = [
    "課程編號",
    "課程名稱",
    "英文名稱",
    "班級",
    "修別",
    "學分",
    "系所",
    "學制",
    "開課年級",
    "任課教師",
    "上課時間",
    "上課教室",
    "授課語言",
    "選別",
    "備註",
    "SemesterCourseName",
];

const TAG_PATTERN: &str = r"<[^>]*>";

/// How a comma-bearing teacher value is quoted. The two historical output
/// paths disagreed on this, so both behaviors are kept as named variants
/// instead of being unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TeacherQuoting {
    /// Double embedded quote characters, then wrap the value in quotes.
    Escaped,
    /// Wrap the value in quotes as-is, embedded quotes untouched.
    Verbatim,
}

/// Projects normalized course records onto the fixed 16-column table.
///
/// Quoting is selective and per-column: the course name, English name, memo,
/// and traceability columns are always quoted; the teacher column only when
/// it contains a comma; everything else is emitted verbatim.
pub struct CsvProjection {
    quoting: TeacherQuoting,
    tag_re: Regex,
}

impl CsvProjection {
    pub fn new(quoting: TeacherQuoting) -> Result<Self> {
        let tag_re = Regex::new(TAG_PATTERN).map_err(|e| CourseDumpError::Config {
            message: format!("Invalid tag pattern: {}", e),
        })?;

        Ok(Self { quoting, tag_re })
    }

    /// Render header plus one row per record, in input order, `\n`-separated
    /// with no trailing newline.
    pub fn render(&self, records: &[CourseRecord]) -> String {
        let mut lines = Vec::with_capacity(records.len() + 1);
        lines.push(self.header_row());
        for record in records {
            lines.push(self.record_row(record));
        }
        lines.join("\n")
    }

    pub fn header_row(&self) -> String {
        CSV_HEADER.join(",")
    }

    pub fn record_row(&self, record: &CourseRecord) -> String {
        let course_name_raw = field_text(record, "SemesterCourseName");

        let columns = [
            field_text(record, "CourseNo"),
            format!("\"{}\"", self.strip_tags(&course_name_raw)),
            format!("\"{}\"", field_text(record, "SemesterCourseENGName")),
            field_text(record, "StudyClassName"),
            field_text(record, "CourseClassName"),
            field_text(record, "Credit"),
            field_text(record, "UnitName"),
            field_text(record, "DayfgClassTypeName"),
            field_text(record, "Grade"),
            self.teacher_column(&field_text(record, "Teacher")),
            field_text(record, "SemCourseTime"),
            field_text(record, "ClassRoom"),
            field_text(record, "TeaLanguage"),
            field_text(record, "Choose"),
            format!("\"{}\"", field_text(record, "Memo")),
            // Traceability column: the course name before tag stripping.
            format!("\"{}\"", course_name_raw),
        ];

        columns.join(",")
    }

    /// Remove `<...>` markup runs from the course name.
    pub fn strip_tags(&self, text: &str) -> String {
        self.tag_re.replace_all(text, "").into_owned()
    }

    fn teacher_column(&self, teacher: &str) -> String {
        if !teacher.contains(',') {
            return teacher.to_string();
        }

        match self.quoting {
            TeacherQuoting::Escaped => format!("\"{}\"", teacher.replace('"', "\"\"")),
            TeacherQuoting::Verbatim => format!("\"{}\"", teacher),
        }
    }
}

/// Best-effort scalar rendering of a record field. Missing fields and JSON
/// null become the empty string; numbers and booleans use their JSON form.
pub fn field_text(record: &CourseRecord, name: &str) -> String {
    match record.get(name) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
