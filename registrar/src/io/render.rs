//! Text rendering of reports and listings for the console.
//!
//! Page layout lives in embedded templates; rows are fixed-width formatted
//! here so the templates stay free of column arithmetic.

use minijinja::{Environment, context};

use crate::core::report::{Roster, Transcript};
use crate::records::{Course, Student};

const TRANSCRIPT_TEMPLATE: &str = include_str!("templates/transcript.txt");
const ROSTER_TEMPLATE: &str = include_str!("templates/roster.txt");

/// Template engine wrapper around minijinja.
struct ReportEngine {
    env: Environment<'static>,
}

impl ReportEngine {
    fn new() -> Self {
        let mut env = Environment::new();
        env.add_template("transcript", TRANSCRIPT_TEMPLATE)
            .expect("transcript template should be valid");
        env.add_template("roster", ROSTER_TEMPLATE)
            .expect("roster template should be valid");
        Self { env }
    }

    fn render_transcript(&self, transcript: &Transcript) -> Result<String, minijinja::Error> {
        let header = format!(
            "{:<10}{:<25}{:<15}{:<8}{:<12}",
            "Course", "Title", "Enrolled", "Grade", "Status"
        );
        let rows: Vec<String> = transcript
            .rows
            .iter()
            .map(|row| {
                format!(
                    "{:<10}{:<25}{:<15}{:<8}{:<12}",
                    row.course_id,
                    row.course_name,
                    row.enrolled_on,
                    row.grade.as_deref().unwrap_or("N/A"),
                    row.status()
                )
            })
            .collect();
        let template = self.env.get_template("transcript")?;
        template.render(context! {
            student_id => transcript.student_id,
            name => transcript.name,
            email => transcript.email,
            date_of_birth => transcript.date_of_birth,
            header => header,
            rows => rows,
            gpa => transcript.gpa.map(|g| format!("{g:.2}")),
        })
    }

    fn render_roster(&self, roster: &Roster) -> Result<String, minijinja::Error> {
        let header = format!(
            "{:<10}{:<30}{:<15}{:<8}",
            "ID", "Name", "Enrolled", "Grade"
        );
        let rows: Vec<String> = roster
            .rows
            .iter()
            .map(|row| {
                format!(
                    "{:<10}{:<30}{:<15}{:<8}",
                    row.student_id,
                    row.name,
                    row.enrolled_on,
                    row.grade.as_deref().unwrap_or("N/A")
                )
            })
            .collect();
        let template = self.env.get_template("roster")?;
        template.render(context! {
            course_id => roster.course_id,
            course_name => roster.course_name,
            header => header,
            rows => rows,
        })
    }
}

/// Render a per-student grade report.
pub fn render_transcript(transcript: &Transcript) -> String {
    ReportEngine::new()
        .render_transcript(transcript)
        .expect("transcript template rendering should not fail")
}

/// Render a per-course roster.
pub fn render_roster(roster: &Roster) -> String {
    ReportEngine::new()
        .render_roster(roster)
        .expect("roster template rendering should not fail")
}

/// Render the tabular student listing.
pub fn render_student_table(students: &[&Student]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10}{:<25}{:<30}{:<15}{:<8}\n",
        "ID", "Name", "Email", "DOB", "Courses"
    ));
    out.push_str(&"-".repeat(88));
    out.push('\n');
    for student in students {
        out.push_str(&format!(
            "{:<10}{:<25}{:<30}{:<15}{:<8}\n",
            student.student_id,
            student.full_name(),
            student.email,
            student.date_of_birth,
            student.enrollments.len()
        ));
    }
    out.push_str(&format!("{} student(s)\n", students.len()));
    out
}

/// Render the tabular course listing.
pub fn render_course_table(courses: &[&Course]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10}{:<30}{:<10}{:<25}\n",
        "ID", "Name", "Credits", "Instructor"
    ));
    out.push_str(&"-".repeat(75));
    out.push('\n');
    for course in courses {
        let credits = course
            .credits
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<10}{:<30}{:<10}{:<25}\n",
            course.course_id,
            course.name,
            credits,
            course.instructor.as_deref().unwrap_or("-")
        ));
    }
    out.push_str(&format!("{} course(s)\n", courses.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::{RosterRow, TranscriptRow};

    fn sample_transcript() -> Transcript {
        Transcript {
            student_id: "1000".to_string(),
            name: "Grace Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            date_of_birth: "1906-12-09".to_string(),
            rows: vec![
                TranscriptRow {
                    course_id: "CS101".to_string(),
                    course_name: "Intro to Computer Science".to_string(),
                    enrolled_on: "2024-01-10".to_string(),
                    grade: Some("A".to_string()),
                },
                TranscriptRow {
                    course_id: "MATH200".to_string(),
                    course_name: "Linear Algebra".to_string(),
                    enrolled_on: "2024-01-11".to_string(),
                    grade: None,
                },
            ],
            gpa: Some(4.0),
        }
    }

    #[test]
    fn transcript_shows_rows_and_gpa() {
        let text = render_transcript(&sample_transcript());

        assert!(text.contains("STUDENT REPORT: Grace Hopper"));
        assert!(text.contains("Student ID:    1000"));
        assert!(text.contains("CS101"));
        assert!(text.contains("Completed"));
        assert!(text.contains("In Progress"));
        assert!(text.contains("N/A"));
        assert!(text.contains("Overall GPA: 4.00"));
    }

    #[test]
    fn transcript_without_enrollments_says_so() {
        let transcript = Transcript {
            rows: Vec::new(),
            gpa: None,
            ..sample_transcript()
        };
        let text = render_transcript(&transcript);

        assert!(text.contains("No course enrollments found."));
        assert!(!text.contains("Overall GPA"));
    }

    #[test]
    fn roster_lists_enrolled_students() {
        let roster = Roster {
            course_id: "CS101".to_string(),
            course_name: "Intro to Computer Science".to_string(),
            rows: vec![RosterRow {
                student_id: "1000".to_string(),
                name: "Grace Hopper".to_string(),
                enrolled_on: "2024-01-10".to_string(),
                grade: Some("A".to_string()),
            }],
        };
        let text = render_roster(&roster);

        assert!(text.contains("COURSE ROSTER: CS101 (Intro to Computer Science)"));
        assert!(text.contains("Grace Hopper"));
    }

    #[test]
    fn empty_roster_says_so() {
        let roster = Roster {
            course_id: "CS101".to_string(),
            course_name: "Intro to Computer Science".to_string(),
            rows: Vec::new(),
        };
        assert!(render_roster(&roster).contains("No students enrolled."));
    }

    #[test]
    fn student_table_counts_enrollments() {
        let student = crate::test_support::student("1000");
        let text = render_student_table(&[&student]);

        assert!(text.contains("1000"));
        assert!(text.contains("1 student(s)"));
    }
}
