//! Read-only report derivation from a [`RecordBook`].
//!
//! Everything here returns plain data; text layout lives in `io::render`.

use crate::error::{EntityKind, RecordsError, Result};
use crate::records::{RecordBook, Student};

/// One transcript line: an enrollment with any recorded grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRow {
    pub course_id: String,
    pub course_name: String,
    pub enrolled_on: String,
    pub grade: Option<String>,
}

impl TranscriptRow {
    /// Completion is derived from grade presence.
    pub fn status(&self) -> &'static str {
        if self.grade.is_some() {
            "Completed"
        } else {
            "In Progress"
        }
    }
}

/// Per-student grade report.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub date_of_birth: String,
    pub rows: Vec<TranscriptRow>,
    pub gpa: Option<f64>,
}

/// One roster line: an enrolled student with any recorded grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub student_id: String,
    pub name: String,
    pub enrolled_on: String,
    pub grade: Option<String>,
}

/// Per-course enrollment report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub course_id: String,
    pub course_name: String,
    pub rows: Vec<RosterRow>,
}

/// Build the grade report for one student.
pub fn transcript(book: &RecordBook, student_id: &str) -> Result<Transcript> {
    let student = book
        .students
        .get(student_id)
        .ok_or_else(|| RecordsError::not_found(EntityKind::Student, student_id))?;

    let rows = student
        .enrollments
        .iter()
        .map(|enrollment| {
            let course_name = book
                .courses
                .get(&enrollment.course_id)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            TranscriptRow {
                course_id: enrollment.course_id.clone(),
                course_name,
                enrolled_on: enrollment.enrolled_on.clone(),
                grade: student.grade(&enrollment.course_id).map(|g| g.value.clone()),
            }
        })
        .collect();

    Ok(Transcript {
        student_id: student.student_id.clone(),
        name: student.full_name(),
        email: student.email.clone(),
        date_of_birth: student.date_of_birth.clone(),
        rows,
        gpa: gpa(student),
    })
}

/// Build the roster for one course. Only current students appear, so a
/// deleted student drops out of every subsequent roster.
pub fn roster(book: &RecordBook, course_id: &str) -> Result<Roster> {
    let course = book
        .courses
        .get(course_id)
        .ok_or_else(|| RecordsError::not_found(EntityKind::Course, course_id))?;

    let rows = book
        .students
        .values()
        .filter_map(|student| {
            let enrollment = student.enrollment(course_id)?;
            Some(RosterRow {
                student_id: student.student_id.clone(),
                name: student.full_name(),
                enrolled_on: enrollment.enrolled_on.clone(),
                grade: student.grade(course_id).map(|g| g.value.clone()),
            })
        })
        .collect();

    Ok(Roster {
        course_id: course.course_id.clone(),
        course_name: course.name.clone(),
        rows,
    })
}

/// Case-insensitive match of `term` against student id, full name, or email.
pub fn search_students<'a>(book: &'a RecordBook, term: &str) -> Vec<&'a Student> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    book.students
        .values()
        .filter(|student| {
            student.student_id.to_lowercase() == needle
                || student.full_name().to_lowercase().contains(&needle)
                || student.email.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Grade points on the 4-point scale for a stored grade value.
///
/// Numeric scores are mapped to letters by standard cutoffs (>=90 A, >=80 B,
/// >=70 C, >=60 D, else F) before conversion. Returns `None` for values that
/// are not valid grades.
pub fn grade_points(value: &str) -> Option<f64> {
    let letter = match value.parse::<f64>() {
        Ok(score) if (0.0..=100.0).contains(&score) => match score {
            s if s >= 90.0 => "A",
            s if s >= 80.0 => "B",
            s if s >= 70.0 => "C",
            s if s >= 60.0 => "D",
            _ => "F",
        },
        Ok(_) => return None,
        Err(_) => value,
    };

    let mut chars = letter.chars();
    let base: f64 = match chars.next()? {
        'A' => 4.0,
        'B' => 3.0,
        'C' => 2.0,
        'D' => 1.0,
        'F' => 0.0,
        _ => return None,
    };
    let points = match chars.as_str() {
        "" => base,
        "+" => base + 0.3,
        "-" => base - 0.3,
        _ => return None,
    };
    Some(points.clamp(0.0, 4.0))
}

/// Mean grade points across all recorded grades, `None` without grades.
pub fn gpa(student: &Student) -> Option<f64> {
    let points: Vec<f64> = student
        .grades
        .iter()
        .filter_map(|g| grade_points(&g.value))
        .collect();
    if points.is_empty() {
        return None;
    }
    Some(points.iter().sum::<f64>() / points.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ops::{add_course, add_student, delete_student, enroll, record_grade};
    use crate::test_support::{book_with, course, enroll_on, grade_on, new_student, student};

    const TODAY: &str = "2024-09-02";

    /// End-to-end scenario: add student and course, enroll, record "A",
    /// then the transcript shows the course with grade A.
    #[test]
    fn transcript_shows_recorded_grade() {
        let mut book = RecordBook::default();
        let id = add_student(&mut book, new_student(), 1000).expect("add student");
        add_course(&mut book, course("C1")).expect("add course");
        enroll(&mut book, &id, "C1", TODAY).expect("enroll");
        record_grade(&mut book, &id, "C1", "A", TODAY).expect("grade");

        let transcript = transcript(&book, &id).expect("transcript");
        assert_eq!(transcript.rows.len(), 1);
        assert_eq!(transcript.rows[0].course_id, "C1");
        assert_eq!(transcript.rows[0].grade.as_deref(), Some("A"));
        assert_eq!(transcript.rows[0].status(), "Completed");
        assert_eq!(transcript.gpa, Some(4.0));
    }

    #[test]
    fn transcript_marks_ungraded_courses_in_progress() {
        let mut s = student("1000");
        enroll_on(&mut s, "CS101", TODAY);
        let book = book_with(vec![s], vec![course("CS101")]);

        let transcript = transcript(&book, "1000").expect("transcript");
        assert_eq!(transcript.rows[0].grade, None);
        assert_eq!(transcript.rows[0].status(), "In Progress");
        assert_eq!(transcript.gpa, None);
    }

    #[test]
    fn transcript_unknown_student_is_not_found() {
        let book = RecordBook::default();
        let err = transcript(&book, "9999").unwrap_err();
        assert_eq!(err.to_string(), "student '9999' not found");
    }

    #[test]
    fn deleted_student_leaves_subsequent_rosters() {
        let mut book = book_with(
            vec![student("1000"), student("1001")],
            vec![course("CS101")],
        );
        enroll(&mut book, "1000", "CS101", TODAY).expect("enroll");
        enroll(&mut book, "1001", "CS101", TODAY).expect("enroll");

        delete_student(&mut book, "1000").expect("delete");

        let roster = roster(&book, "CS101").expect("roster");
        let ids: Vec<&str> = roster.rows.iter().map(|r| r.student_id.as_str()).collect();
        assert_eq!(ids, vec!["1001"]);
    }

    #[test]
    fn roster_lists_only_enrolled_students() {
        let mut book = book_with(
            vec![student("1000"), student("1001")],
            vec![course("CS101"), course("MATH200")],
        );
        enroll(&mut book, "1000", "CS101", TODAY).expect("enroll");
        enroll(&mut book, "1001", "MATH200", TODAY).expect("enroll");

        let roster = roster(&book, "CS101").expect("roster");
        assert_eq!(roster.rows.len(), 1);
        assert_eq!(roster.rows[0].student_id, "1000");
    }

    #[test]
    fn grade_points_cover_letters_and_scores() {
        assert_eq!(grade_points("A"), Some(4.0));
        assert_eq!(grade_points("A+"), Some(4.0));
        assert_eq!(grade_points("B-"), Some(2.7));
        assert_eq!(grade_points("F"), Some(0.0));
        assert_eq!(grade_points("95"), Some(4.0));
        assert_eq!(grade_points("72.5"), Some(2.0));
        assert_eq!(grade_points("59"), Some(0.0));
        assert_eq!(grade_points("banana"), None);
    }

    #[test]
    fn gpa_averages_mixed_grade_forms() {
        let mut s = student("1000");
        enroll_on(&mut s, "CS101", TODAY);
        enroll_on(&mut s, "MATH200", TODAY);
        grade_on(&mut s, "CS101", "A", TODAY);
        grade_on(&mut s, "MATH200", "85", TODAY);

        let gpa = gpa(&s).expect("gpa");
        assert!((gpa - 3.5).abs() < 1e-9);
    }

    #[test]
    fn search_matches_id_name_and_email() {
        let book = book_with(vec![student("1000"), student("1001")], vec![]);

        assert_eq!(search_students(&book, "1000").len(), 1);
        assert_eq!(search_students(&book, "1001-first").len(), 1);
        assert_eq!(search_students(&book, "@example.com").len(), 2);
        assert_eq!(search_students(&book, "nobody").len(), 0);
        assert_eq!(search_students(&book, "  ").len(), 0);
    }
}
