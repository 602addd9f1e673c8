use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A student's membership in a course.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Enrollment {
    pub course_id: String,
    pub enrolled_on: String,
}

/// A recorded grade for one course.
///
/// `value` is stored verbatim: either a letter grade (`A+` through `F`) or a
/// numeric score (`0` through `100`). See `core::validate::grade_value_error`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GradeEntry {
    pub course_id: String,
    pub value: String,
    pub recorded_on: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
    #[serde(default)]
    pub grades: Vec<GradeEntry>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn enrollment(&self, course_id: &str) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.course_id == course_id)
    }

    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.enrollment(course_id).is_some()
    }

    pub fn grade(&self, course_id: &str) -> Option<&GradeEntry> {
        self.grades.iter().find(|g| g.course_id == course_id)
    }

    /// Order enrollments and grades by course id for stable serialization.
    pub fn sort_records(&mut self) {
        self.enrollments.sort_by(|a, b| a.course_id.cmp(&b.course_id));
        self.grades.sort_by(|a, b| a.course_id.cmp(&b.course_id));
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub course_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
}

/// In-memory student and course collections.
///
/// Keyed by id; `BTreeMap` keeps iteration (and therefore serialization)
/// deterministic, which makes repeated saves byte-identical.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordBook {
    pub students: BTreeMap<String, Student>,
    pub courses: BTreeMap<String, Course>,
}

impl RecordBook {
    /// Order every student's enrollments and grades by course id.
    pub fn sort_records(&mut self) {
        for student in self.students.values_mut() {
            student.sort_records();
        }
    }

    /// Next free student id: one past the highest numeric id in use, or
    /// `first_id` when no numeric ids exist yet.
    pub fn next_student_id(&self, first_id: u32) -> String {
        let highest = self
            .students
            .keys()
            .filter_map(|id| id.parse::<u32>().ok())
            .max();
        match highest {
            Some(n) => (n + 1).to_string(),
            None => first_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{enroll_on, grade_on, student};

    #[test]
    fn next_student_id_starts_at_floor() {
        let book = RecordBook::default();
        assert_eq!(book.next_student_id(1000), "1000");
    }

    #[test]
    fn next_student_id_increments_past_highest() {
        let mut book = RecordBook::default();
        for id in ["1000", "1004", "1002"] {
            book.students.insert(id.to_string(), student(id));
        }
        assert_eq!(book.next_student_id(1000), "1005");
    }

    #[test]
    fn next_student_id_ignores_non_numeric_ids() {
        let mut book = RecordBook::default();
        book.students.insert("legacy-7".to_string(), student("legacy-7"));
        assert_eq!(book.next_student_id(1000), "1000");
    }

    #[test]
    fn sort_records_orders_by_course_id() {
        let mut s = student("1000");
        enroll_on(&mut s, "MATH200", "2024-01-10");
        enroll_on(&mut s, "CS101", "2024-01-11");
        grade_on(&mut s, "MATH200", "B", "2024-05-01");
        grade_on(&mut s, "CS101", "A", "2024-05-02");

        s.sort_records();

        let enrolled: Vec<&str> = s.enrollments.iter().map(|e| e.course_id.as_str()).collect();
        let graded: Vec<&str> = s.grades.iter().map(|g| g.course_id.as_str()).collect();
        assert_eq!(enrolled, vec!["CS101", "MATH200"]);
        assert_eq!(graded, vec!["CS101", "MATH200"]);
    }
}
