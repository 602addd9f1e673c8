//! Semantic invariants not expressible via JSON Schema.

use std::collections::HashSet;

use crate::core::validate;
use crate::records::{RecordBook, Student};

/// Check cross-record invariants:
/// - Every enrollment references an existing course
/// - No duplicate enrollments per student
/// - A grade exists only for an enrolled course, at most one per course
/// - Grade values are well-formed
pub fn validate_invariants(book: &RecordBook) -> Vec<String> {
    let mut errors = Vec::new();
    for student in book.students.values() {
        validate_student(book, student, &mut errors);
    }
    errors
}

fn validate_student(book: &RecordBook, student: &Student, errors: &mut Vec<String>) {
    let id = &student.student_id;

    let mut enrolled = HashSet::new();
    for enrollment in &student.enrollments {
        if !book.courses.contains_key(&enrollment.course_id) {
            errors.push(format!(
                "student '{}' enrolled in unknown course '{}'",
                id, enrollment.course_id
            ));
        }
        if !enrolled.insert(enrollment.course_id.as_str()) {
            errors.push(format!(
                "student '{}' enrolled twice in course '{}'",
                id, enrollment.course_id
            ));
        }
    }

    let mut graded = HashSet::new();
    for grade in &student.grades {
        if !enrolled.contains(grade.course_id.as_str()) {
            errors.push(format!(
                "student '{}' has a grade for course '{}' without an enrollment",
                id, grade.course_id
            ));
        }
        if !graded.insert(grade.course_id.as_str()) {
            errors.push(format!(
                "student '{}' has more than one grade for course '{}'",
                id, grade.course_id
            ));
        }
        if let Some(message) = validate::grade_value_error(&grade.value) {
            errors.push(format!("student '{id}': {message}"));
        }
    }
}
