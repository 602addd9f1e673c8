//! Test-only helpers for constructing students, courses, and record books.

use crate::core::ops::NewStudent;
use crate::records::{Course, Enrollment, GradeEntry, RecordBook, Student};

/// Create a deterministic student with no enrollments or grades.
pub fn student(id: &str) -> Student {
    Student {
        student_id: id.to_string(),
        first_name: format!("{id}-first"),
        last_name: format!("{id}-last"),
        email: format!("{id}@example.com"),
        date_of_birth: "2000-01-01".to_string(),
        enrollments: Vec::new(),
        grades: Vec::new(),
    }
}

/// Valid input fields for a new student.
pub fn new_student() -> NewStudent {
    NewStudent {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@navy.mil".to_string(),
        date_of_birth: "1906-12-09".to_string(),
    }
}

/// Create a deterministic course with no metadata.
pub fn course(id: &str) -> Course {
    Course {
        course_id: id.to_string(),
        name: format!("{id} name"),
        credits: None,
        instructor: None,
    }
}

/// Append an enrollment without going through validation.
pub fn enroll_on(student: &mut Student, course_id: &str, date: &str) {
    student.enrollments.push(Enrollment {
        course_id: course_id.to_string(),
        enrolled_on: date.to_string(),
    });
}

/// Append a grade without going through validation.
pub fn grade_on(student: &mut Student, course_id: &str, value: &str, date: &str) {
    student.grades.push(GradeEntry {
        course_id: course_id.to_string(),
        value: value.to_string(),
        recorded_on: date.to_string(),
    });
}

/// Build a record book from students and courses, keyed by their ids.
pub fn book_with(students: Vec<Student>, courses: Vec<Course>) -> RecordBook {
    let mut book = RecordBook::default();
    for student in students {
        book.students.insert(student.student_id.clone(), student);
    }
    for course in courses {
        book.courses.insert(course.course_id.clone(), course);
    }
    book
}
