//! Domain operations over a [`RecordBook`].
//!
//! Operations are pure: they mutate the book they are given and never touch
//! the filesystem. Callers persist the book afterwards and pass in the
//! current date where one is stamped, which keeps everything here
//! deterministic and testable in isolation.

use crate::core::validate;
use crate::error::{EntityKind, RecordsError, Result};
use crate::records::{Course, Enrollment, GradeEntry, RecordBook, Student};

/// Input fields for a new student record.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
}

/// Partial student update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
}

impl StudentUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.date_of_birth.is_none()
    }
}

/// Add a student, assigning the next free id. Returns the assigned id.
pub fn add_student(book: &mut RecordBook, new: NewStudent, first_id: u32) -> Result<String> {
    let mut errors = Vec::new();
    errors.extend(validate::name_error("first name", &new.first_name));
    errors.extend(validate::name_error("last name", &new.last_name));
    errors.extend(validate::email_error(&new.email));
    errors.extend(validate::date_error("date of birth", &new.date_of_birth));
    if !errors.is_empty() {
        return Err(RecordsError::Validation(errors));
    }

    let student_id = book.next_student_id(first_id);
    book.students.insert(
        student_id.clone(),
        Student {
            student_id: student_id.clone(),
            first_name: new.first_name.trim().to_string(),
            last_name: new.last_name.trim().to_string(),
            email: new.email.trim().to_string(),
            date_of_birth: new.date_of_birth.trim().to_string(),
            enrollments: Vec::new(),
            grades: Vec::new(),
        },
    );
    Ok(student_id)
}

/// Apply a partial update to an existing student.
pub fn update_student(book: &mut RecordBook, id: &str, update: StudentUpdate) -> Result<()> {
    let mut errors = Vec::new();
    if update.is_empty() {
        errors.push("no fields to update".to_string());
    }
    if let Some(first_name) = &update.first_name {
        errors.extend(validate::name_error("first name", first_name));
    }
    if let Some(last_name) = &update.last_name {
        errors.extend(validate::name_error("last name", last_name));
    }
    if let Some(email) = &update.email {
        errors.extend(validate::email_error(email));
    }
    if let Some(date_of_birth) = &update.date_of_birth {
        errors.extend(validate::date_error("date of birth", date_of_birth));
    }
    if !errors.is_empty() {
        return Err(RecordsError::Validation(errors));
    }

    let student = book
        .students
        .get_mut(id)
        .ok_or_else(|| RecordsError::not_found(EntityKind::Student, id))?;
    if let Some(first_name) = update.first_name {
        student.first_name = first_name.trim().to_string();
    }
    if let Some(last_name) = update.last_name {
        student.last_name = last_name.trim().to_string();
    }
    if let Some(email) = update.email {
        student.email = email.trim().to_string();
    }
    if let Some(date_of_birth) = update.date_of_birth {
        student.date_of_birth = date_of_birth.trim().to_string();
    }
    Ok(())
}

/// Remove a student together with their enrollments and grades.
pub fn delete_student(book: &mut RecordBook, id: &str) -> Result<Student> {
    book.students
        .remove(id)
        .ok_or_else(|| RecordsError::not_found(EntityKind::Student, id))
}

pub fn add_course(book: &mut RecordBook, course: Course) -> Result<()> {
    let mut errors = Vec::new();
    errors.extend(validate::course_id_error(&course.course_id));
    errors.extend(validate::name_error("course name", &course.name));
    if book.courses.contains_key(&course.course_id) {
        errors.push(format!("course '{}' already exists", course.course_id));
    }
    if !errors.is_empty() {
        return Err(RecordsError::Validation(errors));
    }

    book.courses.insert(course.course_id.clone(), course);
    Ok(())
}

/// Remove a course. Refused while any student is enrolled, which keeps
/// enrollment references intact without cascading deletes.
pub fn delete_course(book: &mut RecordBook, id: &str) -> Result<Course> {
    if !book.courses.contains_key(id) {
        return Err(RecordsError::not_found(EntityKind::Course, id));
    }
    let enrolled: Vec<&str> = book
        .students
        .values()
        .filter(|s| s.is_enrolled(id))
        .map(|s| s.student_id.as_str())
        .collect();
    if !enrolled.is_empty() {
        return Err(RecordsError::Validation(vec![format!(
            "course '{}' still has enrolled students: {}",
            id,
            enrolled.join(", ")
        )]));
    }
    book.courses
        .remove(id)
        .ok_or_else(|| RecordsError::not_found(EntityKind::Course, id))
}

/// Enroll a student in a course, stamping `today` as the enrollment date.
pub fn enroll(book: &mut RecordBook, student_id: &str, course_id: &str, today: &str) -> Result<()> {
    if !book.courses.contains_key(course_id) {
        return Err(RecordsError::not_found(EntityKind::Course, course_id));
    }
    let student = book
        .students
        .get_mut(student_id)
        .ok_or_else(|| RecordsError::not_found(EntityKind::Student, student_id))?;
    if student.is_enrolled(course_id) {
        return Err(RecordsError::Validation(vec![format!(
            "student '{student_id}' is already enrolled in course '{course_id}'"
        )]));
    }

    student.enrollments.push(Enrollment {
        course_id: course_id.to_string(),
        enrolled_on: today.to_string(),
    });
    student.sort_records();
    Ok(())
}

/// Record a grade for an enrolled course, replacing any previous grade for
/// the same course. Stamps `today` as the recording date.
pub fn record_grade(
    book: &mut RecordBook,
    student_id: &str,
    course_id: &str,
    value: &str,
    today: &str,
) -> Result<()> {
    let student = book
        .students
        .get_mut(student_id)
        .ok_or_else(|| RecordsError::not_found(EntityKind::Student, student_id))?;

    let mut errors = Vec::new();
    if !student.is_enrolled(course_id) {
        errors.push(format!(
            "student '{student_id}' is not enrolled in course '{course_id}'"
        ));
    }
    errors.extend(validate::grade_value_error(value));
    if !errors.is_empty() {
        return Err(RecordsError::Validation(errors));
    }

    student.grades.retain(|g| g.course_id != course_id);
    student.grades.push(GradeEntry {
        course_id: course_id.to_string(),
        value: value.to_string(),
        recorded_on: today.to_string(),
    });
    student.sort_records();
    Ok(())
}
