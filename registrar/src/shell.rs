//! Interactive console shell.
//!
//! Presents a fixed numbered menu on the input stream, dispatches to domain
//! operations and reports, and prints results or error messages. The shell
//! is generic over its streams so whole sessions can be scripted in tests.
//!
//! Mutations follow a candidate-copy protocol: the operation runs against a
//! clone of the book, the clone is persisted, and only then does it replace
//! the current state. A failed disk write therefore leaves both the file
//! and the in-memory book untouched.

use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::Local;
use tracing::debug;

use crate::core::ops::{self, NewStudent, StudentUpdate};
use crate::core::report;
use crate::core::validate::DATE_FORMAT;
use crate::error::RecordsError;
use crate::io::config::RegistrarConfig;
use crate::io::render;
use crate::io::store;
use crate::records::{Course, RecordBook};

const MENU: &str = "\
==================================================
 STUDENT RECORDS
==================================================
  1. Add student          7. List courses
  2. List students        8. Delete course
  3. Update student       9. Enroll in course
  4. Delete student      10. Record grade
  5. Search students     11. Student report
  6. Add course          12. Course roster
  0. Quit
==================================================";

pub struct Shell<R, W> {
    config: RegistrarConfig,
    book: RecordBook,
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(config: RegistrarConfig, book: RecordBook, reader: R, writer: W) -> Self {
        Self {
            config,
            book,
            reader,
            writer,
        }
    }

    /// Run the menu loop until quit or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.writer, "{MENU}")?;
            let Some(choice) = self.prompt("Enter choice: ")? else {
                break;
            };
            let keep_going = match choice.as_str() {
                "1" => self.add_student()?,
                "2" => self.list_students()?,
                "3" => self.update_student()?,
                "4" => self.delete_student()?,
                "5" => self.search_students()?,
                "6" => self.add_course()?,
                "7" => self.list_courses()?,
                "8" => self.delete_course()?,
                "9" => self.enroll()?,
                "10" => self.record_grade()?,
                "11" => self.student_report()?,
                "12" => self.course_roster()?,
                "0" | "q" | "quit" | "exit" => false,
                "" => true,
                other => {
                    writeln!(self.writer, "Unknown option '{other}'.")?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        writeln!(self.writer, "Goodbye.")?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn book(&self) -> &RecordBook {
        &self.book
    }

    /// Write a prompt and read one trimmed line. `None` means end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.writer, "{label}")?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Run a mutation against a candidate copy, persist it, then commit.
    fn apply_and_save<T>(
        &mut self,
        op: impl FnOnce(&mut RecordBook) -> Result<T, RecordsError>,
    ) -> Result<T, RecordsError> {
        let mut next = self.book.clone();
        let outcome = op(&mut next)?;
        store::save_records(&self.config.data_file, &next)?;
        self.book = next;
        Ok(outcome)
    }

    /// Print a domain error and keep the loop alive.
    fn report_error(&mut self, err: &RecordsError) -> Result<()> {
        debug!(error = %err, "operation rejected");
        writeln!(self.writer, "error: {err}")?;
        Ok(())
    }

    fn today(&self) -> String {
        Local::now().date_naive().format(DATE_FORMAT).to_string()
    }

    fn add_student(&mut self) -> Result<bool> {
        let Some(first_name) = self.prompt("First name: ")? else {
            return Ok(false);
        };
        let Some(last_name) = self.prompt("Last name: ")? else {
            return Ok(false);
        };
        let Some(email) = self.prompt("Email: ")? else {
            return Ok(false);
        };
        let Some(date_of_birth) = self.prompt("Date of birth (YYYY-MM-DD): ")? else {
            return Ok(false);
        };

        let first_id = self.config.first_student_id;
        let new = NewStudent {
            first_name,
            last_name,
            email,
            date_of_birth,
        };
        match self.apply_and_save(|book| ops::add_student(book, new, first_id)) {
            Ok(id) => writeln!(self.writer, "Student added with id {id}.")?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(true)
    }

    fn list_students(&mut self) -> Result<bool> {
        let students: Vec<_> = self.book.students.values().collect();
        let table = render::render_student_table(&students);
        write!(self.writer, "{table}")?;
        Ok(true)
    }

    fn update_student(&mut self) -> Result<bool> {
        let Some(id) = self.prompt("Student id: ")? else {
            return Ok(false);
        };
        let Some(student) = self.book.students.get(&id).cloned() else {
            writeln!(self.writer, "error: student '{id}' not found")?;
            return Ok(true);
        };

        writeln!(self.writer, "1. First name:    {}", student.first_name)?;
        writeln!(self.writer, "2. Last name:     {}", student.last_name)?;
        writeln!(self.writer, "3. Email:         {}", student.email)?;
        writeln!(self.writer, "4. Date of birth: {}", student.date_of_birth)?;
        let Some(field) = self.prompt("Field to update (1-4, 0 to cancel): ")? else {
            return Ok(false);
        };
        if field == "0" {
            writeln!(self.writer, "Update cancelled.")?;
            return Ok(true);
        }
        let Some(value) = self.prompt("New value: ")? else {
            return Ok(false);
        };

        let mut update = StudentUpdate::default();
        match field.as_str() {
            "1" => update.first_name = Some(value),
            "2" => update.last_name = Some(value),
            "3" => update.email = Some(value),
            "4" => update.date_of_birth = Some(value),
            other => {
                writeln!(self.writer, "Unknown field '{other}'.")?;
                return Ok(true);
            }
        }

        match self.apply_and_save(|book| ops::update_student(book, &id, update)) {
            Ok(()) => writeln!(self.writer, "Student {id} updated.")?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(true)
    }

    fn delete_student(&mut self) -> Result<bool> {
        let Some(id) = self.prompt("Student id: ")? else {
            return Ok(false);
        };
        let Some(confirm) = self.prompt(&format!("Delete student {id}? (y/n): "))? else {
            return Ok(false);
        };
        if !confirm.eq_ignore_ascii_case("y") {
            writeln!(self.writer, "Deletion cancelled.")?;
            return Ok(true);
        }

        match self.apply_and_save(|book| ops::delete_student(book, &id)) {
            Ok(removed) => writeln!(
                self.writer,
                "Deleted student {} ({}).",
                removed.student_id,
                removed.full_name()
            )?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(true)
    }

    fn search_students(&mut self) -> Result<bool> {
        let Some(term) = self.prompt("Search term (id, name, or email): ")? else {
            return Ok(false);
        };
        let matches = report::search_students(&self.book, &term);
        if matches.is_empty() {
            writeln!(self.writer, "No matching students found.")?;
        } else {
            let table = render::render_student_table(&matches);
            write!(self.writer, "{table}")?;
        }
        Ok(true)
    }

    fn add_course(&mut self) -> Result<bool> {
        let Some(course_id) = self.prompt("Course id: ")? else {
            return Ok(false);
        };
        let Some(name) = self.prompt("Course name: ")? else {
            return Ok(false);
        };
        let Some(credits_text) = self.prompt("Credits (blank for none): ")? else {
            return Ok(false);
        };
        let credits = if credits_text.is_empty() {
            None
        } else {
            match credits_text.parse::<u32>() {
                Ok(credits) => Some(credits),
                Err(_) => {
                    writeln!(self.writer, "error: credits must be a whole number")?;
                    return Ok(true);
                }
            }
        };
        let Some(instructor_text) = self.prompt("Instructor (blank for none): ")? else {
            return Ok(false);
        };
        let instructor = (!instructor_text.is_empty()).then_some(instructor_text);

        let course = Course {
            course_id: course_id.clone(),
            name,
            credits,
            instructor,
        };
        match self.apply_and_save(|book| ops::add_course(book, course)) {
            Ok(()) => writeln!(self.writer, "Course {course_id} added.")?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(true)
    }

    fn list_courses(&mut self) -> Result<bool> {
        let courses: Vec<_> = self.book.courses.values().collect();
        let table = render::render_course_table(&courses);
        write!(self.writer, "{table}")?;
        Ok(true)
    }

    fn delete_course(&mut self) -> Result<bool> {
        let Some(id) = self.prompt("Course id: ")? else {
            return Ok(false);
        };
        let Some(confirm) = self.prompt(&format!("Delete course {id}? (y/n): "))? else {
            return Ok(false);
        };
        if !confirm.eq_ignore_ascii_case("y") {
            writeln!(self.writer, "Deletion cancelled.")?;
            return Ok(true);
        }

        match self.apply_and_save(|book| ops::delete_course(book, &id)) {
            Ok(removed) => writeln!(self.writer, "Deleted course {}.", removed.course_id)?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(true)
    }

    fn enroll(&mut self) -> Result<bool> {
        let Some(student_id) = self.prompt("Student id: ")? else {
            return Ok(false);
        };
        let Some(course_id) = self.prompt("Course id: ")? else {
            return Ok(false);
        };

        let today = self.today();
        match self.apply_and_save(|book| ops::enroll(book, &student_id, &course_id, &today)) {
            Ok(()) => writeln!(self.writer, "Enrolled {student_id} in {course_id}.")?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(true)
    }

    fn record_grade(&mut self) -> Result<bool> {
        let Some(student_id) = self.prompt("Student id: ")? else {
            return Ok(false);
        };
        let Some(course_id) = self.prompt("Course id: ")? else {
            return Ok(false);
        };

        let existing = self
            .book
            .students
            .get(&student_id)
            .and_then(|s| s.grade(&course_id))
            .map(|g| g.value.clone());
        if let Some(existing) = existing {
            let Some(confirm) = self.prompt(&format!(
                "Grade already recorded ({existing}). Overwrite? (y/n): "
            ))?
            else {
                return Ok(false);
            };
            if !confirm.eq_ignore_ascii_case("y") {
                writeln!(self.writer, "Grade unchanged.")?;
                return Ok(true);
            }
        }

        let Some(value) = self.prompt("Grade (A+ through F, or 0-100): ")? else {
            return Ok(false);
        };
        let today = self.today();
        match self.apply_and_save(|book| {
            ops::record_grade(book, &student_id, &course_id, &value, &today)
        }) {
            Ok(()) => writeln!(self.writer, "Grade recorded for {student_id} in {course_id}.")?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(true)
    }

    fn student_report(&mut self) -> Result<bool> {
        let Some(student_id) = self.prompt("Student id: ")? else {
            return Ok(false);
        };
        match report::transcript(&self.book, &student_id) {
            Ok(transcript) => writeln!(self.writer, "{}", render::render_transcript(&transcript))?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(true)
    }

    fn course_roster(&mut self) -> Result<bool> {
        let Some(course_id) = self.prompt("Course id: ")? else {
            return Ok(false);
        };
        match report::roster(&self.book, &course_id) {
            Ok(roster) => writeln!(self.writer, "{}", render::render_roster(&roster))?,
            Err(err) => self.report_error(&err)?,
        }
        Ok(true)
    }
}
