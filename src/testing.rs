//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures to avoid duplication.

#![doc(hidden)]

use crate::types::CanonicalRecord;

/// A student-subject record with identifier, subject and line set.
pub fn make_record(identifier: &str, subject: &str, line: &str) -> CanonicalRecord {
    CanonicalRecord {
        identifier: identifier.to_string(),
        name: format!("Student {}", identifier),
        subject: subject.to_string(),
        line: line.to_string(),
        photo_reference: format!("../photos/{}.webp", identifier),
        ..Default::default()
    }
}

/// An identity-level record: one per student, with a class.
pub fn make_student(identifier: &str, name: &str, class: &str) -> CanonicalRecord {
    CanonicalRecord {
        identifier: identifier.to_string(),
        name: name.to_string(),
        registration_class: class.to_string(),
        photo_reference: format!("../photos/{}.webp", identifier),
        ..Default::default()
    }
}

/// A fully populated student-subject record.
pub fn make_enrolment(
    identifier: &str,
    name: &str,
    subject: &str,
    line: &str,
    teacher: &str,
    grade: &str,
) -> CanonicalRecord {
    CanonicalRecord {
        identifier: identifier.to_string(),
        name: name.to_string(),
        subject: subject.to_string(),
        line: line.to_string(),
        teacher: teacher.to_string(),
        grade: grade.to_string(),
        photo_reference: format!("../photos/{}.webp", identifier),
        ..Default::default()
    }
}

/// A small mixed dataset: three grades, several subjects and lines.
pub fn sample_enrolments() -> Vec<CanonicalRecord> {
    vec![
        make_enrolment("1001", "Ann Lee", "Mathematics", "3", "Mr Dube", "10"),
        make_enrolment("1002", "Bo Kim", "Mathematics", "3", "Mr Dube", "10"),
        make_enrolment("1003", "Cy Naidoo", "Mathematical Literacy", "2", "Ms Pillay", "10"),
        make_enrolment("1001", "Ann Lee", "Information Technology", "5", "Mrs Botha", "10"),
        make_enrolment("2001", "Dee Smith", "Life Sciences", "1", "Dr Moyo", "11"),
        make_enrolment("2002", "Eli Jones", "Mathematics", "4", "Mr Dube", "11"),
        make_enrolment("3001", "Fay Zulu", "Visual Arts", "", "Ms Adams", "12"),
    ]
}
