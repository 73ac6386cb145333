//! Row structs for the `students` table.

pub mod student;
