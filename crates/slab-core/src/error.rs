//! Error types for `slab-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("{0} is required")]
  MissingField(&'static str),

  #[error("year is not a number: {0:?}")]
  InvalidYear(String),

  #[error("year {0} is outside the accepted range")]
  YearOutOfRange(i32),

  #[error("grade is not a number: {0:?}")]
  InvalidGrade(String),

  #[error("grade {0} is outside 1-10")]
  GradeOutOfRange(u8),

  #[error("not an image: {0}")]
  NotAnImage(String),

  #[error("image is {0} bytes, above the 5 MiB limit")]
  ImageTooLarge(usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
