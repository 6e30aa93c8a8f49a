//! sheetmark-core: answer sheet builder, selection model, and scoring.
//!
//! This crate defines the sheet data model, the label schemes, the scoring
//! engine that reconciles user answers with an answer key, and the session
//! that ties them together for interactive use.

pub mod answers;
pub mod builder;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod label;
pub mod report;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod sheet;

pub use error::SheetError;
