//! sheetmark-report: HTML rendering for answer sheets and score reports.
//!
//! Produces self-contained, printable HTML documents with all CSS inlined.

pub mod html;
