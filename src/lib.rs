//! sickday - sick-leave absence hypothesis testing
//!
//! Loads an absence export (missed work days, age, sex), splits it into
//! men vs women and older vs younger employees, and for each pair picks
//! the appropriate significance test: Shapiro-Wilk decides between a
//! t-test and the Mann-Whitney U test.
//!
//! The statistical core lives in [`hypothesis`] and knows nothing about
//! files or columns; the other modules feed it and render its verdicts.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod grouping;
pub mod html_output;
pub mod hypothesis;
pub mod json_output;
pub mod report;
pub mod summary;
