//! Persistence for Tend: the read-only artifact index, the revalidation
//! schedule document, and report files.
//!
//! All writes are single-pass: serialize to a temp file, then rename into
//! place. The schedule document additionally takes an exclusive file lock
//! for the duration of the write.

pub mod index;
pub mod report_writer;
pub mod schedule_store;

pub use index::load_index;
pub use report_writer::ReportWriter;
pub use schedule_store::ScheduleStore;
