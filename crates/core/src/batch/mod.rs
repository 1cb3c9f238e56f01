//! Chunked re-processing of the user base
//!
//! [`BatchDriver`] handles one page per request on the server side.
//! [`ProgressReporter`] is the client loop that walks pages over a
//! [`BatchTransport`] and reports running totals.

pub mod driver;
pub mod progress;

pub use driver::BatchDriver;
pub use progress::{
    BatchTransport, NoopObserver, ProgressObserver, ProgressReporter, ReporterError, RunOutcome,
};
