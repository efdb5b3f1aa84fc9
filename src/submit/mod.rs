//! Configuration submission
//!
//! The client half of the crate: an [`EditorSource`] provides the text, a
//! [`ConfigSubmitter`] sends it, and a [`StatusDisplay`] shows how it went.

pub mod editor;
pub mod network;
pub mod outcome;
pub mod status;
pub mod submitter;

pub use editor::{EditorSource, FileEditor, MemoryEditor, StdinEditor, editor_for_path};
pub use outcome::{RecognizedError, RecognizedErrors, SubmitOutcome};
pub use status::{ConsoleDisplay, Indicator, IndicatorBoard, StatusDisplay};
pub use submitter::ConfigSubmitter;
