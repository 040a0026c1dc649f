/// The summary-document writer
pub mod writer;

pub use writer::{DocumentWriter, ExportError};
