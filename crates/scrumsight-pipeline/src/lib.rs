//! Scrumsight Pipeline — sequences normalization, segmentation, field
//! recovery, assembly, and validation into one synchronous run per upload.

pub mod orchestrator;
pub mod store;
pub mod types;

pub use orchestrator::{Pipeline, PipelineState};
pub use store::{MemoryReportStore, ReportStore};
pub use types::{ReportSummary, UploadRequest, UploadSummary};
