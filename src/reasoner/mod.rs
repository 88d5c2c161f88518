mod reasoner;
mod report;

pub use reasoner::Reasoner;
pub use report::DetectionReport;
