/// Data-integrity failures. Every other degenerate input resolves to a default.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("unknown item status: {value:?}")]
    UnknownStatus { value: String },

    #[error("unknown report status: {value:?}")]
    UnknownReportStatus { value: String },
}
