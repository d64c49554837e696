#[derive(Debug)]
pub enum ApiError {
    /// The API returned a non-OK HTTP response.
    HTTPResponseError(hyper::StatusCode, String),
    /// Invalid data was supplied to the library, or received from the API.
    InputDataError(String),
}

impl std::error::Error for ApiError {}
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// A report doesn't have the shape required for filling in missing dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// No headers defined in the report.
    MissingHeaders,
    /// Fewer than two columns, or the first column isn't a dimension.
    InsufficientDimensions,
    /// The second column is a dimension too; only one is supported.
    MultipleDimensionsUnsupported,
    /// The dimension is neither DATE nor MONTH.
    UnsupportedDimension(String),
}

impl std::error::Error for ReportError {}
impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
