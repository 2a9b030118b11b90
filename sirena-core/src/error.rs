use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed network snapshot: {0}")]
    MalformedGraph(String),
    #[error("No network node within {max_distance_m} m of ({lat}, {lon})")]
    NoNearbyNode {
        lat: f64,
        lon: f64,
        max_distance_m: f64,
    },
    #[error("Source and target are not connected")]
    NoPath,
    #[error("No route satisfies the risk threshold")]
    NoSafePath,
    #[error("Search cancelled")]
    Cancelled,
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}

impl Error {
    /// Whether the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
