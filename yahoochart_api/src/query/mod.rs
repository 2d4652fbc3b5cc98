mod chart;
pub use self::chart::{ChartQuery, Interval, Range};

use url::Url;

/// Trait implemented by query builders. Serializes the builder into URL
/// query parameters.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}
