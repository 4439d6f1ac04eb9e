//! Asset source port — where the asset collection comes from.

use std::future::Future;

use assetdash_domain::asset::Asset;
use assetdash_domain::error::LoadError;

/// Produces a complete asset collection, in source order.
///
/// One call is one request to the underlying source. Implementations must not
/// retry on their own; failure handling belongs to the caller.
pub trait AssetSource: Send + Sync {
    /// Fetch and decode the current collection.
    fn fetch(&self) -> impl Future<Output = Result<Vec<Asset>, LoadError>> + Send;
}

impl<T: AssetSource> AssetSource for std::sync::Arc<T> {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Asset>, LoadError>> + Send {
        (**self).fetch()
    }
}
