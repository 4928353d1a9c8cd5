//! Process-wide key/value settings.

use bazaar_types::error::RepositoryError;

pub trait ConfigRepository: Send + Sync {
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, RepositoryError>> + Send;

    /// Atomically flip a `"true"`/`"false"` flag and return the new value.
    ///
    /// A missing key counts as `"false"`, so the first toggle yields `"true"`.
    fn toggle_flag(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<String, RepositoryError>> + Send;
}
