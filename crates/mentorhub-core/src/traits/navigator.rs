//! Client navigation seam used for forced redirects.

/// The client's notion of "where the user currently is".
///
/// A hard redirect discards in-flight client state and lands on the target
/// route; implementations decide what that means for their surface.
pub trait Navigator: Send + Sync + std::fmt::Debug + 'static {
    /// The path of the route currently shown.
    fn current_path(&self) -> String;

    /// Navigate to `target`, discarding in-flight client state.
    fn hard_redirect(&self, target: &str);
}
