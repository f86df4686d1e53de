//! Environment variable abstraction and native implementation.

/// Read-only access to environment-style key-value configuration.
///
/// The native implementation maps to OS environment variables; tests use
/// an in-memory map.
pub trait Environment: Send + Sync {
    /// Get the value of an environment variable, or `None` if it is not set.
    fn get_var(&self, name: &str) -> Option<String>;
}

/// Native environment implementation using [`std::env`].
#[cfg(feature = "native")]
pub struct NativeEnvironment;

#[cfg(feature = "native")]
impl Environment for NativeEnvironment {
    fn get_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
