//! Platform abstraction layer for gameutils.
//!
//! Provides traits for all platform-dependent operations (HTTP, filesystem,
//! environment) so the archive builder and extension adapter never touch
//! the network or disk directly and can be driven by fakes in tests.
//!
//! # Architecture
//!
//! The [`Platform`] trait bundles all platform capabilities via accessor
//! methods. Each sub-capability has its own trait ([`http::HttpClient`],
//! [`fs::FileSystem`], [`env::Environment`]) with a corresponding native
//! implementation behind the `native` feature.
//!
//! # Example
//!
//! ```rust,no_run
//! use gameutils_platform::{Platform, NativePlatform};
//! use gameutils_platform::http::HttpClient;
//! use gameutils_types::config::FetchConfig;
//! use std::collections::HashMap;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let platform = NativePlatform::new(&FetchConfig::default())?;
//! let response = platform.http()
//!     .get("https://example.com/cat.svg", &HashMap::new())
//!     .await?;
//! assert!(response.is_ok_status());
//! # Ok(())
//! # }
//! ```

pub mod config_loader;
pub mod env;
pub mod fs;
pub mod http;

use std::sync::Arc;

/// Bundle of all platform capabilities.
pub trait Platform: Send + Sync {
    /// HTTP client for asset retrieval.
    fn http(&self) -> &dyn http::HttpClient;

    /// Shared handle to the HTTP client, for components that outlive a borrow.
    fn http_arc(&self) -> Arc<dyn http::HttpClient>;

    /// Filesystem operations.
    fn fs(&self) -> &dyn fs::FileSystem;

    /// Environment variable access.
    fn env(&self) -> &dyn env::Environment;
}

/// Native platform implementation using reqwest, tokio::fs and std::env.
#[cfg(feature = "native")]
pub struct NativePlatform {
    http: Arc<http::NativeHttpClient>,
    fs: fs::NativeFileSystem,
    env: env::NativeEnvironment,
}

#[cfg(feature = "native")]
impl NativePlatform {
    /// Create a native platform whose HTTP client honors the fetch timeout.
    pub fn new(
        fetch: &gameutils_types::config::FetchConfig,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let timeout = std::time::Duration::from_secs(fetch.timeout_secs);
        Ok(Self {
            http: Arc::new(http::NativeHttpClient::new(timeout)?),
            fs: fs::NativeFileSystem,
            env: env::NativeEnvironment,
        })
    }
}

#[cfg(feature = "native")]
impl Platform for NativePlatform {
    fn http(&self) -> &dyn http::HttpClient {
        self.http.as_ref()
    }

    fn http_arc(&self) -> Arc<dyn http::HttpClient> {
        self.http.clone()
    }

    fn fs(&self) -> &dyn fs::FileSystem {
        &self.fs
    }

    fn env(&self) -> &dyn env::Environment {
        &self.env
    }
}
