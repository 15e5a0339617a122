//! Builder pattern implementation for creating ProgressRegistry instances.
//!
//! This module provides the [`RegistryBuilder`] struct for configuring and
//! creating a [`ProgressRegistry`]: asset name tables, the clock, the
//! observer callback and the presenter.
//!
//! # Examples
//!
//! ## Basic Builder Usage
//!
//! ```rust
//! use progressmgr::RegistryBuilder;
//!
//! # fn main() -> progressmgr::Result<()> {
//! let registry = RegistryBuilder::new()
//!     .frames("xLoading_Linking", "png", 18)
//!     .build()?;
//! assert_eq!(registry.loading_frame_id(3), "xLoading_Linking.03.png");
//! # Ok(())
//! # }
//! ```
//!
//! ## Observing Updates
//!
//! ```rust
//! use progressmgr::{RegistryBuilder, StaticText};
//!
//! # fn main() -> progressmgr::Result<()> {
//! let registry = RegistryBuilder::new()
//!     .on_update(|update| {
//!         let op = update.operation();
//!         println!("{} {}/{}", op.title(), op.progress(), op.max());
//!     })
//!     .build()?;
//!
//! let op = registry.register_operation(10.0, "city.prp", StaticText::Linking, false, false);
//! op.increment(5.0);
//! # Ok(())
//! # }
//! ```

use super::config::{loading_frame_ids, RegistryConfig, StaticText};
use super::registry::ProgressRegistry;
use super::update::ProgressUpdate;
use crate::progress::ProgressPresenter;
use crate::utils::Clock;
use crate::{Error, Result};

use std::sync::Arc;

/// A builder used to create a [`ProgressRegistry`].
///
/// ```rust
/// # fn main() -> progressmgr::Result<()> {
/// use progressmgr::RegistryBuilder;
///
/// let registry = RegistryBuilder::new().build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    config: RegistryConfig,
}

impl RegistryBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        RegistryBuilder::default()
    }

    /// Use a numbered frame sequence named `prefix.NN.extension`.
    pub fn frames(mut self, prefix: &str, extension: &str, count: usize) -> Self {
        self.config.frame_ids = loading_frame_ids(prefix, extension, count);
        self
    }

    /// Use an explicit list of frame names.
    pub fn frame_ids(mut self, frame_ids: Vec<String>) -> Self {
        self.config.frame_ids = frame_ids;
        self
    }

    /// Set the asset name of one banner.
    pub fn static_text_id(mut self, kind: StaticText, id: impl Into<String>) -> Self {
        self.config.static_text_ids[kind.index()] = id.into();
        self
    }

    /// Set the time source for operation statistics.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.config.clock = clock;
        self
    }

    /// Set the observer called on every operation update.
    ///
    /// The observer runs while the registry is locked and must not call
    /// back into it.
    pub fn on_update<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProgressUpdate<'_>) + Send + Sync + 'static,
    {
        self.config.observer = Some(Arc::new(callback));
        self
    }

    /// Set the presenter, called before the observer.
    pub fn presenter<P>(mut self, presenter: P) -> Self
    where
        P: ProgressPresenter + 'static,
    {
        self.config.presenter = Box::new(presenter);
        self
    }

    /// Create the [`ProgressRegistry`] with the specified options.
    pub fn build(self) -> Result<ProgressRegistry> {
        if self.config.frame_ids.is_empty() {
            return Err(Error::EmptyFrameTable);
        }
        Ok(ProgressRegistry::new(self.config))
    }
}
