//! Converter backends.
//!
//! Resizing itself is delegated: this module provides the `Converter` trait
//! and the `ExternalConverter` that shells out to ImageMagick's `convert`.

mod external;
mod traits;

pub use external::ExternalConverter;
pub use traits::{Converter, ConverterInfo};

use crate::config::ResizeConfig;

/// Factory for creating converter instances.
pub struct ConverterFactory;

impl ConverterFactory {
    /// Get the converter for the given configuration.
    pub fn for_config(config: &ResizeConfig) -> Box<dyn Converter> {
        Box::new(ExternalConverter::new(&config.converter))
    }
}
