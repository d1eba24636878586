//! Site-script core: the product catalog, the translation layer and the
//! catalog renderer, independent from any DOM implementation.

pub mod catalog;
pub mod config;
pub mod error;
pub mod lint;
pub mod locale;
pub mod navigation;
pub mod product;
pub mod render;
pub mod slider;
pub mod storage;

pub use crate::error::{Error, Result};
