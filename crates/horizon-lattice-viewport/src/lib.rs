//! Pixel to viewport unit conversion for Horizon Lattice stylesheets.
//!
//! This crate rewrites pixel lengths in stylesheet declarations into
//! viewport-relative units (`vw`, `vh`, `vmin`, `vmax`) so layouts designed
//! against a fixed reference width scale with the viewport:
//!
//! - **Unit matching**: finds `<number>px` tokens outside strings and `url()`
//! - **Property filtering**: exact, wildcard and negated prop list tokens
//! - **Rounding**: floor-then-round at a fixed precision
//! - **Rule policy**: file filters, selector blacklist, media query gating,
//!   ignore comments, duplicate suppression and landscape output
//!
//! # Example
//!
//! ```
//! use horizon_lattice_viewport::prelude::*;
//!
//! let processor = Processor::new().plugin(PxToViewport::new(Config::default())?);
//! let output = processor.process(
//!     "h1 { margin: 0 0 20px; font-size: 32px; line-height: 2; letter-spacing: 1px; }",
//!     &ProcessOptions::default(),
//! )?;
//!
//! assert_eq!(
//!     output.css,
//!     "h1 { margin: 0 0 6.25vw; font-size: 10vw; line-height: 2; letter-spacing: 1px; }"
//! );
//! # Ok::<(), horizon_lattice_viewport::Error>(())
//! ```
//!
//! # Ignore comments
//!
//! `/* px-to-viewport-ignore-next */` before a declaration, or
//! `/* px-to-viewport-ignore */` after it on the same line, keeps that
//! declaration unconverted. The comment is removed from the output.

pub mod ast;
pub mod config;
pub mod convert;
pub mod engine;
pub mod matcher;
pub mod processor;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::ast::{AtRule, Comment, Declaration, Node, Rule, Stylesheet};
    pub use crate::config::{Config, FileFilter, SelectorFilter};
    pub use crate::engine::{IGNORE_NEXT_COMMENT, IGNORE_PREV_COMMENT, PxToViewport};
    pub use crate::matcher::{PropList, UnitPattern};
    pub use crate::processor::{Output, Plugin, ProcessOptions, ProcessResult, Processor, Warning};
}
