//! Plugin pipeline: parse, run tree hooks, print.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::ast::{Source, Stylesheet};
use crate::{Error, Result};

/// A tree transformation run once per stylesheet.
pub trait Plugin {
    /// Name used in warnings.
    fn name(&self) -> &str;

    /// Transform the whole tree. Usage problems go to `result`; returning
    /// an error aborts processing.
    fn once(&self, root: &mut Stylesheet, result: &mut ProcessResult) -> Result<()>;
}

/// A non-fatal problem found while processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Plugin that raised the warning.
    pub plugin: String,
    /// Human readable message.
    pub text: String,
    /// File the offending node came from.
    pub file: Option<PathBuf>,
    /// Line of the offending node (1-indexed).
    pub line: u32,
    /// Column of the offending node (1-indexed).
    pub column: u32,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}: ", file.display(), self.line, self.column)?,
            None => write!(f, "<css input>:{}:{}: ", self.line, self.column)?,
        }
        write!(f, "{}: {}", self.plugin, self.text)
    }
}

/// Diagnostics collected while plugins run.
#[derive(Debug, Clone, Default)]
pub struct ProcessResult {
    warnings: Vec<Warning>,
}

impl ProcessResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning about the node at `source`.
    pub fn warn(&mut self, plugin: &str, text: impl Into<String>, source: &Source) {
        self.warnings.push(Warning {
            plugin: plugin.to_string(),
            text: text.into(),
            file: source.file.clone(),
            line: source.line,
            column: source.column,
        });
    }

    /// Warnings recorded so far.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Take the recorded warnings.
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

/// Options for a single [`Processor::process`] call.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// File the CSS text was read from.
    pub from: Option<PathBuf>,
}

impl ProcessOptions {
    /// Options for CSS read from `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            from: Some(path.into()),
        }
    }
}

/// Result of processing a stylesheet.
#[derive(Debug, Clone)]
pub struct Output {
    /// Printed CSS.
    pub css: String,
    /// The transformed tree.
    pub root: Stylesheet,
    /// Warnings raised by plugins.
    pub warnings: Vec<Warning>,
}

/// Runs plugins over stylesheets.
///
/// # Example
///
/// ```
/// use horizon_lattice_viewport::prelude::*;
///
/// let processor = Processor::new().plugin(PxToViewport::new(Config::default()).unwrap());
/// let output = processor
///     .process(".rule { font-size: 16px }", &ProcessOptions::default())
///     .unwrap();
/// assert_eq!(output.css, ".rule { font-size: 5vw }");
/// ```
#[derive(Default)]
pub struct Processor {
    plugins: Vec<Box<dyn Plugin>>,
}

impl Processor {
    /// Create a processor without plugins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin; plugins run in the order they were added.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns true if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Run every plugin over an already parsed tree.
    pub fn run(&self, root: &mut Stylesheet) -> Result<ProcessResult> {
        let mut result = ProcessResult::new();
        for plugin in &self.plugins {
            tracing::debug!("Running plugin '{}'", plugin.name());
            plugin.once(root, &mut result)?;
        }
        Ok(result)
    }

    /// Parse, transform and print CSS text.
    pub fn process(&self, css: &str, options: &ProcessOptions) -> Result<Output> {
        let mut root = Stylesheet::parse(css, options.from.as_deref())?;
        let result = self.run(&mut root)?;
        Ok(Output {
            css: root.to_string(),
            root,
            warnings: result.into_warnings(),
        })
    }

    /// Read, transform and print a stylesheet file.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<Output> {
        let path = path.as_ref();
        let css = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        self.process(&css, &ProcessOptions::from_path(path))
    }
}

impl fmt::Debug for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("plugins", &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>())
            .finish()
    }
}
