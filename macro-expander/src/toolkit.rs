//! The application root.
//!
//! A [`Toolkit`] owns one [`Engine`] and the configuration it was built from.
//! Everything that needs macro registration or expansion borrows it.

use crate::config::{load_defaults, ToolkitConfig};
use crate::engine::{Engine, GcMode, MacroEngine};
use crate::error::ExpandError;
use crate::expanders::collapse_text;
use crate::macros::Macro;
use crate::paths;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Toolkit {
    engine: Engine,
    config: ToolkitConfig,
}

impl Toolkit {
    /// A toolkit using the embedded default configuration.
    pub fn new() -> Result<Self, ExpandError> {
        Ok(Self::with_config(load_defaults()?))
    }

    pub fn with_config(config: ToolkitConfig) -> Self {
        Self {
            engine: Engine::new(&config.expansion),
            config,
        }
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn add_macro(&mut self, definition: Macro) -> Result<(), ExpandError> {
        self.engine.add_macro(definition)
    }

    pub fn remove_macro(&mut self, name: &str) -> bool {
        self.engine.remove_macro(name)
    }

    pub fn add_compiler<F>(&mut self, name: impl Into<String>, compiler: F)
    where
        F: Fn(&str) -> Result<String, ExpandError> + 'static,
    {
        self.engine.add_compiler(name, compiler);
    }

    pub fn remove_compiler(&mut self, name: &str) -> bool {
        self.engine.remove_compiler(name)
    }

    /// Expands every macro in `code`, then runs the compilers.
    pub fn parse(&mut self, code: &str) -> Result<String, ExpandError> {
        let expanded = self.engine.expand(code, "", GcMode::Enabled)?;
        self.engine.run_compilers(&expanded)
    }

    /// Normalizes whitespace: no trailing spaces, no runs of blank lines, no
    /// leading blank lines and exactly one final newline.
    pub fn format(&self, code: &str) -> String {
        let stripped: Vec<&str> = code.lines().map(str::trim_end).collect();
        let collapsed = collapse_text(&stripped.join("\n"));
        let body = collapsed.trim_start_matches('\n').trim_end();
        if body.is_empty() {
            return String::new();
        }
        format!("{body}\n")
    }

    /// Reads `from`, expands it and writes the result to `to`.
    pub fn compile(
        &mut self,
        from: &Path,
        to: &Path,
        format: bool,
        comment: bool,
    ) -> Result<String, ExpandError> {
        let source = fs::read_to_string(from).map_err(|e| ExpandError::io(from, e))?;
        let mut code = self.parse(&source)?;

        if comment {
            code = insert_comment(&code, &self.config.output.comment);
        }
        if format {
            code = self.format(&code);
        }

        if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ExpandError::io(parent, e))?;
        }
        fs::write(to, &code).map_err(|e| ExpandError::io(to, e))?;
        debug!("compiled {} -> {}", from.display(), to.display());
        Ok(code)
    }

    /// Compiles `from` next to itself with the configured output extension.
    pub fn process(&mut self, from: &Path) -> Result<PathBuf, ExpandError> {
        let to = from.with_extension(&self.config.output.extension);
        if to == from {
            return Err(ExpandError::SameTarget { path: to });
        }
        self.compile(from, &to, true, true)?;
        Ok(to)
    }

    /// The project root above `start`, located by the configured marker.
    pub fn base(&self, start: &Path) -> Option<PathBuf> {
        let project = &self.config.project;
        paths::base(start, &project.marker, project.search_depth)
    }
}

/// Places `comment` directly after an opening `<?php` tag, or at the top.
fn insert_comment(code: &str, comment: &str) -> String {
    match code.strip_prefix("<?php") {
        Some(rest) => format!("<?php\n\n{comment}\n{rest}"),
        None => format!("{comment}\n\n{code}"),
    }
}
