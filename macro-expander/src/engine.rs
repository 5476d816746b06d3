//! The macro engine.
//!
//! [`MacroEngine`] is the boundary expanders talk to: they hand it rewritten
//! text (or tokens) and get back a freshly expanded stream. [`Engine`] is the
//! bundled implementation, holding the registered macros, compilers and
//! expanders.

use crate::config::ExpansionConfig;
use crate::error::ExpandError;
use crate::expanders::default_expanders;
use crate::macros::Macro;
use crate::template::Segment;
use log::{debug, trace, warn};
use macro_grammar::Capture;
use macro_lexer::{Token, TokenStream};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Whether an expansion unit is retained until the next
/// [`Engine::collect_garbage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GcMode {
    #[default]
    Enabled,
    Disabled,
}

pub trait MacroEngine {
    /// Expands every macro in `source`, recursively.
    fn expand(&mut self, source: &str, context: &str, gc: GcMode) -> Result<String, ExpandError>;

    fn from_source(&self, text: &str) -> Result<TokenStream, ExpandError> {
        Ok(TokenStream::from_source(text)?)
    }

    /// Splices `tokens` back into the pipeline as a new expansion unit.
    ///
    /// Sub-expansions are never retained.
    fn resubmit(&mut self, tokens: &[Token], context: &str) -> Result<TokenStream, ExpandError> {
        let source: String = tokens.iter().map(Token::lexeme).collect();
        let expanded = self.expand(&source, context, GcMode::Disabled)?;
        self.from_source(&expanded)
    }
}

/// Rewrites a captured region.
pub type Expander = fn(TokenStream, &mut dyn MacroEngine) -> Result<TokenStream, ExpandError>;

/// A text pass run over fully expanded output.
pub type Compiler = Rc<dyn Fn(&str) -> Result<String, ExpandError>>;

/// One retained expansion unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub context: String,
    pub output: String,
}

pub struct Engine {
    macros: Vec<Rc<Macro>>,
    compilers: Vec<(String, Compiler)>,
    expanders: HashMap<String, Expander>,
    retained: Vec<Expansion>,
    depth: usize,
    max_depth: usize,
    retain_intermediate: bool,
}

impl Engine {
    /// An engine with the built-in expanders registered.
    pub fn new(config: &ExpansionConfig) -> Self {
        let mut engine = Self {
            macros: Vec::new(),
            compilers: Vec::new(),
            expanders: HashMap::new(),
            retained: Vec::new(),
            depth: 0,
            max_depth: config.max_depth,
            retain_intermediate: config.retain_intermediate,
        };
        for (name, expander) in default_expanders() {
            engine.register_expander(name, expander);
        }
        engine
    }

    pub fn register_expander(&mut self, name: impl Into<String>, expander: Expander) {
        self.expanders.insert(name.into(), expander);
    }

    /// Registers a macro after checking its template against its pattern and
    /// the expander registry. Macros are tried in registration order.
    pub fn add_macro(&mut self, definition: Macro) -> Result<(), ExpandError> {
        if self.macros.iter().any(|m| m.name() == definition.name()) {
            return Err(ExpandError::DuplicateMacro {
                name: definition.name().to_string(),
            });
        }
        definition.check_labels()?;
        if let Some(expander) = definition
            .template()
            .expanders()
            .find(|name| !self.expanders.contains_key(*name))
        {
            return Err(ExpandError::UnknownExpander {
                macro_name: definition.name().to_string(),
                expander: expander.to_string(),
            });
        }

        debug!("registered macro `{}`", definition.name());
        self.macros.push(Rc::new(definition));
        Ok(())
    }

    pub fn remove_macro(&mut self, name: &str) -> bool {
        let before = self.macros.len();
        self.macros.retain(|m| m.name() != name);
        before != self.macros.len()
    }

    pub fn macros(&self) -> impl Iterator<Item = &Macro> {
        self.macros.iter().map(|m| &**m)
    }

    /// Adds a compiler pass, replacing any existing pass of the same name in
    /// place.
    pub fn add_compiler<F>(&mut self, name: impl Into<String>, compiler: F)
    where
        F: Fn(&str) -> Result<String, ExpandError> + 'static,
    {
        let name = name.into();
        let compiler: Compiler = Rc::new(compiler);
        match self.compilers.iter_mut().find(|(known, _)| *known == name) {
            Some(slot) => slot.1 = compiler,
            None => self.compilers.push((name, compiler)),
        }
    }

    pub fn remove_compiler(&mut self, name: &str) -> bool {
        let before = self.compilers.len();
        self.compilers.retain(|(known, _)| known != name);
        before != self.compilers.len()
    }

    pub fn run_compilers(&self, code: &str) -> Result<String, ExpandError> {
        let mut code = code.to_string();
        for (name, compiler) in &self.compilers {
            debug!("running compiler `{name}`");
            code = compiler(&code)?;
        }
        Ok(code)
    }

    pub fn retained(&self) -> &[Expansion] {
        &self.retained
    }

    /// Drops every retained expansion unit, returning how many there were.
    pub fn collect_garbage(&mut self) -> usize {
        let dropped = self.retained.len();
        self.retained.clear();
        dropped
    }

    fn expand_stream(
        &mut self,
        stream: &mut TokenStream,
        gc: GcMode,
    ) -> Result<String, ExpandError> {
        let mut output = String::new();

        loop {
            for trivia in stream.trivia_before() {
                output.push_str(trivia.lexeme());
            }
            let Some(token) = stream.current().cloned() else {
                break;
            };

            match self.match_at(stream) {
                Some((definition, capture)) => {
                    let rendered = self.render(&definition, &capture)?;
                    output.push_str(&self.expand(&rendered, definition.name(), gc)?);
                }
                None => {
                    output.push_str(token.lexeme());
                    stream.next();
                }
            }
        }

        Ok(output)
    }

    /// The first macro matching at the cursor, with the cursor moved past the
    /// match. Zero-width matches are skipped.
    fn match_at(&self, stream: &mut TokenStream) -> Option<(Rc<Macro>, Capture)> {
        for definition in &self.macros {
            let checkpoint = stream.checkpoint();
            match definition.pattern().parse(stream) {
                Ok(_) if stream.index() == checkpoint.index() => {
                    warn!("macro `{}` matched nothing; ignoring", definition.name());
                }
                Ok(capture) => {
                    debug!(
                        "macro `{}` matched at {}",
                        definition.name(),
                        checkpoint.position()
                    );
                    return Some((Rc::clone(definition), capture));
                }
                Err(mismatch) => {
                    trace!("macro `{}`: {mismatch}", definition.name());
                    stream.restore(checkpoint);
                }
            }
        }
        None
    }

    fn render(&mut self, definition: &Macro, capture: &Capture) -> Result<String, ExpandError> {
        let mut rendered = String::new();

        for segment in definition.template().segments() {
            match segment {
                Segment::Text(text) => rendered.push_str(text),
                Segment::Capture { label, expanders } => {
                    let Some(found) = capture.find(label) else {
                        trace!("`{label}` not captured by `{}`", definition.name());
                        continue;
                    };
                    let mut stream = found.stream();
                    for name in expanders {
                        let expander = *self.expanders.get(name).ok_or_else(|| {
                            ExpandError::UnknownExpander {
                                macro_name: definition.name().to_string(),
                                expander: name.clone(),
                            }
                        })?;
                        stream = expander(stream, self)?;
                    }
                    rendered.push_str(&stream.to_string());
                }
            }
        }

        Ok(rendered)
    }
}

impl MacroEngine for Engine {
    fn expand(&mut self, source: &str, context: &str, gc: GcMode) -> Result<String, ExpandError> {
        if self.depth >= self.max_depth {
            return Err(ExpandError::RecursionLimit {
                limit: self.max_depth,
                context: context.to_string(),
            });
        }

        let mut stream = self.from_source(source)?;
        debug!(
            "expanding `{context}` at depth {} ({} tokens)",
            self.depth,
            stream.len()
        );

        self.depth += 1;
        let output = self.expand_stream(&mut stream, gc);
        self.depth -= 1;
        let output = output?;

        if gc == GcMode::Enabled && self.retain_intermediate {
            self.retained.push(Expansion {
                context: context.to_string(),
                output: output.clone(),
            });
        }
        Ok(output)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut expanders: Vec<&String> = self.expanders.keys().collect();
        expanders.sort();
        f.debug_struct("Engine")
            .field("macros", &self.macros)
            .field(
                "compilers",
                &self.compilers.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .field("expanders", &expanders)
            .field("retained", &self.retained.len())
            .field("depth", &self.depth)
            .finish()
    }
}
