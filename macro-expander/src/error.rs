use config::ConfigError;
use macro_grammar::GrammarError;
use macro_lexer::LexError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpandError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error("expansion of `{context}` nested deeper than {limit} levels")]
    RecursionLimit { limit: usize, context: String },

    #[error("macro `{name}` is already registered")]
    DuplicateMacro { name: String },

    #[error("macro `{macro_name}` uses unknown expander `{expander}`")]
    UnknownExpander { macro_name: String, expander: String },

    #[error("macro `{macro_name}` refers to `{label}`, which its pattern never captures")]
    UnknownCapture { macro_name: String, label: String },

    #[error("malformed template at byte {offset}: {message}")]
    Template { offset: usize, message: String },

    #[error("compiler `{name}` failed: {message}")]
    Compiler { name: String, message: String },

    #[error("refusing to overwrite the source file {}", .path.display())]
    SameTarget { path: PathBuf },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ExpandError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// For compilers to report a failed pass.
    pub fn compiler(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Compiler {
            name: name.into(),
            message: message.into(),
        }
    }
}
