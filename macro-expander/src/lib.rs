//! Macro expansion on top of the class-member grammars: the engine boundary,
//! the built-in expanders and the [`Toolkit`] that owns one engine.

pub mod config;
pub mod engine;
pub mod error;
pub mod expanders;
pub mod macros;
pub mod paths;
pub mod template;
pub mod toolkit;

pub use config::{load_defaults, Loader, ToolkitConfig};
pub use engine::{Compiler, Engine, Expander, Expansion, GcMode, MacroEngine};
pub use error::ExpandError;
pub use expanders::{argument_with_nullability, ArgumentExpansion};
pub use macros::Macro;
pub use template::{Segment, Template};
pub use toolkit::Toolkit;
