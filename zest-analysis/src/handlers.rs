//! Language server protocol handlers: the editor-facing adapter over the
//! query facade (C6).

mod common;
mod goto_definition;
mod hover;
mod references;

pub use goto_definition::goto_definition;
pub use hover::hover;
pub use references::find_references;
