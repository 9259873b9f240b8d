mod kind;
mod node;
pub mod printer;
mod tree;
pub mod walker;

pub use kind::SyntaxKind;
pub use node::*;
pub use tree::{LineIndex, Location, SyntaxTree};
pub use walker::{SyntaxWalker, Visitable};
