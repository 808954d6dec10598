/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Node identity, the program root and parent linking
/// - expressions: The expression node and its kinds
/// - statements: Declarations and statement nodes
/// - types: Type annotations as written in declarations
/// - visit: The traversal contract shared by every tree walker
/// - printer: Indented structural rendering of a tree
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
pub mod types;
pub mod visit;
