/// Semantic analysis module
/// Resolves names against a chain of scopes and checks types over the AST
///
/// Submodules:
/// - symbol_table: Symbol and scope arenas, offsets and type resolution
/// - analyzer: The tree walker that builds scopes and reports semantic errors
pub mod analyzer;
pub mod symbol_table;

#[cfg(test)]
mod tests;
