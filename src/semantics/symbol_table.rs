//! Symbols, scopes and storage offsets.
//!
//! Symbols and scopes live in arenas owned by the `SymbolTable` and refer to
//! each other by index. Scopes only point at their parent, so resolution walks
//! the chain from the current scope up to `GLOBAL`. Every scope created during
//! a run is kept so it can be reported afterwards.

use std::collections::HashMap;

use crate::Position;

pub const GLOBAL_SCOPE_NAME: &str = "GLOBAL";

/// Names of the builtin types present in the global scope.
pub const BUILTIN_TYPES: [&str; 5] = ["integer", "boolean", "char", "string", "void"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Builtin,
    Variable { offset: i32 },
    Function { parameters: Vec<SymbolId> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    /// The symbol's type: a builtin for variables, the return type for
    /// functions and `None` for builtins themselves.
    pub declared_type: Option<SymbolId>,
    pub kind: SymbolKind,
    pub position: Position,
}

impl Symbol {
    pub fn is_function(&self) -> bool {
        matches!(self.kind, SymbolKind::Function { .. })
    }

    pub fn offset(&self) -> Option<i32> {
        match self.kind {
            SymbolKind::Variable { offset } => Some(offset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub name: String,
    pub level: u32,
    pub parent: Option<ScopeId>,
    /// Only set on function scopes.
    pub return_type: Option<SymbolId>,
    symbols: HashMap<String, SymbolId>,
}

impl Scope {
    pub fn lookup_local(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(name).copied()
    }

    pub fn symbols(&self) -> impl Iterator<Item = (&String, &SymbolId)> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Hands out storage offsets for variables and parameters.
///
/// Starts at 0 and moves down by 4 on every allocation, so the first offset
/// is -4.
#[derive(Debug, Default)]
pub struct OffsetAllocator {
    current: i32,
}

impl OffsetAllocator {
    pub const SLOT_SIZE: i32 = 4;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> i32 {
        self.current -= Self::SLOT_SIZE;
        self.current
    }
}

#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// A table holding only the global scope and its builtin types.
    pub fn new() -> Self {
        let mut table = SymbolTable {
            symbols: vec![],
            scopes: vec![Scope {
                name: String::from(GLOBAL_SCOPE_NAME),
                level: 0,
                parent: None,
                return_type: None,
                symbols: HashMap::new(),
            }],
        };

        let global = table.global();
        for builtin in BUILTIN_TYPES {
            let symbol = Symbol {
                name: String::from(builtin),
                declared_type: None,
                kind: SymbolKind::Builtin,
                position: Position::null(),
            };
            // Builtin names are distinct, so this cannot collide
            let _ = table.define(global, symbol);
        }

        table
    }

    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn create_scope(
        &mut self,
        name: impl Into<String>,
        parent: ScopeId,
        return_type: Option<SymbolId>,
    ) -> ScopeId {
        let level = self.scope(parent).level + 1;
        self.scopes.push(Scope {
            name: name.into(),
            level,
            parent: Some(parent),
            return_type,
            symbols: HashMap::new(),
        });
        ScopeId(self.scopes.len() - 1)
    }

    /// Inserts `symbol` into `scope`. On a name collision within that scope
    /// nothing is inserted and the existing symbol is returned as the error.
    pub fn define(&mut self, scope: ScopeId, symbol: Symbol) -> Result<SymbolId, SymbolId> {
        if let Some(existing) = self.scope(scope).lookup_local(&symbol.name) {
            return Err(existing);
        }

        let id = SymbolId(self.symbols.len());
        let name = symbol.name.clone();
        self.symbols.push(symbol);
        self.scopes[scope.0].symbols.insert(name, id);
        Ok(id)
    }

    /// Resolves `name` from `scope` outwards.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(symbol) = scope.lookup_local(name) {
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }

    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scope(scope).lookup_local(name)
    }

    /// The nearest scope, from `scope` outwards, that records a return type.
    pub fn enclosing_return_type(&self, scope: ScopeId) -> Option<(ScopeId, SymbolId)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(return_type) = scope.return_type {
                return Some((id, return_type));
            }
            current = scope.parent;
        }
        None
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0]
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Follows declared types down to the builtin a symbol ultimately names.
    pub fn resolve(&self, id: SymbolId) -> SymbolId {
        let mut current = id;
        // Declared types always point at earlier symbols, so this terminates
        while let Some(next) = self.symbol(current).declared_type {
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    pub fn type_name(&self, id: SymbolId) -> &str {
        &self.symbol(self.resolve(id)).name
    }

    /// Builtins are compatible only with themselves; anything else is
    /// compatible when the builtins it resolves to are.
    pub fn is_compatible(&self, left: SymbolId, right: SymbolId) -> bool {
        self.type_name(left) == self.type_name(right)
    }
}
