//! Per-encoding table of solver variables keyed by node pair

use crate::graph::Edge;
use std::collections::BTreeMap;
use std::ops::Index;
use z3::ast::Int;

/// Integer solver variables, one per node pair
///
/// A table is owned by a single [`Encoding`](super::Encoding) and dropped
/// with it, so no variable outlives the depth check that declared it.
/// Iteration follows the canonical edge order.
pub struct VariableTable {
    prefix: &'static str,
    vars: BTreeMap<Edge, Int>,
}

impl VariableTable {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            vars: BTreeMap::new(),
        }
    }

    /// Solver-visible name of the variable for `pair`
    pub fn name_of(&self, pair: &Edge) -> String {
        format!("{}_{}_{}", self.prefix, pair.high(), pair.low())
    }

    /// Declare the variable for `pair`, reusing it if it already exists
    pub fn declare(&mut self, pair: Edge) -> &Int {
        let name = self.name_of(&pair);
        self.vars.entry(pair).or_insert_with(|| Int::new_const(name))
    }

    pub fn get(&self, pair: &Edge) -> Option<&Int> {
        self.vars.get(pair)
    }

    pub fn contains(&self, pair: &Edge) -> bool {
        self.vars.contains_key(pair)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Edge, &Int)> {
        self.vars.iter()
    }
}

impl Index<&Edge> for VariableTable {
    type Output = Int;

    fn index(&self, pair: &Edge) -> &Int {
        match self.vars.get(pair) {
            Some(var) => var,
            None => panic!("no variable declared for {}", self.name_of(pair)),
        }
    }
}
