// ABOUTME: Implements the Registry - the ordered set of tools one agent exposes,
// ABOUTME: with exact-name lookup and conversion to function declarations.

use std::collections::HashSet;
use std::sync::Arc;

use super::Tool;
use crate::llm::ToolDefinition;

/// Ordered collection of tools.
///
/// Registration order is kept because it is the order the tools are listed
/// in an agent's system instruction. Names are expected to be unique; a
/// repeated name is kept so `Agent::initialize` can reject it.
#[derive(Clone, Default)]
pub struct Registry {
    tools: Vec<Arc<dyn Tool>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_arc(Arc::new(tool));
    }

    /// Register a tool from an Arc.
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Get a tool by exact name. The earliest registration wins.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Names registered more than once, each listed once, in order of
    /// first repetition.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for name in self.tools.iter().map(|t| t.name()) {
            if !seen.insert(name) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Function declarations of every tool that exposes one.
    pub fn to_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().filter_map(|t| t.declaration()).collect()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
