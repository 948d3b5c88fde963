//! Mapping from raw module specifiers to installable package names.

use std::collections::HashSet;

use crate::constants::{BUN_BUILTIN_MODULES, NODE_BUILTIN_MODULES, NODE_PREFIX_ONLY_MODULES};

/// Returns the package a specifier refers to, or `None` when it is not a package.
///
/// `@scope/name/sub/path` yields `@scope/name`, `name/sub/path` yields `name`.
/// Relative (`./x`, `../x`), absolute (`/x`) and URL (`https://…`) specifiers,
/// as well as malformed scopes (`@`, `@scope`, `@scope/`), yield `None`.
pub fn package_name(specifier: &str) -> Option<&str> {
    if specifier.is_empty() || specifier.contains("://") {
        return None;
    }
    if specifier.starts_with('.') || specifier.starts_with('/') {
        return None;
    }

    if specifier.starts_with('@') {
        let mut segments = specifier.splitn(3, '/');
        let scope = segments.next()?;
        let name = segments.next()?;
        // A bare `@` is the `@/…` source alias bundlers resolve, never a scope
        if scope.len() < 2 || name.is_empty() {
            return None;
        }
        return Some(&specifier[..scope.len() + 1 + name.len()]);
    }

    specifier.split('/').next().filter(|s| !s.is_empty())
}

/// Modules provided by the runtime rather than installed from a registry.
#[derive(Debug, Clone)]
pub struct BuiltinModules {
    node: HashSet<String>,
    node_prefix_only: HashSet<String>,
    bun: HashSet<String>,
}

impl Default for BuiltinModules {
    fn default() -> Self {
        Self::new(NODE_BUILTIN_MODULES, NODE_PREFIX_ONLY_MODULES, BUN_BUILTIN_MODULES)
    }
}

impl BuiltinModules {
    pub fn new(node: &[&str], node_prefix_only: &[&str], bun: &[&str]) -> Self {
        let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self { node: owned(node), node_prefix_only: owned(node_prefix_only), bun: owned(bun) }
    }

    /// Whether a normalized package name is a platform module.
    pub fn is_builtin(&self, name: &str) -> bool {
        if let Some(bare) = name.strip_prefix("node:") {
            return self.node.contains(bare) || self.node_prefix_only.contains(bare);
        }
        if name == "bun" || name.starts_with("bun:") {
            return self.bun.contains(name);
        }
        self.node.contains(name)
    }
}
