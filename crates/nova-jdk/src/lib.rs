//! Built-in platform type table.
//!
//! `JdkIndex::new()` provides a small set of `java.lang`, `java.util` and `java.io` class stubs
//! so class hierarchies can be resolved without a system JDK. Additional stubs can be inserted
//! by callers that have richer platform information.

#![forbid(unsafe_code)]

mod builtin;

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use nova_classfile::{internal_to_binary, ClassStub};
use nova_config::JdkConfig;
use nova_hierarchy_bridge::StubProvider;

#[derive(Debug, Default, Clone)]
pub struct JdkIndex {
    types: HashMap<String, Arc<ClassStub>>,
    packages: BTreeSet<String>,
}

impl JdkIndex {
    /// Construct the built-in index (no disk IO, no system JDK required).
    pub fn new() -> Self {
        let mut this = Self::empty();
        for stub in builtin::stubs() {
            this.insert(stub);
        }
        tracing::debug!(target: "nova.jdk", types = this.len(), "built-in JDK index ready");
        this
    }

    /// An index with no types at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_config(config: &JdkConfig) -> Self {
        if config.builtin {
            Self::new()
        } else {
            Self::empty()
        }
    }

    /// Add or replace a stub, keyed by its binary name.
    pub fn insert(&mut self, stub: ClassStub) {
        if let Some(package) = stub.package_name() {
            self.packages.insert(package.to_string());
        }
        self.types.insert(stub.binary_name.clone(), Arc::new(stub));
    }

    /// Lookup a class stub by binary name (`java.lang.String`) or internal name
    /// (`java/lang/String`).
    pub fn lookup_type(&self, name: &str) -> Option<Arc<ClassStub>> {
        if name.contains('/') {
            return self.types.get(&internal_to_binary(name)).cloned();
        }
        self.types.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All packages with at least one type, sorted.
    pub fn packages(&self) -> Vec<String> {
        self.packages.iter().cloned().collect()
    }
}

impl StubProvider for JdkIndex {
    fn lookup_type(&self, binary_name: &str) -> Option<Arc<ClassStub>> {
        JdkIndex::lookup_type(self, binary_name)
    }
}
