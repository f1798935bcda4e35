//! Resolves class detail for a [`ClassScope`](nova_hierarchy::ClassScope) from class stubs.
//!
//! [`StubLoader`] looks a class up in the program's stubs first and, unless disabled, in the
//! platform's built-in stubs second. Array classes never come from a provider; they get a
//! synthetic detail instead.

#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::Arc;

use nova_classfile::{ClassStub, FieldStub, MethodStub, ACC_ABSTRACT, ACC_FINAL, ACC_PUBLIC};
use nova_config::HierarchyConfig;
use nova_hierarchy::{ClassDetail, ClassInfo, DetailLoader, LoadError, MethodInfo};

const TRACE_TARGET: &str = "nova.hierarchy.bridge";

const OBJECT: &str = "java.lang.Object";
const CLONEABLE: &str = "java.lang.Cloneable";
const SERIALIZABLE: &str = "java.io.Serializable";

/// Source of class stubs, keyed by binary name (`java.lang.String`, `a.b.Outer$Inner`).
pub trait StubProvider: Send + Sync {
    fn lookup_type(&self, binary_name: &str) -> Option<Arc<ClassStub>>;
}

/// Fixed set of stubs, typically the classes of the program under analysis.
#[derive(Debug, Clone, Default)]
pub struct MapStubProvider {
    stubs: HashMap<String, Arc<ClassStub>>,
}

impl MapStubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `stub`, replacing any stub with the same binary name.
    pub fn insert(&mut self, stub: ClassStub) {
        self.stubs.insert(stub.binary_name.clone(), Arc::new(stub));
    }

    pub fn with(mut self, stub: ClassStub) -> Self {
        self.insert(stub);
        self
    }

    pub fn len(&self) -> usize {
        self.stubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stubs.is_empty()
    }
}

impl FromIterator<ClassStub> for MapStubProvider {
    fn from_iter<I: IntoIterator<Item = ClassStub>>(iter: I) -> Self {
        let mut provider = Self::new();
        for stub in iter {
            provider.insert(stub);
        }
        provider
    }
}

impl StubProvider for MapStubProvider {
    fn lookup_type(&self, binary_name: &str) -> Option<Arc<ClassStub>> {
        self.stubs.get(binary_name).cloned()
    }
}

/// A [`DetailLoader`] backed by program and platform [`StubProvider`]s.
///
/// Classes found in the program provider are program classes; classes that only the platform
/// provider knows are marked as framework classes.
pub struct StubLoader {
    program: Arc<dyn StubProvider>,
    platform: Option<Arc<dyn StubProvider>>,
    synthesize_arrays: bool,
}

impl StubLoader {
    /// Loader with platform fallback and synthetic array detail enabled.
    pub fn new(program: Arc<dyn StubProvider>, platform: Arc<dyn StubProvider>) -> Self {
        Self::from_config(&HierarchyConfig::default(), program, platform)
    }

    pub fn from_config(
        config: &HierarchyConfig,
        program: Arc<dyn StubProvider>,
        platform: Arc<dyn StubProvider>,
    ) -> Self {
        Self {
            program,
            platform: config.platform_fallback.then_some(platform),
            synthesize_arrays: config.synthesize_arrays,
        }
    }

    fn array_detail(&self, class: ClassInfo<'_>) -> Result<ClassDetail, LoadError> {
        if !self.synthesize_arrays {
            return Err(LoadError::definition_unavailable(
                class.full_name().as_ref(),
                "array classes have no stub definition",
            ));
        }

        let scope = class.scope();
        Ok(ClassDetail::new(ACC_PUBLIC | ACC_FINAL | ACC_ABSTRACT)
            .extends(scope.find_or_create(OBJECT))
            .implements(scope.find_or_create(CLONEABLE))
            .implements(scope.find_or_create(SERIALIZABLE))
            .framework(true))
    }
}

impl std::fmt::Debug for StubLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubLoader")
            .field("platform_fallback", &self.platform.is_some())
            .field("synthesize_arrays", &self.synthesize_arrays)
            .finish_non_exhaustive()
    }
}

impl DetailLoader for StubLoader {
    fn load(&self, class: ClassInfo<'_>) -> Result<ClassDetail, LoadError> {
        if class.is_array() {
            return self.array_detail(class);
        }

        let name = class.full_name();
        if let Some(stub) = self.program.lookup_type(&name) {
            tracing::trace!(target: TRACE_TARGET, class = %name, "loading program class");
            return build_detail(class, &stub, false);
        }
        if let Some(stub) = self
            .platform
            .as_ref()
            .and_then(|platform| platform.lookup_type(&name))
        {
            tracing::trace!(target: TRACE_TARGET, class = %name, "loading platform class");
            return build_detail(class, &stub, true);
        }

        Err(LoadError::class_not_found(name.as_ref()))
    }
}

fn build_detail(
    class: ClassInfo<'_>,
    stub: &ClassStub,
    is_framework: bool,
) -> Result<ClassDetail, LoadError> {
    let scope = class.scope();
    let mut detail = ClassDetail::new(stub.access_flags).framework(is_framework);

    // Interfaces are rooted at no super class even though the class file names `Object`.
    if !stub.is_interface() {
        if let Some(super_name) = stub.super_binary_name.as_deref() {
            detail = detail.extends(scope.find_or_create(super_name));
        }
    }
    for interface in &stub.interfaces {
        detail = detail.implements(scope.find_or_create(interface));
    }

    for field in &stub.fields {
        let ty = scope.find_or_create(&field_type_name(class, field)?);
        detail = if field.is_static() {
            detail.static_field(field.name.as_str(), ty)
        } else {
            detail.field(field.name.as_str(), ty)
        };
    }

    for method in &stub.methods {
        detail = detail.method(method_info(class, method)?);
    }

    Ok(detail)
}

fn field_type_name(class: ClassInfo<'_>, field: &FieldStub) -> Result<String, LoadError> {
    field
        .parsed_descriptor()
        .map(|ty| ty.to_full_name())
        .map_err(|err| {
            LoadError::initialization_failed(
                class.full_name().as_ref(),
                format!("field {}: {err}", field.name),
            )
        })
}

fn method_info(class: ClassInfo<'_>, method: &MethodStub) -> Result<MethodInfo, LoadError> {
    let descriptor = method.parsed_descriptor().map_err(|err| {
        LoadError::initialization_failed(
            class.full_name().as_ref(),
            format!("method {}: {err}", method.name),
        )
    })?;

    let scope = class.scope();
    let params: Vec<String> = descriptor.params.iter().map(|p| p.to_full_name()).collect();
    let params = scope.find_or_create_all(&params);
    let return_type = scope.find_or_create(&descriptor.return_type.to_full_name());

    Ok(MethodInfo::new(
        class,
        method.name.as_str(),
        &params,
        return_type,
        method.access_flags,
    ))
}
