#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use nova_hierarchy::{ClassDetail, ClassInfo, DetailLoader, LoadError, MethodInfo};

/// Shape of a class served by [`MapLoader`], using full names for every type reference.
#[derive(Debug, Clone, Default)]
pub struct ClassSpec {
    pub access_flags: u16,
    pub super_class: Option<&'static str>,
    pub interfaces: Vec<&'static str>,
    pub fields: Vec<(&'static str, &'static str)>,
    pub static_fields: Vec<(&'static str, &'static str)>,
    /// `(name, params, return type, access flags)`.
    pub methods: Vec<(&'static str, Vec<&'static str>, &'static str, u16)>,
    pub framework: bool,
}

impl ClassSpec {
    pub fn extends(super_class: &'static str) -> Self {
        Self {
            super_class: Some(super_class),
            ..Self::default()
        }
    }
}

/// Fixed-map loader; names outside the map are reported as not found.
pub struct MapLoader {
    classes: HashMap<String, ClassSpec>,
    failures: HashMap<String, LoadError>,
    calls: AtomicUsize,
}

impl MapLoader {
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
            failures: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, name: &str, spec: ClassSpec) -> Self {
        self.classes.insert(name.to_string(), spec);
        self
    }

    pub fn failing(mut self, name: &str, err: LoadError) -> Self {
        self.failures.insert(name.to_string(), err);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DetailLoader for MapLoader {
    fn load(&self, class: ClassInfo<'_>) -> Result<ClassDetail, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = class.full_name();
        if let Some(err) = self.failures.get(name.as_ref()) {
            return Err(err.clone());
        }
        let Some(spec) = self.classes.get(name.as_ref()) else {
            return Err(LoadError::class_not_found(name.as_ref()));
        };

        let scope = class.scope();
        let mut detail = ClassDetail::new(spec.access_flags).framework(spec.framework);
        if let Some(super_class) = spec.super_class {
            detail = detail.extends(scope.find_or_create(super_class));
        }
        for iface in &spec.interfaces {
            detail = detail.implements(scope.find_or_create(iface));
        }
        for (field, ty) in &spec.fields {
            detail = detail.field(*field, scope.find_or_create(ty));
        }
        for (field, ty) in &spec.static_fields {
            detail = detail.static_field(*field, scope.find_or_create(ty));
        }
        for (method, params, ret, flags) in &spec.methods {
            let params = scope.find_or_create_all(params);
            detail = detail.method(MethodInfo::new(
                class,
                *method,
                &params,
                scope.find_or_create(ret),
                *flags,
            ));
        }
        Ok(detail)
    }
}
