use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use nova_classfile::{ACC_ABSTRACT, ACC_FINAL, ACC_INTERFACE};

use crate::{ClassId, ClassInfo, MethodInfo, MethodProto};

/// Resolved structure of a class.
///
/// A detail is built by a loader (or a bytecode reader) and then attached to exactly one
/// [`ClassInfo`]. Type references are stored as [`ClassId`]s of the owning scope, so a detail
/// must only be attached within the scope its handles came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDetail {
    pub(crate) super_class: Option<ClassId>,
    pub(crate) interfaces: Vec<ClassId>,
    pub(crate) fields: HashMap<String, ClassId>,
    pub(crate) static_fields: HashMap<String, ClassId>,
    pub(crate) methods: Vec<MethodInfo>,
    pub(crate) access_flags: u16,
    pub(crate) is_framework: bool,
    /// Classes whose super class is currently this one. Never owning.
    pub(crate) derived: BTreeSet<ClassId>,
}

impl ClassDetail {
    pub fn new(access_flags: u16) -> Self {
        Self {
            access_flags,
            ..Self::default()
        }
    }

    /// Shared detail of every class that failed to resolve.
    pub fn missing() -> &'static ClassDetail {
        static MISSING: OnceLock<ClassDetail> = OnceLock::new();
        MISSING.get_or_init(ClassDetail::default)
    }

    pub fn extends(mut self, super_class: ClassInfo<'_>) -> Self {
        self.super_class = Some(super_class.id());
        self
    }

    pub fn implements(mut self, interface: ClassInfo<'_>) -> Self {
        self.interfaces.push(interface.id());
        self
    }

    pub fn field(mut self, name: impl Into<String>, ty: ClassInfo<'_>) -> Self {
        self.fields.insert(name.into(), ty.id());
        self
    }

    pub fn static_field(mut self, name: impl Into<String>, ty: ClassInfo<'_>) -> Self {
        self.static_fields.insert(name.into(), ty.id());
        self
    }

    pub fn method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    /// Mark the class as not declared by the program under analysis.
    pub fn framework(mut self, is_framework: bool) -> Self {
        self.is_framework = is_framework;
        self
    }

    /// A copy of this detail whose super class is `super_class`.
    ///
    /// Everything else, including the derived-class set, is carried over.
    pub fn with_super_class(&self, super_class: Option<ClassId>) -> ClassDetail {
        ClassDetail {
            super_class,
            ..self.clone()
        }
    }

    pub fn super_class(&self) -> Option<ClassId> {
        self.super_class
    }

    pub fn interfaces(&self) -> &[ClassId] {
        &self.interfaces
    }

    pub fn access_flags(&self) -> u16 {
        self.access_flags
    }

    pub fn is_framework_class(&self) -> bool {
        self.is_framework
    }

    pub fn is_final(&self) -> bool {
        self.access_flags & ACC_FINAL != 0
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags & ACC_INTERFACE != 0
    }

    pub fn is_abstract(&self) -> bool {
        self.access_flags & ACC_ABSTRACT != 0
    }

    pub fn derived_classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.derived.iter().copied()
    }

    /// Every class id this detail points at, derived classes included.
    pub(crate) fn referenced_ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        let methods = self.methods.iter().flat_map(|m| {
            std::iter::once(m.declaring_class())
                .chain(m.params().iter().copied())
                .chain(std::iter::once(m.return_type()))
        });
        self.super_class
            .into_iter()
            .chain(self.interfaces.iter().copied())
            .chain(self.fields.values().copied())
            .chain(self.static_fields.values().copied())
            .chain(methods)
            .chain(self.derived.iter().copied())
    }

    pub(crate) fn declared_field(&self, name: &str) -> Option<ClassId> {
        self.fields.get(name).copied()
    }

    pub(crate) fn declared_static_field(&self, name: &str) -> Option<ClassId> {
        self.static_fields.get(name).copied()
    }

    pub(crate) fn declared_methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    pub(crate) fn find_method_here(&self, proto: &MethodProto) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| proto.matches(m))
    }

    pub(crate) fn find_methods_here(&self, name: &str) -> Vec<MethodInfo> {
        self.methods
            .iter()
            .filter(|m| m.name() == name)
            .cloned()
            .collect()
    }
}

/// What a class handle holds once resolution has run.
#[derive(Debug, Clone)]
pub(crate) enum DetailSlot {
    /// Points at [`ClassDetail::missing`].
    Missing,
    Owned(ClassDetail),
}

impl DetailSlot {
    pub(crate) fn get(&self) -> &ClassDetail {
        match self {
            DetailSlot::Missing => ClassDetail::missing(),
            DetailSlot::Owned(detail) => detail,
        }
    }

    /// Mutable access; the shared missing detail is copied first so it is never written to.
    pub(crate) fn make_owned(&mut self) -> &mut ClassDetail {
        if let DetailSlot::Missing = self {
            *self = DetailSlot::Owned(ClassDetail::missing().clone());
        }
        match self {
            DetailSlot::Owned(detail) => detail,
            DetailSlot::Missing => unreachable!("missing slot replaced above"),
        }
    }
}
