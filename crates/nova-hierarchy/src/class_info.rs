use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::name::{self, ArrayElement, Primitive};
use crate::scope::TRACE_TARGET;
use crate::{ClassDetail, ClassId, ClassScope, HierarchyError, MethodInfo, MethodProto};

/// The canonical handle of a class within a [`ClassScope`].
///
/// Handles are cheap to copy and compare by identity: two handles are equal iff they come from
/// the same scope and name the same class.
///
/// Queries that need structural detail resolve the class on first use (see
/// [`ClassScope::with_loader`]). A class that cannot be resolved becomes *missing*: queries on
/// it return `None`/`false` instead of failing.
#[derive(Clone, Copy)]
pub struct ClassInfo<'s> {
    scope: &'s ClassScope,
    id: ClassId,
}

impl<'s> ClassInfo<'s> {
    pub(crate) fn new(scope: &'s ClassScope, id: ClassId) -> Self {
        Self { scope, id }
    }

    pub fn id(self) -> ClassId {
        self.id
    }

    pub fn scope(self) -> &'s ClassScope {
        self.scope
    }

    pub fn full_name(self) -> Arc<str> {
        self.scope.name_of(self.id)
    }

    fn class(self, id: ClassId) -> ClassInfo<'s> {
        ClassInfo::new(self.scope, id)
    }

    fn detail<R>(self, f: impl FnOnce(&ClassDetail, bool) -> R) -> R {
        self.scope.with_detail(self.id, f)
    }

    /// Attach detail produced outside the scope's loader, e.g. by a bytecode reader.
    ///
    /// Fails if the class already has detail, whether attached or resolved, or if `detail`
    /// references a class id this scope never registered.
    pub fn attach_detail(self, detail: ClassDetail) -> Result<(), HierarchyError> {
        self.scope.attach_detail(self.id, detail)
    }

    /// Whether resolution failed. Resolves the class first.
    pub fn is_missing(self) -> bool {
        self.scope.is_missing_id(self.id)
    }

    /// Resolved, but not declared by the program under analysis.
    pub fn is_framework_class(self) -> bool {
        self.detail(|detail, _| detail.is_framework_class())
    }

    /// Type of an instance field declared here or in a super class.
    pub fn field_type(self, name: &str) -> Option<ClassInfo<'s>> {
        if self.is_missing() {
            return None;
        }
        self.super_chain()
            .into_iter()
            .find_map(|id| self.scope.with_detail(id, |d, _| d.declared_field(name)))
            .map(|id| self.class(id))
    }

    /// Type of a static field declared here, in a super class, or in a super interface.
    pub fn static_field_type(self, name: &str) -> Option<ClassInfo<'s>> {
        if self.is_missing() {
            return None;
        }
        let chain = self.super_chain();
        let interfaces = self.interface_closure(&chain);
        chain
            .into_iter()
            .chain(interfaces)
            .find_map(|id| self.scope.with_detail(id, |d, _| d.declared_static_field(name)))
            .map(|id| self.class(id))
    }

    pub fn all_fields_here(self) -> Option<HashMap<String, ClassInfo<'s>>> {
        let fields = self.detail(|d, missing| (!missing).then(|| d.fields.clone()))?;
        Some(self.resolve_field_map(fields))
    }

    pub fn all_static_fields_here(self) -> Option<HashMap<String, ClassInfo<'s>>> {
        let fields = self.detail(|d, missing| (!missing).then(|| d.static_fields.clone()))?;
        Some(self.resolve_field_map(fields))
    }

    fn resolve_field_map(self, fields: HashMap<String, ClassId>) -> HashMap<String, ClassInfo<'s>> {
        fields
            .into_iter()
            .map(|(name, id)| (name, self.class(id)))
            .collect()
    }

    /// Methods declared here plus those inherited from super classes.
    ///
    /// A declaration hides inherited ones with the same name and parameters. Constructors and
    /// class initializers are not inherited.
    pub fn all_methods(self) -> Option<Vec<MethodInfo>> {
        if self.is_missing() {
            return None;
        }

        let mut seen: HashSet<(String, Vec<ClassId>)> = HashSet::new();
        let mut out = Vec::new();
        for id in self.super_chain() {
            let declared = self
                .scope
                .with_detail(id, |d, _| d.declared_methods().to_vec());
            for method in declared {
                if id != self.id && (method.is_constructor() || method.is_static_initializer()) {
                    continue;
                }
                if seen.insert((method.name().to_string(), method.params().to_vec())) {
                    out.push(method);
                }
            }
        }
        Some(out)
    }

    pub fn find_method_here(self, proto: &MethodProto) -> Option<MethodInfo> {
        self.detail(|d, missing| {
            if missing {
                return None;
            }
            d.find_method_here(proto).cloned()
        })
    }

    pub fn find_method_here_by(self, name: &str, params: &[ClassInfo<'_>]) -> Option<MethodInfo> {
        self.find_method_here(&MethodProto::new(name, params))
    }

    /// Methods named `name` declared here. Empty when none match; `None` only if missing.
    pub fn find_methods_here(self, name: &str) -> Option<Vec<MethodInfo>> {
        self.detail(|d, missing| (!missing).then(|| d.find_methods_here(name)))
    }

    /// Methods named `name` declared here or in any super type, most specific first.
    ///
    /// Inherited declarations hidden by a more specific one are skipped.
    pub fn find_methods(self, name: &str) -> Option<Vec<MethodInfo>> {
        if self.is_missing() {
            return None;
        }

        let mut out: Vec<MethodInfo> = Vec::new();
        for id in self.supertypes() {
            for method in self.scope.with_detail(id, |d, _| d.find_methods_here(name)) {
                let proto = method.prototype();
                if !out.iter().any(|m| m.prototype().overrides(&proto)) {
                    out.push(method);
                }
            }
        }
        Some(out)
    }

    /// Look `proto` up here, then along the super class chain, then in super interfaces.
    pub fn find_method(self, proto: &MethodProto) -> Option<MethodInfo> {
        if self.is_missing() {
            return None;
        }
        self.supertypes().into_iter().find_map(|id| {
            self.scope
                .with_detail(id, |d, _| d.find_method_here(proto).cloned())
        })
    }

    pub fn find_method_by(self, name: &str, params: &[ClassInfo<'_>]) -> Option<MethodInfo> {
        self.find_method(&MethodProto::new(name, params))
    }

    /// Whether a value of this type can be used where `other` is expected.
    ///
    /// For a reference target this is the reflexive, transitive closure over super class and
    /// interface edges.
    ///
    /// For a primitive target the rule is deliberately loose: any primitive converts to any
    /// other primitive, and everything converts to `void`. Widening rules are not checked.
    pub fn is_convertible_to(self, other: ClassInfo<'_>) -> bool {
        debug_assert!(
            std::ptr::eq(self.scope, other.scope),
            "convertibility across scopes"
        );
        if other.is_primitive() {
            return other.id == ClassId::from(Primitive::Void) || self.is_primitive();
        }
        if self.id == other.id {
            return true;
        }

        let mut queue = VecDeque::from([self.id]);
        let mut seen = HashSet::from([self.id]);
        while let Some(current) = queue.pop_front() {
            let (super_class, interfaces) = self
                .scope
                .with_detail(current, |d, _| (d.super_class(), d.interfaces().to_vec()));
            for next in super_class.into_iter().chain(interfaces) {
                if next == other.id {
                    return true;
                }
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// The super class, or `None` for roots, interfaces without one, and missing classes.
    pub fn super_class(self) -> Option<ClassInfo<'s>> {
        self.detail(|d, _| d.super_class()).map(|id| self.class(id))
    }

    pub fn interfaces(self) -> Vec<ClassInfo<'s>> {
        self.detail(|d, _| d.interfaces().to_vec())
            .into_iter()
            .map(|id| self.class(id))
            .collect()
    }

    /// Rebind the super class.
    ///
    /// This class leaves the derived set of its old super class and joins the derived set of
    /// `super_class`; other threads never observe it in both or neither.
    pub fn set_super_class(self, super_class: ClassInfo<'_>) {
        debug_assert!(std::ptr::eq(self.scope, super_class.scope));
        self.scope.set_super_class(self.id, Some(super_class.id));
    }

    /// Classes whose super class is currently this one, ordered by registration.
    pub fn derived_classes(self) -> Vec<ClassInfo<'s>> {
        self.detail(|d, _| d.derived_classes().collect::<Vec<_>>())
            .into_iter()
            .map(|id| self.class(id))
            .collect()
    }

    /// No class currently known to the scope extends this one.
    ///
    /// This only approximates finality: the answer is sound once every class of the program has
    /// been registered and resolved, and may flip to `false` as more classes are discovered.
    pub fn is_almost_final(self) -> bool {
        self.detail(|d, _| d.derived.is_empty())
    }

    pub fn is_array(self) -> bool {
        name::is_array_name(&self.full_name())
    }

    /// Element type of an array class.
    ///
    /// Returns `None` (and logs an error) if the element descriptor is malformed.
    ///
    /// # Panics
    ///
    /// Panics if this class is not an array.
    pub fn element_class(self) -> Option<ClassInfo<'s>> {
        let full_name = self.full_name();
        assert!(
            name::is_array_name(&full_name),
            "element class requested for non-array class {full_name}"
        );
        match name::array_element(&full_name) {
            Some(ArrayElement::Primitive(primitive)) => Some(self.scope.primitive(primitive)),
            Some(ArrayElement::Named(element)) => Some(self.scope.find_or_create(element)),
            None => {
                tracing::error!(
                    target: TRACE_TARGET,
                    class = %full_name,
                    "unknown array element type"
                );
                None
            }
        }
    }

    pub fn is_inner_class(self) -> bool {
        name::outer_name(&self.full_name()).is_some()
    }

    /// # Panics
    ///
    /// Panics if this class is not an inner class.
    pub fn outer_class(self) -> ClassInfo<'s> {
        let full_name = self.full_name();
        let Some(outer) = name::outer_name(&full_name) else {
            panic!("outer class requested for non-inner class {full_name}");
        };
        self.scope.find_or_create(outer)
    }

    pub fn is_primitive(self) -> bool {
        self.scope.is_primitive_id(self.id)
    }

    pub fn is_final(self) -> bool {
        self.detail(|d, missing| !missing && d.is_final())
    }

    pub fn is_interface(self) -> bool {
        self.detail(|d, missing| !missing && d.is_interface())
    }

    pub fn is_abstract(self) -> bool {
        self.detail(|d, missing| !missing && d.is_abstract())
    }

    /// The no-argument constructor declared by this class.
    pub fn default_constructor(self) -> Option<MethodInfo> {
        self.find_method_here(&MethodProto::default_constructor())
    }

    /// The class initializer, looked up through super types like any other method.
    pub fn static_initializer(self) -> Option<MethodInfo> {
        self.find_method(&MethodProto::static_initializer())
    }

    /// The part of the full name after the last `.`.
    pub fn short_name(self) -> String {
        name::short_name(&self.full_name()).to_string()
    }

    /// This class followed by its super classes, stopping at a cycle.
    fn super_chain(self) -> Vec<ClassId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(self.id);
        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            chain.push(id);
            current = self.scope.with_detail(id, |d, _| d.super_class());
        }
        chain
    }

    /// Every interface reachable from `roots`, breadth first, excluding the roots themselves.
    fn interface_closure(self, roots: &[ClassId]) -> Vec<ClassId> {
        let mut seen: HashSet<ClassId> = roots.iter().copied().collect();
        let mut queue: VecDeque<ClassId> = roots.iter().copied().collect();
        let mut out = Vec::new();
        while let Some(current) = queue.pop_front() {
            let interfaces = self
                .scope
                .with_detail(current, |d, _| d.interfaces().to_vec());
            for iface in interfaces {
                if seen.insert(iface) {
                    out.push(iface);
                    queue.push_back(iface);
                }
            }
        }
        out
    }

    /// The super class chain followed by all super interfaces.
    fn supertypes(self) -> Vec<ClassId> {
        let mut chain = self.super_chain();
        let interfaces = self.interface_closure(&chain);
        chain.extend(interfaces);
        chain
    }
}

impl PartialEq for ClassInfo<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.scope, other.scope) && self.id == other.id
    }
}

impl Eq for ClassInfo<'_> {}

impl Hash for ClassInfo<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ClassInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

impl fmt::Debug for ClassInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassInfo").field(&self.full_name()).finish()
    }
}
