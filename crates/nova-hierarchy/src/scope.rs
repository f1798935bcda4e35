use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use nova_classfile::{ACC_ABSTRACT, ACC_FINAL, ACC_PUBLIC};
use parking_lot::{ReentrantMutex, RwLock};

use crate::detail::DetailSlot;
use crate::name::{array_element, is_array_name, ArrayElement, Primitive};
use crate::{ClassDetail, ClassInfo, DetailLoader, HierarchyError, LoadError, NotFoundLoader};

pub(crate) const TRACE_TARGET: &str = "nova.hierarchy";

/// Index of a class inside its [`ClassScope`].
///
/// Ids are only meaningful for the scope that minted them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(u32);

impl ClassId {
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

impl From<Primitive> for ClassId {
    fn from(primitive: Primitive) -> Self {
        ClassId(primitive.index() as u32)
    }
}

#[derive(Debug)]
struct Entry {
    name: Arc<str>,
    /// Set once when resolution fails; never cleared.
    missing: bool,
    /// `None` until the class is resolved or detail is attached, then never removed.
    detail: Option<DetailSlot>,
}

#[derive(Debug, Default)]
struct ScopeState {
    by_name: HashMap<Arc<str>, ClassId>,
    entries: Vec<Entry>,
    /// Classes whose loader call is on the stack.
    resolving: HashSet<ClassId>,
    /// Derived-class entries for super classes that have no detail yet.
    pending_derived: HashMap<ClassId, Vec<ClassId>>,
    /// Super classes set on a class while its loader was running; applied on install.
    pending_super: HashMap<ClassId, Option<ClassId>>,
}

impl ScopeState {
    fn intern(&mut self, name: &str) -> (ClassId, bool) {
        if let Some(id) = self.by_name.get(name) {
            return (*id, false);
        }

        let idx: u32 = self
            .entries
            .len()
            .try_into()
            .expect("too many classes in one scope");
        let id = ClassId(idx);
        let name: Arc<str> = Arc::from(name);
        self.entries.push(Entry {
            name: name.clone(),
            missing: false,
            detail: None,
        });
        self.by_name.insert(name, id);
        (id, true)
    }

    fn entry(&self, id: ClassId) -> &Entry {
        &self.entries[id.index()]
    }

    /// Attach `slot` to `id` unless detail is already present.
    fn install(&mut self, id: ClassId, mut slot: DetailSlot, missing: bool) -> bool {
        if self.entry(id).detail.is_some() {
            return false;
        }

        if let Some(queued) = self.pending_derived.remove(&id) {
            slot.make_owned().derived.extend(queued);
        }
        if let Some(rebound) = self.pending_super.remove(&id) {
            slot.make_owned().super_class = rebound;
        }
        let super_class = slot.get().super_class;

        let entry = &mut self.entries[id.index()];
        entry.missing |= missing;
        entry.detail = Some(slot);

        if let Some(super_class) = super_class {
            self.link_derived(super_class, id);
        }
        true
    }

    /// First id referenced by `detail` that this scope never minted.
    fn foreign_reference(&self, detail: &ClassDetail) -> Option<ClassId> {
        detail
            .referenced_ids()
            .find(|id| id.index() >= self.entries.len())
    }

    fn link_derived(&mut self, super_class: ClassId, derived: ClassId) {
        match self.entries[super_class.index()].detail.as_mut() {
            Some(slot) => {
                slot.make_owned().derived.insert(derived);
            }
            None => self
                .pending_derived
                .entry(super_class)
                .or_default()
                .push(derived),
        }
    }

    fn unlink_derived(&mut self, super_class: ClassId, derived: ClassId) {
        match self.entries[super_class.index()].detail.as_mut() {
            Some(DetailSlot::Owned(detail)) => {
                detail.derived.remove(&derived);
            }
            Some(DetailSlot::Missing) => {}
            None => {
                if let Some(queued) = self.pending_derived.get_mut(&super_class) {
                    queued.retain(|id| *id != derived);
                }
            }
        }
    }
}

/// The registry of classes for one analysis session.
///
/// Every full name maps to exactly one [`ClassInfo`], so handles can be compared by identity.
/// Class detail is resolved lazily through the scope's [`DetailLoader`] the first time a query
/// needs it.
///
/// A scope is `Send + Sync`. Registration and hierarchy rebinding happen under one write lock;
/// first resolution of a class is serialized so each class is loaded at most once.
pub struct ClassScope {
    state: RwLock<ScopeState>,
    resolve_lock: ReentrantMutex<()>,
    loader: Arc<dyn DetailLoader>,
}

impl Default for ClassScope {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClassScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassScope")
            .field("classes", &self.len())
            .finish_non_exhaustive()
    }
}

impl ClassScope {
    /// A scope whose loader knows no classes; only attached detail resolves.
    pub fn new() -> Self {
        Self::with_loader(Arc::new(NotFoundLoader))
    }

    pub fn with_loader(loader: Arc<dyn DetailLoader>) -> Self {
        let mut state = ScopeState::default();
        for primitive in Primitive::ALL {
            let (id, _) = state.intern(primitive.java_name());
            debug_assert_eq!(id, ClassId::from(primitive));
            let detail = ClassDetail::new(ACC_PUBLIC | ACC_FINAL | ACC_ABSTRACT).framework(true);
            state.install(id, DetailSlot::Owned(detail), false);
        }

        Self {
            state: RwLock::new(state),
            resolve_lock: ReentrantMutex::new(()),
            loader,
        }
    }

    /// Number of registered classes, primitives included.
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The handle for an id minted by this scope.
    pub fn class(&self, id: ClassId) -> ClassInfo<'_> {
        assert!(
            id.index() < self.len(),
            "{id:?} does not belong to this scope"
        );
        ClassInfo::new(self, id)
    }

    pub fn primitive(&self, primitive: Primitive) -> ClassInfo<'_> {
        ClassInfo::new(self, ClassId::from(primitive))
    }

    pub fn primitives(&self) -> Vec<ClassInfo<'_>> {
        Primitive::ALL.iter().map(|p| self.primitive(*p)).collect()
    }

    /// Lookup without registering anything.
    pub fn find_class(&self, name: &str) -> Option<ClassInfo<'_>> {
        let id = self.state.read().by_name.get(name).copied()?;
        Some(ClassInfo::new(self, id))
    }

    /// Return the class registered under `name`, registering it first if needed.
    ///
    /// Primitives are keyed by their Java keyword (`int`, `void`), not by descriptor code:
    /// `find_or_create("I")` registers an ordinary class named `I`. Array names do use
    /// descriptor codes for primitive elements (`[I`).
    ///
    /// Registering an array also registers its element type, recursively for nested arrays.
    pub fn find_or_create(&self, name: &str) -> ClassInfo<'_> {
        if let Some(found) = self.find_class(name) {
            return found;
        }

        let mut state = self.state.write();
        let (id, created) = state.intern(name);
        if created {
            let mut current = name;
            while is_array_name(current) {
                match array_element(current) {
                    Some(ArrayElement::Named(element)) => {
                        let (_, created) = state.intern(element);
                        if !created {
                            break;
                        }
                        current = element;
                    }
                    Some(ArrayElement::Primitive(_)) => break,
                    None => {
                        tracing::error!(
                            target: TRACE_TARGET,
                            class = current,
                            "unknown array element type"
                        );
                        break;
                    }
                }
            }
        }
        drop(state);

        ClassInfo::new(self, id)
    }

    pub fn find_or_create_all<S: AsRef<str>>(&self, names: &[S]) -> Vec<ClassInfo<'_>> {
        names
            .iter()
            .map(|name| self.find_or_create(name.as_ref()))
            .collect()
    }

    /// Snapshot of every registered class, in registration order.
    pub fn all_classes(&self) -> Vec<ClassInfo<'_>> {
        let len = self.len();
        (0..len)
            .map(|idx| ClassInfo::new(self, ClassId(idx as u32)))
            .collect()
    }

    /// All registered names as `[a, b, ...]`. Diagnostic output only.
    pub fn dump_class_hierarchy(&self) -> String {
        let state = self.state.read();
        let names: Vec<&str> = state.entries.iter().map(|e| e.name.as_ref()).collect();
        format!("[{}]", names.join(", "))
    }

    pub(crate) fn name_of(&self, id: ClassId) -> Arc<str> {
        self.state.read().entry(id).name.clone()
    }

    pub(crate) fn is_primitive_id(&self, id: ClassId) -> bool {
        id.index() < Primitive::ALL.len()
    }

    pub(crate) fn is_missing_id(&self, id: ClassId) -> bool {
        self.ensure_resolved(id);
        self.state.read().entry(id).missing
    }

    /// Run the loader for `id` unless it already has detail.
    ///
    /// Loader failures of every category end in the missing state.
    pub(crate) fn ensure_resolved(&self, id: ClassId) {
        if self.state.read().entry(id).detail.is_some() {
            return;
        }

        let _guard = self.resolve_lock.lock();
        {
            let mut state = self.state.write();
            if state.entry(id).detail.is_some() || !state.resolving.insert(id) {
                return;
            }
        }

        let outcome = self.loader.load(ClassInfo::new(self, id));

        let mut state = self.state.write();
        state.resolving.remove(&id);
        let outcome = outcome.and_then(|detail| match state.foreign_reference(&detail) {
            Some(foreign) => Err(LoadError::initialization_failed(
                state.entry(id).name.as_ref(),
                format!("detail references {foreign:?}, which this scope never registered"),
            )),
            None => Ok(detail),
        });
        let (slot, missing) = match outcome {
            Ok(detail) => (DetailSlot::Owned(detail), false),
            Err(err) => {
                log_load_failure(&err);
                (DetailSlot::Missing, true)
            }
        };
        if !state.install(id, slot, missing) {
            tracing::debug!(
                target: TRACE_TARGET,
                class = %state.entry(id).name,
                "detail was attached while loading; discarding loader result"
            );
        }
    }

    /// Resolve `id` and read its detail along with its missing flag.
    ///
    /// A class whose loader call is still on the stack reads as the missing detail.
    pub(crate) fn with_detail<R>(&self, id: ClassId, f: impl FnOnce(&ClassDetail, bool) -> R) -> R {
        self.ensure_resolved(id);
        let state = self.state.read();
        let entry = state.entry(id);
        let detail = entry
            .detail
            .as_ref()
            .map_or(ClassDetail::missing(), DetailSlot::get);
        f(detail, entry.missing)
    }

    pub(crate) fn attach_detail(
        &self,
        id: ClassId,
        detail: ClassDetail,
    ) -> Result<(), HierarchyError> {
        let mut state = self.state.write();
        if let Some(foreign) = state.foreign_reference(&detail) {
            return Err(HierarchyError::ForeignClass {
                name: state.entry(id).name.to_string(),
                id: foreign,
            });
        }
        if state.install(id, DetailSlot::Owned(detail), false) {
            return Ok(());
        }
        Err(HierarchyError::DetailAlreadyAttached {
            name: state.entry(id).name.to_string(),
        })
    }

    /// Replace the super class of `id`, keeping derived-class sets consistent.
    ///
    /// Rebinding a class from inside its own loader call is deferred until the loader's result
    /// is installed.
    pub(crate) fn set_super_class(&self, id: ClassId, super_class: Option<ClassId>) {
        self.ensure_resolved(id);

        let mut state = self.state.write();
        if state.entry(id).detail.is_none() && state.resolving.contains(&id) {
            state.pending_super.insert(id, super_class);
            return;
        }

        let entry = state.entry(id);
        if entry.missing {
            tracing::debug!(
                target: TRACE_TARGET,
                class = %entry.name,
                "rebinding the super class of a missing class"
            );
        }

        let old_super = entry.detail.as_ref().and_then(|slot| slot.get().super_class);
        if let Some(old_super) = old_super {
            state.unlink_derived(old_super, id);
        }

        let entry = &mut state.entries[id.index()];
        let rebased = entry
            .detail
            .as_ref()
            .map_or(ClassDetail::missing(), DetailSlot::get)
            .with_super_class(super_class);
        entry.detail = Some(DetailSlot::Owned(rebased));

        if let Some(super_class) = super_class {
            state.link_derived(super_class, id);
        }
    }
}

fn log_load_failure(err: &LoadError) {
    match err {
        LoadError::ClassNotFound { name } => {
            tracing::debug!(target: TRACE_TARGET, class = %name, "cannot find class");
        }
        LoadError::InitializationFailed { name, reason } => {
            tracing::warn!(
                target: TRACE_TARGET,
                class = %name,
                reason = %reason,
                "class is not visible: initialization failed"
            );
        }
        LoadError::DefinitionUnavailable { name, reason } => {
            tracing::warn!(
                target: TRACE_TARGET,
                class = %name,
                reason = %reason,
                "cannot find class definition"
            );
        }
    }
}
