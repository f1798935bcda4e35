use nova_classfile::ACC_STATIC;

use crate::{ClassId, ClassInfo};

/// Name of instance constructors.
pub const CONSTRUCTOR: &str = "<init>";
/// Name of the class initializer.
pub const STATIC_INITIALIZER: &str = "<clinit>";

/// Signature used to look methods up: a name, parameter types, and an optional return type.
///
/// Parameter lists never include the receiver. When the return type is `None` it is ignored by
/// [`MethodProto::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodProto {
    name: String,
    params: Vec<ClassId>,
    return_type: Option<ClassId>,
}

impl MethodProto {
    pub fn new(name: impl Into<String>, params: &[ClassInfo<'_>]) -> Self {
        Self {
            name: name.into(),
            params: params.iter().map(|p| p.id()).collect(),
            return_type: None,
        }
    }

    /// The no-argument constructor.
    pub fn default_constructor() -> Self {
        Self::new(CONSTRUCTOR, &[])
    }

    pub fn static_initializer() -> Self {
        Self::new(STATIC_INITIALIZER, &[])
    }

    pub fn with_return_type(mut self, return_type: ClassInfo<'_>) -> Self {
        self.return_type = Some(return_type.id());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ClassId] {
        &self.params
    }

    pub fn return_type(&self) -> Option<ClassId> {
        self.return_type
    }

    pub fn matches(&self, method: &MethodInfo) -> bool {
        self.name == method.name
            && self.params == method.params
            && self.return_type.map_or(true, |ret| ret == method.return_type)
    }

    /// Same name and parameters, regardless of return type.
    pub(crate) fn overrides(&self, other: &MethodProto) -> bool {
        self.name == other.name && self.params == other.params
    }
}

/// A method declared by some class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodInfo {
    pub(crate) declaring_class: ClassId,
    pub(crate) name: String,
    pub(crate) params: Vec<ClassId>,
    pub(crate) return_type: ClassId,
    pub(crate) access_flags: u16,
}

impl MethodInfo {
    pub fn new(
        declaring_class: ClassInfo<'_>,
        name: impl Into<String>,
        params: &[ClassInfo<'_>],
        return_type: ClassInfo<'_>,
        access_flags: u16,
    ) -> Self {
        Self {
            declaring_class: declaring_class.id(),
            name: name.into(),
            params: params.iter().map(|p| p.id()).collect(),
            return_type: return_type.id(),
            access_flags,
        }
    }

    pub fn declaring_class(&self) -> ClassId {
        self.declaring_class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ClassId] {
        &self.params
    }

    pub fn return_type(&self) -> ClassId {
        self.return_type
    }

    pub fn access_flags(&self) -> u16 {
        self.access_flags
    }

    pub fn is_static(&self) -> bool {
        self.access_flags & ACC_STATIC != 0
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR
    }

    pub fn is_static_initializer(&self) -> bool {
        self.name == STATIC_INITIALIZER
    }

    pub fn prototype(&self) -> MethodProto {
        MethodProto {
            name: self.name.clone(),
            params: self.params.clone(),
            return_type: Some(self.return_type),
        }
    }
}
