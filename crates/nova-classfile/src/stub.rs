use crate::access::{ACC_INTERFACE, ACC_STATIC};
use crate::descriptor::{parse_field_descriptor, parse_method_descriptor, FieldType, MethodDescriptor};
use crate::error::Result;

/// Structural summary of a class as discovered by a bytecode reader or a built-in table.
///
/// Names use the binary (dotted) form, e.g. `java.lang.String` or `a.b.Outer$Inner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassStub {
    pub binary_name: String,
    pub access_flags: u16,
    pub super_binary_name: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldStub>,
    pub methods: Vec<MethodStub>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStub {
    pub access_flags: u16,
    pub name: String,
    /// JVM descriptor, e.g. `I` or `Ljava/lang/String;`.
    pub descriptor: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodStub {
    pub access_flags: u16,
    pub name: String,
    /// JVM method descriptor, e.g. `(Ljava/lang/String;)V`.
    pub descriptor: String,
}

impl ClassStub {
    pub fn new(binary_name: impl Into<String>, access_flags: u16) -> Self {
        Self {
            binary_name: binary_name.into(),
            access_flags,
            super_binary_name: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_super(mut self, super_binary_name: impl Into<String>) -> Self {
        self.super_binary_name = Some(super_binary_name.into());
        self
    }

    pub fn with_interface(mut self, binary_name: impl Into<String>) -> Self {
        self.interfaces.push(binary_name.into());
        self
    }

    pub fn with_field(
        mut self,
        access_flags: u16,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldStub {
            access_flags,
            name: name.into(),
            descriptor: descriptor.into(),
        });
        self
    }

    pub fn with_method(
        mut self,
        access_flags: u16,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        self.methods.push(MethodStub {
            access_flags,
            name: name.into(),
            descriptor: descriptor.into(),
        });
        self
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags & ACC_INTERFACE != 0
    }

    pub fn package_name(&self) -> Option<&str> {
        self.binary_name.rsplit_once('.').map(|(p, _)| p)
    }

    pub fn simple_name(&self) -> &str {
        self.binary_name
            .rsplit_once('.')
            .map(|(_, s)| s)
            .unwrap_or(&self.binary_name)
    }
}

impl FieldStub {
    pub fn is_static(&self) -> bool {
        self.access_flags & ACC_STATIC != 0
    }

    pub fn parsed_descriptor(&self) -> Result<FieldType> {
        parse_field_descriptor(&self.descriptor)
    }
}

impl MethodStub {
    pub fn parsed_descriptor(&self) -> Result<MethodDescriptor> {
        parse_method_descriptor(&self.descriptor)
    }
}

pub fn internal_to_binary(internal: &str) -> String {
    internal.replace('/', ".")
}
