#![forbid(unsafe_code)]

mod access;
mod descriptor;
mod error;
mod stub;

pub use crate::access::{
    ACC_ABSTRACT, ACC_FINAL, ACC_INTERFACE, ACC_PRIVATE, ACC_PUBLIC, ACC_STATIC, ACC_VARARGS,
};
pub use crate::descriptor::{parse_field_descriptor, parse_method_descriptor};
pub use crate::descriptor::{BaseType, FieldType, MethodDescriptor, ReturnType};
pub use crate::error::{Error, Result};
pub use crate::stub::{internal_to_binary, ClassStub, FieldStub, MethodStub};
