//! JVM access flags (JVMS 4.1, 4.5, 4.6).
//!
//! Only the bits the class hierarchy cares about are named here.

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;
/// Shares its bit with `ACC_TRANSIENT` on fields; only meaningful on methods.
pub const ACC_VARARGS: u16 = 0x0080;
pub const ACC_INTERFACE: u16 = 0x0200;
pub const ACC_ABSTRACT: u16 = 0x0400;
