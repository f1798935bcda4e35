//! Class hierarchy model for bytecode analysis.
//!
//! A [`ClassScope`] hands out exactly one [`ClassInfo`] per full class name, so the rest of an
//! analysis can compare classes by identity. Structural detail (fields, methods, super types)
//! is attached lazily: either by a bytecode reader via [`ClassInfo::attach_detail`], or by the
//! scope's [`DetailLoader`] the first time a query needs it. Classes that cannot be resolved
//! stay queryable as *missing* classes.
//!
//! ```
//! use nova_hierarchy::{ClassDetail, ClassScope};
//!
//! let scope = ClassScope::new();
//! let foo = scope.find_or_create("com.example.Foo");
//! foo.attach_detail(ClassDetail::new(0)).unwrap();
//!
//! let bar = scope.find_or_create("com.example.Bar");
//! bar.set_super_class(foo);
//!
//! assert!(bar.is_convertible_to(foo));
//! assert!(!foo.is_almost_final());
//! assert!(bar.is_almost_final());
//! ```

#![forbid(unsafe_code)]

mod class_info;
mod detail;
mod error;
mod loader;
mod method;
mod name;
mod scope;

pub use crate::class_info::ClassInfo;
pub use crate::detail::ClassDetail;
pub use crate::error::{HierarchyError, LoadError};
pub use crate::loader::{DetailLoader, NotFoundLoader};
pub use crate::method::{MethodInfo, MethodProto, CONSTRUCTOR, STATIC_INITIALIZER};
pub use crate::name::Primitive;
pub use crate::scope::{ClassId, ClassScope};
