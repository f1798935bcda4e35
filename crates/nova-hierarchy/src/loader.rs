use crate::{ClassDetail, ClassInfo, LoadError};

/// Strategy used to resolve a class's detail the first time it is needed.
///
/// The scope calls [`DetailLoader::load`] at most once per class and attaches the returned
/// detail itself. Loaders may call back into the scope through [`ClassInfo::scope`] (typically
/// `find_or_create` for super types, interfaces and member types).
pub trait DetailLoader: Send + Sync {
    fn load(&self, class: ClassInfo<'_>) -> Result<ClassDetail, LoadError>;
}

impl<F> DetailLoader for F
where
    F: for<'a> Fn(ClassInfo<'a>) -> Result<ClassDetail, LoadError> + Send + Sync,
{
    fn load(&self, class: ClassInfo<'_>) -> Result<ClassDetail, LoadError> {
        self(class)
    }
}

/// Loader that knows no classes. Only explicitly attached detail resolves.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotFoundLoader;

impl DetailLoader for NotFoundLoader {
    fn load(&self, class: ClassInfo<'_>) -> Result<ClassDetail, LoadError> {
        Err(LoadError::class_not_found(class.full_name().as_ref()))
    }
}
