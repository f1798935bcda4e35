use std::sync::Arc;

use nova_classfile::{ClassStub, ACC_ABSTRACT, ACC_FINAL, ACC_INTERFACE, ACC_PUBLIC, ACC_STATIC};
use nova_config::HierarchyConfig;
use nova_hierarchy::{ClassScope, Primitive};
use nova_hierarchy_bridge::{MapStubProvider, StubLoader};
use pretty_assertions::assert_eq;

fn platform() -> MapStubProvider {
    MapStubProvider::new()
        .with(ClassStub::new("java.lang.Object", ACC_PUBLIC).with_method(ACC_PUBLIC, "<init>", "()V"))
        .with(ClassStub::new("java.lang.Cloneable", ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT))
        .with(ClassStub::new("java.io.Serializable", ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT))
        .with(
            ClassStub::new("java.lang.Runnable", ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT)
                .with_super("java.lang.Object")
                .with_method(ACC_PUBLIC | ACC_ABSTRACT, "run", "()V"),
        )
        .with(
            ClassStub::new("java.lang.Thread", ACC_PUBLIC)
                .with_super("java.lang.Object")
                .with_interface("java.lang.Runnable")
                .with_method(ACC_PUBLIC, "run", "()V"),
        )
}

fn program() -> MapStubProvider {
    MapStubProvider::new()
        .with(
            ClassStub::new("com.example.Worker", ACC_PUBLIC)
                .with_super("java.lang.Thread")
                .with_field(0, "name", "Ljava/lang/String;")
                .with_field(0, "buffer", "[[I")
                .with_field(ACC_STATIC, "COUNT", "J")
                .with_method(ACC_PUBLIC, "<init>", "()V")
                .with_method(ACC_PUBLIC, "run", "()V")
                .with_method(ACC_PUBLIC, "submit", "(Ljava/lang/Runnable;I)Z"),
        )
        .with(
            ClassStub::new("com.example.Broken", ACC_PUBLIC)
                .with_super("java.lang.Object")
                .with_method(ACC_PUBLIC, "oops", "(I"),
        )
}

fn scope_with(config: &HierarchyConfig) -> ClassScope {
    let loader = StubLoader::from_config(config, Arc::new(program()), Arc::new(platform()));
    ClassScope::with_loader(Arc::new(loader))
}

#[test]
fn program_classes_resolve_from_program_stubs() {
    let scope = scope_with(&HierarchyConfig::default());
    let worker = scope.find_or_create("com.example.Worker");

    assert!(!worker.is_missing());
    assert!(!worker.is_framework_class());
    assert_eq!(
        worker.super_class(),
        Some(scope.find_or_create("java.lang.Thread"))
    );
    assert!(worker.is_convertible_to(scope.find_or_create("java.lang.Runnable")));
    assert!(worker.is_convertible_to(scope.find_or_create("java.lang.Object")));
}

#[test]
fn platform_classes_are_framework_classes() {
    let scope = scope_with(&HierarchyConfig::default());
    let thread = scope.find_or_create("java.lang.Thread");
    let runnable = scope.find_or_create("java.lang.Runnable");

    assert!(thread.is_framework_class());
    assert!(runnable.is_framework_class());
    assert!(runnable.is_interface());
    assert_eq!(runnable.super_class(), None);
    assert_eq!(thread.interfaces(), vec![runnable]);
}

#[test]
fn field_and_method_descriptors_become_class_handles() {
    let scope = scope_with(&HierarchyConfig::default());
    let worker = scope.find_or_create("com.example.Worker");

    assert_eq!(
        worker.field_type("name"),
        scope.find_class("java.lang.String")
    );
    let buffer = worker.field_type("buffer").unwrap();
    assert_eq!(buffer.full_name().as_ref(), "[[I");
    assert_eq!(
        buffer.element_class().unwrap().element_class(),
        Some(scope.primitive(Primitive::Int))
    );
    assert_eq!(
        worker.static_field_type("COUNT"),
        Some(scope.primitive(Primitive::Long))
    );
    assert_eq!(worker.field_type("COUNT"), None);

    let runnable = scope.find_or_create("java.lang.Runnable");
    let int = scope.primitive(Primitive::Int);
    let submit = worker.find_method_here_by("submit", &[runnable, int]).unwrap();
    assert_eq!(submit.return_type(), scope.primitive(Primitive::Boolean).id());
    assert!(worker.default_constructor().is_some());
}

#[test]
fn inherited_methods_come_from_platform_stubs() {
    let scope = scope_with(&HierarchyConfig::default());
    let worker = scope.find_or_create("com.example.Worker");
    let thread = scope.find_or_create("java.lang.Thread");

    let runs = worker.find_methods("run").unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].declaring_class(), worker.id());

    assert_eq!(thread.derived_classes(), vec![worker]);
    assert!(!thread.is_almost_final());
}

#[test]
fn malformed_descriptor_makes_the_class_missing() {
    let scope = scope_with(&HierarchyConfig::default());
    let broken = scope.find_or_create("com.example.Broken");

    assert!(broken.is_missing());
    assert_eq!(broken.super_class(), None);
    assert_eq!(broken.all_methods(), None);
}

#[test]
fn unknown_classes_are_missing() {
    let scope = scope_with(&HierarchyConfig::default());
    let unknown = scope.find_or_create("com.example.Unknown");

    assert!(unknown.is_missing());
    assert!(!unknown.is_framework_class());
}

#[test]
fn arrays_get_synthetic_detail() {
    let scope = scope_with(&HierarchyConfig::default());
    let strings = scope.find_or_create("[Ljava.lang.String;");

    assert!(!strings.is_missing());
    assert!(strings.is_final());
    assert!(strings.is_framework_class());
    assert!(strings.is_convertible_to(scope.find_or_create("java.lang.Object")));
    assert!(strings.is_convertible_to(scope.find_or_create("java.lang.Cloneable")));
    assert!(strings.is_convertible_to(scope.find_or_create("java.io.Serializable")));
    assert!(!strings.is_convertible_to(scope.find_or_create("java.lang.Runnable")));
}

#[test]
fn arrays_are_missing_when_synthesis_is_disabled() {
    let config = HierarchyConfig {
        synthesize_arrays: false,
        ..HierarchyConfig::default()
    };
    let scope = scope_with(&config);
    let ints = scope.find_or_create("[I");

    assert!(ints.is_missing());
    assert_eq!(ints.element_class(), Some(scope.primitive(Primitive::Int)));
}

#[test]
fn platform_fallback_can_be_disabled() {
    let config = HierarchyConfig {
        platform_fallback: false,
        ..HierarchyConfig::default()
    };
    let scope = scope_with(&config);
    let worker = scope.find_or_create("com.example.Worker");
    let thread = scope.find_or_create("java.lang.Thread");

    assert!(!worker.is_missing());
    assert!(thread.is_missing());
    assert!(!worker.is_convertible_to(scope.find_or_create("java.lang.Runnable")));
    // The derived entry is still recorded on the missing super class.
    assert_eq!(thread.derived_classes(), vec![worker]);
}

#[test]
fn program_stub_shadows_platform_stub() {
    let program = MapStubProvider::new().with(
        ClassStub::new("java.lang.Thread", ACC_PUBLIC | ACC_FINAL).with_super("java.lang.Object"),
    );
    let loader = StubLoader::new(Arc::new(program), Arc::new(platform()));
    let scope = ClassScope::with_loader(Arc::new(loader));
    let thread = scope.find_or_create("java.lang.Thread");

    assert!(thread.is_final());
    assert!(!thread.is_framework_class());
    assert!(thread.interfaces().is_empty());
}
