use nova_classfile::{
    ClassStub, ACC_ABSTRACT, ACC_FINAL, ACC_INTERFACE, ACC_PRIVATE, ACC_PUBLIC, ACC_STATIC,
    ACC_VARARGS,
};

const OBJECT: &str = "java.lang.Object";
const PUBLIC_INTERFACE: u16 = ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT;
const PUBLIC_ABSTRACT: u16 = ACC_PUBLIC | ACC_ABSTRACT;
const PUBLIC_STATIC: u16 = ACC_PUBLIC | ACC_STATIC;

fn class(name: &str, access_flags: u16) -> ClassStub {
    ClassStub::new(name, access_flags).with_super(OBJECT)
}

// Interfaces still name `Object` as their super class, as in class files.
fn interface(name: &str) -> ClassStub {
    class(name, PUBLIC_INTERFACE)
}

pub(crate) fn stubs() -> Vec<ClassStub> {
    vec![
        // java.lang
        ClassStub::new(OBJECT, ACC_PUBLIC)
            .with_method(ACC_PUBLIC, "<init>", "()V")
            .with_method(ACC_PUBLIC, "equals", "(Ljava/lang/Object;)Z")
            .with_method(ACC_PUBLIC, "hashCode", "()I")
            .with_method(ACC_PUBLIC, "toString", "()Ljava/lang/String;")
            .with_method(ACC_PUBLIC | ACC_FINAL, "getClass", "()Ljava/lang/Class;"),
        interface("java.lang.CharSequence")
            .with_method(PUBLIC_ABSTRACT, "length", "()I")
            .with_method(PUBLIC_ABSTRACT, "charAt", "(I)C"),
        interface("java.lang.Comparable")
            .with_method(PUBLIC_ABSTRACT, "compareTo", "(Ljava/lang/Object;)I"),
        interface("java.lang.Cloneable"),
        interface("java.lang.Iterable")
            .with_method(PUBLIC_ABSTRACT, "iterator", "()Ljava/util/Iterator;"),
        class("java.lang.String", ACC_PUBLIC | ACC_FINAL)
            .with_interface("java.io.Serializable")
            .with_interface("java.lang.Comparable")
            .with_interface("java.lang.CharSequence")
            .with_field(ACC_PRIVATE | ACC_FINAL, "value", "[B")
            .with_method(ACC_PUBLIC, "<init>", "()V")
            .with_method(ACC_PUBLIC, "length", "()I")
            .with_method(ACC_PUBLIC, "charAt", "(I)C")
            .with_method(ACC_PUBLIC, "compareTo", "(Ljava/lang/String;)I")
            .with_method(
                PUBLIC_STATIC | ACC_VARARGS,
                "format",
                "(Ljava/lang/String;[Ljava/lang/Object;)Ljava/lang/String;",
            )
            .with_method(PUBLIC_STATIC, "valueOf", "(I)Ljava/lang/String;"),
        class("java.lang.Number", PUBLIC_ABSTRACT)
            .with_interface("java.io.Serializable")
            .with_method(ACC_PUBLIC, "<init>", "()V")
            .with_method(PUBLIC_ABSTRACT, "intValue", "()I")
            .with_method(PUBLIC_ABSTRACT, "longValue", "()J"),
        ClassStub::new("java.lang.Integer", ACC_PUBLIC | ACC_FINAL)
            .with_super("java.lang.Number")
            .with_interface("java.lang.Comparable")
            .with_field(PUBLIC_STATIC | ACC_FINAL, "MAX_VALUE", "I")
            .with_field(PUBLIC_STATIC | ACC_FINAL, "MIN_VALUE", "I")
            .with_field(ACC_FINAL, "value", "I")
            .with_method(ACC_PUBLIC, "intValue", "()I")
            .with_method(ACC_PUBLIC, "longValue", "()J")
            .with_method(PUBLIC_STATIC, "valueOf", "(I)Ljava/lang/Integer;")
            .with_method(PUBLIC_STATIC, "parseInt", "(Ljava/lang/String;)I")
            .with_method(ACC_STATIC, "<clinit>", "()V"),
        class("java.lang.System", ACC_PUBLIC | ACC_FINAL)
            .with_field(PUBLIC_STATIC | ACC_FINAL, "out", "Ljava/io/PrintStream;")
            .with_field(PUBLIC_STATIC | ACC_FINAL, "err", "Ljava/io/PrintStream;")
            .with_method(PUBLIC_STATIC, "currentTimeMillis", "()J")
            .with_method(
                PUBLIC_STATIC,
                "arraycopy",
                "(Ljava/lang/Object;ILjava/lang/Object;II)V",
            )
            .with_method(ACC_STATIC, "<clinit>", "()V"),
        class("java.lang.Throwable", ACC_PUBLIC)
            .with_interface("java.io.Serializable")
            .with_field(0, "detailMessage", "Ljava/lang/String;")
            .with_method(ACC_PUBLIC, "<init>", "()V")
            .with_method(ACC_PUBLIC, "<init>", "(Ljava/lang/String;)V")
            .with_method(ACC_PUBLIC, "getMessage", "()Ljava/lang/String;"),
        ClassStub::new("java.lang.Exception", ACC_PUBLIC)
            .with_super("java.lang.Throwable")
            .with_method(ACC_PUBLIC, "<init>", "()V")
            .with_method(ACC_PUBLIC, "<init>", "(Ljava/lang/String;)V"),
        ClassStub::new("java.lang.RuntimeException", ACC_PUBLIC)
            .with_super("java.lang.Exception")
            .with_method(ACC_PUBLIC, "<init>", "()V")
            .with_method(ACC_PUBLIC, "<init>", "(Ljava/lang/String;)V"),
        // java.io
        interface("java.io.Serializable"),
        // java.util
        interface("java.util.Collection")
            .with_interface("java.lang.Iterable")
            .with_method(PUBLIC_ABSTRACT, "size", "()I")
            .with_method(PUBLIC_ABSTRACT, "isEmpty", "()Z")
            .with_method(PUBLIC_ABSTRACT, "add", "(Ljava/lang/Object;)Z"),
        interface("java.util.List")
            .with_interface("java.util.Collection")
            .with_method(PUBLIC_ABSTRACT, "get", "(I)Ljava/lang/Object;")
            .with_method(PUBLIC_ABSTRACT, "add", "(Ljava/lang/Object;)Z"),
        interface("java.util.RandomAccess"),
        class("java.util.AbstractCollection", PUBLIC_ABSTRACT)
            .with_interface("java.util.Collection")
            .with_method(0, "<init>", "()V")
            .with_method(PUBLIC_ABSTRACT, "size", "()I")
            .with_method(ACC_PUBLIC, "isEmpty", "()Z")
            .with_method(ACC_PUBLIC, "add", "(Ljava/lang/Object;)Z"),
        ClassStub::new("java.util.AbstractList", PUBLIC_ABSTRACT)
            .with_super("java.util.AbstractCollection")
            .with_interface("java.util.List")
            .with_field(0, "modCount", "I")
            .with_method(0, "<init>", "()V")
            .with_method(PUBLIC_ABSTRACT, "get", "(I)Ljava/lang/Object;")
            .with_method(ACC_PUBLIC, "add", "(Ljava/lang/Object;)Z")
            .with_method(ACC_PUBLIC, "clear", "()V"),
        ClassStub::new("java.util.ArrayList", ACC_PUBLIC)
            .with_super("java.util.AbstractList")
            .with_interface("java.util.List")
            .with_interface("java.util.RandomAccess")
            .with_interface("java.lang.Cloneable")
            .with_interface("java.io.Serializable")
            .with_field(0, "elementData", "[Ljava/lang/Object;")
            .with_field(0, "size", "I")
            .with_method(ACC_PUBLIC, "<init>", "()V")
            .with_method(ACC_PUBLIC, "<init>", "(I)V")
            .with_method(ACC_PUBLIC, "get", "(I)Ljava/lang/Object;")
            .with_method(ACC_PUBLIC, "size", "()I")
            .with_method(ACC_PUBLIC, "add", "(Ljava/lang/Object;)Z"),
    ]
}
