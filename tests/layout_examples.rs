use typelayout::layout::{Layout, LayoutContext, LayoutData, NestedLayout, OptimalLayout};
use typelayout::registry::TypeRegistry;

fn layout_of(registry: &TypeRegistry, name: &str) -> Layout {
    let is_union = registry.is_union(name).unwrap();
    LayoutContext::new(registry)
        .compute_layout(name, is_union, NestedLayout::Declared)
        .unwrap()
}

#[test]
fn struct_of_char_and_int() {
    let mut registry = TypeRegistry::new();
    registry.define_atomic("char", 1, 2).unwrap();
    registry.define_atomic("int", 4, 4).unwrap();
    registry.define_composite("foo", &["char", "int"], false).unwrap();

    let layout = layout_of(&registry, "foo");

    assert_eq!(layout.packed.byte_size, 5);
    assert_eq!(layout.unpacked.byte_size, 8);
    assert_eq!(layout.packed.align, 2);
    assert_eq!(layout.unpacked.align, 2);
    assert_eq!(layout.wasted_bytes, 3);
}

#[test]
fn union_of_char_and_int() {
    let mut registry = TypeRegistry::new();
    registry.define_atomic("char", 1, 2).unwrap();
    registry.define_atomic("int", 4, 4).unwrap();
    registry.define_composite("bar", &["char", "int"], true).unwrap();

    let layout = layout_of(&registry, "bar");

    assert_eq!(
        layout,
        Layout {
            packed: LayoutData {
                byte_size: 4,
                align: 4,
            },
            unpacked: LayoutData {
                byte_size: 4,
                align: 4,
            },
            wasted_bytes: 0,
        }
    );
}

#[test]
fn optimizer_does_not_reorder_stored_fields() {
    let mut registry = TypeRegistry::new();
    registry.define_atomic("a", 1, 2).unwrap();
    registry.define_atomic("b", 4, 4).unwrap();
    registry.define_atomic("c", 5, 3).unwrap();
    registry.define_composite("s", &["a", "b", "c"], false).unwrap();

    let declared = layout_of(&registry, "s");
    let optimal = LayoutContext::new(&registry)
        .find_optimal_layout("s")
        .unwrap();

    assert!(optimal.byte_size <= declared.unpacked.byte_size);
    assert_eq!(registry.field_names("s").unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn deeply_nested_struct_and_union() {
    let mut registry = TypeRegistry::new();
    registry.define_atomic("a", 1, 2).unwrap();
    registry.define_atomic("b", 2, 2).unwrap();
    registry.define_atomic("c", 4, 4).unwrap();
    registry.define_composite("s1", &["a", "b"], false).unwrap();
    registry.define_composite("u1", &["b", "c"], true).unwrap();
    registry.define_composite("s2", &["s1", "u1", "c"], false).unwrap();

    let layout = layout_of(&registry, "s2");

    assert_eq!(layout.packed.byte_size, 11);
    assert_eq!(layout.unpacked.byte_size, 12);
    assert_eq!(layout.unpacked.align, 2);
    assert_eq!(layout.wasted_bytes, 1);
}

#[test]
fn one_context_answers_several_queries() {
    let mut registry = TypeRegistry::new();
    registry.define_atomic("char", 1, 2).unwrap();
    registry.define_atomic("int", 4, 4).unwrap();
    registry.define_atomic("raro", 5, 3).unwrap();
    registry
        .define_composite("foo", &["char", "int", "raro"], false)
        .unwrap();
    registry
        .define_composite("foobar", &["foo", "int"], false)
        .unwrap();

    let mut ctx = LayoutContext::new(&registry);

    let inner = ctx.find_optimal_layout("foo").unwrap();
    let outer = ctx.find_optimal_layout("foobar").unwrap();
    let again = ctx.find_optimal_layout("foo").unwrap();

    assert_eq!(
        inner,
        OptimalLayout {
            byte_size: 11,
            align: 4,
            wasted_bytes: 1,
        }
    );
    assert_eq!(inner, again);
    // int at 0 and foo at 4 beats foo at 0 and int padded to 12.
    assert_eq!(
        outer,
        OptimalLayout {
            byte_size: 15,
            align: 4,
            wasted_bytes: 1,
        }
    );
}
