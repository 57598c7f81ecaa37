//! End-to-end scenarios through [`Serializer`].

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;
use std::collections::HashMap;

use crate::info::{TypeKind, TypePath, Typed};
use crate::registry::{TypeRegistry, TypeRegistryArc};
use crate::{
    DecodeError, EncodeError, ObjectRef, Serializable, Serializer, SerializerConfig, Shared,
    Transport, share,
};

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Serializable, Default, Debug)]
#[serializable(type_path = "test::Node")]
struct Node {
    name: String,
    next: Option<Shared<Node>>,
}

#[derive(Serializable, Default, Debug, PartialEq)]
#[serializable(type_path = "test::Leaf")]
struct Leaf {
    value: i32,
}

#[derive(Serializable, Default)]
#[serializable(type_path = "test::Pair")]
struct Pair {
    left: Option<Shared<Leaf>>,
    right: Option<Shared<Leaf>>,
}

#[derive(Serializable, Default, Debug, PartialEq)]
#[serializable(type_path = "test::Scalars")]
struct Scalars {
    flag: bool,
    letter: char,
    small: i8,
    large: u64,
    wide: i128,
    ratio: f64,
    text: String,
    maybe: Option<u16>,
    bytes: Vec<u8>,
    table: BTreeMap<String, i32>,
    timeout: Duration,
}

#[derive(Serializable, Default)]
#[serializable(type_path = "test::Cached")]
struct Cached {
    key: String,
    #[serializable(ignore)]
    hits: u64,
}

#[derive(Serializable, Default)]
#[serializable(type_path = "test::Holder")]
struct Holder {
    items: Option<Vec<i32>>,
}

#[derive(Serializable, Debug, Clone, Copy, PartialEq)]
#[serializable(type_path = "test::Color")]
enum Color {
    Red,
    Green = 5,
}

#[derive(Serializable, Default, Debug, Clone, Copy, PartialEq)]
#[serializable(value, type_path = "test::Point")]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Serializable, Default)]
#[serializable(type_path = "test::Shape")]
struct Shape {
    color: Option<Color>,
    origin: Point,
    corners: [Point; 2],
}

#[derive(Serializable, Default)]
#[serializable(type_path = "test::Dog")]
struct Dog {
    name: String,
}

#[derive(Serializable, Default)]
#[serializable(type_path = "test::Cat")]
struct Cat {
    lives: u8,
}

#[derive(Serializable, Default)]
#[serializable(type_path = "test::Zoo")]
struct Zoo {
    animals: Vec<ObjectRef>,
}

#[derive(Serializable, Default)]
struct Cage<T> {
    inner: T,
}

#[derive(Serializable, Default)]
#[serializable(type_path = "test::Marker")]
struct Marker;

#[derive(Serializable, Default)]
#[serializable(type_path = "test::Container")]
struct Container {
    items: HashMap<String, Shared<Item>>,
}

#[derive(Serializable, Default)]
#[serializable(type_path = "test::Item")]
struct Item {
    label: String,
    parent: Option<Shared<Container>>,
}

fn raw() -> Serializer {
    Serializer::with_config(SerializerConfig::new().with_transport(Transport::Raw))
        .with_registry(TypeRegistryArc::new(TypeRegistry::empty()))
}

fn base64() -> Serializer {
    Serializer::new().with_registry(TypeRegistryArc::new(TypeRegistry::empty()))
}

// -----------------------------------------------------------------------------
// References

#[test]
fn self_reference() {
    let node = share(Node {
        name: "a".into(),
        next: None,
    });
    node.borrow_mut().next = Some(node.clone());

    let serializer = raw();
    let text = serializer.serialize(&node).unwrap();
    assert_eq!(text, "~otest::Node|0|2;~[1:a~r0;");

    let back: Shared<Node> = serializer.deserialize(&text).unwrap();
    let next = back.borrow().next.clone().unwrap();
    assert!(Rc::ptr_eq(&back, &next));
    assert_eq!(back.borrow().name, "a");
}

#[test]
fn shared_instance_is_written_once() {
    let leaf = share(Leaf { value: 5 });
    let pair = share(Pair {
        left: Some(leaf.clone()),
        right: Some(leaf),
    });

    let serializer = raw();
    let text = serializer.serialize(&pair).unwrap();
    assert_eq!(text, "~otest::Pair|0|2;~otest::Leaf|1|1;5;~r1;");

    let back: Shared<Pair> = serializer.deserialize(&text).unwrap();
    let back = back.borrow();
    let (left, right) = (back.left.as_ref().unwrap(), back.right.as_ref().unwrap());
    assert!(Rc::ptr_eq(left, right));

    left.borrow_mut().value = 6;
    assert_eq!(right.borrow().value, 6);
}

#[test]
fn copies_are_independent() {
    let leaf = share(Leaf { value: 5 });
    let pair = share(Pair {
        left: Some(leaf.clone()),
        right: Some(leaf),
    });

    let serializer = raw();
    let text = serializer.serialize_copy(&pair).unwrap();
    assert_eq!(text, "~otest::Pair||2;~otest::Leaf||1;5;~o1||1;5;");

    let back: Shared<Pair> = serializer.deserialize(&text).unwrap();
    let back = back.borrow();
    let (left, right) = (back.left.as_ref().unwrap(), back.right.as_ref().unwrap());
    assert!(!Rc::ptr_eq(left, right));
    assert_eq!(*left.borrow(), *right.borrow());

    left.borrow_mut().value = 6;
    assert_eq!(right.borrow().value, 5);
}

#[test]
fn copy_of_cycle_fails() {
    let node = share(Node::default());
    node.borrow_mut().next = Some(node.clone());

    assert!(matches!(
        raw().serialize_copy(&node),
        Err(EncodeError::CyclicCopy {
            type_path: "test::Node"
        })
    ));
}

#[test]
fn map_refers_back_to_its_container() {
    let map: Shared<BTreeMap<String, ObjectRef>> = share(BTreeMap::new());
    let as_object: ObjectRef = map.clone();
    map.borrow_mut().insert("me".to_string(), as_object);
    let leaf: ObjectRef = share(Leaf { value: 1 });
    map.borrow_mut().insert("leaf".to_string(), leaf.clone());
    map.borrow_mut().insert("same leaf".to_string(), leaf);

    let serializer = raw();
    let text = serializer.serialize(&map).unwrap();
    let back: Shared<BTreeMap<String, ObjectRef>> = serializer.deserialize(&text).unwrap();

    let back_ref = back.borrow();
    let me = &back_ref["me"];
    assert!(core::ptr::addr_eq(Rc::as_ptr(me), Rc::as_ptr(&back)));
    assert_eq!(
        back_ref["leaf"].borrow().downcast_ref::<Leaf>(),
        Some(&Leaf { value: 1 })
    );
    assert!(Rc::ptr_eq(&back_ref["leaf"], &back_ref["same leaf"]));
}

#[test]
fn items_refer_back_to_their_container() {
    let container = share(Container::default());
    for key in ["k1", "k2"] {
        let item = share(Item {
            label: key.to_uppercase(),
            parent: Some(container.clone()),
        });
        container.borrow_mut().items.insert(key.to_string(), item);
    }

    for serializer in [raw(), base64()] {
        let text = serializer.serialize(&container).unwrap();
        let back: Shared<Container> = serializer.deserialize(&text).unwrap();

        let back_ref = back.borrow();
        assert_eq!(back_ref.items.len(), 2);
        for key in ["k1", "k2"] {
            let item = back_ref.items[key].borrow();
            assert_eq!(item.label, key.to_uppercase());
            let parent = item.parent.as_ref().unwrap();
            assert!(Rc::ptr_eq(parent, &back));
        }
    }

    // Break the cycles so the test does not leak.
    container.borrow_mut().items.clear();
}

// -----------------------------------------------------------------------------
// Values

#[test]
fn scalars_round_trip() {
    let scalars = share(Scalars {
        flag: true,
        letter: 'ß',
        small: -8,
        large: u64::MAX,
        wide: i128::MIN,
        ratio: 0.1,
        text: "héllo".into(),
        maybe: Some(7),
        bytes: vec![0, 255],
        table: BTreeMap::from([("a".to_string(), 1), ("b".to_string(), -1)]),
        timeout: Duration::new(3, 500),
    });

    let serializer = base64();
    let text = serializer.serialize(&scalars).unwrap();
    let back: Shared<Scalars> = serializer.deserialize(&text).unwrap();
    assert_eq!(*back.borrow(), *scalars.borrow());
}

#[test]
fn strings_with_markers() {
    let serializer = raw();
    for text in ["~r0;|~n;~[3:~o0||1;", "~[marker]", "~[", "~[0:"] {
        let data = serializer.serialize(&text.to_string()).unwrap();
        assert_eq!(serializer.deserialize::<String>(&data).unwrap(), text);
    }
    assert_eq!(
        serializer.serialize(&"~[marker]".to_string()).unwrap(),
        "~[9:~[marker]"
    );

    let empty = serializer.serialize(&String::new()).unwrap();
    assert_eq!(empty, "~[0:");
    assert_eq!(serializer.deserialize::<String>(&empty).unwrap(), "");
}

#[test]
fn null_differs_from_empty() {
    let serializer = raw();

    let none = serializer.serialize(&share(Holder { items: None })).unwrap();
    let empty = serializer
        .serialize(&share(Holder {
            items: Some(Vec::new()),
        }))
        .unwrap();
    assert_eq!(none, "~otest::Holder|0|1;~n");
    assert_eq!(empty, "~otest::Holder|0|1;~l0;");

    let none: Shared<Holder> = serializer.deserialize(&none).unwrap();
    let empty: Shared<Holder> = serializer.deserialize(&empty).unwrap();
    assert_eq!(none.borrow().items, None);
    assert_eq!(empty.borrow().items, Some(Vec::new()));
}

#[test]
fn ignored_fields_keep_default() {
    let cached = share(Cached {
        key: "k".into(),
        hits: 42,
    });

    let serializer = raw();
    let text = serializer.serialize(&cached).unwrap();
    assert_eq!(text, "~otest::Cached|0|1;~[1:k");

    let back: Shared<Cached> = serializer.deserialize(&text).unwrap();
    assert_eq!(back.borrow().key, "k");
    assert_eq!(back.borrow().hits, 0);
    assert_eq!(Cached::type_info().members().len(), 1);
}

#[test]
fn enums_values_and_arrays() {
    let shape = share(Shape {
        color: Some(Color::Green),
        origin: Point { x: 1, y: 2 },
        corners: [Point { x: 0, y: 0 }, Point { x: 3, y: -4 }],
    });

    let serializer = raw();
    let text = serializer.serialize(&shape).unwrap();
    assert_eq!(
        text,
        "~otest::Shape|0|3;5;~v2;1;2;~l2;~v2;0;0;~v2;3;-4;"
    );

    let back: Shared<Shape> = serializer.deserialize(&text).unwrap();
    let back = back.borrow();
    assert_eq!(back.color, Some(Color::Green));
    assert_eq!(back.origin, Point { x: 1, y: 2 });
    assert_eq!(back.corners[1], Point { x: 3, y: -4 });

    assert_eq!(serializer.serialize(&Color::Red).unwrap(), "0;");
    assert!(matches!(
        serializer.deserialize::<Color>("7;"),
        Err(DecodeError::UnknownVariant {
            type_path: "test::Color",
            value: 7
        })
    ));
    assert!(matches!(
        serializer.deserialize::<Point>("~v3;1;2;3;"),
        Err(DecodeError::MemberCountMismatch { expected: 2, found: 3, .. })
    ));
}

#[test]
fn unit_record() {
    let serializer = raw();
    let text = serializer.serialize(&share(Marker)).unwrap();
    assert_eq!(text, "~otest::Marker|0|0;");
    assert!(serializer.deserialize::<Shared<Marker>>(&text).is_ok());
}

#[test]
fn hash_map_member() {
    let mut map = HashMap::new();
    map.insert(1_u32, share(Leaf { value: 10 }));
    map.insert(2_u32, share(Leaf { value: 20 }));
    let map = share(map);

    let serializer = base64();
    let text = serializer.serialize(&map).unwrap();
    let back: Shared<HashMap<u32, Shared<Leaf>>> = serializer.deserialize(&text).unwrap();
    assert_eq!(back.borrow()[&2].borrow().value, 20);
}

#[cfg(feature = "chrono")]
#[test]
fn datetime_round_trip() {
    use chrono::{DateTime, TimeZone, Utc};

    let time = Utc.with_ymd_and_hms(2024, 2, 29, 12, 30, 0).unwrap()
        + chrono::Duration::nanoseconds(1_500);
    let serializer = raw();
    let text = serializer.serialize(&time).unwrap();
    assert_eq!(text, "2024-02-29T12:30:00.000001500Z;");
    assert_eq!(serializer.deserialize::<DateTime<Utc>>(&text).unwrap(), time);
}

#[cfg(feature = "uuid")]
#[test]
fn uuid_round_trip() {
    let id = uuid::Uuid::from_u128(0x1234_5678_9abc_def0_1234_5678_9abc_def0);
    let serializer = raw();
    let text = serializer.serialize(&id).unwrap();
    assert_eq!(text, "12345678-9abc-def0-1234-56789abcdef0;");
    assert_eq!(serializer.deserialize::<uuid::Uuid>(&text).unwrap(), id);
}

// -----------------------------------------------------------------------------
// Registry

#[test]
fn interfaces_need_registration() {
    let dog: ObjectRef = share(Dog { name: "Rex".into() });
    let cat: ObjectRef = share(Cat { lives: 9 });
    let zoo = share(Zoo {
        animals: vec![dog, cat],
    });

    let text = raw().serialize(&zoo).unwrap();

    let reader = raw();
    assert!(matches!(
        reader.deserialize::<Shared<Zoo>>(&text),
        Err(DecodeError::UnknownType { type_path }) if type_path == "test::Dog"
    ));

    reader.registry().write().register::<Dog>();
    reader.registry().write().register::<Cat>();
    let back: Shared<Zoo> = reader.deserialize(&text).unwrap();
    let back = back.borrow();
    assert_eq!(back.animals[0].borrow().downcast_ref::<Dog>().unwrap().name, "Rex");
    assert_eq!(back.animals[1].borrow().downcast_ref::<Cat>().unwrap().lives, 9);
}

#[test]
fn serializing_registers_types() {
    let serializer = raw();
    serializer.serialize(&share(Leaf { value: 1 })).unwrap();

    let registry = serializer.registry().read();
    let info = registry.get_with_type_path("test::Leaf").unwrap();
    assert_eq!(info.kind(), TypeKind::Record);
    assert_eq!(registry.members("test::Leaf").unwrap()[0].name(), "value");
}

#[test]
fn generic_type_paths() {
    assert_eq!(<Cage<i32>>::type_path(), "rg_serial::tests::Cage<i32>");
    assert_eq!(<Cage<Point>>::type_name(), "Cage<Point>");
    assert_eq!(<Cage<i32>>::module_path(), Some("rg_serial::tests"));

    let cage = share(Cage {
        inner: String::from("bird"),
    });
    let serializer = raw();
    let text = serializer.serialize(&cage).unwrap();
    let back: Shared<Cage<String>> = serializer.deserialize(&text).unwrap();
    assert_eq!(back.borrow().inner, "bird");
}

// -----------------------------------------------------------------------------
// Malformed input

#[test]
fn malformed_input() {
    assert!(matches!(
        base64().deserialize::<Shared<Leaf>>("not base64!"),
        Err(DecodeError::Transport(_))
    ));

    let serializer = raw();
    assert!(matches!(
        serializer.deserialize::<Shared<Leaf>>(""),
        Err(DecodeError::UnexpectedEnd { offset: 0 })
    ));
    assert!(matches!(
        serializer.deserialize::<Shared<Leaf>>("~otest::Leaf|0|2;5;6;"),
        Err(DecodeError::MemberCountMismatch { expected: 1, found: 2, .. })
    ));
    assert!(matches!(
        serializer.deserialize::<Shared<Leaf>>("~otest::Leaf|3|1;5;"),
        Err(DecodeError::OutOfOrderReference {
            expected: 0,
            found: 3
        })
    ));
    assert!(matches!(
        serializer.deserialize::<Shared<Leaf>>("~otest::Leaf|0|1;5;~n"),
        Err(DecodeError::TrailingData { offset: 19 })
    ));
    assert!(matches!(
        serializer.deserialize::<Shared<Leaf>>("~otest::Leaf|0|1;x;"),
        Err(DecodeError::InvalidLiteral { .. })
    ));
    assert!(matches!(
        serializer.deserialize::<Shared<Leaf>>("~otest::Node|0|0;"),
        Err(DecodeError::TypeMismatch { .. })
    ));
}

#[test]
fn depth_limit_applies_to_both_directions() {
    let head = share(Node::default());
    let mut tail = head.clone();
    for _ in 0..8 {
        let next = share(Node::default());
        tail.borrow_mut().next = Some(next.clone());
        tail = next;
    }

    let shallow = Serializer::with_config(
        SerializerConfig::new()
            .with_transport(Transport::Raw)
            .with_max_depth(4),
    )
    .with_registry(TypeRegistryArc::new(TypeRegistry::empty()));

    assert!(matches!(
        shallow.serialize(&head),
        Err(EncodeError::DepthLimitExceeded { limit: 4 })
    ));

    let text = raw().serialize(&head).unwrap();
    assert!(matches!(
        shallow.deserialize::<Shared<Node>>(&text),
        Err(DecodeError::DepthLimitExceeded { limit: 4 })
    ));
}

#[test]
fn long_chains_need_a_raised_limit() {
    // 600 levels of recursion need more than the default test thread stack.
    let worker = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let head = share(Node::default());
            let mut tail = head.clone();
            for _ in 1..600 {
                let next = share(Node::default());
                tail.borrow_mut().next = Some(next.clone());
                tail = next;
            }

            let limit = SerializerConfig::DEFAULT_MAX_DEPTH;
            assert!(matches!(
                raw().serialize(&head),
                Err(EncodeError::DepthLimitExceeded { limit: l }) if l == limit
            ));

            let deep = Serializer::with_config(
                SerializerConfig::new()
                    .with_transport(Transport::Raw)
                    .with_max_depth(1024),
            )
            .with_registry(TypeRegistryArc::new(TypeRegistry::empty()));
            let text = deep.serialize(&head).unwrap();
            let back: Shared<Node> = deep.deserialize(&text).unwrap();

            let mut len = 1;
            let mut node = back;
            loop {
                let next = node.borrow().next.clone();
                match next {
                    Some(next) => {
                        node = next;
                        len += 1;
                    }
                    None => break,
                }
            }
            assert_eq!(len, 600);
        })
        .unwrap();
    worker.join().unwrap();
}

#[cfg(feature = "auto_register")]
mod auto_register {
    use crate::Serializable;
    use crate::registry::TypeRegistry;

    #[derive(Serializable, Default)]
    #[serializable(type_path = "test::Registered", auto_register)]
    struct Registered {
        id: u32,
    }

    crate::impl_auto_register!(crate::tests::Cage<u8>);

    #[test]
    fn collected_at_startup() {
        let registry = TypeRegistry::new();
        assert!(registry.contains_type_path("test::Registered"));
        assert!(registry.contains_type_path("rg_serial::tests::Cage<u8>"));
        assert!(!registry.contains_type_path("test::Leaf"));
    }
}
