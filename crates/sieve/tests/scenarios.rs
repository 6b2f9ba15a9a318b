//! End-to-end scenarios: the product catalog, evaluation order, sharing and
//! concurrent traversal.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use sieve::leaf::{field_opt, one_of};
use sieve::{
    and, any_of, filter, none_of, not, or, Criteria, FilterExt, Op, Result, SieveError,
    Specification,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Green,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Size {
    Small,
    Large,
}

#[derive(Debug, Clone, PartialEq)]
struct Product {
    name: &'static str,
    color: Color,
    size: Size,
    price: Option<u32>,
}

struct ColorSpec(Color);

impl Specification<Product> for ColorSpec {
    fn is_satisfied_by(&self, p: &Product) -> Result<bool> {
        Ok(p.color == self.0)
    }

    fn describe(&self) -> String {
        format!("color == {:?}", self.0)
    }
}

struct SizeSpec(Size);

impl Specification<Product> for SizeSpec {
    fn is_satisfied_by(&self, p: &Product) -> Result<bool> {
        Ok(p.size == self.0)
    }

    fn describe(&self) -> String {
        format!("size == {:?}", self.0)
    }
}

/// Counts evaluations and answers a fixed value.
struct Probe {
    answer: bool,
    calls: AtomicUsize,
}

impl Probe {
    fn new(answer: bool) -> Arc<Self> {
        Arc::new(Probe {
            answer,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Specification<Product> for Probe {
    fn is_satisfied_by(&self, _: &Product) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer)
    }
}

fn catalog() -> Vec<Product> {
    vec![
        Product {
            name: "Apple",
            color: Color::Green,
            size: Size::Small,
            price: Some(1),
        },
        Product {
            name: "Tree",
            color: Color::Green,
            size: Size::Large,
            price: None,
        },
        Product {
            name: "House",
            color: Color::Blue,
            size: Size::Large,
            price: Some(250_000),
        },
    ]
}

fn names<S: Specification<Product>>(products: &[Product], spec: &S) -> Vec<&'static str> {
    filter(products, spec)
        .map(|p| p.map(|p| p.name))
        .collect::<Result<_>>()
        .unwrap()
}

#[test]
fn catalog_scenario() {
    let products = catalog();

    assert_eq!(names(&products, &ColorSpec(Color::Green)), ["Apple", "Tree"]);
    assert_eq!(names(&products, &SizeSpec(Size::Large)), ["Tree", "House"]);
    assert_eq!(
        names(&products, &and(ColorSpec(Color::Blue), SizeSpec(Size::Large))),
        ["House"]
    );
    assert_eq!(names(&products, &not(ColorSpec(Color::Green))), ["House"]);
}

#[test]
fn catalog_with_nary_and_criteria() {
    let products = catalog();

    let red_or_small = any_of([ColorSpec(Color::Red).boxed(), SizeSpec(Size::Small).boxed()]);
    assert_eq!(names(&products, &red_or_small), ["Apple"]);

    let neither = none_of([ColorSpec(Color::Blue).boxed(), SizeSpec(Size::Small).boxed()]);
    assert_eq!(names(&products, &neither), ["Tree"]);

    let criteria = Criteria::new()
        .and_clause(SizeSpec(Size::Large))
        .or_clause(ColorSpec(Color::Green))
        .or_clause(ColorSpec(Color::Red))
        .build();
    assert_eq!(names(&products, &criteria), ["Tree"]);

    let colors = one_of("color", |p: &Product| p.color, [Color::Blue, Color::Red]);
    assert_eq!(names(&products, &colors), ["House"]);
}

#[test]
fn and_leaves_second_uninvoked_when_first_is_false() {
    let products = catalog();
    let probe = Probe::new(true);
    let spec = and(ColorSpec(Color::Red), probe.clone());

    assert!(names(&products, &spec).is_empty());
    assert_eq!(probe.calls(), 0);
}

#[test]
fn or_leaves_second_uninvoked_when_first_is_true() {
    let products = catalog();
    let probe = Probe::new(false);
    let spec = or(SizeSpec(Size::Large).or(SizeSpec(Size::Small)), probe.clone());

    assert_eq!(names(&products, &spec).len(), 3);
    assert_eq!(probe.calls(), 0);
}

#[test]
fn shared_leaf_in_several_trees() {
    let products = catalog();
    let green = Arc::new(ColorSpec(Color::Green));

    let green_and_large = and(green.clone(), SizeSpec(Size::Large));
    let green_or_blue = or(green.clone(), ColorSpec(Color::Blue));

    assert_eq!(names(&products, &green_and_large), ["Tree"]);
    assert_eq!(names(&products, &green_or_blue).len(), 3);
    assert_eq!(
        green_and_large.describe(),
        "(color == Green AND size == Large)"
    );
}

#[test]
fn concurrent_traversals_share_one_tree() {
    let products = Arc::new(catalog());
    let spec: Arc<dyn Specification<Product> + Send + Sync> = Arc::new(or(
        and(ColorSpec(Color::Green), SizeSpec(Size::Large)),
        ColorSpec(Color::Blue),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let products = Arc::clone(&products);
            let spec = Arc::clone(&spec);
            thread::spawn(move || names(&products, &spec))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), ["Tree", "House"]);
    }
}

#[test]
fn unavailable_attribute_is_a_failure_not_a_mismatch() {
    let products = catalog();
    let cheap = field_opt("price", |p: &Product| p.price, Op::Lt, 100);

    let mut it = products.iter().satisfying(&cheap);
    assert_eq!(it.next().unwrap().unwrap().name, "Apple");
    let err = it.next().unwrap().unwrap_err();
    assert!(err.is_evaluation());
    match err {
        SieveError::ItemFailed { index, source } => {
            assert_eq!(index, 1);
            assert!(matches!(*source, SieveError::Unavailable { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(it.next().is_none());
}
