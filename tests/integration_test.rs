use primfn::{
    BiFunction, DoubleUnaryOperator, FnError, Function, IntBinaryOperator, IntPredicate,
    IntSupplier, IntUnaryOperator, LongUnaryOperator, Pipeline, ThrowingIntUnaryOperator,
    ThrowingSupplier, ToIntFunction,
};
use rayon::prelude::*;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn counting_square() -> (IntUnaryOperator, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let square = Function::new(move |x: i32| {
        counter.fetch_add(1, Ordering::SeqCst);
        x * x
    });
    (square, calls)
}

#[test]
fn test_memoized_equals_plain() {
    let (square, _) = counting_square();
    let memo = square.memoize();
    for x in -50..50 {
        assert_eq!(memo.apply(x), square.apply(x));
        assert_eq!(memo.apply(x), square.apply(x));
    }
}

#[test]
fn test_at_most_once_per_key() {
    let (square, calls) = counting_square();
    let memo = square.memoize();
    for _ in 0..3 {
        for x in 0..10 {
            memo.apply(x);
        }
    }
    assert_eq!(calls.load(Ordering::SeqCst), 10);
    let stats = memo.cache_stats().unwrap();
    assert_eq!(stats.size, 10);
    assert_eq!(stats.misses, 10);
    assert_eq!(stats.hits, 20);
}

#[test]
fn test_concurrent_at_most_once() {
    let (square, calls) = counting_square();
    let memo = square.memoize();
    let results: Vec<i32> = (0..1000)
        .into_par_iter()
        .map(|i| memo.apply(i % 7))
        .collect();
    assert_eq!(calls.load(Ordering::SeqCst), 7);
    for (i, r) in results.iter().enumerate() {
        let k = (i % 7) as i32;
        assert_eq!(*r, k * k);
    }
}

#[test]
fn test_memoize_is_idempotent() {
    let (square, _) = counting_square();
    let memo = square.memoize();
    assert!(memo.memoize().ptr_eq(&memo));
    assert!(!square.memoize().ptr_eq(&memo));

    let gcd: IntBinaryOperator = BiFunction::new(|mut a: i32, mut b: i32| {
        while b != 0 {
            let t = a % b;
            a = b;
            b = t;
        }
        a
    });
    let gcd = gcd.memoize();
    assert!(gcd.memoize().ptr_eq(&gcd));
    assert_eq!(gcd.apply(12, 18), 6);

    let even: IntPredicate = primfn::Predicate::new(|x| x % 2 == 0);
    let even = even.memoize();
    assert!(even.memoize().ptr_eq(&even));
}

#[test]
fn test_failures_are_not_memoized() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let half: ThrowingIntUnaryOperator<FnError> = primfn::ThrowingFunction::new(move |x: i32| {
        counter.fetch_add(1, Ordering::SeqCst);
        if x % 2 == 0 {
            Ok(x / 2)
        } else {
            Err(FnError::Arithmetic(format!("{} is odd", x)))
        }
    });
    let half = half.memoize();
    assert!(half.try_apply(3).is_err());
    assert!(half.try_apply(3).is_err());
    assert_eq!(half.try_apply(8).unwrap(), 4);
    assert_eq!(half.try_apply(8).unwrap(), 4);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(half.cache_stats().unwrap().size, 1);
}

#[test]
fn test_sneaky_keeps_original_error() {
    let read: ThrowingSupplier<i32, io::Error> = ThrowingSupplier::new(|| {
        Err(io::Error::new(io::ErrorKind::NotFound, "no such value"))
    });
    let error = read.sneaky().get().unwrap_err();
    assert_eq!(error.kind(), io::ErrorKind::NotFound);

    let nested = read.nest().try_get().unwrap_err();
    let cause = nested.cause().unwrap().downcast_ref::<io::Error>().unwrap();
    assert_eq!(cause.kind(), io::ErrorKind::NotFound);

    assert_eq!(read.or_return(-1).get(), -1);
}

#[test]
fn test_composition_is_associative() {
    let f: IntUnaryOperator = Function::new(|x| x + 1);
    let g: IntUnaryOperator = Function::new(|x| x * 2);
    let h: IntUnaryOperator = Function::new(|x| x - 3);
    let left = f.and_then(g.clone()).and_then(h.clone());
    let right = f.and_then(g.and_then(h));
    for x in -20..20 {
        assert_eq!(left.apply(x), right.apply(x));
    }
    assert_eq!(left.apply(5), 9);
}

#[test]
fn test_float_keys() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let recip: DoubleUnaryOperator = Function::new(move |x: f64| {
        counter.fetch_add(1, Ordering::SeqCst);
        1.0 / x
    });
    let recip = recip.memoize();
    assert!(recip.apply(f64::NAN).is_nan());
    assert!(recip.apply(f64::NAN).is_nan());
    assert_eq!(recip.apply(0.0), f64::INFINITY);
    assert_eq!(recip.apply(-0.0), f64::NEG_INFINITY);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_specialised_wrappers() {
    let len: ToIntFunction<String> = Function::new(|s: String| s.len() as i32);
    let len = len.memoize();
    assert_eq!(len.apply("hello".to_string()), 5);
    assert_eq!(len.apply("hello".to_string()), 5);
    assert_eq!(len.cache_stats().unwrap().hits, 1);

    let answer: IntSupplier = primfn::Supplier::new(|| 42);
    let answer = answer.memoize();
    assert_eq!(answer.get(), 42);
    assert!(answer.memoize().ptr_eq(&answer));
}

#[test]
fn test_pipeline() {
    let pipeline: Pipeline<i64> = Pipeline::parse(&["add:3 mul:2", "neg"]).unwrap();
    assert_eq!(pipeline.to_string(), "add:3 | mul:2 | neg");
    assert_eq!(pipeline.eval(4).unwrap(), -14);

    let mut overflow: Pipeline<i64> = Pipeline::parse(&["mul:2"]).unwrap();
    overflow.memoize();
    assert!(matches!(overflow.eval(i64::MAX), Err(FnError::Arithmetic(_))));
    assert_eq!(overflow.eval(21).unwrap(), 42);
    assert_eq!(overflow.operator().cache_stats().unwrap().size, 1);

    let guarded: LongUnaryOperator = pipeline.operator().or_return(0);
    assert_eq!(guarded.apply(i64::MAX), 0);

    assert!(Pipeline::<i32>::parse(&["div"]).unwrap_err().is_invalid_argument());
    assert!(Pipeline::<f64>::parse::<&str>(&[]).unwrap_err().is_invalid_argument());
}
