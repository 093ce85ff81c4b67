#![no_main]

use intrange::prelude::*;
use libfuzzer_sys::fuzz_target;
use strum::IntoEnumIterator;

/// Builds an 8-bit range from two fuzzer bytes; an inverted pair is Top.
fn range(w: BitWidth, lo: u8, hi: u8) -> Range {
    let (lo, hi) = (i128::from(lo as i8), i128::from(hi as i8));
    if lo <= hi {
        Range::bounded(lo, hi, w).unwrap()
    } else {
        Range::top(w)
    }
}

fuzz_target!(|data: [u8; 6]| {
    let w = BitWidth::new(8).unwrap();
    let x = range(w, data[0], data[1]);
    let y = range(w, data[2], data[3]);
    let (a, b) = (i128::from(data[4] as i8), i128::from(data[5] as i8));
    if !x.contains(a) || !y.contains(b) {
        return;
    }

    for op in BinaryOp::iter() {
        let result = apply(op, &x, &y).unwrap();
        if let Some(v) = op.evaluate(w, a, b) {
            assert!(result.contains(v), "{op} {x:?} {y:?}: {a}, {b}");
        }
    }

    for pred in CmpPredicate::iter() {
        if pred.evaluate(w, a, b) {
            let (nx, ny) = filter(pred, &x, GuardOperand::Var(&y)).unwrap();
            assert!(nx.contains(a) && ny.contains(b), "{pred} {x:?} {y:?}: {a}, {b}");
        }
    }
});
