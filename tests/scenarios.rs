//! End-to-end scenarios through the public API.
//!
//! These tests exercise the domain the way a value-range analyzer drives it:
//! 1. Seed ranges from constants and unconstrained values
//! 2. Evaluate instructions with the transfer functions
//! 3. Narrow operands along taken branches
//! 4. Merge control-flow paths with join

use intrange::prelude::*;

fn w8() -> BitWidth {
    BitWidth::new(8).unwrap()
}

fn r8(lb: i128, ub: i128) -> Range {
    Range::bounded(lb, ub, w8()).unwrap()
}

#[test]
fn test_join_of_two_constants() -> Result<()> {
    let a = r8(5, 5);
    let b = r8(10, 10);
    let joined = a.join(&b)?;
    assert_eq!(joined.bounds(), Some((5, 10)));
    assert_eq!(joined.to_string(), "[5, 10]");
    Ok(())
}

#[test]
fn test_add_overflow_is_top() -> Result<()> {
    let result = apply_checked(BinaryOp::Add, &r8(120, 125), &Range::constant(10, w8()))?;
    assert!(result.overflow);
    assert!(result.range.is_top());
    Ok(())
}

#[test]
fn test_guard_keeps_operands_already_below() -> Result<()> {
    let a = r8(-5, -1);
    let (narrowed_a, narrowed_c) = filter(CmpPredicate::Sle, &a, GuardOperand::Var(&r8(0, 0)))?;
    assert_eq!(narrowed_a.bounds(), Some((-5, -1)));
    assert_eq!(narrowed_c.bounds(), Some((0, 0)));

    // Same guard with a literal operand
    let (narrowed_a, constant) = filter(CmpPredicate::Sle, &a, GuardOperand::Const(0))?;
    assert_eq!(narrowed_a, a);
    assert_eq!(constant.as_constant(), Some(0));
    Ok(())
}

#[test]
fn test_top_operand_short_circuits_arithmetic() -> Result<()> {
    let top = Range::top(w8());
    let one = r8(1, 1);
    for op in [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::SDiv,
        BinaryOp::UDiv,
        BinaryOp::SRem,
        BinaryOp::URem,
    ] {
        let result = apply_checked(op, &top, &one)?;
        assert!(result.range.is_top(), "{op}");
        assert!(!result.overflow, "{op}");
        assert!(apply(op, &one, &top)?.is_top(), "{op}");
    }
    Ok(())
}

#[test]
fn test_truncation_of_wide_span_is_top() -> Result<()> {
    let w16 = BitWidth::new(16)?;
    let wide = Range::bounded(1000, 2000, w16)?;
    let narrowed = apply_cast(CastKind::Trunc, &wide, w8(), None)?;
    assert!(narrowed.is_top());
    Ok(())
}

#[test]
fn test_counting_loop_with_guard_and_widening() -> Result<()> {
    // i = 0; while (i < 100) { i = i + 1 }
    let w32 = BitWidth::new(32)?;
    let config = RangeConfig::default();
    let landmarks: LandmarkSet = [(0, w32), (1, w32), (100, w32)].into_iter().collect();
    let one = Range::constant(1, w32);

    let entry = Range::constant(0, w32);
    let mut head = entry;
    let mut iteration = 0;
    loop {
        let (body, _) = filter(CmpPredicate::Slt, &head, GuardOperand::Const(100))?;
        let next = apply(BinaryOp::Add, &body, &one)?;
        let merged = entry.join(&next)?;
        let widened = config.widen(&merged, &head, &landmarks, iteration)?;
        if widened.is_identical(&head) {
            break;
        }
        head = widened;
        iteration += 1;
        assert!(iteration < 10, "loop head did not stabilise: {head:?}");
    }
    assert_eq!(head.bounds(), Some((0, 100)));

    // Exit edge: !(i < 100)
    let (exit, _) = filter(CmpPredicate::Sge, &head, GuardOperand::Const(100))?;
    assert_eq!(exit.as_constant(), Some(100));
    Ok(())
}

#[test]
fn test_masking_and_unsigned_guard() -> Result<()> {
    let w32 = BitWidth::new(32)?;
    let x = Range::top(w32);

    // Masking an unknown value gives a small non-negative range
    let low = apply(BinaryOp::And, &Range::full(w32), &Range::constant(0xff, w32))?;
    assert_eq!(low.bounds(), Some((0, 255)));

    // `x <u 10` rules out every negative value
    let (bounded, _) = filter(CmpPredicate::Ult, &x, GuardOperand::Const(10))?;
    assert_eq!(bounded.bounds(), Some((0, 9)));

    // Zero extension of a bounded byte
    let byte = apply_cast(CastKind::Trunc, &bounded, w8(), None)?;
    let widened = apply_cast(CastKind::extension(false), &byte, w32, None)?;
    assert_eq!(widened.bounds(), Some((0, 9)));
    Ok(())
}

#[test]
fn test_compare_decides_branches() -> Result<()> {
    let x = r8(0, 5);
    assert_eq!(x.compare(CmpPredicate::Slt, &r8(6, 9))?, TBool::True);
    assert_eq!(x.compare(CmpPredicate::Sgt, &r8(6, 9))?, TBool::False);
    assert_eq!(x.compare(CmpPredicate::Eq, &r8(3, 9))?, TBool::Unknown);

    let verdict = x.compare(CmpPredicate::Ne, &r8(7, 7))?;
    let flag = Range::from_tbool(verdict, w8(), Signedness::Signed)?;
    assert_eq!(flag.as_constant(), Some(1));
    Ok(())
}

#[test]
fn test_width_mismatch_is_reported() {
    let w16 = BitWidth::new(16).unwrap();
    let result = apply(BinaryOp::Add, &r8(0, 1), &Range::top(w16));
    assert_eq!(
        result,
        Err(Error::WidthMismatch {
            expected: 8,
            found: 16
        })
    );
}
