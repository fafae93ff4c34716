//! Binary and unary operations used by the expression reader.
//!
//! Binary operators fall into two fixed groups. The grouping is carried by
//! [`BinaryOp`] itself rather than by the numeric order of operation codes.
//! All angles going in or coming out are in degrees.

use serde::{Deserialize, Serialize};

use crate::runtime::error::{InterpError, InterpResult};

/// Tolerance used for floating equality and inequality.
pub const TOLERANCE_EQUAL: f64 = 0.0001;

/// Operators in the multiplicative group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MulOp {
    /// `/`
    DividedBy,
    /// `MOD`
    Modulo,
    /// `**`
    Power,
    /// `*`
    Times,
}

/// Operators in the additive, logical and comparison group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddOp {
    /// `AND`
    And,
    /// `XOR`
    ExclusiveOr,
    /// `OR`
    NonExclusiveOr,
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `LT`
    Lt,
    /// `EQ`
    Eq,
    /// `NE`
    Ne,
    /// `LE`
    Le,
    /// `GE`
    Ge,
    /// `GT`
    Gt,
}

/// A binary operator, tagged with its dispatch group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Divide, modulo, power, multiply
    Multiplicative(MulOp),
    /// Logic, add/subtract, comparisons
    Additive(AddOp),
}

impl BinaryOp {
    /// Decode a numeric operation code from the expression reader.
    pub fn from_code(code: u8) -> InterpResult<Self> {
        use BinaryOp::{Additive, Multiplicative};
        Ok(match code {
            1 => Multiplicative(MulOp::DividedBy),
            2 => Multiplicative(MulOp::Modulo),
            3 => Multiplicative(MulOp::Power),
            4 => Multiplicative(MulOp::Times),
            5 => Additive(AddOp::And),
            6 => Additive(AddOp::ExclusiveOr),
            7 => Additive(AddOp::Minus),
            8 => Additive(AddOp::NonExclusiveOr),
            9 => Additive(AddOp::Plus),
            11 => Additive(AddOp::Lt),
            12 => Additive(AddOp::Eq),
            13 => Additive(AddOp::Ne),
            14 => Additive(AddOp::Le),
            15 => Additive(AddOp::Ge),
            16 => Additive(AddOp::Gt),
            // 10 is the closing bracket, never an operator
            _ => return Err(InterpError::UnknownOperation { code }),
        })
    }
}

/// A unary function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `ABS`
    Abs,
    /// `ACOS`, result in degrees
    Acos,
    /// `ASIN`, result in degrees
    Asin,
    /// `COS`, argument in degrees
    Cos,
    /// `EXISTS`; the reader supplies the value before evaluation
    Exists,
    /// `EXP`
    Exp,
    /// `FIX` (floor)
    Fix,
    /// `FUP` (ceiling)
    Fup,
    /// `LN`
    Ln,
    /// `ROUND`, half away from zero
    Round,
    /// `SIN`, argument in degrees
    Sin,
    /// `SQRT`
    Sqrt,
    /// `TAN`, argument in degrees
    Tan,
}

impl UnaryOp {
    /// Decode a numeric operation code from the expression reader.
    pub fn from_code(code: u8) -> InterpResult<Self> {
        Ok(match code {
            1 => UnaryOp::Abs,
            2 => UnaryOp::Acos,
            3 => UnaryOp::Asin,
            5 => UnaryOp::Cos,
            6 => UnaryOp::Exp,
            7 => UnaryOp::Fix,
            8 => UnaryOp::Fup,
            9 => UnaryOp::Ln,
            10 => UnaryOp::Round,
            11 => UnaryOp::Sin,
            12 => UnaryOp::Sqrt,
            13 => UnaryOp::Tan,
            14 => UnaryOp::Exists,
            // 4 is ATAN, which takes two operands and is read elsewhere
            _ => return Err(InterpError::UnknownOperation { code }),
        })
    }
}

/// Apply `op` to `left` and `right`, returning the new left operand.
pub fn evaluate_binary(left: f64, op: BinaryOp, right: f64) -> InterpResult<f64> {
    match op {
        BinaryOp::Multiplicative(op) => evaluate_multiplicative(left, op, right),
        BinaryOp::Additive(op) => Ok(evaluate_additive(left, op, right)),
    }
}

/// Decode `code` and apply it. Unknown codes are a bug in the reader.
pub fn evaluate_binary_code(left: f64, code: u8, right: f64) -> InterpResult<f64> {
    evaluate_binary(left, BinaryOp::from_code(code)?, right)
}

fn evaluate_multiplicative(left: f64, op: MulOp, right: f64) -> InterpResult<f64> {
    match op {
        MulOp::DividedBy => {
            if right == 0.0 {
                return Err(InterpError::DivideByZero);
            }
            Ok(left / right)
        }
        MulOp::Modulo => {
            // always non-negative; a tiny negative remainder can round up to |right|
            let rem = left % right;
            Ok(if rem < 0.0 { rem + right.abs() } else { rem })
        }
        MulOp::Power => {
            if left < 0.0 && right.floor() != right {
                return Err(InterpError::NegativeToNonIntegerPower);
            }
            Ok(left.powf(right))
        }
        MulOp::Times => Ok(left * right),
    }
}

fn evaluate_additive(left: f64, op: AddOp, right: f64) -> f64 {
    // Any non-zero operand counts as true; only exactly 0.0 is false.
    let truth = |flag: bool| if flag { 1.0 } else { 0.0 };
    match op {
        AddOp::And => truth(left != 0.0 && right != 0.0),
        AddOp::ExclusiveOr => truth((left == 0.0) != (right == 0.0)),
        AddOp::NonExclusiveOr => truth(left != 0.0 || right != 0.0),
        AddOp::Minus => left - right,
        AddOp::Plus => left + right,
        AddOp::Lt => truth(left < right),
        AddOp::Eq => truth((left - right).abs() < TOLERANCE_EQUAL),
        AddOp::Ne => truth((left - right).abs() >= TOLERANCE_EQUAL),
        AddOp::Le => truth(left <= right),
        AddOp::Ge => truth(left >= right),
        AddOp::Gt => truth(left > right),
    }
}

/// Apply `op` to `value`.
pub fn evaluate_unary(value: f64, op: UnaryOp) -> InterpResult<f64> {
    match op {
        UnaryOp::Abs => Ok(value.abs()),
        UnaryOp::Acos => {
            // NaN is outside the range too
            if !(-1.0..=1.0).contains(&value) {
                return Err(InterpError::AcosOutOfRange);
            }
            Ok(value.acos().to_degrees())
        }
        UnaryOp::Asin => {
            if !(-1.0..=1.0).contains(&value) {
                return Err(InterpError::AsinOutOfRange);
            }
            Ok(value.asin().to_degrees())
        }
        UnaryOp::Cos => Ok(value.to_radians().cos()),
        UnaryOp::Exists => Ok(value),
        UnaryOp::Exp => Ok(value.exp()),
        UnaryOp::Fix => Ok(value.floor()),
        UnaryOp::Fup => Ok(value.ceil()),
        UnaryOp::Ln => {
            if value <= 0.0 {
                return Err(InterpError::LnOfNonPositive);
            }
            Ok(value.ln())
        }
        UnaryOp::Round => {
            let bias = if value < 0.0 { -0.5 } else { 0.5 };
            Ok((value + bias).trunc())
        }
        UnaryOp::Sin => Ok(value.to_radians().sin()),
        UnaryOp::Sqrt => {
            if value < 0.0 {
                return Err(InterpError::SqrtOfNegative);
            }
            Ok(value.sqrt())
        }
        UnaryOp::Tan => Ok(value.to_radians().tan()),
    }
}

/// Decode `code` and apply it. Unknown codes are a bug in the reader.
pub fn evaluate_unary_code(value: f64, code: u8) -> InterpResult<f64> {
    evaluate_unary(value, UnaryOp::from_code(code)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(left: f64, op: BinaryOp, right: f64) -> f64 {
        evaluate_binary(left, op, right).unwrap()
    }

    fn approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() <= 1e-9, "expected {b}, got {a}");
    }

    #[test]
    fn codes_land_in_their_groups() {
        for code in 1..=4 {
            assert!(matches!(
                BinaryOp::from_code(code).unwrap(),
                BinaryOp::Multiplicative(_)
            ));
        }
        for code in (5..=9).chain(11..=16) {
            assert!(matches!(
                BinaryOp::from_code(code).unwrap(),
                BinaryOp::Additive(_)
            ));
        }
    }

    #[test]
    fn non_operator_codes_are_bugs() {
        for code in [0, 10, 17, 255] {
            assert_eq!(
                BinaryOp::from_code(code),
                Err(InterpError::UnknownOperation { code })
            );
        }
        for code in [0, 4, 15] {
            assert_eq!(
                UnaryOp::from_code(code),
                Err(InterpError::UnknownOperation { code })
            );
        }
        assert_eq!(
            evaluate_binary_code(1.0, 10, 2.0),
            Err(InterpError::UnknownOperation { code: 10 })
        );
        assert_eq!(
            evaluate_unary_code(1.0, 4),
            Err(InterpError::UnknownOperation { code: 4 })
        );
    }

    #[test]
    fn divide_by_exact_zero_fails() {
        let div = BinaryOp::Multiplicative(MulOp::DividedBy);
        assert_eq!(evaluate_binary(1.0, div, 0.0), Err(InterpError::DivideByZero));
        assert_eq!(evaluate_binary(-1.0, div, -0.0), Err(InterpError::DivideByZero));
        assert_eq!(bin(6.0, div, -3.0), -2.0);
    }

    #[test]
    fn modulo_is_never_negative() {
        let modulo = BinaryOp::Multiplicative(MulOp::Modulo);
        approx_eq(bin(7.0, modulo, 3.0), 1.0);
        approx_eq(bin(-7.0, modulo, 3.0), 2.0);
        approx_eq(bin(-7.0, modulo, -3.0), 2.0);
        approx_eq(bin(7.0, modulo, -3.0), 1.0);
    }

    #[test]
    fn modulo_of_tiny_negative_rounds_up_to_divisor() {
        // The remainder is -1e-20; adding |right| rounds to exactly 3.0.
        let modulo = BinaryOp::Multiplicative(MulOp::Modulo);
        assert_eq!(evaluate_binary(-1e-20, modulo, 3.0), Ok(3.0));
        assert_eq!(evaluate_binary(-1e-20, modulo, -3.0), Ok(3.0));
    }

    #[test]
    fn power_rejects_negative_base_with_fraction() {
        let pow = BinaryOp::Multiplicative(MulOp::Power);
        assert_eq!(
            evaluate_binary(-8.0, pow, 1.0 / 3.0),
            Err(InterpError::NegativeToNonIntegerPower)
        );
        approx_eq(bin(-2.0, pow, 3.0), -8.0);
        approx_eq(bin(2.0, pow, 0.5), 2f64.sqrt());
    }

    #[test]
    fn logic_treats_only_zero_as_false() {
        let and = BinaryOp::Additive(AddOp::And);
        let xor = BinaryOp::Additive(AddOp::ExclusiveOr);
        let or = BinaryOp::Additive(AddOp::NonExclusiveOr);
        assert_eq!(bin(0.5, and, -3.0), 1.0);
        assert_eq!(bin(0.0, and, 1.0), 0.0);
        assert_eq!(bin(0.0, xor, 2.0), 1.0);
        assert_eq!(bin(2.0, xor, 2.0), 0.0);
        assert_eq!(bin(0.0, xor, 0.0), 0.0);
        assert_eq!(bin(0.0, or, 0.0), 0.0);
        assert_eq!(bin(0.0, or, 1e-12), 1.0);
    }

    #[test]
    fn equality_uses_tolerance() {
        let eq = BinaryOp::Additive(AddOp::Eq);
        let ne = BinaryOp::Additive(AddOp::Ne);
        assert_eq!(bin(1.0, eq, 1.00005), 1.0);
        assert_eq!(bin(1.0, ne, 1.00005), 0.0);
        assert_eq!(bin(1.0, eq, 1.0002), 0.0);
        assert_eq!(bin(1.0, ne, 1.0002), 1.0);
    }

    #[test]
    fn comparisons_are_direct() {
        assert_eq!(bin(1.0, BinaryOp::Additive(AddOp::Lt), 1.00001), 1.0);
        assert_eq!(bin(1.0, BinaryOp::Additive(AddOp::Le), 1.0), 1.0);
        assert_eq!(bin(1.0, BinaryOp::Additive(AddOp::Gt), 1.0), 0.0);
        assert_eq!(bin(1.0, BinaryOp::Additive(AddOp::Ge), 1.0), 1.0);
    }

    #[test]
    fn trig_works_in_degrees() {
        approx_eq(evaluate_unary(90.0, UnaryOp::Sin).unwrap(), 1.0);
        approx_eq(evaluate_unary(180.0, UnaryOp::Cos).unwrap(), -1.0);
        approx_eq(evaluate_unary(45.0, UnaryOp::Tan).unwrap(), 1.0);
        approx_eq(evaluate_unary(0.5, UnaryOp::Asin).unwrap(), 30.0);
        approx_eq(evaluate_unary(0.5, UnaryOp::Acos).unwrap(), 60.0);
    }

    #[test]
    fn inverse_trig_rejects_out_of_range() {
        assert_eq!(
            evaluate_unary(1.0001, UnaryOp::Acos),
            Err(InterpError::AcosOutOfRange)
        );
        assert_eq!(
            evaluate_unary(-1.0001, UnaryOp::Asin),
            Err(InterpError::AsinOutOfRange)
        );
        approx_eq(evaluate_unary(-1.0, UnaryOp::Acos).unwrap(), 180.0);
    }

    #[test]
    fn inverse_trig_rejects_nan() {
        assert_eq!(
            evaluate_unary(f64::NAN, UnaryOp::Acos),
            Err(InterpError::AcosOutOfRange)
        );
        assert_eq!(
            evaluate_unary(f64::NAN, UnaryOp::Asin),
            Err(InterpError::AsinOutOfRange)
        );
    }

    #[test]
    fn round_goes_half_away_from_zero() {
        assert_eq!(evaluate_unary(2.5, UnaryOp::Round).unwrap(), 3.0);
        assert_eq!(evaluate_unary(-2.5, UnaryOp::Round).unwrap(), -3.0);
        assert_eq!(evaluate_unary(2.49, UnaryOp::Round).unwrap(), 2.0);
        assert_eq!(evaluate_unary(-0.4, UnaryOp::Round).unwrap(), 0.0);
    }

    #[test]
    fn fix_and_fup() {
        assert_eq!(evaluate_unary(-1.5, UnaryOp::Fix).unwrap(), -2.0);
        assert_eq!(evaluate_unary(-1.5, UnaryOp::Fup).unwrap(), -1.0);
    }

    #[test]
    fn ln_and_sqrt_domains() {
        assert_eq!(evaluate_unary(0.0, UnaryOp::Ln), Err(InterpError::LnOfNonPositive));
        assert_eq!(evaluate_unary(-1.0, UnaryOp::Sqrt), Err(InterpError::SqrtOfNegative));
        assert_eq!(evaluate_unary(0.0, UnaryOp::Sqrt).unwrap(), 0.0);
        approx_eq(evaluate_unary(std::f64::consts::E, UnaryOp::Ln).unwrap(), 1.0);
    }

    #[test]
    fn exists_passes_value_through() {
        assert_eq!(evaluate_unary(1.0, UnaryOp::Exists).unwrap(), 1.0);
        assert_eq!(evaluate_unary(0.0, UnaryOp::Exists).unwrap(), 0.0);
    }
}
