//! `math`: native numeric routines
//!
//! Every routine here is a builtin: its parameters are only described by a
//! text signature. `log` has none, so it cannot be exposed as a tool.

use serde_json::{json, Value};

use super::{check_arity, invalid, number_arg};
use crate::library::Library;
use crate::types::{CallError, CallResult, Callable};

/// Convert a float result, rejecting NaN and infinities
fn float_result(op: &str, value: f64) -> CallResult<Value> {
    if value.is_nan() {
        return Err(CallError::Domain(op.to_string()));
    }
    if value.is_infinite() {
        return Err(CallError::Overflow(op.to_string()));
    }
    Ok(json!(value))
}

fn integral_result(op: &str, value: f64) -> CallResult<Value> {
    if value.is_nan() {
        return Err(CallError::Domain(op.to_string()));
    }
    if value.is_infinite() || value < i64::MIN as f64 || value > i64::MAX as f64 {
        return Err(CallError::Overflow(op.to_string()));
    }
    Ok(json!(value as i64))
}

fn unary(name: &'static str, doc: &str, op: fn(f64) -> f64) -> Callable {
    Callable::builtin(name, Some("($module, x, /)"), move |args: &[Value]| {
        check_arity(args, 1, 1)?;
        float_result(name, op(number_arg(args, 0, "x")?))
    })
    .with_doc(doc)
}

fn rounding(name: &'static str, doc: &str, op: fn(f64) -> f64) -> Callable {
    Callable::builtin(name, Some("($module, x, /)"), move |args: &[Value]| {
        check_arity(args, 1, 1)?;
        integral_result(name, op(number_arg(args, 0, "x")?))
    })
    .with_doc(doc)
}

fn positive_log(name: &'static str, doc: &str, op: fn(f64) -> f64) -> Callable {
    Callable::builtin(name, Some("($module, x, /)"), move |args: &[Value]| {
        check_arity(args, 1, 1)?;
        let x = number_arg(args, 0, "x")?;
        if x <= 0.0 {
            return Err(CallError::Domain(name.to_string()));
        }
        float_result(name, op(x))
    })
    .with_doc(doc)
}

fn sqrt() -> Callable {
    Callable::builtin("sqrt", Some("($module, x, /)"), |args: &[Value]| {
        check_arity(args, 1, 1)?;
        let x = number_arg(args, 0, "x")?;
        if x < 0.0 {
            return Err(CallError::Domain("sqrt".to_string()));
        }
        float_result("sqrt", x.sqrt())
    })
    .with_doc("Return the square root of x.")
}

fn pow() -> Callable {
    Callable::builtin("pow", Some("($module, x, y, /)"), |args: &[Value]| {
        check_arity(args, 2, 2)?;
        let x = number_arg(args, 0, "x")?;
        let y = number_arg(args, 1, "y")?;
        float_result("pow", x.powf(y))
    })
    .with_doc("Return x**y (x to the power of y).")
}

fn atan2() -> Callable {
    Callable::builtin("atan2", Some("($module, y, x, /)"), |args: &[Value]| {
        check_arity(args, 2, 2)?;
        let y = number_arg(args, 0, "y")?;
        let x = number_arg(args, 1, "x")?;
        float_result("atan2", y.atan2(x))
    })
    .with_doc("Return the arc tangent (measured in radians) of y/x.\n\nUnlike atan(y/x), the signs of both x and y are considered.")
}

fn hypot() -> Callable {
    Callable::builtin("hypot", Some("($module, *coordinates)"), |args: &[Value]| {
        let mut sum = 0.0;
        for index in 0..args.len() {
            let c = number_arg(args, index, "coordinates")?;
            sum += c * c;
        }
        float_result("hypot", sum.sqrt())
    })
    .with_doc("Multidimensional Euclidean distance from the origin to a point.")
}

/// `log(x, [base=math.e])` has no machine-readable signature
fn log() -> Callable {
    Callable::builtin("log", None, |args: &[Value]| {
        check_arity(args, 1, 2)?;
        let x = number_arg(args, 0, "x")?;
        if x <= 0.0 {
            return Err(CallError::Domain("log".to_string()));
        }
        match args.get(1) {
            None => float_result("log", x.ln()),
            Some(base) => {
                let base = base.as_f64().ok_or_else(|| invalid("base", "number"))?;
                if base <= 0.0 || base == 1.0 {
                    return Err(CallError::Domain("log".to_string()));
                }
                float_result("log", x.ln() / base.ln())
            }
        }
    })
    .with_doc("log(x, [base=math.e])\nReturn the logarithm of x to the given base.\n\nIf the base is not specified, returns the natural logarithm (base e) of x.")
}

pub(super) fn library() -> Library {
    Library::new("math")
        .with_doc("This module provides access to the mathematical functions.")
        .with_routine(sqrt())
        .with_routine(pow())
        .with_routine(atan2())
        .with_routine(hypot())
        .with_routine(log())
        .with_routine(unary("exp", "Return e raised to the power of x.", f64::exp))
        .with_routine(unary("fabs", "Return the absolute value of the float x.", f64::abs))
        .with_routine(unary("sin", "Return the sine of x (measured in radians).", f64::sin))
        .with_routine(unary("cos", "Return the cosine of x (measured in radians).", f64::cos))
        .with_routine(unary("tan", "Return the tangent of x (measured in radians).", f64::tan))
        .with_routine(unary("degrees", "Convert angle x from radians to degrees.", f64::to_degrees))
        .with_routine(unary("radians", "Convert angle x from degrees to radians.", f64::to_radians))
        .with_routine(rounding("floor", "Return the floor of x as an Integral.", f64::floor))
        .with_routine(rounding("ceil", "Return the ceiling of x as an Integral.", f64::ceil))
        .with_routine(rounding("trunc", "Truncates the Real x to the nearest Integral toward 0.", f64::trunc))
        .with_routine(positive_log("log10", "Return the base 10 logarithm of x.", f64::log10))
        .with_routine(positive_log("log2", "Return the base 2 logarithm of x.", f64::log2))
        .with_constant("pi", json!(std::f64::consts::PI))
        .with_constant("e", json!(std::f64::consts::E))
        .with_constant("tau", json!(std::f64::consts::TAU))
        // JSON has no infinity or NaN; keep the names resolvable as text.
        .with_constant("inf", json!("inf"))
        .with_constant("nan", json!("nan"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Member;

    fn routine(lib: &Library, name: &str) -> Callable {
        match lib.get(name) {
            Some(Member::Routine(c)) => c.clone(),
            other => panic!("{} is not a routine: {:?}", name, other),
        }
    }

    #[test]
    fn test_sqrt() {
        let lib = library();
        let sqrt = routine(&lib, "sqrt");
        assert_eq!(sqrt.call(&[json!(4.0)]).unwrap(), json!(2.0));
        assert_eq!(sqrt.call(&[json!(-1.0)]), Err(CallError::Domain("sqrt".to_string())));
    }

    #[test]
    fn test_rounding_returns_integers() {
        let lib = library();
        assert_eq!(routine(&lib, "floor").call(&[json!(2.7)]).unwrap(), json!(2));
        assert_eq!(routine(&lib, "ceil").call(&[json!(2.1)]).unwrap(), json!(3));
        assert_eq!(routine(&lib, "trunc").call(&[json!(-2.7)]).unwrap(), json!(-2));
    }

    #[test]
    fn test_overflow_and_domain() {
        let lib = library();
        assert!(matches!(
            routine(&lib, "exp").call(&[json!(1000.0)]),
            Err(CallError::Overflow(_))
        ));
        assert!(matches!(
            routine(&lib, "log10").call(&[json!(0.0)]),
            Err(CallError::Domain(_))
        ));
    }

    #[test]
    fn test_log_with_and_without_base() {
        let lib = library();
        let log = routine(&lib, "log");
        assert!(matches!(log.kind(), crate::types::CallableKind::Builtin { text_signature: None }));
        assert_eq!(log.call(&[json!(8.0), json!(2.0)]).unwrap(), json!(3.0));
        assert_eq!(log.call(&[json!(1.0)]).unwrap(), json!(0.0));
    }

    #[test]
    fn test_hypot_variadic() {
        let lib = library();
        assert_eq!(routine(&lib, "hypot").call(&[json!(3), json!(4)]).unwrap(), json!(5.0));
        assert_eq!(routine(&lib, "hypot").call(&[]).unwrap(), json!(0.0));
    }

    #[test]
    fn test_constants_are_not_routines() {
        let lib = library();
        let names = lib.routine_names();
        assert!(!names.contains(&"pi".to_string()));
        assert!(names.contains(&"sqrt".to_string()));
        assert!(names.contains(&"log".to_string()));
    }
}
