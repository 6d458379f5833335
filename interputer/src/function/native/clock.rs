//! Nanosecond monotonic clock, grounded on the teacher's
//! `function/native/clock.rs` `ClockFunction` — reworked from a wall-clock
//! `SystemTime` read returning seconds as `f64` to a monotonic `Instant`
//! read returning nanoseconds as `i64`, matching SPEC_FULL.md §6.

use std::time::Instant;

use crate::function::Builtin;
use crate::interpreter::Interpreter;
use crate::value::LoxValue;

pub fn register(interpreter: &mut Interpreter) {
  let start = Instant::now();
  interpreter.register_builtin(Builtin::new("clock", Some(0), move |_args| {
    LoxValue::Integer(start.elapsed().as_nanos() as i64)
  }));
}
