use crate::function::Builtin;
use crate::interpreter::Interpreter;
use crate::value::LoxValue;

/// `print(...)`/`println(...)` — variadic, space-separated, writing to
/// stdout. Both return `Null`.
pub fn register(interpreter: &mut Interpreter) {
  interpreter.register_builtin(Builtin::new("print", None, |args| {
    print!("{}", render(args));
    LoxValue::Null
  }));
  interpreter.register_builtin(Builtin::new("println", None, |args| {
    println!("{}", render(args));
    LoxValue::Null
  }));
}

fn render(args: &[LoxValue]) -> String {
  args.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
}
