use std::io::Write;

use super::{EvalErr, Flow};
use super::dictionary::Dictionary;
use super::stack::Stack;

/// Built-in operations. Each one runs against the session's dictionary and
/// operand stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Add,
    Sub,
    PrintStack,
    NoOp,
    Exit,
    ListWords,
    Colon,
    Semicolon,
}

impl Primitive {
    /// Registration order; the last entry ends up newest in the dictionary.
    pub const ALL: &'static [Primitive] = &[
        Primitive::Add,
        Primitive::Sub,
        Primitive::PrintStack,
        Primitive::NoOp,
        Primitive::Exit,
        Primitive::ListWords,
        Primitive::Colon,
        Primitive::Semicolon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Add => "+",
            Primitive::Sub => "-",
            Primitive::PrintStack => ".",
            Primitive::NoOp => "",
            Primitive::Exit => "exit",
            Primitive::ListWords => "words",
            Primitive::Colon => ":",
            Primitive::Semicolon => ";",
        }
    }

    pub fn is_immediate(self) -> bool {
        self == Primitive::Semicolon
    }

    pub fn execute(
        self,
        dict: &mut Dictionary,
        stack: &mut Stack,
        out: &mut dyn Write,
    ) -> Result<Flow, EvalErr> {
        match self {
            Primitive::Add => int_binop(stack, |a, b| b.wrapping_add(a))?,

            // First popped is the subtrahend.
            Primitive::Sub => int_binop(stack, |a, b| b.wrapping_sub(a))?,

            Primitive::PrintStack => {
                for value in stack.peek_all() {
                    write!(out, "{} ", value)?;
                }
                writeln!(out)?;
            },

            Primitive::ListWords => {
                let names = dict.list_names().collect::<Vec<_>>();
                writeln!(out, "{}", names.join(" "))?;
            },

            Primitive::Exit => {
                writeln!(out, "Exiting...")?;
                return Ok(Flow::Exit);
            },

            Primitive::NoOp => (),

            Primitive::Colon => dict.begin_definition(),

            Primitive::Semicolon => {
                dict.end_definition()?;
            },
        }

        Ok(Flow::Continue)
    }
}

fn int_binop<F>(stack: &mut Stack, op: F) -> Result<(), EvalErr>
    where F: FnOnce(i32, i32) -> i32
{
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(op(a, b))
}

#[cfg(test)]
fn run(primitive: Primitive, values: &[i32]) -> (Result<Flow, EvalErr>, Stack, String) {
    let mut dict = Dictionary::bootstrap();
    let mut stack = Stack::new();
    for value in values {
        stack.push(*value).unwrap();
    }

    let mut out = Vec::new();
    let result = primitive.execute(&mut dict, &mut stack, &mut out);
    (result, stack, String::from_utf8(out).unwrap())
}

#[test]
fn subtraction_order() {
    let (result, stack, _) = run(Primitive::Sub, &[10, 3]);
    assert_eq!(result.unwrap(), Flow::Continue);
    assert_eq!(stack.as_slice(), &[7]);
}

#[test]
fn addition_wraps() {
    let (_, stack, _) = run(Primitive::Add, &[i32::MAX, 1]);
    assert_eq!(stack.as_slice(), &[i32::MIN]);
}

#[test]
fn addition_needs_two_operands() {
    match run(Primitive::Add, &[1]).0 {
        Err(EvalErr::StackUnderflow) => (),
        other => panic!("expected underflow, got {:?}", other),
    }
}

#[test]
fn print_stack_is_top_first() {
    let (_, stack, out) = run(Primitive::PrintStack, &[1, 2, 3]);
    assert_eq!(out, "3 2 1 \n");
    assert_eq!(stack.len(), 3);
}

#[test]
fn print_empty_stack() {
    assert_eq!(run(Primitive::PrintStack, &[]).2, "\n");
}

#[test]
fn list_words_newest_first() {
    let (_, _, out) = run(Primitive::ListWords, &[]);
    assert_eq!(out, "; : words exit  . - +\n");
}

#[test]
fn exit_says_goodbye() {
    let (result, _, out) = run(Primitive::Exit, &[5]);
    assert_eq!(result.unwrap(), Flow::Exit);
    assert_eq!(out, "Exiting...\n");
}

#[test]
fn only_semicolon_is_immediate() {
    let immediate = Primitive::ALL.iter()
        .filter(|primitive| primitive.is_immediate())
        .collect::<Vec<_>>();

    assert_eq!(immediate, vec![&Primitive::Semicolon]);
}
