use std::io::{self, BufRead, Write};

pub mod dictionary;
pub mod parser;
pub mod primitive;
pub mod stack;

mod display;

pub use dictionary::{Dictionary, Kind, Word, WordId};
pub use parser::{parse_literal, tokenize};
pub use primitive::Primitive;
pub use stack::{Stack, DEFAULT_CAPACITY};

#[derive(Debug)]
pub enum EvalErr {
    StackOverflow,
    StackUnderflow,
    UnknownWord(String),
    NotCompiling,
    LiteralInDefinition(String),
    InputRead(io::Error),
    OutputWrite(io::Error),
}

impl From<io::Error> for EvalErr {
    fn from(err: io::Error) -> Self {
        EvalErr::OutputWrite(err)
    }
}

/// A fatal error together with where it happened.
#[derive(Debug)]
pub struct Fault {
    /// 1-based input line.
    pub line: usize,
    /// The token being handled, if the fault came from one.
    pub token: Option<String>,
    pub error: EvalErr,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// An empty line or the end of the stream.
    EndOfInput,
    /// The `exit` word ran.
    Exit,
}

/// One interpreter session: a dictionary, an operand stack and somewhere to
/// print.
pub struct Shell<W: Write> {
    dict: Dictionary,
    data: Stack,
    code: Vec<WordId>,
    out: W,
    line: usize,
}

impl Shell<io::Stdout> {
    pub fn new() -> Self {
        Shell::with_output(io::stdout(), DEFAULT_CAPACITY)
    }
}

impl<W: Write> Shell<W> {
    pub fn with_output(out: W, capacity: usize) -> Self {
        Shell {
            dict: Dictionary::bootstrap(),
            data: Stack::with_capacity(capacity),
            code: Vec::with_capacity(32),
            out,
            line: 0,
        }
    }

    /// Reads lines until an empty one, the end of the stream, `exit`, or the
    /// first fault.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<Outcome, Fault> {
        let mut buf = Vec::with_capacity(128);

        loop {
            buf.clear();
            let read = input.read_until(b'\n', &mut buf).map_err(|err| Fault {
                line: self.line + 1,
                token: None,
                error: EvalErr::InputRead(err),
            })?;

            // Invalid UTF-8 never swallows a space, so tokens keep their
            // positions and a mangled one fails lookup on its own.
            let line = String::from_utf8_lossy(&buf);

            if read == 0 || parser::strip_newline(&line).is_empty() {
                tracing::debug!(line = self.line + 1, "end of input");
                return Ok(Outcome::EndOfInput);
            }

            if let Flow::Exit = self.interpret_line(&line)? {
                return Ok(Outcome::Exit);
            }
        }
    }

    /// Runs every token of one line, left to right.
    pub fn interpret_line(&mut self, line: &str) -> Result<Flow, Fault> {
        self.line += 1;

        for token in parser::tokenize(line) {
            let flow = self.interpret_token(token).map_err(|error| {
                tracing::error!(line = self.line, token, %error, "fault");
                Fault {
                    line: self.line,
                    token: Some(token.to_owned()),
                    error,
                }
            })?;

            if let Flow::Exit = flow {
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Continue)
    }

    fn interpret_token(&mut self, token: &str) -> Result<Flow, EvalErr> {
        if self.dict.is_compiling() {
            return match self.dict.compile(token)? {
                Some(immediate) => self.execute(immediate),
                None => Ok(Flow::Continue),
            };
        }

        if let Some(id) = self.dict.lookup(token) {
            return self.execute(id);
        }

        if let Some(value) = parser::parse_literal(token) {
            self.data.push(value)?;
            return Ok(Flow::Continue);
        }

        Err(EvalErr::UnknownWord(token.to_owned()))
    }

    /// Runs a word to completion. Composite bodies are expanded onto the
    /// pending list instead of recursing.
    pub fn execute(&mut self, id: WordId) -> Result<Flow, EvalErr> {
        self.code.clear();
        self.code.push(id);

        while let Some(id) = self.code.pop() {
            let word = self.dict.get(id);
            tracing::trace!(name = %word.name, depth = self.code.len(), "dispatch");

            let primitive = match word.kind {
                Kind::Composite(ref body) => {
                    self.code.extend(body.iter().rev());
                    continue;
                },

                Kind::Primitive(primitive) => primitive,
            };

            match primitive.execute(&mut self.dict, &mut self.data, &mut self.out) {
                Ok(Flow::Continue) => continue,

                Ok(Flow::Exit) => {
                    self.code.clear();
                    return Ok(Flow::Exit);
                },

                Err(err) => {
                    self.code.clear();
                    return Err(err);
                },
            }
        }

        Ok(Flow::Continue)
    }

    pub fn view(&self) -> &[i32] {
        self.data.as_slice()
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dict
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

#[cfg(test)]
fn shell() -> Shell<Vec<u8>> {
    Shell::with_output(Vec::new(), DEFAULT_CAPACITY)
}

#[test]
fn adds_and_prints() {
    let mut shell = shell();
    assert_eq!(shell.interpret_line("3 4 +\n").unwrap(), Flow::Continue);
    assert_eq!(shell.view(), &[7]);

    shell.interpret_line(".\n").unwrap();
    assert_eq!(shell.output().as_slice(), b"7 \n");
}

#[test]
fn subtracts_first_popped() {
    let mut shell = shell();
    shell.interpret_line("10 3 -").unwrap();
    assert_eq!(shell.view(), &[7]);
}

#[test]
fn composite_runs_in_order() {
    let mut shell = shell();
    let add = shell.dictionary().lookup("+").unwrap();
    let sub = shell.dictionary().lookup("-").unwrap();
    shell.dictionary_mut().define_composite("+-", vec![add, sub]);

    shell.interpret_line("5 2 3 +- ").unwrap();
    assert_eq!(shell.view(), &[0]);
}

#[test]
fn composite_is_fixed_at_definition() {
    let mut shell = shell();
    shell.interpret_line(": plus + ;").unwrap();
    shell.dictionary_mut().define_primitive("+", Primitive::Sub);

    shell.interpret_line("1 2 plus").unwrap();
    assert_eq!(shell.view(), &[3]);

    shell.interpret_line("1 +").unwrap();
    assert_eq!(shell.view(), &[2]);
}

#[test]
fn unknown_word_is_fatal() {
    let mut shell = shell();
    let fault = shell.interpret_line("1 foo 2").unwrap_err();

    assert_eq!(fault.line, 1);
    assert_eq!(fault.token.as_ref().map(String::as_str), Some("foo"));
    match fault.error {
        EvalErr::UnknownWord(ref name) if name == "foo" => (),
        ref other => panic!("expected unknown word, got {:?}", other),
    }
    assert_eq!(shell.view(), &[1]);
}

#[test]
fn overflow_on_push_past_capacity() {
    let mut shell = Shell::with_output(Vec::new(), 3);
    let fault = shell.interpret_line("1 2 3 4").unwrap_err();

    assert_eq!(fault.token.as_ref().map(String::as_str), Some("4"));
    match fault.error {
        EvalErr::StackOverflow => (),
        ref other => panic!("expected overflow, got {:?}", other),
    }
}

#[test]
fn exit_stops_the_line() {
    let mut shell = shell();
    assert_eq!(shell.interpret_line("1 exit 2").unwrap(), Flow::Exit);
    assert_eq!(shell.view(), &[1]);
    assert_eq!(shell.output().as_slice(), b"Exiting...\n");
}

#[test]
fn exit_inside_composite() {
    let mut shell = shell();
    shell.interpret_line(": bye . exit . ;").unwrap();
    assert_eq!(shell.interpret_line("9 bye").unwrap(), Flow::Exit);
    assert_eq!(shell.output().as_slice(), b"9 \nExiting...\n");
}

#[test]
fn definitions_span_lines() {
    let mut shell = shell();
    shell.interpret_line(": sum3").unwrap();
    shell.interpret_line("+ +").unwrap();
    shell.interpret_line(";").unwrap();

    shell.interpret_line("1 2 3 sum3").unwrap();
    assert_eq!(shell.view(), &[6]);
}

#[test]
fn run_stops_at_empty_line() {
    let mut shell = shell();
    let input = b"1 2 +\n\n3 .\n";

    assert_eq!(shell.run(&input[..]).unwrap(), Outcome::EndOfInput);
    assert_eq!(shell.view(), &[3]);
    assert!(shell.output().is_empty());
}

#[test]
fn run_stops_at_end_of_stream() {
    let mut shell = shell();
    assert_eq!(shell.run(&b"4 5 -"[..]).unwrap(), Outcome::EndOfInput);
    assert_eq!(shell.view(), &[-1]);
}

#[test]
fn run_reports_fault_line() {
    let mut shell = shell();
    let fault = shell.run(&b"1\n2\n+ + \n"[..]).unwrap_err();

    assert_eq!(fault.line, 3);
    assert_eq!(fault.to_string(), "3:Stack underflow: +");
}

#[test]
fn bad_bytes_fail_at_their_token() {
    let mut shell = shell();
    let fault = shell.run(&b"3 . \xff 4\n"[..]).unwrap_err();

    assert_eq!(shell.output().as_slice(), b"3 \n");
    assert_eq!(shell.view(), &[3]);
    assert_eq!(fault.token.as_ref().map(String::as_str), Some("\u{FFFD}"));
    match fault.error {
        EvalErr::UnknownWord(_) => (),
        ref other => panic!("expected unknown word, got {:?}", other),
    }
}

#[cfg(test)]
struct BrokenPipe;

#[cfg(test)]
impl io::Read for BrokenPipe {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }
}

#[test]
fn read_failure_is_fatal() {
    let mut shell = shell();
    shell.interpret_line("1 2").unwrap();

    let fault = shell.run(io::BufReader::new(BrokenPipe)).unwrap_err();
    assert_eq!(fault.line, 2);
    assert!(fault.token.is_none());
    match fault.error {
        EvalErr::InputRead(ref err) if err.kind() == io::ErrorKind::BrokenPipe => (),
        ref other => panic!("expected read failure, got {:?}", other),
    }
    assert_eq!(fault.to_string(), "2:Input read failed (pipe closed)");
}
