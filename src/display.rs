use std::fmt;

use super::*;

impl fmt::Display for EvalErr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            EvalErr::StackOverflow => write!(f, "Stack overflow"),

            EvalErr::StackUnderflow => write!(f, "Stack underflow"),

            EvalErr::UnknownWord(_) => write!(f, "Unknown word"),

            EvalErr::NotCompiling => write!(f, "Not inside a definition"),

            EvalErr::LiteralInDefinition(_) => {
                write!(f, "Literal inside a definition")
            },

            EvalErr::InputRead(ref err) => write!(f, "Input read failed ({})", err),

            EvalErr::OutputWrite(ref err) => write!(f, "Output write failed ({})", err),
        }
    }
}

impl std::error::Error for EvalErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            EvalErr::InputRead(ref err) | EvalErr::OutputWrite(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.error)?;

        if let Some(ref token) = self.token {
            write!(f, ": {}", token)?;
        }

        Ok(())
    }
}

impl std::error::Error for Fault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            Kind::Primitive(primitive) => write!(f, "{} <{:?}>", self.name, primitive)?,

            Kind::Composite(ref body) => {
                write!(f, ": {} [{} words] ;", self.name, body.len())?
            },
        }

        if self.immediate {
            write!(f, " immediate")?;
        }

        Ok(())
    }
}

#[test]
fn fault_messages() {
    let cases = vec![
        (Fault { line: 1, token: Some("foo".into()), error: EvalErr::UnknownWord("foo".into()) },
         "1:Unknown word: foo"),
        (Fault { line: 4, token: Some("+".into()), error: EvalErr::StackUnderflow },
         "4:Stack underflow: +"),
        (Fault { line: 2, token: None, error: EvalErr::StackOverflow },
         "2:Stack overflow"),
    ];

    for (fault, expected) in cases {
        assert_eq!(fault.to_string(), expected);
    }
}

#[test]
fn word_descriptions() {
    let dict = Dictionary::bootstrap();
    let semicolon = dict.get(dict.lookup(";").unwrap());
    assert_eq!(semicolon.to_string(), "; <Semicolon> immediate");

    let mut dict = dict;
    let add = dict.lookup("+").unwrap();
    let id = dict.define_composite("double+", vec![add, add]);
    assert_eq!(dict.get(id).to_string(), ": double+ [2 words] ;");
}
