use ordermap::OrderMap;

use super::EvalErr;
use super::primitive::Primitive;

/// Index of a word in the dictionary arena. Stable for the whole session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WordId(usize);

#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    Primitive(Primitive),
    Composite(Vec<WordId>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Word {
    pub name: String,
    pub immediate: bool,
    pub kind: Kind,
}

#[derive(Clone, Debug, PartialEq)]
enum Definition {
    AwaitingName,
    Body { name: String, body: Vec<WordId> },
}

/// Append-only word list. Newer entries shadow older ones with the same name.
#[derive(Clone, Debug)]
pub struct Dictionary {
    words: Vec<Word>,
    latest: OrderMap<String, WordId>,
    definition: Option<Definition>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary {
            words: Vec::with_capacity(16),
            latest: OrderMap::new(),
            definition: None,
        }
    }

    /// A dictionary holding every built-in word.
    pub fn bootstrap() -> Self {
        let mut dict = Dictionary::new();

        for &primitive in Primitive::ALL {
            dict.define_primitive(primitive.name(), primitive);
        }

        dict
    }

    pub fn define_primitive(&mut self, name: &str, primitive: Primitive) -> WordId {
        self.define(Word {
            name: name.to_owned(),
            immediate: primitive.is_immediate(),
            kind: Kind::Primitive(primitive),
        })
    }

    pub fn define_composite(&mut self, name: &str, body: Vec<WordId>) -> WordId {
        self.define(Word {
            name: name.to_owned(),
            immediate: false,
            kind: Kind::Composite(body),
        })
    }

    fn define(&mut self, word: Word) -> WordId {
        let id = WordId(self.words.len());
        tracing::debug!(id = id.0, word = %word, "defined");

        self.latest.insert(word.name.clone(), id);
        self.words.push(word);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<WordId> {
        self.latest.get(name).copied()
    }

    pub fn get(&self, id: WordId) -> &Word {
        &self.words[id.0]
    }

    /// Every defined name, newest first, shadowed entries included.
    pub fn list_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().rev().map(|word| word.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_compiling(&self) -> bool {
        self.definition.is_some()
    }

    pub fn begin_definition(&mut self) {
        self.definition = Some(Definition::AwaitingName);
    }

    /// Feeds one token to the definition in progress. Returns `Some(id)` when
    /// the token named an immediate word the caller must run instead.
    pub fn compile(&mut self, token: &str) -> Result<Option<WordId>, EvalErr> {
        let found = self.lookup(token);

        match self.definition {
            Some(Definition::AwaitingName) => {
                self.definition = Some(Definition::Body {
                    name: token.to_owned(),
                    body: Vec::with_capacity(8),
                });
                Ok(None)
            },

            Some(Definition::Body { ref mut body, .. }) => match found {
                Some(id) if self.words[id.0].immediate => Ok(Some(id)),

                Some(id) => {
                    body.push(id);
                    Ok(None)
                },

                None if token.starts_with(|ch: char| ch.is_ascii_digit()) => {
                    Err(EvalErr::LiteralInDefinition(token.to_owned()))
                },

                None => Err(EvalErr::UnknownWord(token.to_owned())),
            },

            None => Err(EvalErr::NotCompiling),
        }
    }

    pub fn end_definition(&mut self) -> Result<WordId, EvalErr> {
        match self.definition.take() {
            Some(Definition::Body { name, body }) => {
                Ok(self.define_composite(&name, body))
            },

            // A definition with no name yet is dropped.
            Some(Definition::AwaitingName) | None => Err(EvalErr::NotCompiling),
        }
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Dictionary::new()
    }
}

#[test]
fn lookup_returns_newest_definition() {
    let mut dict = Dictionary::new();
    let first = dict.define_primitive("dup", Primitive::NoOp);
    let second = dict.define_primitive("dup", Primitive::Add);

    assert_eq!(dict.lookup("dup"), Some(second));
    assert_eq!(dict.get(first).kind, Kind::Primitive(Primitive::NoOp));
    assert_eq!(dict.get(second).kind, Kind::Primitive(Primitive::Add));
    assert_eq!(dict.len(), 2);
}

#[test]
fn lookup_is_exact_and_case_sensitive() {
    let dict = Dictionary::bootstrap();

    assert!(dict.lookup("words").is_some());
    assert!(dict.lookup("WORDS").is_none());
    assert!(dict.lookup("word").is_none());
    assert!(dict.lookup("foo").is_none());
}

#[test]
fn lists_names_newest_first() {
    let mut dict = Dictionary::new();
    dict.define_primitive("+", Primitive::Add);
    dict.define_primitive("-", Primitive::Sub);
    dict.define_primitive("+", Primitive::Sub);

    assert_eq!(dict.list_names().collect::<Vec<_>>(), vec!["+", "-", "+"]);
}

#[test]
fn composite_keeps_captured_references() {
    let mut dict = Dictionary::bootstrap();
    let add = dict.lookup("+").unwrap();
    let sub = dict.lookup("-").unwrap();
    let combo = dict.define_composite("+-", vec![add, sub]);

    dict.define_primitive("+", Primitive::NoOp);

    assert_ne!(dict.lookup("+"), Some(add));
    assert_eq!(dict.get(combo).kind, Kind::Composite(vec![add, sub]));
}

#[test]
fn compiles_a_definition() {
    let mut dict = Dictionary::bootstrap();
    let add = dict.lookup("+").unwrap();

    dict.begin_definition();
    assert_eq!(dict.compile("twice").unwrap(), None);
    assert_eq!(dict.compile("+").unwrap(), None);
    assert_eq!(dict.compile("+").unwrap(), None);
    assert_eq!(dict.compile(";").unwrap(), dict.lookup(";"));

    let id = dict.end_definition().unwrap();
    assert!(!dict.is_compiling());
    assert_eq!(dict.lookup("twice"), Some(id));
    assert_eq!(dict.get(id).kind, Kind::Composite(vec![add, add]));
}

#[test]
fn rejects_bad_tokens_in_definitions() {
    let mut dict = Dictionary::bootstrap();
    dict.begin_definition();
    dict.compile("oops").unwrap();

    match dict.compile("12") {
        Err(EvalErr::LiteralInDefinition(ref token)) if token == "12" => (),
        other => panic!("expected literal rejection, got {:?}", other),
    }

    match dict.compile("nope") {
        Err(EvalErr::UnknownWord(ref token)) if token == "nope" => (),
        other => panic!("expected unknown word, got {:?}", other),
    }
}

#[test]
fn end_without_definition_fails() {
    let mut dict = Dictionary::bootstrap();

    match dict.end_definition() {
        Err(EvalErr::NotCompiling) => (),
        other => panic!("expected NotCompiling, got {:?}", other),
    }
}
