use embryo::*;

macro_rules! valid {
    ( $name:ident $(, $value:expr )* ) => {
        #[test]
        fn $name() {
            let source = {
                include_str!(concat!("valid/", stringify!($name), ".fs"))
            };

            let mut env = Shell::with_output(Vec::new(), DEFAULT_CAPACITY);
            env.run(source.as_bytes()).unwrap();
            let expected: &[i32] = &[ $( $value ),* ];
            assert_eq!(env.view(), expected);
        }
    };
}

macro_rules! invalid {
    ( $name:ident, $error:pat ) => {
        #[test]
        fn $name() {
            let source = {
                include_str!(concat!("invalid/", stringify!($name), ".fs"))
            };

            let mut env = Shell::with_output(Vec::new(), DEFAULT_CAPACITY);
            match env.run(source.as_bytes()) {
                Err(Fault { error: $error, .. }) => (),
                other => panic!("unexpected result {:?}", other),
            }
        }
    };
}

valid!(arithmetic, 7, 7);
valid!(shadowing, 3, 2);
valid!(composite, 0);
valid!(nested_composite, 6);
valid!(lenient_literals, 12, 9);
valid!(stops_at_blank_line, 1);
valid!(exit_early, 5);

invalid!(unknown_word, EvalErr::UnknownWord(_));
invalid!(underflow, EvalErr::StackUnderflow);
invalid!(stray_semicolon, EvalErr::NotCompiling);
invalid!(literal_in_definition, EvalErr::LiteralInDefinition(_));

#[test]
fn overflow_on_1025th_push() {
    let source = vec!["1"; DEFAULT_CAPACITY + 1].join(" ");

    let mut env = Shell::with_output(Vec::new(), DEFAULT_CAPACITY);
    let fault = env.interpret_line(&source).unwrap_err();
    match fault.error {
        EvalErr::StackOverflow => (),
        ref other => panic!("expected overflow, got {:?}", other),
    }
    assert_eq!(env.view().len(), DEFAULT_CAPACITY);
}

#[test]
fn words_lists_user_definitions_first() {
    let mut env = Shell::with_output(Vec::new(), DEFAULT_CAPACITY);
    env.run(&b": inc + ;\n: inc - ;\nwords\n"[..]).unwrap();

    let out = String::from_utf8(env.into_output()).unwrap();
    assert_eq!(out, "inc inc ; : words exit  . - +\n");
}

#[test]
fn dot_output() {
    let mut env = Shell::with_output(Vec::new(), DEFAULT_CAPACITY);
    env.run(&b"3 4 +\n.\n1 . 2\n"[..]).unwrap();

    let out = String::from_utf8(env.into_output()).unwrap();
    assert_eq!(out, "7 \n1 7 \n");
}

#[test]
fn invalid_utf8_is_an_unknown_word() {
    let mut env = Shell::with_output(Vec::new(), DEFAULT_CAPACITY);
    let fault = env.run(&b"1 2 +\n5 \xff .\n"[..]).unwrap_err();

    assert_eq!(fault.to_string(), "2:Unknown word: \u{FFFD}");
    assert_eq!(env.view(), &[3, 5]);
}
