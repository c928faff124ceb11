use std::io;

use technologic::{
    error::{LexError, ParseError, RuntimeError},
    interpreter::evaluator::core::InterpreterConfig,
    run_source, run_source_with_config,
};

fn output_with_input(src: &str, input: &str) -> String {
    let mut output = Vec::new();
    if let Err(e) = run_source(src, &mut output, input.as_bytes()) {
        panic!("Script failed: {e}");
    }
    String::from_utf8(output).expect("output is not UTF-8")
}

fn assert_output(src: &str, expected: &str) {
    assert_eq!(output_with_input(src, ""), expected, "script: {src}");
}

fn assert_failure(src: &str) {
    if run_source(src, &mut Vec::new(), io::empty()).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn failure(src: &str) -> Box<dyn std::error::Error> {
    match run_source(src, &mut Vec::new(), io::empty()) {
        Ok(()) => panic!("Script succeeded but was expected to fail: {src}"),
        Err(e) => e,
    }
}

fn runtime_error(src: &str) -> RuntimeError {
    failure(src).downcast_ref::<RuntimeError>()
                .unwrap_or_else(|| panic!("expected a runtime error for: {src}"))
                .clone()
}

#[test]
fn send_and_scroll() {
    assert_output("surf send scroll", "5\n");
    assert_output("click watch point surf send", "12.5");
    assert_output("", "");
}

#[test]
fn print_writes_character_codes() {
    assert_output("upgrade watch print click erase surf print", "Hi");
    assert_failure("click point surf print");
    assert_failure("click turn print");
}

#[test]
fn arithmetic_and_precedence() {
    assert_output("watch touch view cross work send", "14");
    assert_output("upgrade cut watch send", "3.5");
    assert_output("upgrade rip view send", "1");
    assert_output("zip watch touch view unzip cross work send", "20");
}

#[test]
fn unary_after_a_group_binds_to_the_group() {
    assert_output("surf trash zip watch unzip turn send", "7");
    assert_output("zip surf trash watch unzip turn send", "-3");
}

#[test]
fn subtraction_binds_looser_than_addition() {
    // 5 - (2 + 1)
    assert_output("surf trash watch touch click send", "2");
}

#[test]
fn integer_division_floors_negative_operands() {
    assert_output("upgrade turn write name x rename name x rename crack watch send", "-4");
    assert_output("upgrade crack watch send", "3");
}

#[test]
fn comparisons_yield_one_or_zero() {
    assert_output("view pay surf send view buy surf send view charge surf send", "110");
    assert_output("view drag and drop view send view drag it and quick drop work send", "10");
}

#[test]
fn unary_operators() {
    assert_output("erase switch send surf switch send", "10");
    assert_output("surf turn send", "-5");
    assert_output("surf paste send fax send", "55");
    assert_output("watch turn turn send", "2");
}

#[test]
fn division_by_zero_is_error() {
    assert!(matches!(runtime_error("click cut erase send"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(runtime_error("click crack erase"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(runtime_error("click rip erase"), RuntimeError::DivisionByZero { .. }));
}

#[test]
fn variables_and_write() {
    assert_output("surf write name x rename name x rename touch click send", "6");
    assert_output("surf rewrite name x rename name x rename send", "5");
}

#[test]
fn unknown_variable_is_error() {
    assert!(matches!(runtime_error("name ghost rename send"),
                     RuntimeError::UnknownVariable { .. }));
}

#[test]
fn write_needs_a_variable_reference() {
    assert!(matches!(runtime_error("click write click"),
                     RuntimeError::ExpectedVariableName { keyword: "write", .. }));
    assert!(matches!(runtime_error("click write"),
                     RuntimeError::ExpectedVariableName { .. }));
}

#[test]
fn keywords_need_a_prior_expression() {
    assert!(matches!(runtime_error("send"), RuntimeError::MissingValue { keyword: "send", .. }));
    assert!(matches!(runtime_error("save"), RuntimeError::MissingValue { .. }));
}

#[test]
fn conditionals_with_and_without_else() {
    assert_output("view charge watch check click send break", "1");
    assert_output("watch charge view check click send break", "");
    assert_output("view charge watch check click send fix watch send break", "1");
    assert_output("watch charge view check click send fix watch send break", "2");
    assert_output("erase check click send jam watch send break view send", "23");
}

#[test]
fn synonyms_for_check_and_else() {
    assert_output("erase rate click send tune watch send break", "2");
    assert_output("click rate click send snap watch send break", "1");
}

#[test]
fn nested_conditionals() {
    let src = "click check
                   erase check click send fix watch send break
                   view send
               fix
                   work send
               break";
    assert_output(src, "23");
}

#[test]
fn while_loop_counts_down_without_extra_iteration() {
    let src = "view write name n rename
               lock name n rename check
                   name n rename touch work zoom print
                   name n rename trash click write name n rename
               break";
    assert_output(src, "321");
}

#[test]
fn until_loop_inverts_its_guard() {
    let src = "erase write name i rename
               start name i rename drag and drop view check
                   name i rename send
                   name i rename touch click write name i rename
               break";
    assert_output(src, "012");
}

#[test]
fn leave_exits_the_loop_from_inside_a_conditional() {
    let src = "erase write name i rename
               lock click check
                   name i rename send
                   name i rename drag and drop watch check leave break
                   name i rename touch click write name i rename
               break
               view send";
    assert_output(src, "0123");
}

#[test]
fn nested_loops() {
    let src = "click write name i rename
               lock name i rename pay view check
                   click write name j rename
                   lock name j rename pay view check
                       name i rename cross name j rename send
                       name j rename touch click write name j rename
                   break
                   scroll
                   name i rename touch click write name i rename
               break";
    assert_output(src, "12\n24\n");
}

#[test]
fn malformed_and_unmatched_structure_fails() {
    assert!(matches!(runtime_error("erase check send"), RuntimeError::UnmatchedMarker { .. }));
    assert!(matches!(runtime_error("click send break"), RuntimeError::OrphanBreak { .. }));
    assert!(matches!(runtime_error("leave"), RuntimeError::OrphanBreak { keyword: "leave", .. }));
    assert!(matches!(runtime_error("lock click send"), RuntimeError::MalformedLoop { .. }));
    assert!(matches!(runtime_error("use () f code click"), RuntimeError::UnmatchedMarker { .. }));
}

#[test]
fn user_defined_function_and_calls() {
    let src = "use it (a bring it b) add code it
               name it a rename it touch it name it b rename it unlock it
               break it
               use it (watch plug it view) add call it
               send it";
    assert_output(src, "5");
}

#[test]
fn call_arguments_are_full_expressions() {
    let src = "use (a plug b) sub code name a rename trash name b rename unlock break
               use (surf cross watch bring view touch click) sub call send";
    assert_output(src, "6");
}

#[test]
fn recursive_factorial() {
    let src = "use (n) fact code
                   name n rename check
                       name n rename cross use (name n rename trash click) fact call unlock
                   break
                   click unlock
               break
               use (surf) fact call send";
    assert_output(src, "120");
}

#[test]
fn body_end_returns_zero() {
    assert_output("use () f code click send break use () f call send", "10");
}

#[test]
fn function_bodies_are_skipped_until_called() {
    assert_output("use () f code click send break watch send", "2");
}

#[test]
fn functions_can_be_redefined() {
    let src = "use () f code click unlock break
               use () f code watch unlock break
               use () f call send";
    assert_output(src, "2");
}

#[test]
fn argument_count_must_match() {
    let err = runtime_error("use (a) f code name a rename unlock break use (click plug watch) f call");
    assert!(matches!(err,
                     RuntimeError::ArgumentCountMismatch { expected: 1,
                                                           found: 2,
                                                           .. }));
}

#[test]
fn calling_before_definition_fails() {
    let err = runtime_error("use (click) f call use (a) f code name a rename unlock break");
    assert!(matches!(err, RuntimeError::UnknownFunction { .. }));
}

#[test]
fn write_respects_local_scope() {
    let src = "click write name x rename
               use (x) f code
                   surf write name x rename
                   name x rename unlock
               break
               use (view) f call send
               name x rename send";
    assert_output(src, "51");
}

#[test]
fn functions_update_existing_globals() {
    let src = "erase write name total rename
               use () bump code name total rename touch click write name total rename break
               use () bump call use () bump call
               name total rename send";
    assert_output(src, "2");
}

#[test]
fn return_outside_function_fails() {
    assert!(matches!(runtime_error("click unlock"), RuntimeError::ReturnOutsideFunction { .. }));
}

#[test]
fn call_depth_is_bounded() {
    let src = "use (n) f code use (name n rename touch click) f call unlock break use (click) f call";
    let config = InterpreterConfig { max_call_depth: 10 };
    let err = run_source_with_config(src, &mut Vec::new(), io::empty(), config).unwrap_err();
    assert!(matches!(err.downcast_ref::<RuntimeError>(),
                     Some(RuntimeError::CallDepthExceeded { limit: 10, .. })));
}

#[test]
fn burn_halts_from_inside_a_call() {
    assert_output("use () f code click send burn break use () f call watch send", "1");
    assert_output("click send burn watch send", "1");
}

#[test]
fn labels_and_find() {
    assert_output("click find surf send technologic view send", "3");
    assert_output("watch find click send technologic watch send technologic view send", "3");
    assert_output("click send erase find view send", "1");
}

#[test]
fn find_out_of_range_fails() {
    assert!(matches!(runtime_error("watch find technologic"),
                     RuntimeError::LabelOutOfRange { index: 2, labels: 1, .. }));
    assert!(matches!(runtime_error("click point surf find technologic"),
                     RuntimeError::InvalidIndex { .. }));
}

#[test]
fn find_can_build_a_loop() {
    let src = "view write name n rename
               technologic
               name n rename send
               name n rename trash click write name n rename
               name n rename charge erase write name again rename
               name again rename find";
    assert_output(src, "321");
}

#[test]
fn value_stack_operations() {
    assert_output("click save watch save view save fax send fax send fax send", "321");
    assert_output("click save watch save load fax send", "1");
}

#[test]
fn change_counts_from_the_top() {
    assert_output("click save watch save view change click fax send fax send", "23");
    assert_output("click save watch save view change erase fax send fax send", "31");
}

#[test]
fn stack_errors() {
    assert!(matches!(runtime_error("load"), RuntimeError::StackUnderflow { .. }));
    assert!(matches!(runtime_error("fax send"), RuntimeError::StackUnderflow { .. }));
    assert!(matches!(runtime_error("click save surf change click"),
                     RuntimeError::StackIndexOutOfBounds { index: 1, depth: 1, .. }));
    assert!(matches!(runtime_error("click save surf change"),
                     RuntimeError::MissingOperand { .. }));
}

#[test]
fn scan_and_press_read_lines() {
    let src = "scan name x rename name x rename touch click send
               press name c rename name c rename print
               press name e rename name e rename send";
    assert_eq!(output_with_input(src, "42\nhello\n\n"), "43h10");
}

#[test]
fn scan_failures() {
    assert!(matches!(runtime_error("scan name x rename"), RuntimeError::InputExhausted { .. }));

    let err = run_source("scan name x rename", &mut Vec::new(), "abc\n".as_bytes()).unwrap_err();
    assert!(matches!(err.downcast_ref::<RuntimeError>(),
                     Some(RuntimeError::InvalidInput { line, .. }) if line == "abc"));
}

#[test]
fn comments_and_filler_are_ignored() {
    assert_output("click pause anything ; goes here play send", "1");
    assert_output("quick mail it click it send it", "1");
    assert_output("click send format watch send format", "12");
}

#[test]
fn lex_errors() {
    let err = failure("click drag and stop click");
    assert!(matches!(err.downcast_ref::<LexError>(),
                     Some(LexError::BrokenContinuation { .. })));

    let err = failure("click ; send");
    assert!(matches!(err.downcast_ref::<LexError>(),
                     Some(LexError::UnexpectedCharacter { .. })));
}

#[test]
fn parse_errors() {
    let err = failure("counter send");
    assert!(matches!(err.downcast_ref::<ParseError>(),
                     Some(ParseError::UnresolvedVariable { .. })));

    let err = failure("zip click touch watch send");
    assert!(err.downcast_ref::<ParseError>().is_some());

    let err = failure("use (a) f");
    assert!(err.downcast_ref::<ParseError>().is_some());
}

#[test]
fn errors_report_positions() {
    let err = failure("click send\n  load");
    assert!(err.to_string().contains("line 2, column 3"), "message was: {err}");
}
