use std::io;

fn run_with_input(source: &str, input: &str) -> String {
    let mut reader = input.as_bytes();
    let mut output = Vec::new();
    basil::run(source, &mut reader, &mut output).unwrap_or_else(|e| {
                                                    panic!("script failed: {e}\nsource:\n{source}")
                                                });
    String::from_utf8(output).unwrap()
}

fn run_program(source: &str) -> String {
    run_with_input(source, "")
}

fn expect_error(source: &str) -> String {
    let mut output = Vec::new();
    match basil::run(source, &mut io::empty(), &mut output) {
        Ok(()) => panic!("script succeeded but was expected to fail:\n{source}"),
        Err(e) => e.to_string(),
    }
}

#[test]
fn addition_of_variables() {
    let output = run_program("a = 1\n b = 2\n c = a + b\n print(c)");
    assert_eq!(output, "3");
}

#[test]
fn if_with_true_condition() {
    let output = run_program("if true then print(\"true\") end if");
    assert_eq!(output, "true");
}

#[test]
fn if_with_else_branch() {
    let output = run_program("if 1 < 0 then print(\"true\") else print(\"false\") end if");
    assert_eq!(output, "false");
}

#[test]
fn for_loop_accumulates_digits() {
    let output = run_program("a = \"\"\n for i in range(1,10,1)\n a += to_string(i)\n end for\n print(a)");
    assert_eq!(output, "123456789");
}

#[test]
fn string_slice_with_two_indices() {
    let output = run_program("a = \"ITMOITMO\"\n print(a[1:8])");
    assert_eq!(output, "TMOITMO");
}

#[test]
fn factorial_via_for_loop() {
    let output = run_program("n = 10\n res = 1\n for i in range(1, n+1, 1)\n res *= i\n end for\n print(res)");
    assert_eq!(output, "3628800");
}

#[test]
fn operator_precedence_and_associativity() {
    assert_eq!(run_program("print(2 + 3 * 4)"), "14");
    assert_eq!(run_program("print((2 + 3) * 4)"), "20");
    assert_eq!(run_program("print(2 ^ 3 ^ 2)"), "512");
    assert_eq!(run_program("print(-2 ^ 2)"), "4");
    assert_eq!(run_program("print(10 - 2 - 3)"), "5");
}

#[test]
fn number_arithmetic_follows_ieee() {
    assert_eq!(run_program("print(10 / 4)"), "2.5");
    assert_eq!(run_program("print(1 / 0)"), "inf");
    assert_eq!(run_program("print(7 % 3)"), "1");
    assert_eq!(run_program("print(-7 % 3)"), "-1");
}

#[test]
fn assignment_is_an_expression() {
    assert_eq!(run_program("a = b = 2\nprint(a + b)"), "4");
}

#[test]
fn compound_assignments() {
    assert_eq!(run_program("x = 2\nx += 3\nprint(x)"), "5");
    assert_eq!(run_program("x = 7\nx -= 2\nprint(x)"), "5");
    assert_eq!(run_program("x = 4\nx *= 2\nprint(x)"), "8");
    assert_eq!(run_program("x = 9\nx /= 3\nprint(x)"), "3");
    assert_eq!(run_program("x = 7\nx %= 4\nprint(x)"), "3");
    assert_eq!(run_program("x = 2\nx ^= 3\nprint(x)"), "8");
}

#[test]
fn assignment_updates_nearest_scope() {
    assert_eq!(run_program("x = 1\nif true then\nx = 2\nend if\nprint(x)"), "2");
}

#[test]
fn block_local_binding_does_not_escape() {
    let message = expect_error("if true then\ny = 5\nend if\nprint(y)");
    assert_eq!(message, "Variable 'y' not found");
}

#[test]
fn string_concatenation_and_subtraction() {
    assert_eq!(run_program("print(\"foo\" + \"bar\")"), "foobar");
    assert_eq!(run_program("print(\"foobar\" - \"bar\")"), "foo");
    assert_eq!(run_program("print(\"foobar\" - \"x\")"), "foobar");
}

#[test]
fn string_repetition() {
    assert_eq!(run_program("print(\"ab\" * 3)"), "ababab");
    assert_eq!(run_program("print(\"ab\" * 1.5)"), "aba");
    assert_eq!(run_program("print(\"ab\" * 0)"), "");
    let message = expect_error("print(\"ab\" * -1)");
    assert_eq!(message, "Can not multiply a string by a negative number");
}

#[test]
fn string_comparisons_are_bytewise() {
    assert_eq!(run_program("print(\"abc\" < \"abd\")"), "1");
    assert_eq!(run_program("print(\"b\" > \"a\")"), "1");
    assert_eq!(run_program("print(\"a\" == \"a\")"), "1");
    assert_eq!(run_program("print(\"a\" != \"b\")"), "1");
}

#[test]
fn string_escapes() {
    assert_eq!(run_program("print(\"a\\tb\")"), "a\tb");
    assert_eq!(run_program("print(\"a\\nb\")"), "a\nb");
    assert_eq!(run_program("print(\"say \\\"hi\\\"\")"), "say \"hi\"");
}

#[test]
fn mixed_type_comparisons_are_false() {
    assert_eq!(run_program("print(1 == \"1\")"), "0");
    assert_eq!(run_program("print(1 != \"1\")"), "0");
    assert_eq!(run_program("print(nil == nil)"), "1");
    assert_eq!(run_program("print(nil < nil)"), "0");
}

#[test]
fn list_comparisons_are_size_based() {
    assert_eq!(run_program("print([1, 2] == [3, 4])"), "1");
    assert_eq!(run_program("print([1] < [1, 2])"), "1");
    assert_eq!(run_program("print([1, 2, 3] > [1])"), "1");
}

#[test]
fn boolean_coercion() {
    assert_eq!(run_program("print(true)"), "1");
    assert_eq!(run_program("print(not 0)"), "1");
    assert_eq!(run_program("print(not \"\")"), "1");
    assert_eq!(run_program("print(not [1])"), "0");
    assert_eq!(run_program("print(not nil)"), "1");
    assert_eq!(run_program("print(1 and 0)"), "0");
    assert_eq!(run_program("print(1 and 2)"), "1");
    assert_eq!(run_program("print(0 or \"x\")"), "1");
    assert_eq!(run_program("print(0 or 0)"), "0");
}

#[test]
fn list_concatenation_and_repetition() {
    assert_eq!(run_program("print([1, 2] + [3])"), "[1, 2, 3]");
    assert_eq!(run_program("print([1, 2] * 2)"), "[1, 2, 1, 2]");
    assert_eq!(run_program("print([1, 2] * 0)"), "[]");
    let message = expect_error("print([1] * -2)");
    assert_eq!(message, "Can not multiply a list by a negative number");
}

#[test]
fn list_stringification_quotes_nested_strings() {
    assert_eq!(run_program("print([1, \"a\", nil])"), "[1, \"a\", nil]");
    assert_eq!(run_program("print([])"), "[]");
}

#[test]
fn lists_are_shared_by_reference() {
    let output = run_program("a = [1]\nb = a\npush(a, 2)\nprint(b)");
    assert_eq!(output, "[1, 2]");
}

#[test]
fn push_pop_insert_remove() {
    assert_eq!(run_program("l = [1]\npush(l, 2)\nprint(l)"), "[1, 2]");
    assert_eq!(run_program("print(push([1], 2))"), "[1, 2]");
    assert_eq!(run_program("l = [1, 2]\npop(l)\nprint(l)"), "[1]");
    assert_eq!(run_program("l = [1, 3]\ninsert(l, 1, 2)\nprint(l)"), "[1, 2, 3]");
    assert_eq!(run_program("l = [1, 2, 3]\nremove(l, 1)\nprint(l)"), "[1, 3]");
    assert_eq!(run_program("l = [1, 2]\npush(l, 3)\npop(l)\nprint(l)"), "[1, 2]");
}

#[test]
fn list_builtin_errors() {
    assert_eq!(expect_error("pop([])"), "Can not pop from empty list");
    assert_eq!(expect_error("remove([1], 5)"),
               "Index is out of range when removing from list");
    assert_eq!(expect_error("insert([1], 7, 0)"),
               "Index is out of range when inserting into list");
}

#[test]
fn sort_orders_homogeneous_lists() {
    assert_eq!(run_program("l = [3, 1, 2]\nsort(l)\nprint(l)"), "[1, 2, 3]");
    assert_eq!(run_program("l = [\"b\", \"a\"]\nsort(l)\nprint(l)"),
               "[\"a\", \"b\"]");
    assert_eq!(run_program("l = [[1, 2], [3]]\nsort(l)\nprint(l)"),
               "[[3], [1, 2]]");
}

#[test]
fn sort_rejects_mixed_and_function_elements() {
    assert_eq!(expect_error("sort([1, \"a\"])"),
               "sort() can be applied only to the list of the same type");
    assert_eq!(expect_error("f = function()\nend function\nsort([f, f])"),
               "sort() can not be applied to the list of the function");
}

#[test]
fn list_indexing() {
    let prelude = "a = [1, 2, 3, 4, 5]\n";
    assert_eq!(run_program(&format!("{prelude}print(a[1])")), "2");
    assert_eq!(run_program(&format!("{prelude}print(a[-1])")), "5");
    assert_eq!(run_program(&format!("{prelude}print(a[-5])")), "1");
    assert_eq!(expect_error("print([1][5])"),
               "Index is out of range when getting element from list");
}

#[test]
fn list_slicing() {
    let prelude = "a = [1, 2, 3, 4, 5]\n";
    assert_eq!(run_program(&format!("{prelude}print(a[1:3])")), "[2, 3]");
    assert_eq!(run_program(&format!("{prelude}print(a[0:5])")), "[1, 2, 3, 4, 5]");
    assert_eq!(run_program(&format!("{prelude}print(a[0:5:2])")), "[1, 3, 5]");
    assert_eq!(run_program(&format!("{prelude}print(a[-3:-1])")), "[3, 4]");
    assert_eq!(run_program(&format!("{prelude}print(a[1:-1])")), "[]");
    assert_eq!(run_program(&format!("{prelude}print(a[2:2])")), "[3]");
    assert_eq!(run_program(&format!("{prelude}print(a[0:0])")), "[1, 2, 3, 4, 5]");
}

#[test]
fn slice_with_omitted_slots() {
    let prelude = "a = [1, 2, 3, 4, 5]\n";
    assert_eq!(run_program(&format!("{prelude}print(a[:3])")), "[1, 2, 3]");
    assert_eq!(run_program(&format!("{prelude}print(a[:])")), "1");
    assert_eq!(run_program(&format!("{prelude}print(a[1:])")), "2");
    assert_eq!(run_program(&format!("{prelude}print(a[::2])")), "[1, 3, 5]");
}

#[test]
fn string_slicing() {
    assert_eq!(run_program("print(\"hello\"[1])"), "e");
    assert_eq!(run_program("print(\"hello\"[1:3])"), "el");
    assert_eq!(run_program("print(\"hello\"[4])"), "o");
    assert_eq!(run_program("print(\"hello\"[5])"), "");
    assert_eq!(run_program("print(\"hello\"[1:100])"), "ello");
}

#[test]
fn while_loop_with_break() {
    let source = "i = 0\nwhile true\ni += 1\nif i == 3 then\nbreak\nend if\nend while\nprint(i)";
    assert_eq!(run_program(source), "3");
}

#[test]
fn break_at_top_of_loop_exits_immediately() {
    let source = "while true\nbreak\nprint(\"unreachable\")\nend while\nprint(\"done\")";
    assert_eq!(run_program(source), "done");
}

#[test]
fn continue_skips_the_rest_of_the_iteration() {
    let source = "s = 0\nfor i in range(1, 6, 1)\nif i % 2 == 0 then\ncontinue\nend if\ns += i\nend for\nprint(s)";
    assert_eq!(run_program(source), "9");
}

#[test]
fn for_loop_over_string_iterates_bytes() {
    assert_eq!(run_program("for c in \"abc\"\nprint(c)\nend for"), "abc");
}

#[test]
fn empty_iterations_run_no_body() {
    assert_eq!(run_program("for c in \"\"\nprint(\"x\")\nend for\nprint(\"done\")"),
               "done");
    assert_eq!(run_program("for x in []\nprint(\"x\")\nend for\nprint(\"done\")"),
               "done");
}

#[test]
fn for_sequence_must_be_iterable() {
    assert_eq!(expect_error("for x in 5\nprint(x)\nend for"),
               "Sequence must be iterable");
}

#[test]
fn elseif_chains() {
    let source = "x = 2\nif x == 1 then\nprint(\"one\")\nelseif x == 2 then\nprint(\"two\")\nelse\nprint(\"many\")\nend if";
    assert_eq!(run_program(source), "two");
    let source = "x = 5\nif x == 1 then\nprint(\"one\")\nelseif x == 2 then\nprint(\"two\")\nelse\nprint(\"many\")\nend if";
    assert_eq!(run_program(source), "many");
}

#[test]
fn function_definition_and_call() {
    let source = "f = function(a, b)\nreturn a + b\nend function\nprint(f(2, 3))";
    assert_eq!(run_program(source), "5");
}

#[test]
fn function_without_return_yields_nil() {
    assert_eq!(run_program("f = function()\nend function\nprint(f())"), "nil");
}

#[test]
fn recursion_works_through_the_scope_stack() {
    let source = "fact = function(n)\nif n < 2 then\nreturn 1\nend if\nreturn n * fact(n - 1)\nend function\nprint(fact(5))";
    assert_eq!(run_program(source), "120");
}

#[test]
fn return_propagates_out_of_loops() {
    let source = "f = function()\nfor i in [1, 2, 3]\nif i == 2 then\nreturn i\nend if\nend for\nreturn 0\nend function\nprint(f())";
    assert_eq!(run_program(source), "2");
}

#[test]
fn top_level_return_stops_the_program() {
    assert_eq!(run_program("return 5\nprint(\"unreachable\")"), "");
}

#[test]
fn unnamed_call_on_call_result() {
    let source = "make = function()\nreturn function()\nreturn 42\nend function\nend function\nprint(make()())";
    assert_eq!(run_program(source), "42");
}

#[test]
fn call_errors() {
    assert_eq!(expect_error("g(1)"), "Function g not found");
    assert_eq!(expect_error("x = 5\nx()"), "Function x not found");
    assert_eq!(expect_error("5()"),
               "() operator can be applied only to the function");
    assert_eq!(expect_error("f = function(a)\nreturn a\nend function\nf(1, 2)"),
               "Function 'f' with 2 arguments not found");
}

#[test]
fn function_values_compare_by_identity() {
    let source = "f = function()\nend function\ng = f\nh = function()\nend function\nprint(f == g)\nprint(f == h)\nprint(f != h)";
    assert_eq!(run_program(source), "101");
}

#[test]
fn function_values_stringify_as_function() {
    assert_eq!(run_program("f = function()\nend function\nprint(f)"), "function");
}

#[test]
fn case_mapping_builtins() {
    assert_eq!(run_program("print(upper(\"abc\"))"), "ABC");
    assert_eq!(run_program("print(lower(\"AbC\"))"), "abc");
    assert_eq!(run_program("s = \"hi\"\nprint(capitalize(s))\nprint(s)"), "Hihi");
    assert_eq!(run_program("print(capitalize(\"\"))"), "");
}

#[test]
fn split_and_join() {
    assert_eq!(run_program("print(join(split(\"a,b,c\", \",\"), \"-\"))"), "a-b-c");
    assert_eq!(run_program("print(len(split(\"a,\", \",\")))"), "2");
    assert_eq!(run_program("print(join([1, \"a\"], \"+\"))"), "1+a");
}

#[test]
fn replace_scans_left_to_right() {
    assert_eq!(run_program("print(replace(\"aaa\", \"aa\", \"b\"))"), "ba");
    assert_eq!(run_program("print(replace(\"hello world\", \"o\", \"0\"))"),
               "hell0 w0rld");
}

#[test]
fn to_string_is_the_canonical_form() {
    assert_eq!(run_program("print(to_string(3.0))"), "3");
    assert_eq!(run_program("print(to_string(2.5))"), "2.5");
    assert_eq!(run_program("print(to_string(\"x\"))"), "\"x\"");
    assert_eq!(run_program("print(to_string(nil))"), "nil");
    assert_eq!(run_program("print(to_string([1, 2]))"), "[1, 2]");
}

#[test]
fn numeric_builtins() {
    assert_eq!(run_program("print(abs(-3))"), "3");
    assert_eq!(run_program("print(sqrt(9))"), "3");
    assert_eq!(run_program("print(ceil(1.2))"), "2");
    assert_eq!(run_program("print(floor(1.8))"), "1");
    assert_eq!(run_program("print(round(2.5))"), "3");
    assert_eq!(run_program("print(round(-2.5))"), "-3");
    assert_eq!(expect_error("abs(\"x\")"),
               "abs() can be applied only to the number");
}

#[test]
fn parse_num_requires_a_full_match() {
    assert_eq!(run_program("print(parse_num(\"12.5\"))"), "12.5");
    assert_eq!(run_program("print(parse_num(\"12x\"))"), "nil");
    assert_eq!(run_program("print(parse_num(5))"), "nil");
}

#[test]
fn rnd_yields_a_non_negative_integer() {
    assert_eq!(run_program("x = rnd(1)\nprint((x >= 0) and (x < 2147483648))"),
               "1");
    assert_eq!(run_program("x = rnd(1)\nprint(x == floor(x))"), "1");
    assert_eq!(expect_error("rnd(\"x\")"),
               "rnd() can be applied only to the number");
}

#[test]
fn range_produces_half_open_sequences() {
    assert_eq!(run_program("print(range(1, 5, 1))"), "[1, 2, 3, 4]");
    assert_eq!(run_program("print(range(5, 1, -1))"), "[5, 4, 3, 2]");
    assert_eq!(run_program("print(len(range(0, 10, 3)))"), "4");
}

#[test]
fn range_rejects_bad_steps() {
    assert_eq!(expect_error("range(1, 5, 0)"), "Step of range() must be non-zero");
    assert_eq!(expect_error("range(5, 1, 1)"),
               "Start of range() must be less than end if step is positive");
    assert_eq!(expect_error("range(1, 5, -1)"),
               "Start of range() must be greater than end if step is negative");
}

#[test]
fn read_consumes_lines_from_the_input() {
    assert_eq!(run_with_input("name = read()\nprintln(name)", "world\n"), "world\n");
    assert_eq!(run_with_input("a = read()\nb = read()\nprint(a + b)", "x\ny\n"),
               "xy");
    assert_eq!(run_with_input("print(len(read()))", ""), "0");
}

#[test]
fn stacktrace_lists_the_topmost_scope() {
    let output = run_program("a = 1\nb = \"x\"\nprint(stacktrace())");
    assert_eq!(output,
               "variable name: a, value: 1\nvariable name: b, value: \"x\"\n");
}

#[test]
fn comments_are_skipped() {
    assert_eq!(run_program("// nothing here\nprint(1 /* mid */ + 2)"), "3");
    assert_eq!(run_program("/* spanning\nlines */\nprint(\"ok\")"), "ok");
}

#[test]
fn empty_program_produces_no_output() {
    assert_eq!(run_program(""), "");
    assert_eq!(run_program("\n\n\n"), "");
}

#[test]
fn incorrect_tokens_are_reported_in_context() {
    assert_eq!(expect_error("@"), "Error on line 1: Incorrect expression");
    assert_eq!(expect_error("print(\"abc"),
               "Error on line 1: Incorrect expression");
    assert_eq!(expect_error("x = 1.2.3"),
               "Error on line 1: Incorrect expression");
    assert_eq!(expect_error("1 @ 2"),
               "Error on line 1: Unknown binary operation");
}

#[test]
fn unclosed_comment_is_fatal() {
    assert_eq!(expect_error("/* never closed"),
               "Error on line 1: Unclosed comment");
    assert_eq!(expect_error("print(1)\n/* still open"),
               "Error on line 2: Unclosed comment");
}

#[test]
fn parser_reports_missing_tokens() {
    assert!(expect_error("print((1 + 2)").contains("Expected ')'"));
    assert!(expect_error("if 1\nprint(1)\nend if").contains("Expected \"then\" after if-block"));
    assert!(expect_error("while true\nprint(1)").contains("Expected \"end while\", but got EOF"));
    assert!(expect_error("if true then\nprint(1)\nend while")
            .contains("Expected \"end if\", but got only \"end\""));
    assert!(expect_error("print(1 + )").contains("Incorrect expression"));
    assert!(expect_error("1 + ").contains("Unexpected end of input"));
    assert!(expect_error("1 1").contains("Unknown binary operation"));
}

#[test]
fn type_errors_use_stable_wordings() {
    assert_eq!(expect_error("print(1 + \"a\")"),
               "Incorrect operands in binary expression: A + B");
    assert_eq!(expect_error("print([1] - [2])"),
               "Incorrect operands in binary expression: A - B");
    assert_eq!(expect_error("print(-\"a\")"),
               "Unary minus can be applied only to the number");
    assert_eq!(expect_error("1 = 2"),
               "The left operand of the assignment must be a variable");
    assert_eq!(expect_error("l = [1]\nl[0] = 5"),
               "The left operand of the assignment must be a variable");
    assert_eq!(expect_error("print(len(5))"),
               "len() can be applied only to the iterable object");
}

#[test]
fn builtin_arity_is_checked() {
    assert_eq!(expect_error("print(1, 2)"), "print() requires one argument");
    assert_eq!(expect_error("len()"), "len() requires one argument");
    assert_eq!(expect_error("range(1, 2)"), "range() requires three arguments");
    assert_eq!(expect_error("read(1)"), "read() requires no arguments");
    assert_eq!(expect_error("split(\"a\")"), "split() requires two arguments");
}

#[test]
fn join_split_round_trip() {
    let source = "s = \"alpha;beta;gamma\"\nprint(join(split(s, \";\"), \";\"))";
    assert_eq!(run_program(source), "alpha;beta;gamma");
}

#[test]
fn calls_may_span_lines() {
    assert_eq!(run_program("print(join([\n1,\n2\n], \"-\"))"), "1-2");
    assert_eq!(run_program("f = function(\na,\nb\n)\nreturn a + b\nend function\nprint(f(1, 2))"),
               "3");
}

#[test]
fn trailing_comma_in_list_literal() {
    assert_eq!(run_program("print([1, 2,])"), "[1, 2]");
}

#[test]
fn interpret_reads_source_from_the_stream() {
    let mut input = "print(1 + 1)".as_bytes();
    let mut output = Vec::new();
    assert!(basil::interpret(&mut input, &mut output));
    assert_eq!(output, b"2");

    let mut input = "print(".as_bytes();
    let mut output = Vec::new();
    assert!(!basil::interpret(&mut input, &mut output));
    assert!(String::from_utf8(output).unwrap().ends_with('\n'));
}

#[test]
fn while_and_for_accept_optional_then() {
    assert_eq!(run_program("i = 0\nwhile i < 3 then\ni += 1\nend while\nprint(i)"),
               "3");
    assert_eq!(run_program("s = 0\nfor i in [1, 2] then\ns += i\nend for\nprint(s)"),
               "3");
}
