//! Printing a parsed program and parsing it again yields the same tree.

use parser::{parse_source, to_source};

fn assert_reparses(source: &str) {
    let first = parse_source(source).expect("original source parses");
    let printed = to_source(&first);
    let second = parse_source(&printed)
        .unwrap_or_else(|e| panic!("printed source {:?} failed to parse: {}", printed, e));
    assert_eq!(first, second, "printed as {:?}", printed);
}

#[test]
fn roundtrip_arithmetic() {
    assert_reparses("emit 1 + 2 * 3 - 4 / 2");
    assert_reparses("emit (1 + 2) * 3");
    assert_reparses("emit 1 - (2 - 3)");
    assert_reparses("emit -(-x) + +y");
    assert_reparses("emit 0.5 * 2.0 + 7.");
}

#[test]
fn roundtrip_comparisons() {
    assert_reparses("emit a < b < c");
    assert_reparses("emit (a == b) != 0");
    assert_reparses("if x >= 10 then emit \"big\" else emit \"small\" end");
}

#[test]
fn roundtrip_collections_and_postfix() {
    assert_reparses("mem d = {\"a\": [1, 2], 3: {}}");
    assert_reparses("emit d.a[0] + f(1, g(2))[3].k");
    assert_reparses("mem grid[1][2] = 0 mem player.x = player.x + 1");
    assert_reparses("emit (1).x");
    assert_reparses("emit 1.5.x");
}

#[test]
fn roundtrip_statement_keywords_nested_in_expressions() {
    assert_reparses("mem x = mem y = 1");
    assert_reparses("emit (mem x = 2) + 1");
    assert_reparses("[emit 1, emit 2]");
    assert_reparses("emit (return 3)");
}

#[test]
fn roundtrip_control_flow() {
    assert_reparses(
        "mem i = 0 while i < 3 do emit i mem i = i + 1 end\n\
         for c in \"ab\" do emit c end\n\
         def fib(n) if n < 2 then return n end return fib(n - 1) + fib(n - 2) end\n\
         emit fib(10)",
    );
    assert_reparses("def noop() end if 1 then end while 0 do end");
}

#[test]
fn roundtrip_left_assoc_chain_after_statement() {
    assert_reparses("emit x 1 - 2 - 3");
}
