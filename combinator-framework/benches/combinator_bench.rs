use combinator_framework::character::{hspace, hspace1, space1};
use combinator_framework::lexer::{lexeme, skip_line_comment, space, symbol};
use combinator_framework::{
    between, empty, end_of_input, indent_block, lazy, literal, many, pratt, take_while1,
    BoxedParser, Parser,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::OnceLock;

// --- Expressions ---
fn number() -> BoxedParser<i64> {
    lexeme(hspace(), take_while1(|c| c.is_ascii_digit(), "number"))
        .map(|digits| digits.parse::<i64>().unwrap_or_default())
        .boxed()
}

fn expr() -> BoxedParser<i64> {
    static EXPR: OnceLock<BoxedParser<i64>> = OnceLock::new();
    EXPR.get_or_init(build_expr).clone()
}

fn build_expr() -> BoxedParser<i64> {
    let atom = number().or(between(
        symbol(hspace(), "("),
        symbol(hspace(), ")"),
        lazy(expr),
    ));
    pratt(atom)
        .prefix(symbol(hspace(), "-"), 3, |a| -a)
        .infix_left(symbol(hspace(), "+"), 1, i64::wrapping_add)
        .infix_left(symbol(hspace(), "-"), 1, i64::wrapping_sub)
        .infix_left(symbol(hspace(), "*"), 2, i64::wrapping_mul)
        .boxed()
}

fn generate_expression(terms: usize) -> String {
    let mut out = String::from("1");
    for i in 1..terms {
        let op = ["+", "*", "-"][i % 3];
        if i % 7 == 0 {
            out.push_str(&format!(" {op} ({i} + {i})"));
        } else {
            out.push_str(&format!(" {op} {i}"));
        }
    }
    out
}

// --- Indentation ---
fn generate_outline(sections: usize) -> String {
    let mut out = String::new();
    for i in 0..sections {
        out.push_str(&format!("section{i}:\n"));
        for j in 0..8 {
            out.push_str(&format!("  item{j} # note\n"));
        }
        out.push('\n');
    }
    out
}

fn outline() -> impl Parser<Output = Vec<(String, Vec<String>)>> {
    let sc = space(space1(), skip_line_comment("#"), empty::<()>());
    let hsc = space(hspace1(), skip_line_comment("#"), empty::<()>());
    let word = take_while1(|c: char| c.is_ascii_alphanumeric(), "word").map(|w| w.to_string());
    let section = lexeme(hsc.clone(), word.clone())
        .skip(literal(":"))
        .seq(indent_block(lexeme(hsc, word)).space(sc.clone()));
    many(lexeme(sc, section)).skip(end_of_input())
}

fn bench_pratt(c: &mut Criterion) {
    let mut group = c.benchmark_group("pratt");

    let size = 10_000;
    let input = generate_expression(size);
    let parser = expr();

    group.throughput(Throughput::Elements(size as u64));
    group.bench_function("expr_mixed", |b| {
        b.iter(|| parser.parse_str(black_box(&input)))
    });

    group.finish();
}

fn bench_indent(c: &mut Criterion) {
    let mut group = c.benchmark_group("indentation");

    let sections = 1_000;
    let input = generate_outline(sections);
    let parser = outline();

    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("sections", |b| {
        b.iter(|| parser.parse_str(black_box(&input)))
    });

    group.finish();
}

criterion_group!(benches, bench_pratt, bench_indent);
criterion_main!(benches);
