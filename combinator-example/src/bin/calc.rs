//! 计算器示例
//!
//! 本示例展示如何用 combinator-framework 的 Pratt 构建器实现一个
//! 带优先级的算术表达式求值器。没有单独的词法分析阶段：数字、运算符
//! 和括号都是吃掉后续空白的 lexeme。
//!
//! 支持的语法：
//! - 数字（整数和小数）
//! - 四则运算：+、-、*、/
//! - 幂运算：^（右结合）
//! - 括号：()
//! - 一元负号：-5
//!
//! 用法：`calc [表达式]`，不带参数时计算内置的几个例子。

use combinator_framework::character::{digit, hspace};
use combinator_framework::lexer::{lexeme, symbol};
use combinator_framework::{between, lazy, literal, pratt, BoxedParser, Parser};
use std::process::ExitCode;
use std::sync::OnceLock;

const SAMPLES: &[&str] = &[
    "3 + 4",
    "3 + 4 * 5",
    "(1 + 2) * 3",
    "2 ^ 3 ^ 2",
    "-5 + 10 / 4",
    "1.5 * 4",
];

fn number() -> BoxedParser<f64> {
    let digits = digit().many1().map(|ds| ds.into_iter().collect::<String>());
    let fraction = literal(".")
        .skip_left(digit().many1())
        .map(|ds| ds.into_iter().collect::<String>());
    let text = digits.seq(fraction.optional()).map(|(whole, frac)| match frac {
        Some(frac) => format!("{whole}.{frac}"),
        None => whole,
    });
    lexeme(hspace(), text)
        .map(|text| text.parse::<f64>().unwrap_or(f64::NAN))
        .label("number")
        .boxed()
}

/// The expression grammar, built once and shared by every nested
/// parenthesised expression.
fn expr() -> BoxedParser<f64> {
    static EXPR: OnceLock<BoxedParser<f64>> = OnceLock::new();
    EXPR.get_or_init(build_expr).clone()
}

fn build_expr() -> BoxedParser<f64> {
    let op = |text: &str| symbol(hspace(), text);
    let atom = number().or(between(op("("), op(")"), lazy(expr)));
    pratt(atom)
        .prefix(op("-"), 3, |a| -a)
        .infix_left(op("+"), 1, |a, b| a + b)
        .infix_left(op("-"), 1, |a, b| a - b)
        .infix_left(op("*"), 2, |a, b| a * b)
        .infix_left(op("/"), 2, |a, b| a / b)
        .infix_right(op("^"), 4, f64::powf)
        .boxed()
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs: Vec<String> = if args.is_empty() {
        SAMPLES.iter().map(|s| s.to_string()).collect()
    } else {
        vec![args.join(" ")]
    };

    println!("=== 计算器示例 ===\n");

    let calculator = hspace().skip_left(expr());
    let mut failed = false;
    for input in &inputs {
        match calculator.parse_str(input) {
            Ok(value) => println!("{} = {}", input, value),
            Err(error) => {
                eprintln!("{}: 解析失败: {}", input, error);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
