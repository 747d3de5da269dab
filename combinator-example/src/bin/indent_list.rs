//! 缩进敏感列表解析示例
//!
//! 本示例展示如何使用 combinator-framework 的缩进组合子解析一个
//! 由缩进决定结构的列表文档：
//!
//! ```text
//! first-chapter
//!   paragraph-one
//!       note-A # an important note here!
//!       note-B
//!   paragraph-two
//!     note-1
//!     note-2
//!   paragraph-three
//! ```
//!
//! - 顶层标题必须位于第一列（`non_indented`）
//! - 段落至少一个，列对齐（`IndentOpt::some`）
//! - 每个段落下的注释可以没有（`IndentOpt::many`），并且可以跨行续写（`line_fold`）
//! - `#` 开头的是行注释
//!
//! 用法：`indent-list [文档文本]`，不带参数时解析内置示例。

use combinator_framework::character::{hspace1, space1, Whitespace};
use combinator_framework::lexer::{lexeme, skip_line_comment, space, LineComment, SpaceConsumer};
use combinator_framework::primitives::Fail;
use combinator_framework::{
    empty, end_of_input, line_fold, nested_block, non_indented, take_while1, BoxedParser,
    IndentOpt, Parser,
};
use std::process::ExitCode;

const SAMPLE: &str = "\
first-chapter
  paragraph-one
      note-A # an important note here!
      note-B
  paragraph-two
    note-1
    note-2
  paragraph-three
";

type Space = SpaceConsumer<Whitespace, LineComment, Fail<()>>;

#[derive(Debug, Clone, PartialEq)]
struct Paragraph {
    title: String,
    notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct Chapter {
    title: String,
    paragraphs: Vec<Paragraph>,
}

/// 跳过空白（包括换行）和注释
fn scn() -> Space {
    space(space1(), skip_line_comment("#"), empty())
}

/// 只跳过行内空白和注释
fn sc() -> Space {
    space(hspace1(), skip_line_comment("#"), empty())
}

fn is_item_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

fn item<S>(sc: S) -> impl Parser<Output = String> + Clone + Send + Sync + 'static
where
    S: Parser + Clone + Send + Sync + 'static,
{
    lexeme(sc, take_while1(is_item_char, "list item")).map(|item| item.to_string())
}

/// 一条注释，续行必须比起始列缩进更深
fn note() -> BoxedParser<String> {
    line_fold(scn(), |sc_| item(sc_).many().map(|words| words.join(" "))).boxed()
}

fn paragraph() -> BoxedParser<Paragraph> {
    nested_block(
        scn(),
        item(sc()).map(|title| {
            IndentOpt::many(None, move |notes: Vec<String>| Paragraph { title, notes }, note())
        }),
    )
    .boxed()
}

fn chapter() -> impl Parser<Output = Chapter> {
    let list = nested_block(
        scn(),
        item(sc()).map(|title| {
            IndentOpt::some(
                None,
                move |paragraphs: Vec<Paragraph>| Chapter { title, paragraphs },
                paragraph(),
            )
        }),
    );
    non_indented(list).space(scn()).skip(end_of_input())
}

fn main() -> ExitCode {
    let input = std::env::args().nth(1).unwrap_or_else(|| SAMPLE.to_string());

    println!("=== 缩进敏感列表解析示例 ===\n");
    println!("输入:\n{}", input);
    println!("{}", "=".repeat(50));

    match chapter().parse_str(&input) {
        Ok(chapter) => {
            println!("章节: {}", chapter.title);
            for paragraph in &chapter.paragraphs {
                println!("  段落: {}", paragraph.title);
                for note in &paragraph.notes {
                    println!("    注释: {}", note);
                }
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("解析失败: {}", error);
            ExitCode::FAILURE
        }
    }
}
