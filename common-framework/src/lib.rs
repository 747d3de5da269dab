//! Common Framework
//!
//! 提供 combinator-framework 使用的底层输入组件：位置、文本切片与不可变游标。

pub mod cursor;
pub mod position;
pub mod text_slice;

pub use cursor::Cursor;
pub use position::{Position, TAB_WIDTH};
pub use text_slice::TextSlice;
