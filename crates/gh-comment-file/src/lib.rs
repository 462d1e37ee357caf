//! # gh-comment-file
//!
//! Model and parser for the XML comment document that drives gh-pr-commenter.
//!
//! A comment file holds an ordered list of review annotations to post to a
//! pull request. Two kinds exist: a plain conversation comment and a comment
//! anchored to a line of a changed file. The element tag decides the kind;
//! the mapping is closed, so an unknown tag fails the whole parse instead of
//! being skipped.
//!
//! ```xml
//! <comments>
//!     <comment>LGTM overall, two remarks below.</comment>
//!     <codelinecomment filePath="src/main.rs" lineNumber="10">fix this</codelinecomment>
//! </comments>
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use gh_comment_file::CommentList;
//!
//! let list = CommentList::parse_str(
//!     "<comments><comment>LGTM</comment></comments>",
//! ).unwrap();
//! assert_eq!(list.comments.len(), 1);
//! ```

pub mod model;
pub mod parser;

pub use model::{CodeLineComment, Comment, CommentList, SimpleComment};
pub use parser::{CommentFileError, TAG_CODE_LINE_COMMENT, TAG_ROOT, TAG_SIMPLE_COMMENT};
