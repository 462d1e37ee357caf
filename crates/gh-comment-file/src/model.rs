//! Data structures for the parsed comment document.

use crate::parser::{self, CommentFileError};

/// A single review annotation from the comment file.
///
/// Closed sum type: the document schema knows exactly these two kinds and the
/// parser rejects everything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Comment {
    /// A comment for the pull request conversation, without a code anchor.
    Simple(SimpleComment),
    /// A comment anchored to a specific line of a changed file.
    CodeLine(CodeLineComment),
}

/// A comment that shows up in the conversation section of the pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleComment {
    /// Comment body (markdown).
    pub text: String,
}

/// A comment on a given line in a given file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeLineComment {
    /// Path of the file, relative to the repository root.
    pub file_path: String,
    /// Line number in the post-change version of the file.
    pub line_number: u64,
    /// Comment body (markdown).
    pub text: String,
}

/// The ordered list of comments parsed from one document.
///
/// Document order is preserved and semantically significant: comments are
/// posted in the order they were declared. Equality and hash are structural
/// over the contained sequence.
///
/// The list is always present after a successful parse. A `<comments/>`
/// element with no children parses to an empty list, never to an absent one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CommentList {
    /// The comments in document order.
    pub comments: Vec<Comment>,
}

impl CommentList {
    /// Parse a comment document from an XML string.
    ///
    /// Fails on malformed XML, on a root element other than `<comments>`,
    /// and on any child tag outside the known two. No partial list is ever
    /// returned.
    pub fn parse_str(input: &str) -> Result<Self, CommentFileError> {
        parser::parse_comment_file(input)
    }

    /// Serialize the list back to an XML document using the same tag mapping
    /// the parser dispatches on.
    pub fn to_xml_string(&self) -> String {
        parser::write_comment_file(self)
    }

    /// True when there is nothing to post.
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Number of comments in the document.
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// True when at least one comment is anchored to a code line.
    pub fn has_code_line_comments(&self) -> bool {
        self.comments
            .iter()
            .any(|c| matches!(c, Comment::CodeLine(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(list: &CommentList) -> u64 {
        let mut hasher = DefaultHasher::new();
        list.hash(&mut hasher);
        hasher.finish()
    }

    fn sample_list() -> CommentList {
        CommentList {
            comments: vec![
                Comment::Simple(SimpleComment {
                    text: "LGTM".to_string(),
                }),
                Comment::CodeLine(CodeLineComment {
                    file_path: "a.go".to_string(),
                    line_number: 10,
                    text: "fix this".to_string(),
                }),
            ],
        }
    }

    #[test]
    fn test_structural_equality() {
        let a = sample_list();
        let b = sample_list();
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
    }

    #[test]
    fn test_equal_lists_hash_equally() {
        assert_eq!(hash_of(&sample_list()), hash_of(&sample_list()));
    }

    #[test]
    fn test_order_matters_for_equality() {
        let a = sample_list();
        let mut b = sample_list();
        b.comments.reverse();
        assert_ne!(a, b);
    }

    #[test]
    fn test_default_is_empty() {
        let list = CommentList::default();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(!list.has_code_line_comments());
    }

    #[test]
    fn test_has_code_line_comments() {
        assert!(sample_list().has_code_line_comments());

        let simple_only = CommentList {
            comments: vec![Comment::Simple(SimpleComment {
                text: "hi".to_string(),
            })],
        };
        assert!(!simple_only.has_code_line_comments());
    }
}
