//! Parse the XML comment document into a [`CommentList`].
//!
//! The schema is closed: the root is `<comments>` and every child must be one
//! of the two known comment tags. The tag name decides which [`Comment`]
//! variant is built; an unknown tag aborts the parse with no partial result.

use crate::model::{CodeLineComment, Comment, CommentList, SimpleComment};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Root element of the comment document.
pub const TAG_ROOT: &str = "comments";
/// Tag dispatched to [`SimpleComment`].
pub const TAG_SIMPLE_COMMENT: &str = "comment";
/// Tag dispatched to [`CodeLineComment`].
pub const TAG_CODE_LINE_COMMENT: &str = "codelinecomment";

/// Errors that can occur while parsing a comment document.
#[derive(Debug, Error)]
pub enum CommentFileError {
    /// The document is not well-formed XML. Propagated from the XML reader.
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    /// An attribute is syntactically invalid.
    #[error("Malformed attribute: {0}")]
    Attr(#[from] AttrError),

    /// The document has no root element at all.
    #[error("Document has no root <{TAG_ROOT}> element")]
    MissingRoot,

    /// The root element is not `<comments>`.
    #[error("Expected root element <{TAG_ROOT}>, found <{tag}>")]
    UnexpectedRoot {
        /// The root tag that was found instead.
        tag: String,
    },

    /// A child element's tag matches neither known comment kind.
    #[error("Unrecognized comment element <{tag}>")]
    UnrecognizedElement {
        /// The offending tag.
        tag: String,
    },

    /// A required attribute is missing on `<codelinecomment>`.
    #[error("Missing attribute `{attribute}` on <{element}>")]
    MissingAttribute {
        /// Element the attribute belongs to.
        element: &'static str,
        /// Name of the missing attribute.
        attribute: &'static str,
    },

    /// The `lineNumber` attribute is not a non-negative integer.
    #[error("Invalid line number `{value}`")]
    InvalidLineNumber {
        /// The raw attribute value.
        value: String,
    },

    /// The document ended inside the root element.
    #[error("Unexpected end of document inside <{TAG_ROOT}>")]
    UnexpectedEof,
}

/// Parse a comment document.
///
/// Children are dispatched on their tag name and appended in document order;
/// no reordering, deduplication, or filtering happens. A root element with
/// zero children yields an empty list.
pub fn parse_comment_file(input: &str) -> Result<CommentList, CommentFileError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    // Skip the prolog and locate the root element.
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                expect_root_tag(&e)?;
                break;
            }
            Event::Empty(e) => {
                // `<comments/>` with no children is a valid, empty document.
                expect_root_tag(&e)?;
                return Ok(CommentList::default());
            }
            Event::Decl(_) | Event::DocType(_) | Event::PI(_) | Event::Comment(_) => {}
            Event::Text(_) | Event::CData(_) => {}
            Event::End(_) => return Err(CommentFileError::MissingRoot),
            Event::Eof => return Err(CommentFileError::MissingRoot),
        }
    }

    let mut comments = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = local_name(&e);
                match tag.as_str() {
                    TAG_SIMPLE_COMMENT => {
                        let text = read_element_text(&mut reader)?;
                        comments.push(Comment::Simple(SimpleComment { text }));
                    }
                    TAG_CODE_LINE_COMMENT => {
                        let (file_path, line_number) = code_line_attributes(&e)?;
                        let text = read_element_text(&mut reader)?;
                        comments.push(Comment::CodeLine(CodeLineComment {
                            file_path,
                            line_number,
                            text,
                        }));
                    }
                    _ => return Err(CommentFileError::UnrecognizedElement { tag }),
                }
            }
            Event::Empty(e) => {
                let tag = local_name(&e);
                match tag.as_str() {
                    TAG_SIMPLE_COMMENT => {
                        comments.push(Comment::Simple(SimpleComment {
                            text: String::new(),
                        }));
                    }
                    TAG_CODE_LINE_COMMENT => {
                        let (file_path, line_number) = code_line_attributes(&e)?;
                        comments.push(Comment::CodeLine(CodeLineComment {
                            file_path,
                            line_number,
                            text: String::new(),
                        }));
                    }
                    _ => return Err(CommentFileError::UnrecognizedElement { tag }),
                }
            }
            Event::End(_) => break,
            Event::Text(_) | Event::CData(_) | Event::Comment(_) | Event::PI(_) => {}
            Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => return Err(CommentFileError::UnexpectedEof),
        }
    }

    log::debug!("Parsed comment file with {} comments", comments.len());
    Ok(CommentList { comments })
}

/// Serialize a [`CommentList`] back to XML through the same tag mapping.
pub fn write_comment_file(list: &CommentList) -> String {
    use quick_xml::escape::escape;

    let mut out = String::new();
    out.push('<');
    out.push_str(TAG_ROOT);
    out.push('>');
    for comment in &list.comments {
        match comment {
            Comment::Simple(simple) => {
                out.push_str(&format!(
                    "<{tag}>{text}</{tag}>",
                    tag = TAG_SIMPLE_COMMENT,
                    text = escape(&simple.text),
                ));
            }
            Comment::CodeLine(code_line) => {
                out.push_str(&format!(
                    "<{tag} filePath=\"{path}\" lineNumber=\"{line}\">{text}</{tag}>",
                    tag = TAG_CODE_LINE_COMMENT,
                    path = escape(&code_line.file_path),
                    line = code_line.line_number,
                    text = escape(&code_line.text),
                ));
            }
        }
    }
    out.push_str("</");
    out.push_str(TAG_ROOT);
    out.push('>');
    out
}

fn expect_root_tag(e: &BytesStart) -> Result<(), CommentFileError> {
    let tag = local_name(e);
    if tag != TAG_ROOT {
        return Err(CommentFileError::UnexpectedRoot { tag });
    }
    Ok(())
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Read the text content of the element just opened, up to its end tag.
///
/// Comment elements hold text only; a nested element is outside the schema.
fn read_element_text(reader: &mut Reader<&[u8]>) -> Result<String, CommentFileError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(t) => text.push_str(&String::from_utf8_lossy(&t.into_inner())),
            Event::End(_) => break,
            Event::Start(e) | Event::Empty(e) => {
                return Err(CommentFileError::UnrecognizedElement {
                    tag: local_name(&e),
                });
            }
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => return Err(CommentFileError::UnexpectedEof),
        }
    }
    Ok(text.trim().to_string())
}

fn code_line_attributes(e: &BytesStart) -> Result<(String, u64), CommentFileError> {
    let mut file_path = None;
    let mut line_number = None;

    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.local_name().as_ref() {
            b"filePath" => file_path = Some(attr.unescape_value()?.into_owned()),
            b"lineNumber" => {
                let raw = attr.unescape_value()?;
                let parsed =
                    raw.parse::<u64>()
                        .map_err(|_| CommentFileError::InvalidLineNumber {
                            value: raw.clone().into_owned(),
                        })?;
                line_number = Some(parsed);
            }
            _ => {}
        }
    }

    let file_path = file_path.ok_or(CommentFileError::MissingAttribute {
        element: TAG_CODE_LINE_COMMENT,
        attribute: "filePath",
    })?;
    let line_number = line_number.ok_or(CommentFileError::MissingAttribute {
        element: TAG_CODE_LINE_COMMENT,
        attribute: "lineNumber",
    })?;
    Ok((file_path, line_number))
}
