//! Wire framing.
//!
//! Every structured message shares the debugger stdout with arbitrary text, so it is wrapped
//! into a self-delimiting frame:
//!
//! ```text
//! <gdbjs:cmd:TAG PAYLOAD TAG:cmd:gdbjs>
//! <gdbjs:event:TAG PAYLOAD TAG:event:gdbjs>
//! ```
//!
//! Payload is a compact JSON document where `<` and `>` are always written as unicode escapes,
//! so a payload can never contain a closing delimiter.

use crate::error::{Error, Result};
use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Namespace literal shared by both frame kinds.
pub const NAMESPACE: &str = "gdbjs";

#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumString, IntoStaticStr)]
pub enum Kind {
    /// Result of a client issued command.
    #[strum(serialize = "cmd")]
    Command,
    /// Notification fired by the debugger itself.
    #[strum(serialize = "event")]
    Event,
}

/// Single protocol message found on (or going to) the wire.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Frame {
    pub kind: Kind,
    pub tag: String,
    /// Serialized payload, exactly as it appears between delimiters.
    pub payload: String,
}

impl Frame {
    /// Parse payload back into a JSON value.
    pub fn payload_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.payload)
    }

    /// Render frame exactly as it was read from the wire.
    pub fn to_wire(&self) -> String {
        wrap(self.kind, &self.tag, &self.payload)
    }
}

/// Piece of a text stream: either opaque text or a well-formed frame.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Segment<'a> {
    Text(&'a str),
    Frame(Frame),
}

fn wrap(kind: Kind, tag: &str, payload: &str) -> String {
    format!("<{NAMESPACE}:{kind}:{tag} {payload} {tag}:{kind}:{NAMESPACE}>")
}

/// Tag must be a single word that can't be confused with delimiter parts.
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && !tag
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | ':'))
}

/// Serialize a payload into compact JSON with angle brackets escaped.
pub fn serialize_payload<T: Serialize + ?Sized>(payload: &T) -> Result<String> {
    let json = serde_json::to_string(payload)?;
    // outside of string literals compact json never contains angle brackets
    Ok(json.replace('<', "\\u003c").replace('>', "\\u003e"))
}

/// Encode a payload into a frame of given kind.
pub fn encode<T: Serialize + ?Sized>(kind: Kind, tag: &str, payload: &T) -> Result<String> {
    if !is_valid_tag(tag) {
        return Err(Error::InvalidTag(tag.to_string()));
    }
    Ok(wrap(kind, tag, &serialize_payload(payload)?))
}

/// Split text into opaque text parts and well-formed frames, in order of appearance.
/// Scan is non-overlapping, partial or malformed delimiters stay in text parts.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let opening = format!("<{NAMESPACE}:");
    let mut result = vec![];
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(pos) = text[cursor..].find(&opening) {
        let start = cursor + pos;
        match frame_at(&text[start..]) {
            Some((frame, len)) => {
                if start > text_start {
                    result.push(Segment::Text(&text[text_start..start]));
                }
                result.push(Segment::Frame(frame));
                cursor = start + len;
                text_start = cursor;
            }
            None => cursor = start + opening.len(),
        }
    }

    if text_start < text.len() {
        result.push(Segment::Text(&text[text_start..]));
    }
    result
}

/// Find every well-formed frame in text.
pub fn decode_all(text: &str) -> Vec<Frame> {
    segments(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Frame(frame) => Some(frame),
            Segment::Text(_) => None,
        })
        .collect()
}

/// Parse a frame at the start of `s`, return it with a length of consumed text.
fn frame_at(s: &str) -> Option<(Frame, usize)> {
    let rest = s.strip_prefix('<')?.strip_prefix(NAMESPACE)?.strip_prefix(':')?;
    let (kind, rest) = rest.split_once(':')?;
    let kind = kind.parse::<Kind>().ok()?;

    let (tag, body) = rest.split_once(' ')?;
    if !is_valid_tag(tag) {
        return None;
    }

    let closing = format!(" {tag}:{kind}:{NAMESPACE}>");
    let payload_len = body.find(&closing)?;
    let consumed = s.len() - body.len() + payload_len + closing.len();

    Some((
        Frame {
            kind,
            tag: tag.to_string(),
            payload: body[..payload_len].to_string(),
        },
        consumed,
    ))
}
