//! the parser adaptor (§6.1): `parse(path) → Node`. the structured-data
//! parser itself is out of scope (§1) and is consumed as an external
//! black box; this module is the thin seam that turns `serde_json`'s
//! generic `Value` into our own [`Node`] and maps its errors onto the
//! closed taxonomy (§6.4).

use crate::error::{Error, Result};
use crate::node::{Key, Node};
use std::path::Path;
use std::rc::Rc;

/// parse the document at `path`. a missing file is not an error here — the
/// watcher tick (§4.6) treats an absent tracked file as the canonical empty
/// object rather than failing the tick.
pub fn parse(path: &Path) -> Result<Node> {
    if path.is_dir() {
        return Err(Error::InvalidFilePath(path.to_path_buf()));
    }
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Node::empty_object()),
        Err(source) => return Err(Error::Io { path: path.to_path_buf(), source }),
    };
    parse_str(path, &contents)
}

/// parse already-read file contents. an empty file parses as the empty
/// object (§4.6 "content validity policy" extends the same leniency the
/// watcher gives an absent file to a present-but-empty one).
pub fn parse_str(path: &Path, contents: &str) -> Result<Node> {
    if contents.trim().is_empty() {
        return Ok(Node::empty_object());
    }
    let value: serde_json::Value = serde_json::from_str(contents).map_err(|err| classify(path, &err))?;
    value_to_node(path, value)
}

fn classify(path: &Path, err: &serde_json::Error) -> Error {
    use serde_json::error::Category;
    match err.classify() {
        Category::Eof => Error::UnexpectedEndOfInput(path.to_path_buf()),
        Category::Syntax => Error::InvalidSyntax(path.to_path_buf(), err.to_string()),
        Category::Data => Error::InvalidType(path.to_path_buf(), err.to_string()),
        Category::Io => Error::InvalidSyntax(path.to_path_buf(), err.to_string()),
    }
}

fn value_to_node(path: &Path, value: serde_json::Value) -> Result<Node> {
    match value {
        serde_json::Value::Null => Ok(Node::Null),
        serde_json::Value::Bool(b) => Ok(Node::Bool(b)),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(Node::Number)
            .ok_or_else(|| Error::InvalidType(path.to_path_buf(), format!("number {n} has no f64 representation"))),
        serde_json::Value::String(s) => Ok(Node::String(s)),
        serde_json::Value::Array(items) =>
            Ok(Node::Array(items.into_iter().map(|v| value_to_node(path, v)).collect::<Result<Vec<_>>>()?)),
        serde_json::Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (k, v) in map {
                let key: Key = Rc::from(k.as_str());
                entries.push((key, value_to_node(path, v)?));
            }
            Ok(Node::Object(entries))
        }
    }
}
