// SPDX-License-Identifier: MPL-2.0
//! Parser for `ListObjectsV2` listing payloads.
//!
//! Only the fields the gallery needs are extracted:
//! - `ListBucketResult/Contents/Key`
//! - `ListBucketResult/Contents/LastModified`
//! - `ListBucketResult/NextContinuationToken`
//!
//! Anything that is not a complete `ListBucketResult` document is rejected
//! with [`Error::Format`]. A misconfigured endpoint typically answers with an
//! HTML page (a website index or a login form); that case gets its own message
//! because it is the most common setup mistake.

use crate::domain::gallery::ObjectRecord;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

const ROOT_ELEMENT: &str = "ListBucketResult";

/// How much of the payload is inspected for HTML markers.
const HTML_SNIFF_LEN: usize = 512;

/// One parsed listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub objects: Vec<ObjectRecord>,
    /// Present when the store has more entries to return.
    pub next_continuation_token: Option<String>,
}

/// A `Contents` element being assembled.
#[derive(Default)]
struct PartialEntry {
    key: Option<String>,
    last_modified: Option<DateTime<Utc>>,
}

/// Parses one listing page.
///
/// # Errors
///
/// Returns [`Error::Format`] if the payload is not well-formed XML, looks like
/// an HTML page, has a root other than `ListBucketResult`, is truncated, or
/// contains a `Contents` entry without a valid key or timestamp.
pub fn parse_listing(payload: &str) -> Result<ListingPage> {
    if looks_like_html(payload) {
        return Err(Error::Format(
            "endpoint returned an HTML page instead of a bucket listing; \
             check that the URL points at the bucket API and not at a website"
                .to_string(),
        ));
    }

    // No text trimming: keys may legitimately start or end with whitespace.
    let mut reader = Reader::from_str(payload);

    let mut page = ListingPage::default();
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut entry: Option<PartialEntry> = None;
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if path.is_empty() {
                    check_root(&name, saw_root)?;
                    saw_root = true;
                }
                if path.len() == 1 && name == "Contents" {
                    entry = Some(PartialEntry::default());
                }
                path.push(name);
                text.clear();
            }
            Ok(Event::Empty(ref e)) => {
                // Self-closing elements carry no value; only the root matters.
                if path.is_empty() {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    check_root(&name, saw_root)?;
                    saw_root = true;
                }
            }
            Ok(Event::Text(ref e)) => {
                let value = e.unescape().map_err(|err| {
                    Error::Format(format!("invalid text in listing payload: {err}"))
                })?;
                text.push_str(&value);
            }
            Ok(Event::End(_)) => {
                let Some(name) = path.pop() else {
                    return Err(Error::Format("unbalanced listing payload".to_string()));
                };
                match (path.len(), name.as_str()) {
                    (2, "Key") if is_contents(&path) => {
                        if let Some(ref mut current) = entry {
                            current.key = Some(std::mem::take(&mut text));
                        }
                    }
                    (2, "LastModified") if is_contents(&path) => {
                        if let Some(ref mut current) = entry {
                            current.last_modified = Some(parse_timestamp(&text)?);
                        }
                    }
                    (1, "Contents") => {
                        if let Some(finished) = entry.take() {
                            page.objects.push(finish_entry(finished)?);
                        }
                    }
                    (1, "NextContinuationToken") => {
                        let token = std::mem::take(&mut text);
                        if !token.trim().is_empty() {
                            page.next_continuation_token = Some(token);
                        }
                    }
                    _ => {}
                }
                text.clear();
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(Error::Format(format!(
                    "malformed listing XML at byte {}: {err}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }

    if !saw_root {
        return Err(Error::Format("empty listing payload".to_string()));
    }
    if !path.is_empty() {
        return Err(Error::Format(format!(
            "truncated listing payload: <{}> never closed",
            path.join("/")
        )));
    }

    Ok(page)
}

fn check_root(name: &str, saw_root: bool) -> Result<()> {
    if saw_root {
        return Err(Error::Format(
            "listing payload has more than one root element".to_string(),
        ));
    }
    if name.eq_ignore_ascii_case("html") {
        return Err(Error::Format(
            "endpoint returned an HTML page instead of a bucket listing".to_string(),
        ));
    }
    if name != ROOT_ELEMENT {
        return Err(Error::Format(format!(
            "expected <{ROOT_ELEMENT}> but found <{name}>"
        )));
    }
    Ok(())
}

fn is_contents(path: &[String]) -> bool {
    path.get(1).is_some_and(|parent| parent == "Contents")
}

fn finish_entry(entry: PartialEntry) -> Result<ObjectRecord> {
    match (entry.key, entry.last_modified) {
        (Some(key), Some(last_modified)) if !key.is_empty() => {
            Ok(ObjectRecord::new(key, last_modified))
        }
        (Some(key), None) if !key.is_empty() => Err(Error::Format(format!(
            "listing entry {key:?} has no LastModified"
        ))),
        _ => Err(Error::Format("listing entry without a Key".to_string())),
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| Error::Format(format!("invalid LastModified {value:?}: {err}")))
}

fn looks_like_html(payload: &str) -> bool {
    let head: String = payload
        .trim_start()
        .chars()
        .take(HTML_SNIFF_LEN)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html") || head.contains("<html")
}
