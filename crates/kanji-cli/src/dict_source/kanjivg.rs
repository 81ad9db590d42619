use std::io::BufRead;

use kanji_core::decompose::StrokeRecord;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use super::SourceError;

const ID_PREFIX: &str = "kvg:kanji_";

/// Read every `<kanji>` of a KanjiVG document as a [`StrokeRecord`].
///
/// The elements are the first codepoint of each nested group's
/// `kvg:element` label, in document order. Filtering and validation are left
/// to the resolver.
pub fn parse_kanjivg<R: BufRead>(input: R) -> Result<Vec<StrokeRecord>, SourceError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut records = Vec::new();
    let mut current: Option<StrokeRecord> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"kanji" => {
                current = Some(StrokeRecord {
                    char: kanji_char(&e)?,
                    elements: Vec::new(),
                });
            }
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"g" => {
                if let Some(record) = current.as_mut() {
                    let label = e
                        .try_get_attribute("kvg:element")
                        .map_err(quick_xml::Error::from)?;
                    if let Some(label) = label {
                        record.elements.extend(label.unescape_value()?.chars().next());
                    }
                }
            }
            Event::End(e) if e.name().as_ref() == b"kanji" => {
                records.extend(current.take());
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    debug!(records = records.len(), "kanjivg parsed");
    Ok(records)
}

/// Decode `id="kvg:kanji_0732b"` into its character.
fn kanji_char(e: &BytesStart<'_>) -> Result<char, SourceError> {
    let id = e
        .try_get_attribute("id")
        .map_err(quick_xml::Error::from)?
        .ok_or_else(|| SourceError::Parse("<kanji> without id".to_string()))?
        .unescape_value()?
        .into_owned();
    id.strip_prefix(ID_PREFIX)
        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
        .and_then(char::from_u32)
        .ok_or_else(|| SourceError::Parse(format!("invalid kanji id {id:?}")))
}
