use std::io::BufRead;
use std::str::FromStr;

use kanji_core::entry::{KanjidicRecord, Meaning};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use super::SourceError;

/// Which record field the current text node belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    Literal,
    Grade,
    Strokes,
    Freq,
    Jlpt,
    Skip,
    Radical,
    On,
    Kun,
    Nanori,
    Meaning(Option<String>),
}

/// Stream `<character>` elements out of a KANJIDIC2 document.
///
/// Only the first `stroke_count`, `freq`, `jlpt`, `grade` and SKIP code of a
/// character are kept; later ones are miscounts and variants. Text is trimmed.
pub fn parse_kanjidic<R: BufRead>(input: R) -> Result<Vec<KanjidicRecord>, SourceError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut records = Vec::new();
    let mut current: Option<KanjidicRecord> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if e.name().as_ref() == b"character" {
                    current = Some(KanjidicRecord::default());
                } else if current.is_some() {
                    field = field_of(&e)?;
                }
            }
            Event::Text(t) => {
                if let (Some(record), Some(f)) = (current.as_mut(), field.take()) {
                    let text = t.unescape()?;
                    apply(record, f, text.trim())?;
                }
            }
            Event::End(e) => {
                field = None;
                if e.name().as_ref() == b"character" {
                    records.extend(current.take());
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    debug!(records = records.len(), "kanjidic parsed");
    Ok(records)
}

fn field_of(e: &BytesStart<'_>) -> Result<Option<Field>, SourceError> {
    let field = match e.name().as_ref() {
        b"literal" => Some(Field::Literal),
        b"grade" => Some(Field::Grade),
        b"stroke_count" => Some(Field::Strokes),
        b"freq" => Some(Field::Freq),
        b"jlpt" => Some(Field::Jlpt),
        b"q_code" => (attr(e, "qc_type")?.as_deref() == Some("skip")).then_some(Field::Skip),
        b"rad_value" => {
            (attr(e, "rad_type")?.as_deref() == Some("classical")).then_some(Field::Radical)
        }
        b"reading" => match attr(e, "r_type")?.as_deref() {
            Some("ja_on") => Some(Field::On),
            Some("ja_kun") => Some(Field::Kun),
            _ => None,
        },
        b"nanori" => Some(Field::Nanori),
        b"meaning" => Some(Field::Meaning(attr(e, "m_lang")?)),
        _ => None,
    };
    Ok(field)
}

fn attr(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, SourceError> {
    match e.try_get_attribute(name).map_err(quick_xml::Error::from)? {
        Some(a) => Ok(Some(a.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn apply(record: &mut KanjidicRecord, field: Field, text: &str) -> Result<(), SourceError> {
    match field {
        Field::Literal => record.literal = text.to_string(),
        Field::Grade => {
            if record.grade.is_none() {
                record.grade = Some(number(record, "grade", text)?);
            }
        }
        Field::Strokes => {
            if record.strokes == 0 {
                record.strokes = number(record, "stroke_count", text)?;
            }
        }
        Field::Freq => {
            if record.freq.is_none() {
                record.freq = Some(number(record, "freq", text)?);
            }
        }
        Field::Jlpt => {
            if record.jlpt.is_none() {
                record.jlpt = Some(number(record, "jlpt", text)?);
            }
        }
        Field::Skip => {
            if record.skip.is_none() {
                record.skip = Some(text.to_string());
            }
        }
        Field::Radical => {
            if record.rad == 0 {
                record.rad = number(record, "rad_value", text)?;
            }
        }
        Field::On => record.on.push(text.to_string()),
        Field::Kun => record.kun.push(text.to_string()),
        Field::Nanori => record.nanori.push(text.to_string()),
        Field::Meaning(lang) => record.meanings.push(Meaning {
            text: text.to_string(),
            lang,
        }),
    }
    Ok(())
}

fn number<T: FromStr>(record: &KanjidicRecord, what: &str, text: &str) -> Result<T, SourceError> {
    text.parse()
        .map_err(|_| SourceError::Parse(format!("{}: invalid {what} {text:?}", record.literal)))
}
