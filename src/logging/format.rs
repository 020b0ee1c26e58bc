//! %-style record formatter
//!
//! Templates use the `%(field)[-][width][.precision]conversion` syntax, e.g.
//! `%(asctime)-15s [%(name)5s:%(levelname)s] %(message)s`. Templates are
//! compiled once and rendered per record.

use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

use super::record::LogRecord;

/// Timestamp layout used for `%(asctime)s`, millisecond resolution
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Errors produced while compiling a format template
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unterminated field name starting at offset {0}")]
    Unterminated(usize),
    #[error("incomplete format specifier at offset {0}")]
    Incomplete(usize),
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("conversion '{conversion}' is not supported for field '{field}'")]
    BadConversion { field: String, conversion: char },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    AscTime,
    Name,
    LevelName,
    LevelNo,
    Message,
    Created,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "asctime" => Some(Field::AscTime),
            "name" => Some(Field::Name),
            "levelname" => Some(Field::LevelName),
            "levelno" => Some(Field::LevelNo),
            "message" => Some(Field::Message),
            "created" => Some(Field::Created),
            _ => None,
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Field::LevelNo | Field::Created)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Str,
    Int,
    Float,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Placeholder {
    field: Field,
    left_align: bool,
    zero_pad: bool,
    width: usize,
    precision: Option<usize>,
    conversion: Conversion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// Compiled record formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    template: String,
    segments: Vec<Segment>,
}

impl Formatter {
    /// Compile a %-style template
    pub fn parse(template: &str) -> Result<Self, FormatError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            match chars.next() {
                Some((_, '%')) => literal.push('%'),
                Some((_, '(')) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    let placeholder = parse_placeholder(&mut chars, offset)?;
                    segments.push(Segment::Placeholder(placeholder));
                }
                _ => return Err(FormatError::Incomplete(offset)),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    /// The template this formatter was compiled from
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render a record into a single line (no trailing newline)
    pub fn format(&self, record: &LogRecord) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(placeholder) => render(placeholder, record, &mut out),
            }
        }
        out
    }
}

fn parse_placeholder(
    chars: &mut Peekable<CharIndices<'_>>,
    start: usize,
) -> Result<Placeholder, FormatError> {
    let mut key = String::new();
    loop {
        match chars.next() {
            Some((_, ')')) => break,
            Some((_, c)) => key.push(c),
            None => return Err(FormatError::Unterminated(start)),
        }
    }
    let field = Field::from_key(&key).ok_or_else(|| FormatError::UnknownField(key.clone()))?;

    let left_align = chars.next_if(|&(_, c)| c == '-').is_some();
    let zero_pad = chars.next_if(|&(_, c)| c == '0').is_some();
    let width = take_number(chars).unwrap_or(0);
    let precision = if chars.next_if(|&(_, c)| c == '.').is_some() {
        Some(take_number(chars).unwrap_or(0))
    } else {
        None
    };

    let conversion = match chars.next() {
        Some((_, 's')) => Conversion::Str,
        Some((_, 'd')) if field.is_numeric() => Conversion::Int,
        Some((_, 'f')) if field.is_numeric() => Conversion::Float,
        Some((_, c)) => {
            return Err(FormatError::BadConversion {
                field: key,
                conversion: c,
            })
        }
        None => return Err(FormatError::Incomplete(start)),
    };

    Ok(Placeholder {
        field,
        left_align,
        zero_pad,
        width,
        precision,
        conversion,
    })
}

fn take_number(chars: &mut Peekable<CharIndices<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some((_, c)) = chars.next_if(|(_, c)| c.is_ascii_digit()) {
        let digit = c.to_digit(10).unwrap_or(0) as usize;
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit));
    }
    value
}

fn created_seconds(record: &LogRecord) -> f64 {
    record.created.timestamp() as f64 + f64::from(record.created.timestamp_subsec_micros()) / 1e6
}

fn render(placeholder: &Placeholder, record: &LogRecord, out: &mut String) {
    let value = match (placeholder.conversion, placeholder.field) {
        (Conversion::Int, Field::LevelNo) => record.level.as_number().to_string(),
        (Conversion::Int, _) => (created_seconds(record) as i64).to_string(),
        (Conversion::Float, Field::LevelNo) => format!(
            "{:.*}",
            placeholder.precision.unwrap_or(6),
            f64::from(record.level.as_number())
        ),
        (Conversion::Float, _) => format!(
            "{:.*}",
            placeholder.precision.unwrap_or(6),
            created_seconds(record)
        ),
        (Conversion::Str, field) => {
            let text = match field {
                Field::AscTime => record.created.format(TIME_FORMAT).to_string(),
                Field::Name => record.name.clone(),
                Field::LevelName => record.level.as_str().to_string(),
                Field::LevelNo => record.level.as_number().to_string(),
                Field::Message => record.message.clone(),
                Field::Created => created_seconds(record).to_string(),
            };
            match placeholder.precision {
                Some(max) => text.chars().take(max).collect(),
                None => text,
            }
        }
    };

    let len = value.chars().count();
    let pad = placeholder.width.saturating_sub(len);
    if placeholder.left_align {
        out.push_str(&value);
        out.extend(std::iter::repeat(' ').take(pad));
    } else {
        let fill = if placeholder.zero_pad && placeholder.conversion != Conversion::Str {
            '0'
        } else {
            ' '
        };
        out.extend(std::iter::repeat(fill).take(pad));
        out.push_str(&value);
    }
}
