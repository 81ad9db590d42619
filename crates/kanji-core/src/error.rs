/// Fatal input-integrity failure raised while building the dataset.
///
/// Each variant means the source data no longer has the shape the pipeline
/// was written against. An import stops at the first one and never persists
/// a partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    #[error("duplicate stroke-tree record for {0}")]
    DuplicateStrokeRecord(char),

    #[error("{owner}: component {component:?} is not an ideograph, kana or radical")]
    InvalidComponent { owner: char, component: char },

    #[error("supplemental entry for {0}, which is not a kanji")]
    NotKanji(char),

    #[error("supplemental entry for {0}, which has no stroke-tree decomposition")]
    MissingDecomposition(char),

    #[error("malformed supplemental line {line}: {text:?}")]
    MalformedSupplement { line: usize, text: String },

    #[error("literal {0:?} is not exactly one codepoint")]
    NotSingleCodepoint(String),

    #[error("{0}: codepoint outside the covered ideograph ranges")]
    UnexpectedCategory(char),

    #[error("{char}: unexpected grade code {grade}")]
    UnexpectedGrade { char: char, grade: u32 },

    #[error("{char}: classical radical {rad} out of range 1..=214")]
    RadicalOutOfRange { char: char, rad: u32 },

    #[error("{0}: stroke count must be positive")]
    ZeroStrokes(char),

    #[error("{char}: invalid {field} reading {reading:?}")]
    InvalidReading {
        char: char,
        field: &'static str,
        reading: String,
    },

    #[error("{char}: {field} value {value:?} contains a line break")]
    EmbeddedNewline {
        char: char,
        field: &'static str,
        value: String,
    },

    #[error("{char}: empty {field} value")]
    EmptyField { char: char, field: &'static str },

    #[error("{char}: decomposition lacks the forms of radical {rad} and no shape exception applies")]
    ComponentMismatch { char: char, rad: u8 },
}
