use crate::error::IngestError;
use crate::ir::FishboneTree;

/// Cell separator of the tabular source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
}

impl Delimiter {
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "tsv" | "tab" => Self::Tab,
            _ => Self::Comma,
        }
    }

    fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Semicolon => ';',
            Self::Tab => '\t',
        }
    }
}

/// Groups delimiter-separated text into a [`FishboneTree`].
///
/// Role assignment is positional: the first four columns are Classification,
/// Category, Cause and Sub-cause regardless of what the header row calls
/// them. The first row is always treated as the header and skipped. Rows
/// missing any of the first three cells are dropped entirely; a blank
/// Sub-cause cell is dropped rather than recorded as an empty sub-cause.
/// Extra columns are ignored.
pub fn parse_table(input: &str, delimiter: Delimiter) -> Result<FishboneTree, IngestError> {
    let mut tree = FishboneTree::new();

    for (idx, raw_line) in input.lines().enumerate() {
        if idx == 0 {
            continue;
        }
        if raw_line.trim().is_empty() {
            continue;
        }
        let cells = split_row(raw_line, delimiter, idx + 1)?;
        let cell = |i: usize| cells.get(i).map(|c| c.trim()).filter(|c| !c.is_empty());
        let (Some(classification), Some(category), Some(cause)) = (cell(0), cell(1), cell(2))
        else {
            continue;
        };
        tree.insert_row(classification, category, cause, cell(3));
    }

    Ok(tree)
}

/// Splits one row into cells. Cells may be wrapped in double quotes to
/// protect embedded delimiters; `""` inside a quoted cell is a literal quote.
fn split_row(line: &str, delimiter: Delimiter, line_no: usize) -> Result<Vec<String>, IngestError> {
    let sep = delimiter.as_char();
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' && current.trim().is_empty() {
            current.clear();
            in_quotes = true;
        } else if ch == sep {
            cells.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }

    if in_quotes {
        return Err(IngestError::UnterminatedQuote { line: line_no });
    }
    cells.push(current);
    Ok(cells)
}
