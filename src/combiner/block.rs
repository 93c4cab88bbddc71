use std::io::{self, Write};

const MARKER_FILL: &str = "-----";

pub fn start_marker(file_name: &str) -> String {
    format!("{} Start of {} {}", MARKER_FILL, file_name, MARKER_FILL)
}

pub fn end_marker(file_name: &str) -> String {
    format!("{} End of {} {}", MARKER_FILL, file_name, MARKER_FILL)
}

/// Writes one framed block and returns the number of bytes written.
///
/// Layout: start marker line, the raw contents, a newline, end marker line,
/// blank line. Contents that already end in a newline still get the extra one.
pub fn write_block<W: Write>(writer: &mut W, file_name: &str, contents: &str) -> io::Result<u64> {
    let start = start_marker(file_name);
    let end = end_marker(file_name);

    writer.write_all(start.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.write_all(contents.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.write_all(end.as_bytes())?;
    writer.write_all(b"\n\n")?;

    Ok((start.len() + contents.len() + end.len() + 4) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert_eq!(start_marker("Board.swift"), "----- Start of Board.swift -----");
        assert_eq!(end_marker("Board.swift"), "----- End of Board.swift -----");
    }

    #[test]
    fn test_block_layout() {
        let mut out = Vec::new();
        let written = write_block(&mut out, "b.ext", "hello").unwrap();

        let expected = "----- Start of b.ext -----\nhello\n----- End of b.ext -----\n\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert_eq!(written, expected.len() as u64);
    }

    #[test]
    fn test_trailing_newline_is_not_collapsed() {
        let mut out = Vec::new();
        write_block(&mut out, "a.ext", "line\n").unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "----- Start of a.ext -----\nline\n\n----- End of a.ext -----\n\n"
        );
    }

    #[test]
    fn test_empty_contents() {
        let mut out = Vec::new();
        write_block(&mut out, "empty.ext", "").unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "----- Start of empty.ext -----\n\n----- End of empty.ext -----\n\n"
        );
    }
}
