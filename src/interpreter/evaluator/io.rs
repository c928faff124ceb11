use std::io::{self, BufRead};

/// Supplies one line of text per `scan` or `press`.
///
/// Reading may block. A source that has nothing more to give returns
/// `Ok(None)`, which the interpreter reports as exhausted input instead of
/// waiting forever.
pub trait LineSource {
    /// Reads the next line without its line terminator.
    ///
    /// # Errors
    /// Returns any I/O error raised by the underlying reader.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<B: BufRead> LineSource for B {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();

        if self.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_lose_their_terminators() {
        let mut input: &[u8] = b"first\r\nsecond\n\nlast";
        assert_eq!(input.next_line().unwrap(), Some("first".to_string()));
        assert_eq!(input.next_line().unwrap(), Some("second".to_string()));
        assert_eq!(input.next_line().unwrap(), Some(String::new()));
        assert_eq!(input.next_line().unwrap(), Some("last".to_string()));
        assert_eq!(input.next_line().unwrap(), None);
    }

    #[test]
    fn empty_reader_is_exhausted() {
        assert_eq!(io::empty().next_line().unwrap(), None);
    }
}
