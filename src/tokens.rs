//! Lazy splitting of a byte stream into whitespace-delimited tokens.

use std::io::{self, BufRead};

/// Bytes that separate tokens.
fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Iterator over the tokens of a buffered reader.
///
/// Tokens are maximal runs of non-separator bytes and are not required to be
/// valid UTF-8. The reader is consumed incrementally, one buffer at a time.
#[derive(Debug)]
pub struct Tokens<R> {
    reader: R,
    done: bool,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }

    fn next_token(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut token = Vec::new();

        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if buf.is_empty() {
                return Ok((!token.is_empty()).then_some(token));
            }

            let mut used = 0;
            let mut complete = false;
            for &byte in buf {
                used += 1;
                if is_separator(byte) {
                    if !token.is_empty() {
                        complete = true;
                        break;
                    }
                } else {
                    token.push(byte);
                }
            }
            self.reader.consume(used);

            if complete {
                return Ok(Some(token));
            }
        }
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    fn collect(input: &[u8]) -> Vec<Vec<u8>> {
        Tokens::new(input).map(|t| t.unwrap()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(collect(b"").is_empty());
        assert!(collect(b" \n\t\r\n ").is_empty());
    }

    #[test]
    fn test_mixed_whitespace_runs() {
        let tokens = collect(b"  a\tb\n\nc  \r\nd\x0be\x0cf");
        assert_eq!(
            tokens,
            vec![
                b"a".to_vec(),
                b"b".to_vec(),
                b"c".to_vec(),
                b"d".to_vec(),
                b"e".to_vec(),
                b"f".to_vec()
            ]
        );
    }

    #[test]
    fn test_last_token_without_newline() {
        assert_eq!(collect(b"one two"), vec![b"one".to_vec(), b"two".to_vec()]);
    }

    #[test]
    fn test_non_utf8_bytes_are_kept() {
        assert_eq!(collect(b"\xff\xfe x"), vec![vec![0xff, 0xfe], b"x".to_vec()]);
    }

    #[test]
    fn test_token_spanning_buffer_boundary() {
        // A capacity of 3 forces every token here across several fill_buf calls.
        let reader = BufReader::with_capacity(3, &b"alpha beta\ngamma"[..]);
        let tokens: Vec<Vec<u8>> = Tokens::new(reader).map(|t| t.unwrap()).collect();
        assert_eq!(
            tokens,
            vec![b"alpha".to_vec(), b"beta".to_vec(), b"gamma".to_vec()]
        );
    }

    #[test]
    fn test_read_error_is_reported_once() {
        struct Failing;

        impl io::Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("boom"))
            }
        }

        let mut tokens = Tokens::new(BufReader::new(Failing));
        assert!(matches!(tokens.next(), Some(Err(_))));
        assert!(tokens.next().is_none());
    }
}
