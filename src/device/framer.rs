use log::warn;

/// Longest garbage we accept to buffer while waiting for a line feed.
/// Valid sentences are 82 bytes at most.
pub const MAX_PENDING_BYTES: usize = 1024;

/// Splits a byte stream into complete lines
#[derive(Debug, Default)]
pub struct Framer {
    buf: Vec<u8>,
}

impl Framer {
    /// Latches new bytes, returns all completed (non empty) lines.
    pub fn consume(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);

        let mut lines = Vec::new();

        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let line = self.buf.drain(..=pos).collect::<Vec<_>>();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim();

            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }

        if self.buf.len() > MAX_PENDING_BYTES {
            warn!("discarding {} bytes without line feed", self.buf.len());
            self.buf.clear();
        }

        lines
    }

    /// Releases pending bytes (if any), for streams ending without line feed.
    pub fn flush(&mut self) -> Option<String> {
        let pending = String::from_utf8_lossy(&self.buf).trim().to_string();
        self.buf.clear();

        if pending.is_empty() {
            None
        } else {
            Some(pending)
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Framer, MAX_PENDING_BYTES};

    #[test]
    fn test_split_lines() {
        let mut framer = Framer::default();

        let lines = framer.consume(b"$GPGSV,1,1,00*79\r\n$GPGGA,1*00\r\n\r\n");
        assert_eq!(lines, vec!["$GPGSV,1,1,00*79", "$GPGGA,1*00"]);
        assert!(framer.flush().is_none());
    }

    #[test]
    fn test_partial_lines() {
        let mut framer = Framer::default();

        assert!(framer.consume(b"$GPGSV,1,").is_empty());
        assert!(framer.consume(b"1,00").is_empty());

        let lines = framer.consume(b"*79\r\n$GLGSV");
        assert_eq!(lines, vec!["$GPGSV,1,1,00*79"]);

        assert_eq!(framer.flush(), Some("$GLGSV".to_string()));
        assert!(framer.flush().is_none());
    }

    #[test]
    fn test_garbage_is_discarded() {
        let mut framer = Framer::default();

        let garbage = vec![b'x'; MAX_PENDING_BYTES + 1];
        assert!(framer.consume(&garbage).is_empty());
        assert!(framer.flush().is_none());

        let lines = framer.consume(b"$GPGSV,1,1,00*79\n");
        assert_eq!(lines, vec!["$GPGSV,1,1,00*79"]);
    }
}
