/// Sentence source
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Live serial port
    Serial { port: String, baud_rate: u32 },
    /// Replay file. ".gz" files are decompressed on the fly.
    File(String),
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// [Input] to read from
    pub input: Input,
    /// Sentences must carry a valid checksum
    pub checksum: bool,
}

impl Settings {
    /// True when the input is a file, that is, it terminates.
    pub fn is_replay(&self) -> bool {
        matches!(self.input, Input::File(_))
    }

    /// True when the replay file is gzip compressed
    pub fn is_gzip(&self) -> bool {
        match &self.input {
            Input::File(path) => path.ends_with(".gz"),
            Input::Serial { .. } => false,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: Input::Serial {
                port: "/dev/ttyUSB0".to_string(),
                baud_rate: 115_200,
            },
            checksum: true,
        }
    }
}
