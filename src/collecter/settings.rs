use nmea_gsv::prelude::Constellation;

/// Output format
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum Format {
    /// One human readable line per sentence
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Collecter [Settings]
#[derive(Debug, Clone)]
pub struct Settings {
    /// Output [Format]
    pub format: Format,

    /// Output file. Stdout when undefined.
    pub output: Option<String>,

    /// GZip compression of the output file
    pub gzip: bool,

    /// Constellations to forward. All of them when empty.
    pub constellations: Vec<Constellation>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: None,
            gzip: false,
            format: Format::Text,
            constellations: Vec::new(),
        }
    }
}

impl Settings {
    /// Output file name, if any
    pub fn filename(&self) -> Option<String> {
        let output = self.output.as_ref()?;

        if self.gzip && !output.ends_with(".gz") {
            Some(format!("{}.gz", output))
        } else {
            Some(output.to_string())
        }
    }

    /// True if sentences emitted by this [Constellation] should be forwarded
    pub fn accepts(&self, constellation: Option<Constellation>) -> bool {
        if self.constellations.is_empty() {
            return true;
        }

        match constellation {
            Some(constellation) => self.constellations.contains(&constellation),
            None => false,
        }
    }
}
