use hifitime::prelude::Duration;

use nmea_gsv::prelude::Gsv;

/// Collection statistics
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Report {
    /// GSV sentences released
    pub sentences: usize,
    /// Satellites released, summed over all sentences
    pub satellites: usize,
    /// Sentences rejected by the constellation filter
    pub filtered: usize,
    /// Sentences that could not be framed
    pub errors: usize,
    /// Collection [Duration]
    pub uptime: Duration,
}

impl Report {
    pub fn latch_gsv(&mut self, gsv: &Gsv) {
        self.sentences += 1;
        self.satellites += gsv.satellites.len();
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} sentences ({} satellites) | {} filtered | {} errors | uptime {}",
            self.sentences, self.satellites, self.filtered, self.errors, self.uptime,
        )
    }
}

#[cfg(test)]
mod test {
    use super::Report;
    use nmea_gsv::prelude::Sentence;
    use std::str::FromStr;

    #[test]
    fn test_latch_gsv() {
        let mut report = Report::default();

        for line in [
            "$GPGSV,1,1,02,,00,000,00,05,10,200,00*7D",
            "$GLGSV,1,1,01,65,20,100,30*57",
        ] {
            let gsv = Sentence::from_str(line).unwrap().to_gsv().unwrap();
            report.latch_gsv(&gsv);
        }

        assert_eq!(report.sentences, 2);
        assert_eq!(report.satellites, 2);
        assert_eq!(report.errors, 0);
    }
}
