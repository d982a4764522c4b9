//! GSV: satellites in view.
//!
//! ```text
//! $--GSV,x,x,xx,xx,xx,xxx,xx,xx,xx,xxx,xx,xx,xx,xxx,xx,xx,xx,xxx,xx,s*hh<CR><LF>
//!        | | |  |  |  |   |  \_________ satellites 2, 3 and 4 _________/ |
//!        | | |  |  |  |   SNR (dB)                                       signal ID (optional)
//!        | | |  |  |  azimuth (degrees true)
//!        | | |  |  elevation (degrees)
//!        | | |  satellite PRN (may be blank)
//!        | | satellites in view
//!        | sentence number
//!        number of sentences
//! ```
//!
//! A receiver with more than four satellites in view splits the list over
//! several sentences. Each sentence is decoded on its own: use
//! [Gsv::message_number] and [Gsv::number_of_messages] to regroup them.
use itertools::Itertools;
use log::trace;
use serde::Serialize;

use crate::{parse::parse_int, sentence::Header};

use gnss::prelude::Constellation;

/// GSV sentence identifier
pub const SENTENCE_ID: &str = "GSV";

/// GSV sentence name
pub const SENTENCE_NAME: &str = "Satellites in view";

/// Signal ID reported when the sentence does not specify one: all signals.
pub const DEFAULT_SIGNAL_ID: &str = "0";

/// Address, message count, message number and satellites in view.
const LEADING_FIELDS: usize = 4;

/// PRN, elevation, azimuth and SNR.
const FIELDS_PER_SATELLITE: usize = 4;

/// One satellite as reported in a GSV sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Satellite {
    /// PRN number, always positive
    pub prn: i32,
    /// Elevation in degrees
    pub elevation: i32,
    /// Azimuth in degrees, relative to true north
    pub azimuth: i32,
    /// Signal to noise ratio [dB]
    pub snr: i32,
}

impl std::fmt::Display for Satellite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PRN{:02} el={}° az={}° snr={}dB",
            self.prn, self.elevation, self.azimuth, self.snr
        )
    }
}

/// Decoded GSV sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gsv {
    /// Common sentence [Header]
    #[serde(flatten)]
    pub header: Header,
    /// Number of sentences in this group
    pub number_of_messages: i32,
    /// 1-based index of this sentence in the group
    pub message_number: i32,
    /// Total number of satellites in view, receiver wide
    pub satellites_in_view: i32,
    /// [Satellite]s carried by this very sentence, in order of appearance
    pub satellites: Vec<Satellite>,
    /// Signal (frequency band) identifier
    pub signal_id: String,
}

impl Gsv {
    /// True when this sentence is the last one of its group.
    pub fn is_last(&self) -> bool {
        self.message_number >= self.number_of_messages
    }

    /// [Constellation] deduced from the talker ID
    pub fn constellation(&self) -> Option<Constellation> {
        self.header.constellation()
    }
}

impl std::fmt::Display for Gsv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {}/{} in-view={} signal={} [{}]",
            self.header.talker_id,
            self.header.sentence_id,
            self.message_number,
            self.number_of_messages,
            self.satellites_in_view,
            self.signal_id,
            self.satellites.iter().join(", "),
        )
    }
}

/// Decodes one GSV sentence from its tokenized `fields`, `fields[0]` being
/// the address field already interpreted into `header`.
///
/// Malformed numeric fields decode as 0 and satellite slots without a
/// positive PRN are dropped, so this never fails.
///
/// The trailing signal ID is only detected by counting fields: one field
/// in excess of the complete satellite groups is always taken as the
/// signal ID, even when it is actually a stray token.
pub fn decode<S: AsRef<str>>(header: Header, fields: &[S]) -> Gsv {
    let field = |i: usize| fields.get(i).map(|f| f.as_ref()).unwrap_or_default();

    // negative with less than 4 fields: every field is then in excess
    let num_records = (fields.len() as isize - LEADING_FIELDS as isize)
        .div_euclid(FIELDS_PER_SATELLITE as isize);

    let num_groups = num_records.max(0) as usize;

    let mut satellites = Vec::with_capacity(num_groups);

    for i in 0..num_groups {
        let offset = LEADING_FIELDS + i * FIELDS_PER_SATELLITE;

        let prn = parse_int(field(offset));

        if prn > 0 {
            satellites.push(Satellite {
                prn,
                elevation: parse_int(field(offset + 1)),
                azimuth: parse_int(field(offset + 2)),
                snr: parse_int(field(offset + 3)),
            });
        } else {
            trace!("gsv: empty satellite slot #{}", i);
        }
    }

    let expected_fields = LEADING_FIELDS as isize + num_records * FIELDS_PER_SATELLITE as isize;

    let signal_id = if fields.len() as isize > expected_fields {
        field(fields.len() - 1).to_string()
    } else {
        DEFAULT_SIGNAL_ID.to_string()
    };

    Gsv {
        header: header.with_sentence(SENTENCE_ID, SENTENCE_NAME),
        number_of_messages: parse_int(field(1)),
        message_number: parse_int(field(2)),
        satellites_in_view: parse_int(field(3)),
        satellites,
        signal_id,
    }
}

#[cfg(test)]
mod test {
    use super::{decode, Satellite, SENTENCE_ID, SENTENCE_NAME};
    use crate::sentence::{decode_gsv_line, Header};

    use gnss::prelude::Constellation;

    const FULL_GROUP: [&str; 20] = [
        "GPGSV", "3", "1", "11", "03", "03", "111", "00", "04", "15", "270", "00", "06", "01",
        "010", "00", "13", "06", "292", "00",
    ];

    fn header() -> Header {
        Header::new("GP", SENTENCE_ID, "")
    }

    fn sat(prn: i32, elevation: i32, azimuth: i32, snr: i32) -> Satellite {
        Satellite {
            prn,
            elevation,
            azimuth,
            snr,
        }
    }

    #[test]
    fn test_full_group_without_signal_id() {
        let gsv = decode(header(), &FULL_GROUP);

        assert_eq!(gsv.number_of_messages, 3);
        assert_eq!(gsv.message_number, 1);
        assert_eq!(gsv.satellites_in_view, 11);
        assert_eq!(
            gsv.satellites,
            vec![
                sat(3, 3, 111, 0),
                sat(4, 15, 270, 0),
                sat(6, 1, 10, 0),
                sat(13, 6, 292, 0),
            ]
        );
        assert_eq!(gsv.signal_id, "0");
        assert!(!gsv.is_last());
        assert_eq!(gsv.constellation(), Some(Constellation::GPS));
    }

    #[test]
    fn test_full_group_with_signal_id() {
        let mut fields = FULL_GROUP.to_vec();
        fields.push("1");

        let gsv = decode(header(), &fields);
        let reference = decode(header(), &FULL_GROUP);

        assert_eq!(gsv.satellites, reference.satellites);
        assert_eq!(gsv.signal_id, "1");
    }

    #[test]
    fn test_blank_prn_slot() {
        let fields = [
            "GPGSV", "1", "1", "02", "", "00", "000", "00", "05", "10", "200", "00",
        ];

        let gsv = decode(header(), &fields);

        assert_eq!(gsv.satellites, vec![sat(5, 10, 200, 0)]);
        assert_eq!(gsv.satellites_in_view, 2);
        assert_eq!(gsv.signal_id, "0");
        assert!(gsv.is_last());
    }

    #[test]
    fn test_zero_prn_slot() {
        let fields = [
            "GPGSV", "1", "1", "02", "05", "10", "200", "30", "00", "45", "090", "41",
        ];

        let gsv = decode(header(), &fields);
        assert_eq!(gsv.satellites, vec![sat(5, 10, 200, 30)]);
    }

    #[test]
    fn test_no_satellites() {
        let gsv = decode(header(), &["GPGSV", "1", "1", "00"]);

        assert!(gsv.satellites.is_empty());
        assert_eq!(gsv.satellites_in_view, 0);
        assert_eq!(gsv.signal_id, "0");
    }

    #[test]
    fn test_no_satellites_with_signal_id() {
        let gsv = decode(header(), &["GAGSV", "1", "1", "00", "7"]);

        assert!(gsv.satellites.is_empty());
        assert_eq!(gsv.signal_id, "7");
    }

    #[test]
    fn test_dangling_partial_group() {
        // 4 leading + 1 group + 3 dangling fields
        let fields = [
            "GPGSV", "2", "2", "05", "21", "44", "310", "43", "22", "12", "050",
        ];

        let gsv = decode(header(), &fields);

        assert_eq!(gsv.satellites, vec![sat(21, 44, 310, 43)]);
        // more than one field in excess: last one is still taken as signal ID
        assert_eq!(gsv.signal_id, "050");
    }

    #[test]
    fn test_more_than_four_groups() {
        let mut fields = FULL_GROUP.to_vec();
        fields.extend_from_slice(&["29", "80", "045", "48"]);

        let gsv = decode(header(), &fields);

        assert_eq!(gsv.satellites.len(), 5);
        assert_eq!(gsv.satellites[4], sat(29, 80, 45, 48));
        assert_eq!(gsv.signal_id, "0");
    }

    #[test]
    fn test_truncated_fields() {
        // less than 4 fields: the last one is taken as signal ID
        let gsv = decode(header(), &["GPGSV", "1"]);

        assert_eq!(gsv.number_of_messages, 1);
        assert_eq!(gsv.message_number, 0);
        assert_eq!(gsv.satellites_in_view, 0);
        assert!(gsv.satellites.is_empty());
        assert_eq!(gsv.signal_id, "1");

        let gsv = decode(header(), &["GPGSV", "1", "2"]);
        assert_eq!(gsv.message_number, 2);
        assert_eq!(gsv.signal_id, "2");

        let gsv = decode(header(), &["GPGSV"]);
        assert_eq!(gsv.signal_id, "GPGSV");

        let empty: [&str; 0] = [];
        let gsv = decode(header(), &empty);
        assert_eq!(gsv.number_of_messages, 0);
        assert_eq!(gsv.signal_id, "0");
    }

    #[test]
    fn test_truncated_sentence() {
        let gsv = decode_gsv_line("$GPGSV,1,2*56", true).unwrap().unwrap();

        assert!(gsv.satellites.is_empty());
        assert_eq!(gsv.signal_id, "2");
    }

    #[test]
    fn test_corrupt_fields_are_isolated() {
        let fields = [
            "GPGSV", "x", "1", "08", "07", "??", "120", "35", "08", "22", "", "40",
        ];

        let gsv = decode(header(), &fields);

        assert_eq!(gsv.number_of_messages, 0);
        assert_eq!(gsv.message_number, 1);
        assert_eq!(gsv.satellites, vec![sat(7, 0, 120, 35), sat(8, 22, 0, 40)]);
    }

    #[test]
    fn test_header_is_stamped() {
        let gsv = decode(Header::new("GL", "XXX", "$GLGSV,1,1,00*65"), &["GLGSV", "1", "1", "00"]);

        assert_eq!(gsv.header.talker_id, "GL");
        assert_eq!(gsv.header.sentence_id, SENTENCE_ID);
        assert_eq!(gsv.header.sentence_name, SENTENCE_NAME);
        assert_eq!(gsv.header.raw, "$GLGSV,1,1,00*65");
    }

    #[test]
    fn test_display() {
        let gsv = decode(header(), &["GPGSV", "1", "1", "01", "05", "10", "200", "31", "1"]);
        assert_eq!(
            gsv.to_string(),
            "GPGSV 1/1 in-view=1 signal=1 [PRN05 el=10° az=200° snr=31dB]"
        );
    }

    #[test]
    fn test_json() {
        let gsv = decode(header(), &["GPGSV", "1", "1", "01", "05", "10", "200", "31"]);

        let json = serde_json::to_value(&gsv).unwrap();

        assert_eq!(json["talker_id"], "GP");
        assert_eq!(json["sentence_id"], "GSV");
        assert_eq!(json["number_of_messages"], 1);
        assert_eq!(json["satellites"][0]["prn"], 5);
        assert_eq!(json["satellites"][0]["azimuth"], 200);
        assert_eq!(json["signal_id"], "0");
    }
}
