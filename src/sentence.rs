//! Sentence framing: delimiters, checksum, address field and common [Header].
use std::str::FromStr;

use log::trace;
use serde::Serialize;

use gnss::prelude::Constellation;

use crate::{
    checksum,
    error::Error,
    gsv::{self, Gsv, SENTENCE_ID as GSV},
};

/// Header shared by all decoded sentences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Talker ID, for example "GP"
    pub talker_id: String,
    /// Sentence ID, for example "GSV"
    pub sentence_id: String,
    /// Human readable sentence name
    pub sentence_name: String,
    /// Raw sentence, as received
    pub raw: String,
}

impl Header {
    pub fn new(talker_id: &str, sentence_id: &str, raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            talker_id: talker_id.to_string(),
            sentence_id: sentence_id.to_string(),
            sentence_name: Default::default(),
        }
    }

    /// Copies and stamps this [Header] with sentence ID and name.
    pub fn with_sentence(&self, sentence_id: &str, sentence_name: &str) -> Self {
        let mut s = self.clone();
        s.sentence_id = sentence_id.to_string();
        s.sentence_name = sentence_name.to_string();
        s
    }

    /// [Constellation] deduced from talker ID.
    /// "GN" (multi GNSS receiver) is reported as [Constellation::Mixed].
    pub fn constellation(&self) -> Option<Constellation> {
        match self.talker_id.as_str() {
            "GP" => Some(Constellation::GPS),
            "GL" => Some(Constellation::Glonass),
            "GA" => Some(Constellation::Galileo),
            "GB" | "BD" => Some(Constellation::BeiDou),
            "GQ" | "QZ" => Some(Constellation::QZSS),
            "GI" => Some(Constellation::IRNSS),
            "GN" => Some(Constellation::Mixed),
            _ => None,
        }
    }
}

/// Tokenized sentence, checksum stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Raw sentence, trimmed
    pub raw: String,
    /// Talker ID
    pub talker_id: String,
    /// Sentence ID
    pub sentence_id: String,
    /// All fields, address field included
    pub fields: Vec<String>,
}

impl Sentence {
    /// Tokenizes `raw`. When `verify_checksum` is set, the sentence must
    /// carry a valid checksum. Otherwise the checksum is ignored (when present).
    pub fn parse(raw: &str, verify_checksum: bool) -> Result<Self, Error> {
        let raw = raw.trim();

        let body = raw
            .strip_prefix('$')
            .or_else(|| raw.strip_prefix('!'))
            .ok_or(Error::MissingStartDelimiter)?;

        let body = match body.split_once('*') {
            Some((body, ck)) => {
                if verify_checksum {
                    checksum::verify(body, ck)?;
                }
                body
            },
            None => {
                if verify_checksum {
                    return Err(Error::MissingChecksum);
                }
                body
            },
        };

        let fields = body.split(',').map(|f| f.to_string()).collect::<Vec<_>>();

        let address = &fields[0];

        if address.len() < 5 || address.starts_with('P') || !address.is_ascii() {
            return Err(Error::InvalidAddress(address.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            talker_id: address[..2].to_string(),
            sentence_id: address[2..5].to_string(),
            fields,
        })
    }

    /// Builds the common [Header]. Sentence name is left to the decoder.
    pub fn header(&self) -> Header {
        Header::new(&self.talker_id, &self.sentence_id, &self.raw)
    }

    /// True if this is a GSV sentence.
    pub fn is_gsv(&self) -> bool {
        self.sentence_id == GSV
    }

    /// Decodes this sentence as [Gsv].
    pub fn to_gsv(&self) -> Result<Gsv, Error> {
        if !self.is_gsv() {
            return Err(Error::UnexpectedSentence(self.sentence_id.clone()));
        }
        Ok(gsv::decode(self.header(), &self.fields))
    }
}

impl FromStr for Sentence {
    type Err = Error;

    /// Tokenizes a sentence, verifying its checksum.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, true)
    }
}

/// Decodes one line of a sentence stream.
/// Returns `Ok(None)` for any sentence other than GSV.
pub fn decode_gsv_line(line: &str, verify_checksum: bool) -> Result<Option<Gsv>, Error> {
    let sentence = Sentence::parse(line, verify_checksum)?;

    if sentence.is_gsv() {
        Ok(Some(sentence.to_gsv()?))
    } else {
        trace!("skipping {}{}", sentence.talker_id, sentence.sentence_id);
        Ok(None)
    }
}
