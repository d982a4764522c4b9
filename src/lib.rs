#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*
 * NMEA-GSV: satellites in view decoder.
 * Authors: nmea-gsv contributors.
 * This framework is shipped under Mozilla Public V2 license.
 */

extern crate gnss_rs as gnss;

pub mod checksum;
pub mod error;
pub mod gsv;
pub mod parse;
pub mod sentence;

pub use error::Error;

pub mod prelude {
    pub use crate::{
        error::Error,
        gsv::{decode, Gsv, Satellite, SENTENCE_ID, SENTENCE_NAME},
        sentence::{decode_gsv_line, Header, Sentence},
    };

    pub use gnss::prelude::Constellation;
}
