use clap::{Arg, ArgAction};
use lazy_static::lazy_static;

lazy_static! {
    pub static ref OUTPUT_ARGS: Vec<Arg> = vec![
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Release one JSON object per sentence, instead of readable text lines."),
        Arg::new("output")
            .short('o')
            .long("output")
            .required(false)
            .value_name("FILE")
            .help("Collect to this file. Default is stdout."),
        Arg::new("gzip")
            .long("gzip")
            .action(ArgAction::SetTrue)
            .requires("output")
            .help("Add GZIP compression to the output file."),
    ];
}
