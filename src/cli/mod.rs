use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};

mod output;
use output::*;

use nmea_gsv::prelude::Constellation;

use crate::{
    collecter::settings::{Format, Settings},
    device::{Input, Settings as DeviceSettings},
};

pub struct Cli {
    /// Arguments passed by user
    matches: ArgMatches,
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self::from_command(Self::command(), std::env::args_os())
    }

    fn from_command<I, T>(cmd: Command, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self {
            matches: cmd.get_matches_from(args),
        }
    }

    fn command() -> Command {
        let cmd =
            Command::new("nmea-gsv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("NMEA satellites in view (GSV) collecter")
        .color(ColorChoice::Always)
        .arg_required_else_help(true)
        .next_help_heading("Input")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .required_unless_present("file")
                .conflicts_with("file")
                .help("Define serial port. Example /dev/ttyUSB0 on Linux")
        )
        .arg(
            Arg::new("baudrate")
                .short('b')
                .long("baud")
                .required(false)
                .requires("port")
                .value_name("Baudrate (u32)")
                .help("Define serial port baud rate. Communications will not work if your receiver streams at a different data-rate. By default we use 115_200"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Replay NMEA sentences from this file. Gzip compressed files (.gz) are supported.")
        )
        .arg(
            Arg::new("no-checksum")
                .long("no-checksum")
                .action(ArgAction::SetTrue)
                .help("Accept sentences without checksum, or with invalid checksum.
Use this with simulators that do not compute it.")
        )
        .next_help_heading("Constellation filter (all constellations by default)")
        .arg(
            Arg::new("gps")
                .long("gps")
                .action(ArgAction::SetTrue)
                .help("Forward GPS sentences (GP talker)")
        )
        .arg(
            Arg::new("galileo")
                .long("galileo")
                .action(ArgAction::SetTrue)
                .help("Forward Galileo sentences (GA talker)")
        )
        .arg(
            Arg::new("bds")
                .long("bds")
                .action(ArgAction::SetTrue)
                .help("Forward BDS (BeiDou) sentences (GB/BD talkers)")
        )
        .arg(
            Arg::new("qzss")
                .long("qzss")
                .action(ArgAction::SetTrue)
                .help("Forward QZSS sentences (GQ/QZ talkers)")
        )
        .arg(
            Arg::new("glonass")
                .long("glonass")
                .action(ArgAction::SetTrue)
                .help("Forward Glonass sentences (GL talker)")
        )
        .arg(
            Arg::new("irnss")
                .long("irnss")
                .action(ArgAction::SetTrue)
                .help("Forward IRNSS (NavIC) sentences (GI talker)")
        )
        .arg(
            Arg::new("mixed")
                .long("mixed")
                .action(ArgAction::SetTrue)
                .help("Forward multi-GNSS sentences (GN talker)")
        );

        cmd.next_help_heading("Output").args(OUTPUT_ARGS.iter())
    }

    /// Returns User serial port specification
    fn port(&self) -> Option<&String> {
        self.matches.get_one::<String>("port")
    }

    /// Returns User baud rate specification
    fn baud_rate(&self) -> Option<u32> {
        let baud = self.matches.get_one::<String>("baudrate")?;
        let baud = baud
            .parse::<u32>()
            .unwrap_or_else(|e| panic!("Invalid baud rate value: {}", e));
        Some(baud)
    }

    fn file(&self) -> Option<&String> {
        self.matches.get_one::<String>("file")
    }

    fn constellations(&self) -> Vec<Constellation> {
        let mut constellations = Vec::<Constellation>::with_capacity(4);

        for (flag, constellation) in [
            ("gps", Constellation::GPS),
            ("galileo", Constellation::Galileo),
            ("bds", Constellation::BeiDou),
            ("qzss", Constellation::QZSS),
            ("glonass", Constellation::Glonass),
            ("irnss", Constellation::IRNSS),
            ("mixed", Constellation::Mixed),
        ] {
            if self.matches.get_flag(flag) {
                constellations.push(constellation);
            }
        }

        constellations
    }

    pub fn device_settings(&self) -> DeviceSettings {
        let input = match self.file() {
            Some(file) => Input::File(file.to_string()),
            None => Input::Serial {
                port: self
                    .port()
                    .unwrap_or_else(|| panic!("Either a serial port or a file is required"))
                    .to_string(),
                baud_rate: self.baud_rate().unwrap_or(115_200),
            },
        };

        DeviceSettings {
            input,
            checksum: !self.matches.get_flag("no-checksum"),
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            format: if self.matches.get_flag("json") {
                Format::Json
            } else {
                Format::Text
            },
            output: self.matches.get_one::<String>("output").cloned(),
            gzip: self.matches.get_flag("gzip"),
            constellations: self.constellations(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Cli;
    use crate::{collecter::settings::Format, device::Input};

    use nmea_gsv::prelude::Constellation;

    fn cli(args: &[&str]) -> Cli {
        Cli::from_command(Cli::command(), args.iter().copied())
    }

    #[test]
    fn test_serial_input() {
        let settings = cli(&["nmea-gsv", "-p", "/dev/ttyACM0"]).device_settings();
        assert_eq!(
            settings.input,
            Input::Serial {
                port: "/dev/ttyACM0".to_string(),
                baud_rate: 115_200
            }
        );
        assert!(settings.checksum);

        let settings =
            cli(&["nmea-gsv", "-p", "/dev/ttyACM0", "-b", "9600", "--no-checksum"]).device_settings();
        assert_eq!(
            settings.input,
            Input::Serial {
                port: "/dev/ttyACM0".to_string(),
                baud_rate: 9600
            }
        );
        assert!(!settings.checksum);
    }

    #[test]
    fn test_file_input() {
        assert_eq!(
            cli(&["nmea-gsv", "-f", "gsv.txt.gz"]).device_settings().input,
            Input::File("gsv.txt.gz".to_string())
        );
    }

    #[test]
    fn test_conflicting_inputs() {
        let matches = Cli::command().try_get_matches_from([
            "nmea-gsv",
            "-p",
            "/dev/ttyUSB0",
            "-f",
            "gsv.txt",
        ]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_output_settings() {
        let settings = cli(&["nmea-gsv", "-f", "gsv.txt"]).settings();
        assert_eq!(settings.format, Format::Text);
        assert!(settings.output.is_none());
        assert!(settings.constellations.is_empty());

        let settings = cli(&[
            "nmea-gsv", "-f", "gsv.txt", "--json", "-o", "out.json", "--gzip", "--gps",
            "--galileo",
        ])
        .settings();

        assert_eq!(settings.format, Format::Json);
        assert_eq!(settings.filename(), Some("out.json.gz".to_string()));
        assert_eq!(
            settings.constellations,
            vec![Constellation::GPS, Constellation::Galileo]
        );
    }
}
