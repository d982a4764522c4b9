use std::{
    fs::File,
    io::{BufReader, Read},
    time::Duration,
};

use flate2::read::GzDecoder;
use log::{debug, info};
use serialport::SerialPort;
use tokio::sync::watch::Receiver as WatchRx;

use nmea_gsv::prelude::{decode_gsv_line, Error, Gsv};

mod framer;
mod settings;

use framer::Framer;

pub use settings::{Input, Settings};

enum Port {
    Serial(Box<dyn SerialPort>),
    File(Box<dyn Read + Send>),
}

impl Read for Port {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::Serial(port) => port.read(buf),
            Self::File(fd) => fd.read(buf),
        }
    }
}

pub struct Device {
    port: Port,
    framer: Framer,
    settings: Settings,
    shutdown: WatchRx<bool>,
}

impl Device {
    pub fn open(settings: &Settings, shutdown: WatchRx<bool>) -> Self {
        let port = match &settings.input {
            Input::Serial { port, baud_rate } => {
                let serial = serialport::new(port, *baud_rate)
                    .timeout(Duration::from_millis(250))
                    .open()
                    .unwrap_or_else(|e| panic!("Failed to open {} port: {}", port, e));

                info!("{} opened ({} bauds)", port, baud_rate);
                Port::Serial(serial)
            },
            Input::File(path) => {
                let fd = File::open(path)
                    .unwrap_or_else(|e| panic!("Failed to open {}: {}", path, e));

                let reader: Box<dyn Read + Send> = if settings.is_gzip() {
                    Box::new(GzDecoder::new(BufReader::new(fd)))
                } else {
                    Box::new(BufReader::new(fd))
                };

                info!("replaying {}", path);
                Port::File(reader)
            },
        };

        Self {
            port,
            shutdown,
            settings: settings.clone(),
            framer: Framer::default(),
        }
    }

    /// Consumes the input until shutdown is requested, or the replay
    /// file is exhausted. `cb` is called for each GSV sentence and
    /// each sentence that could not be framed. Input failures abort with
    /// [Error::Io].
    pub fn consume_all_cb<T: FnMut(Result<Gsv, Error>)>(
        &mut self,
        buffer: &mut [u8],
        mut cb: T,
    ) -> Result<(), Error> {
        loop {
            if *self.shutdown.borrow() {
                debug!("shutdown requested");
                break;
            }

            let nbytes = self.read_port(buffer)?;

            if nbytes == 0 {
                if self.settings.is_replay() {
                    if let Some(line) = self.framer.flush() {
                        self.decode(&line, &mut cb);
                    }
                    break;
                }
                continue;
            }

            for line in self.framer.consume(&buffer[..nbytes]) {
                self.decode(&line, &mut cb);
            }
        }
        Ok(())
    }

    fn decode<T: FnMut(Result<Gsv, Error>)>(&self, line: &str, cb: &mut T) {
        match decode_gsv_line(line, self.settings.checksum) {
            Ok(Some(gsv)) => cb(Ok(gsv)),
            Ok(None) => {},
            Err(e) => cb(Err(e)),
        }
    }

    /// Reads the port, converting timeouts into "no data received"
    fn read_port(&mut self, output: &mut [u8]) -> std::io::Result<usize> {
        match self.port.read(output) {
            Ok(b) => Ok(b),
            Err(e) => {
                if e.kind() == std::io::ErrorKind::TimedOut {
                    Ok(0)
                } else {
                    Err(e)
                }
            },
        }
    }
}
