use std::io::{BufWriter, Write};

use log::{debug, error, info, trace, warn};

use tokio::sync::mpsc::Receiver;

use nmea_gsv::prelude::{Error, Gsv};

pub mod fd;
pub mod report;
pub mod runtime;
pub mod settings;

use fd::FileDescriptor;
use report::Report;
use runtime::Runtime;
use settings::{Format, Settings};

pub enum Message {
    /// [Message::Shutdown] on end of stream or Ctrl+C interruption
    Shutdown,

    /// New [Gsv] sentence
    Gsv(Gsv),

    /// Sentence that could not be framed
    Error(Error),
}

pub struct Collector {
    rtm: Runtime,
    report: Report,
    settings: Settings,
    rx: Receiver<Message>,
    fd: Option<BufWriter<FileDescriptor>>,
}

impl Collector {
    pub fn new(rtm: Runtime, settings: Settings, rx: Receiver<Message>) -> Self {
        Self {
            rx,
            rtm,
            settings,
            fd: None,
            report: Report::default(),
        }
    }

    /// Obtain a new file descriptor
    fn fd(&self) -> FileDescriptor {
        match self.settings.filename() {
            Some(filename) => {
                info!("{} - collecting to {}", self.rtm.deploy_time, filename);
                FileDescriptor::new(self.settings.gzip, &filename)
            },
            None => FileDescriptor::stdout(),
        }
    }

    pub async fn run(&mut self) {
        debug!("{} - GSV collector deployed", self.rtm.deploy_time);

        self.fd = Some(BufWriter::new(self.fd()));

        loop {
            match self.rx.recv().await {
                Some(msg) => match msg {
                    Message::Gsv(gsv) => {
                        self.release_gsv(gsv);
                    },
                    Message::Error(e) => {
                        self.report.errors += 1;
                        warn!("{}", e);
                    },
                    Message::Shutdown => {
                        self.release_report();
                        return;
                    },
                },
                None => {
                    self.release_report();
                    return;
                },
            }
        }
    }

    fn release_gsv(&mut self, gsv: Gsv) {
        if !self.settings.accepts(gsv.constellation()) {
            trace!("{} - filtered out", gsv);
            self.report.filtered += 1;
            return;
        }

        let fd = match self.fd.as_mut() {
            Some(fd) => fd,
            None => {
                error!("{} - missing output", gsv);
                return;
            },
        };

        let formatted = match self.settings.format {
            Format::Text => writeln!(fd, "{}", gsv),
            Format::Json => serde_json::to_writer(&mut *fd, &gsv)
                .map_err(std::io::Error::from)
                .and_then(|_| writeln!(fd)),
        };

        // live sessions are followed line by line
        let released = formatted.and_then(|_| fd.flush());

        match released {
            Ok(_) => {
                debug!("{}", gsv);
                self.report.latch_gsv(&gsv);
            },
            Err(e) => {
                error!("{} release issue: {}", gsv, e);
            },
        }
    }

    fn release_report(&mut self) {
        if let Some(fd) = self.fd.take() {
            match fd.into_inner() {
                Ok(fd) => {
                    if let Err(e) = fd.finish() {
                        error!("failed to terminate output: {}", e);
                    }
                },
                Err(e) => {
                    error!("failed to flush output: {}", e.error());
                },
            }
        }

        self.report.uptime = self.rtm.uptime();
        info!("{}", self.report);
    }
}
