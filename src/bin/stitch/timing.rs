use cube_stitch::core::Point3i;

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

/// Wall-clock checkpoints of one run.
pub struct PhaseTimer {
    start: Instant,
    surface: Option<Instant>,
    binning: Option<Instant>,
    end: Option<Instant>,
}

impl PhaseTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            surface: None,
            binning: None,
            end: None,
        }
    }

    pub fn surface_parsed(&mut self) {
        self.surface = Some(Instant::now());
    }

    pub fn surface_binned(&mut self) {
        self.binning = Some(Instant::now());
    }

    pub fn finished(&mut self) {
        self.end = Some(Instant::now());
    }

    pub fn report(&self, fragment_shape: Point3i) -> TimingReport {
        let surface = self.surface.unwrap_or(self.start);
        let binning = self.binning.unwrap_or(surface);
        let end = self.end.unwrap_or(binning);

        TimingReport {
            fragment_shape,
            parsing: surface - self.start,
            binning: binning - surface,
            reading: end - binning,
            total: end - self.start,
        }
    }
}

/// Elapsed time per phase, rendered as a human-readable block.
#[derive(Debug)]
pub struct TimingReport {
    pub fragment_shape: Point3i,
    pub parsing: Duration,
    pub binning: Duration,
    pub reading: Duration,
    pub total: Duration,
}

impl TimingReport {
    pub fn write_to(&self, mut out: impl Write) -> io::Result<()> {
        let s = self.fragment_shape;
        writeln!(out, "Fragment size: x: {}, y: {}, z: {}", s.x(), s.y(), s.z())?;
        writeln!(out, "Parsing surface: {}ms", self.parsing.as_millis())?;
        writeln!(out, "Binning surface: {}ms", self.binning.as_millis())?;
        writeln!(out, "Reading surface: {}ms", self.reading.as_millis())?;
        writeln!(out, "Total elapsed time: {}ms", self.total.as_millis())?;
        writeln!(out)
    }

    pub fn append_to(&self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        self.write_to(file)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
