//! Outputs of the environment: drive commands, vehicle placement, metrics and traces.

use crate::action::Command;
use crate::error::Result;
use crate::pose::Pose;
use crate::trace::TraceRecord;
use std::io::Write;

/// Receives drive commands. Commands are fire-and-forget.
pub trait Actuator {
    fn drive(&mut self, command: Command);
}

/// Moves the vehicle to a pose, returning once it has been applied.
pub trait Placement {
    fn place(&mut self, pose: &Pose) -> Result<()>;
}

/// Receives scalar metrics.
pub trait MetricsSink {
    fn record(&mut self, name: &str, value: f64);
}

/// Receives one trace record per step.
pub trait TraceSink {
    fn write(&mut self, record: &TraceRecord) -> Result<()>;
}

/// Logs commands, placements and metrics instead of forwarding them anywhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl Actuator for LogSink {
    fn drive(&mut self, command: Command) {
        log::debug!(
            "Drive steering={:.2} throttle={:.2}",
            command.steering,
            command.throttle
        );
    }
}

impl Placement for LogSink {
    fn place(&mut self, pose: &Pose) -> Result<()> {
        log::debug!(
            "Place vehicle at ({:.2}, {:.2}, {:.2}) orientation={:?}",
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.orientation_xyzw()
        );
        Ok(())
    }
}

impl MetricsSink for LogSink {
    fn record(&mut self, name: &str, value: f64) {
        log::info!("Metric {}={:.2}", name, value);
    }
}

/// Writes trace lines to the `sim_trace` log target.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTraceSink;

impl TraceSink for LogTraceSink {
    fn write(&mut self, record: &TraceRecord) -> Result<()> {
        log::info!(target: "sim_trace", "{}", record.to_line());
        Ok(())
    }
}

/// Writes trace lines to any writer, one per line.
pub struct WriterTraceSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterTraceSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for WriterTraceSink<W> {
    fn write(&mut self, record: &TraceRecord) -> Result<()> {
        writeln!(self.writer, "{}", record.to_line())?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn writer_sink_writes_lines() {
        let mut sink = WriterTraceSink::new(Vec::new());
        sink.write(&TraceRecord {
            episode: 1,
            ..Default::default()
        })
        .unwrap();
        sink.write(&TraceRecord {
            episode: 2,
            ..Default::default()
        })
        .unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("SIM_TRACE_LOG:1,"));
        assert!(lines[1].starts_with("SIM_TRACE_LOG:2,"));
    }
}
