use crate::sink::ProgressSink;
use relay_core::{parse_size_token, SizeReading, TransferUnit};
use relay_infra::ShellProcess;
use std::io;
use std::process::ExitStatus;
use std::time::Duration;

const STATUS_LABEL: &str = "Transferred:";

/// Cumulative amount reported so far within one invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ProgressState {
    cumulative: f64,
}

impl ProgressState {
    pub fn cumulative(&self) -> f64 {
        self.cumulative
    }

    /// Records a new cumulative reading and returns the increase since the last one.
    fn advance_to(&mut self, amount: f64) -> f64 {
        let delta = amount - self.cumulative;
        self.cumulative = amount;
        delta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// Status line whose amount was read; carries the emitted delta.
    Progress(f64),
    /// Status line with an amount in an unrecognized magnitude.
    UnreadStatus(String),
    Error,
    Other,
}

/// Pulls the amount-so-far out of a status line such as
/// `Transferred:   \t  1.5 MiB / 10 MiB, 15%, 1 MiB/s, ETA 8s`.
pub fn transferred_token(line: &str) -> Option<&str> {
    let (_, after) = line.split_once(STATUS_LABEL)?;
    let field = after.split('\t').nth(1)?.trim_start();
    field.split(" / ").next()
}

/// Interprets rclone's `-P` output for one invocation.
pub struct ProgressMonitor<'a> {
    sink: &'a mut dyn ProgressSink,
    unit: TransferUnit,
    state: ProgressState,
}

impl<'a> ProgressMonitor<'a> {
    pub fn new(sink: &'a mut dyn ProgressSink, unit: TransferUnit) -> Self {
        Self {
            sink,
            unit,
            state: ProgressState::default(),
        }
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    pub fn observe(&mut self, line: &str) -> LineKind {
        if line.contains("Transferred") && line.contains("ETA") {
            let Some(token) = transferred_token(line) else {
                return LineKind::UnreadStatus(line.trim_end().to_string());
            };
            return match parse_size_token(token, self.unit) {
                SizeReading::Amount(amount) => {
                    let delta = self.state.advance_to(amount);
                    self.sink.advance(delta);
                    LineKind::Progress(delta)
                }
                SizeReading::Unparsed(text) => LineKind::UnreadStatus(text),
            };
        }
        if line.contains("error") {
            self.sink.message(line.trim_end_matches(['\r', '\n']));
            return LineKind::Error;
        }
        LineKind::Other
    }

    /// Feeds every output line to [`observe`](Self::observe) until the stream
    /// closes, then polls until the process exits. Returns everything read.
    pub fn drive(
        &mut self,
        process: &mut ShellProcess,
        poll_interval: Duration,
    ) -> io::Result<(String, ExitStatus)> {
        let mut transcript = String::new();
        while let Some(line) = process.next_line()? {
            self.observe(&line);
            transcript.push_str(&line);
        }
        let status = process.wait_polling(poll_interval)?;
        self.sink.finish();
        Ok((transcript, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::ProgressEvent;

    fn status(amount: &str) -> String {
        format!("Transferred:   \t    {amount} / 10 MiB, 10%, 1 MiB/s, ETA 9s\n")
    }

    #[test]
    fn token_is_read_from_second_tab_field() {
        assert_eq!(transferred_token(&status("1.5 MiB")), Some("1.5 MiB"));
        assert_eq!(transferred_token("Transferred: no tabs here ETA"), None);
        assert_eq!(transferred_token("nothing"), None);
    }

    #[test]
    fn deltas_follow_cumulative_readings() {
        let mut events: Vec<ProgressEvent> = Vec::new();
        let mut monitor = ProgressMonitor::new(&mut events, TransferUnit::Bytes);

        assert_eq!(monitor.observe(&status("1 KiB")), LineKind::Progress(1024.0));
        assert_eq!(monitor.observe(&status("3 KiB")), LineKind::Progress(2048.0));
        assert_eq!(monitor.state().cumulative(), 3072.0);
        drop(monitor);

        assert_eq!(
            events,
            vec![
                ProgressEvent::Advanced { delta: 1024.0 },
                ProgressEvent::Advanced { delta: 2048.0 },
            ]
        );
    }

    #[test]
    fn unread_magnitudes_leave_cumulative_untouched() {
        let mut events: Vec<ProgressEvent> = Vec::new();
        let mut monitor = ProgressMonitor::new(&mut events, TransferUnit::Bytes);

        monitor.observe(&status("2 KiB"));
        assert_eq!(
            monitor.observe(&status("1 PiB")),
            LineKind::UnreadStatus("1 PiB".into())
        );
        assert_eq!(monitor.state().cumulative(), 2048.0);
        assert_eq!(monitor.observe(&status("3 KiB")), LineKind::Progress(1024.0));
        drop(monitor);

        assert_eq!(events.len(), 2);
    }

    #[test]
    fn error_lines_are_forwarded_verbatim() {
        let mut events: Vec<ProgressEvent> = Vec::new();
        let mut monitor = ProgressMonitor::new(&mut events, TransferUnit::Bytes);

        let line = "2024/01/01 00:00:00 ERROR : a.txt: Failed to copy: permission error\n";
        assert_eq!(monitor.observe(line), LineKind::Error);
        assert_eq!(monitor.observe("Checks: 3 / 3, 100%\n"), LineKind::Other);
        drop(monitor);

        assert_eq!(
            events,
            vec![ProgressEvent::Message(line.trim_end().to_string())]
        );
    }

    #[test]
    fn megabyte_unit_scales_deltas() {
        let mut events: Vec<ProgressEvent> = Vec::new();
        let mut monitor = ProgressMonitor::new(&mut events, TransferUnit::Megabytes);
        assert_eq!(monitor.observe(&status("10 MiB")), LineKind::Progress(10.49));
    }
}
