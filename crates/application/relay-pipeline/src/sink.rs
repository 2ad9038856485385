use relay_core::TransferUnit;
use tokio::sync::mpsc::UnboundedSender;

/// Receiver of live transfer progress, typically a progress bar.
pub trait ProgressSink {
    /// Called once before the subprocess starts, with the expected total.
    fn start(&mut self, _total: f64, _unit: TransferUnit) {}
    fn advance(&mut self, delta: f64);
    /// Out-of-band text such as an error line from rclone.
    fn message(&mut self, line: &str);
    fn finish(&mut self) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn advance(&mut self, _delta: f64) {}
    fn message(&mut self, _line: &str) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Started { total: f64, unit: TransferUnit },
    Advanced { delta: f64 },
    Message(String),
    Finished,
}

/// Records every event in order.
impl ProgressSink for Vec<ProgressEvent> {
    fn start(&mut self, total: f64, unit: TransferUnit) {
        self.push(ProgressEvent::Started { total, unit });
    }

    fn advance(&mut self, delta: f64) {
        self.push(ProgressEvent::Advanced { delta });
    }

    fn message(&mut self, line: &str) {
        self.push(ProgressEvent::Message(line.to_string()));
    }

    fn finish(&mut self) {
        self.push(ProgressEvent::Finished);
    }
}

/// Forwards events to an async consumer. Send failures mean the receiver is gone
/// and are ignored.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<ProgressEvent>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<ProgressEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelSink {
    fn start(&mut self, total: f64, unit: TransferUnit) {
        let _ = self.tx.send(ProgressEvent::Started { total, unit });
    }

    fn advance(&mut self, delta: f64) {
        let _ = self.tx.send(ProgressEvent::Advanced { delta });
    }

    fn message(&mut self, line: &str) {
        let _ = self.tx.send(ProgressEvent::Message(line.to_string()));
    }

    fn finish(&mut self) {
        let _ = self.tx.send(ProgressEvent::Finished);
    }
}
