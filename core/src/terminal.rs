use crate::protocol::{KeyStroke, OutboundEvent, PrintEvent, Transport};

/// Write side of a terminal widget.
pub trait TerminalSink {
    fn write(&self, data: &str);
}

/// Connects a terminal widget to the live transport. The remote end owns
/// the terminal model, so keystrokes are forwarded without local echo and
/// printed data is written as-is.
pub struct TerminalBridge<S, T> {
    sink: S,
    transport: T,
}

impl<S: TerminalSink, T: Transport> TerminalBridge<S, T> {
    pub fn new(sink: S, transport: T) -> Self {
        Self { sink, transport }
    }

    pub fn on_key(&self, key: KeyStroke) -> Result<(), String> {
        self.transport.push(OutboundEvent::Key(key))
    }

    pub fn on_print(&self, event: &PrintEvent) {
        self.sink.write(&event.data);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
