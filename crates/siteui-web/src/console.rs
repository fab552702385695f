#![forbid(unsafe_code)]

//! `tracing` output routed to the browser console.
//!
//! The fmt layer hands its writer arbitrary byte chunks. [`LineBuffer`]
//! reassembles them into whole lines so each log record becomes one
//! `console.log` call.

/// Accumulates bytes and yields complete lines without their terminators.
#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Append `bytes` and return every line they complete.
    pub(crate) fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);
        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            lines.push(
                String::from_utf8_lossy(&line)
                    .trim_end_matches(['\n', '\r'])
                    .to_owned(),
            );
        }
        lines
    }

    /// Take whatever is left after the last newline.
    pub(crate) fn take_rest(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) use self::wasm_writer::init_logging;

#[cfg(target_arch = "wasm32")]
mod wasm_writer {
    use std::io;

    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    use super::LineBuffer;

    fn log_line(line: &str) {
        web_sys::console::log_1(&JsValue::from_str(line));
    }

    /// One writer per log record; whatever is buffered is flushed on drop.
    #[derive(Default)]
    pub(crate) struct ConsoleWriter {
        buffer: LineBuffer,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            for line in self.buffer.push(buf) {
                log_line(&line);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            if let Some(rest) = self.buffer.take_rest() {
                log_line(&rest);
            }
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let _ = io::Write::flush(self);
        }
    }

    pub(crate) struct ConsoleMakeWriter;

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter::default()
        }
    }

    /// Install the console subscriber. Later calls are ignored.
    pub(crate) fn init_logging(directives: &str) {
        let filter = EnvFilter::try_new(directives).unwrap_or_else(|err| {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "siteui: bad log filter {directives:?} ({err}), using \"info\""
            )));
            EnvFilter::new("info")
        });
        let subscriber = tracing_subscriber::fmt()
            .with_writer(ConsoleMakeWriter)
            .with_ansi(false)
            .without_time()
            .with_env_filter(filter)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}
