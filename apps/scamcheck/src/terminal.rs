use std::{
    fmt,
    io::{self, Write},
};

use client_core::DisplaySurface;
use tracing::warn;

const PROMPT: &str = "> ";
const LOADING_LINE: &str = "Checking message...";

/// Line-oriented surface for a terminal. Output is held until `flush`, so
/// glyph replacement lands before anything is printed.
pub struct TerminalSurface<W: Write + Send> {
    out: W,
    interactive: bool,
    output: Option<String>,
    painted: bool,
}

impl<W: Write + Send> TerminalSurface<W> {
    /// Interactive surfaces echo loaded samples, announce loading and print
    /// a prompt whenever controls come back. Typed input is never echoed.
    pub fn new(out: W, interactive: bool) -> Self {
        Self {
            out,
            interactive,
            output: None,
            painted: true,
        }
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = self.out.write_fmt(args).and_then(|_| self.out.flush()) {
            warn!(%err, "terminal write failed");
        }
    }
}

impl<W: Write + Send> DisplaySurface for TerminalSurface<W> {
    fn set_controls_enabled(&mut self, enabled: bool) {
        if enabled && self.interactive {
            self.emit(format_args!("{PROMPT}"));
        }
    }

    fn set_loading(&mut self, loading: bool) {
        if loading && self.interactive {
            self.emit(format_args!("{LOADING_LINE}\n"));
        }
    }

    // The terminal line editor already shows what was typed.
    fn set_input(&mut self, _text: &str) {}

    fn show_sample(&mut self, label: &str, text: &str) {
        if self.interactive {
            self.emit(format_args!("sample ({label}): {text}\n"));
        }
    }

    fn write_output(&mut self, content: String) {
        self.output = Some(content);
        self.painted = false;
    }

    fn clear_output(&mut self) {
        self.output = None;
        self.painted = true;
    }

    fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn flush(&mut self) {
        if self.painted {
            return;
        }
        self.painted = true;
        let Some(content) = self.output.clone() else {
            return;
        };
        let newline = if content.ends_with('\n') { "" } else { "\n" };
        self.emit(format_args!("{content}{newline}"));
    }
}

/// Prints straight to stdout. Used where the controller owns the surface.
pub fn stdout_surface(interactive: bool) -> TerminalSurface<io::Stdout> {
    TerminalSurface::new(io::stdout(), interactive)
}

#[cfg(test)]
mod tests {
    use super::*;

    impl<W: Write + Send> TerminalSurface<W> {
        fn into_inner(self) -> W {
            self.out
        }
    }

    fn printed(surface: TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.into_inner()).expect("utf8")
    }

    #[test]
    fn output_is_printed_only_on_flush() {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        surface.write_output("first".into());
        surface.write_output("second\n".into());
        assert_eq!(surface.output(), Some("second\n"));
        surface.flush();
        surface.flush();
        assert_eq!(printed(surface), "second\n");
    }

    #[test]
    fn cleared_output_is_never_printed() {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        surface.write_output("stale".into());
        surface.clear_output();
        surface.flush();
        assert!(surface.output().is_none());
        assert_eq!(printed(surface), "");
    }

    #[test]
    fn interactive_surface_prompts_and_announces_loading() {
        let mut surface = TerminalSurface::new(Vec::new(), true);
        surface.show_sample("KYC update", "URGENT share OTP");
        surface.set_controls_enabled(false);
        surface.set_loading(true);
        surface.write_output("verdict".into());
        surface.flush();
        surface.set_loading(false);
        surface.set_controls_enabled(true);

        assert_eq!(
            printed(surface),
            "sample (KYC update): URGENT share OTP\nChecking message...\nverdict\n> "
        );
    }

    #[test]
    fn typed_input_is_not_echoed() {
        let mut surface = TerminalSurface::new(Vec::new(), true);
        surface.set_input("share your OTP");
        assert_eq!(printed(surface), "");
    }

    #[test]
    fn one_shot_surface_prints_only_output() {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        surface.set_input("hello");
        surface.set_controls_enabled(false);
        surface.set_loading(true);
        surface.write_output("verdict\n".into());
        surface.flush();
        surface.set_controls_enabled(true);
        assert_eq!(printed(surface), "verdict\n");
    }
}
