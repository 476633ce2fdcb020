use log::warn;
use std::io::Write;
use std::time::Duration;

/// Marker shown at the end of the text while a reply is still being revealed.
pub const CURSOR: &str = "▌";

/// Somewhere a chat reply can be drawn. Each call replaces what was drawn
/// before with `text`; `streaming` is true while more of the reply is still
/// to come and a [`CURSOR`] should follow the text.
pub trait Renderer {
    fn render(&mut self, text: &str, streaming: bool);
}

/// Reveals an already complete reply one whitespace-separated token at a
/// time. Only sleeps between renders; no I/O happens here.
///
/// The buffer starts empty and every token is appended followed by a single
/// space. The returned string is that buffer without its trailing space.
pub async fn replay(text: &str, renderer: &mut dyn Renderer, delay: Duration) -> String {
    let mut buffer = String::with_capacity(text.len() + 1);

    for token in text.split_whitespace() {
        buffer.push_str(token);
        buffer.push(' ');
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        renderer.render(&buffer, true);
    }

    let final_text = buffer.trim_end().to_string();
    renderer.render(&final_text, false);
    final_text
}

/// Draws onto a terminal by printing only the newly revealed suffix, so the
/// scrollback is not repainted on every token.
pub struct TerminalRenderer<W: Write> {
    out: W,
    shown: usize,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, shown: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, text: &str, streaming: bool) {
        let fresh = text.get(self.shown..).unwrap_or("");

        let written = if streaming {
            self.shown = text.len();
            write!(self.out, "{}{}\x08", fresh, CURSOR)
        } else {
            self.shown = 0;
            writeln!(self.out, "{} ", fresh)
        };

        // A failed write only costs the display, never the reply itself
        if let Err(e) = written.and_then(|_| self.out.flush()) {
            warn!("Failed to draw reply: {}", e);
        }
    }
}
