/*!
 # Strip renderers

 Ways to show a computed [`Strip`]. Hardware drivers live outside this
 crate and only need to implement [`StripRenderer`].
*/

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::color::{to_hex, to_rgb8};
use crate::strip::Strip;
use crate::Result;

/// Default file written by [`HtmlPreview`]
pub const DEFAULT_PREVIEW_FILE: &str = "preview.html";

const PREVIEW_CSS: &str = "
      body {
        background-color: #000;
        display: flex;
        align-items: center;
        justify-content: center;
      }
      .lights {
        display: flex;
      }
      .light {
        width: 15px;
        height: 15px;
        border-radius: 50%;
        filter: blur(2px);
        margin: 2px;
      }
";

/// Something that can display a strip
pub trait StripRenderer {
    /// Shows the strip
    ///
    /// # Errors
    ///
    /// Returns an error when the target cannot be written.
    fn render(&mut self, strip: &Strip) -> Result<()>;
}

/// Writes an HTML page with one blurred round light per slot
#[derive(Debug, Clone)]
pub struct HtmlPreview {
    /// File the page is written to
    pub path: PathBuf,
}

impl Default for HtmlPreview {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_FILE)
    }
}

impl HtmlPreview {
    /// Creates a preview written to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Builds the preview page
    pub fn page(strip: &Strip) -> String {
        let body = strip
            .iter()
            .map(|color| {
                format!(
                    "<div class='light' style='background-color: {}'></div>",
                    to_hex(*color)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "<html><head><style>{PREVIEW_CSS}</style></head><body><div class='lights'>{body}</div></body></html>"
        )
    }
}

impl StripRenderer for HtmlPreview {
    #[instrument(skip(self, strip), fields(path = %self.path.display()))]
    fn render(&mut self, strip: &Strip) -> Result<()> {
        std::fs::write(&self.path, Self::page(strip))?;
        info!("Preview of {} lights written to {}", strip.len(), self.path.display());
        Ok(())
    }
}

/// Prints one truecolor `●` per slot on a single line
#[derive(Debug)]
pub struct TerminalPreview<W: Write> {
    out: W,
}

impl<W: Write> TerminalPreview<W> {
    /// Creates a preview writing to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StripRenderer for TerminalPreview<W> {
    fn render(&mut self, strip: &Strip) -> Result<()> {
        for color in strip {
            let (red, green, blue) = to_rgb8(*color);
            write!(self.out, "\x1b[38;2;{red};{green};{blue}m●\x1b[0m")?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        debug!("Printed {} lights", strip.len());
        Ok(())
    }
}

/// Prints one `#RRGGBB` code per line
#[derive(Debug)]
pub struct HexList<W: Write> {
    out: W,
}

impl<W: Write> HexList<W> {
    /// Creates a list writing to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StripRenderer for HexList<W> {
    fn render(&mut self, strip: &Strip) -> Result<()> {
        for code in strip.hex_codes() {
            writeln!(self.out, "{code}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}
