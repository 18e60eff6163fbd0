//! Interactive display of finished figures.
//!
//! Plotting functions hand their figure to a [`FigureDisplay`] when asked to
//! show it. The default [`TerminalDisplay`] prints a text preview; other
//! front ends (an image viewer, a notebook) implement the trait themselves.

use std::io::{self, Write};

use crate::error::Result;
use crate::figure::Figure;
use crate::output::{TerminalEncoder, TerminalMode};

/// Something that can present a figure to the user.
pub trait FigureDisplay {
    /// Present `figure`. May block until the user dismisses it.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure cannot be rendered or presented.
    fn show(&mut self, figure: &Figure) -> Result<()>;
}

/// Prints a downsampled preview of the figure to a writer (stdout by default).
#[derive(Debug)]
pub struct TerminalDisplay<W: Write = io::Stdout> {
    encoder: TerminalEncoder,
    out: W,
}

impl TerminalDisplay {
    /// ASCII preview on stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// ASCII preview written to `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            encoder: TerminalEncoder::new(),
            out,
        }
    }

    /// Use a different rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.encoder = self.encoder.mode(mode);
        self
    }

    /// Preview width in characters.
    #[must_use]
    pub fn columns(mut self, columns: u32) -> Self {
        self.encoder = self.encoder.columns(columns);
        self
    }

    /// Consume the display and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FigureDisplay for TerminalDisplay<W> {
    fn show(&mut self, figure: &Figure) -> Result<()> {
        let fb = figure.to_framebuffer()?;
        self.encoder.write_to(&fb, &mut self.out)?;
        Ok(())
    }
}
