use super::line::SourceLine;

/// Scanner that splits pseudocode into classified lines
pub struct LineScanner<'a> {
    /// Raw pseudocode
    source: &'a str,
}

impl<'a> LineScanner<'a> {
    /// Creates a new scanner over raw pseudocode
    pub fn new(source: &'a str) -> Self {
        LineScanner { source }
    }

    /// Splits on any newline variant (`\n`, `\r\n`, lone `\r`), drops blank
    /// lines and classifies the trimmed survivors.
    ///
    /// Never fails: unrecognised lines come back as [`LineKind::Other`].
    ///
    /// [`LineKind::Other`]: super::LineKind::Other
    pub fn scan_lines(&self) -> Vec<SourceLine> {
        let normalized = self.source.replace("\r\n", "\n");

        normalized
            .split(|c| c == '\n' || c == '\r')
            .enumerate()
            .filter_map(|(idx, raw)| {
                let text = raw.trim();
                if text.is_empty() {
                    None
                } else {
                    Some(SourceLine::new(text, idx + 1))
                }
            })
            .collect()
    }
}
