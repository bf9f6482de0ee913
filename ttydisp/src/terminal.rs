/*!
    Terminal size discovery.
*/

/**
    Source of the current terminal size, in (columns, rows).
*/
pub trait TerminalProbe {
    /**
        Returns the current size, or None if there is no terminal to ask.
    */
    fn size(&self) -> Option<(u32, u32)>;
}

/**
    Queries the controlling terminal through crossterm.
*/
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalSizeProbe;

impl TerminalProbe for TerminalSizeProbe {
    fn size(&self) -> Option<(u32, u32)> {
        let (columns, rows) = crossterm::terminal::size().ok()?;
        (columns > 0 && rows > 0).then(|| (u32::from(columns), u32::from(rows)))
    }
}

impl<F> TerminalProbe for F
where
    F: Fn() -> Option<(u32, u32)>,
{
    fn size(&self) -> Option<(u32, u32)> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn closures_are_probes() {
        let calls = Cell::new(0);
        let probe = || -> Option<(u32, u32)> {
            calls.set(calls.get() + 1);
            Some((80, 24))
        };

        assert_eq!(probe.size(), Some((80, 24)));
        assert_eq!(probe.size(), Some((80, 24)));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn crossterm_probe_never_reports_empty_sizes() {
        // Under a test harness there may or may not be a terminal
        if let Some((columns, rows)) = TerminalSizeProbe.size() {
            assert!(columns > 0 && rows > 0);
        }
    }
}
