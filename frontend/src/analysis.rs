//! State of the data-analysis view: pasted input, in-flight flag and the
//! report currently on screen.

use crate::models::DataAnalysisResult;

/// Binds an analysis result to the view state it was requested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket {
    epoch: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisState {
    input: String,
    in_flight: bool,
    result: Option<DataAnalysisResult>,
    epoch: u64,
}

impl AnalysisState {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn result(&self) -> Option<&DataAnalysisResult> {
        self.result.as_ref()
    }

    pub fn can_run(&self) -> bool {
        !self.in_flight && !self.input.trim().is_empty()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Marks the view busy and returns the data to analyse, or `None` when the
    /// input is blank or a request is already outstanding. The input is kept.
    pub fn start(&mut self) -> Option<(AnalysisTicket, String)> {
        if !self.can_run() {
            return None;
        }
        self.in_flight = true;
        Some((AnalysisTicket { epoch: self.epoch }, self.input.clone()))
    }

    /// Replaces the displayed report wholesale; `None` clears it. Stale
    /// tickets are ignored.
    pub fn finish(&mut self, ticket: AnalysisTicket, result: Option<DataAnalysisResult>) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.result = result;
        self.in_flight = false;
        true
    }

    /// Back to a blank view; an outstanding request will be discarded.
    pub fn reset(&mut self) {
        *self = Self { epoch: self.epoch + 1, ..Self::default() };
    }
}
