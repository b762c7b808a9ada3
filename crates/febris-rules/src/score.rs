//! Per-request scoring state.
//!
//! A fresh `ScoreState` is created for every evaluation and dropped with it.
//! Only the engine's passes can change it, through crate-private methods;
//! the reasoning trace can be appended to but never rewritten.

use febris_contracts::{assessment::DiseaseScores, knowledge::AlarmRule};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreState {
    covid: f64,
    dengue: f64,
    alarm_active: bool,
    triggered_alarms: Vec<String>,
    pending_action: Option<String>,
    trace: Vec<String>,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire an alarm: keep its message and let its action replace any
    /// action set by an earlier alarm.
    pub(crate) fn raise_alarm(&mut self, rule: &AlarmRule) {
        self.alarm_active = true;
        self.triggered_alarms.push(rule.message.clone());
        self.pending_action = Some(rule.action.clone());
    }

    pub(crate) fn add(&mut self, covid: f64, dengue: f64) {
        self.covid += covid;
        self.dengue += dengue;
    }

    pub(crate) fn record(&mut self, line: String) {
        self.trace.push(line);
    }

    pub fn scores(&self) -> DiseaseScores {
        DiseaseScores { covid: self.covid, dengue: self.dengue }
    }

    pub fn alarm_active(&self) -> bool {
        self.alarm_active
    }

    /// Alarm messages in the order the alarms fired.
    pub fn triggered_alarms(&self) -> &[String] {
        &self.triggered_alarms
    }

    /// The action of the last alarm that fired, if any.
    pub fn pending_action(&self) -> Option<&str> {
        self.pending_action.as_deref()
    }

    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Option<String>, Vec<String>) {
        (self.triggered_alarms, self.pending_action, self.trace)
    }
}
