//! Year and month view navigation.
//!
//! Navigation state is a plain value owned by the caller. Every transition takes the
//! current state and returns a [`Transition`]: the next state plus an optional
//! [`ViewSignal`] the caller is expected to act on (sync its shared view date, or
//! switch to the month view).

use std::fmt::Debug;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::{CalendarConfig, Month, MonthMatrix, Quarter, prelude::*};

/// Which year-view surface is active. Supplied by the caller (e.g. from the viewport
/// width); nothing here inspects the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// One quarter (four months) at a time, with quarter and year navigation
    #[default]
    #[display(fmt = "full")]
    Full,
    /// All twelve months at once, month selection only
    #[display(fmt = "compact")]
    Compact,
}

/// Request from a transition to the view's owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum ViewSignal {
    /// The displayed year moved; the owner's shared view date should follow
    YearChanged { year: i32 },
    /// Switch to the month view at this year and month
    ShowMonth { year: i32, month: Month },
}

/// Result of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition<S> {
    pub state:  S,
    pub signal: Option<ViewSignal>,
}

impl<S: Debug> Transition<S> {
    fn new(op: &str, from: &S, state: S, signal: Option<ViewSignal>) -> Self {
        log::debug!("{op}: {from:?} -> {state:?} ({signal:?})");
        Self { state, signal }
    }

    /// Signals a year change when the year moved
    fn year_step(op: &str, from: &S, state: S, old_year: i32, new_year: i32) -> Self {
        let signal = (old_year != new_year).then_some(ViewSignal::YearChanged { year: new_year });
        Self::new(op, from, state, signal)
    }
}

/// Navigation commands of the year view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(tag = "command", content = "month", rename_all = "snake_case")]
pub enum NavCommand {
    #[display(fmt = "previous quarter")]
    PreviousQuarter,
    #[display(fmt = "next quarter")]
    NextQuarter,
    #[display(fmt = "previous year")]
    PreviousYear,
    #[display(fmt = "next year")]
    NextYear,
    #[display(fmt = "select {_0}")]
    SelectMonth(Month),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// The command has no meaning in the active layout.
    #[error("{command} is not available in the {layout} layout")]
    Unsupported {
        command: NavCommand,
        layout:  LayoutMode,
    },
}

/// Position of the full year view: a year and one of its three four-month quarters.
///
/// Years saturate at the `i32` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{year} {quarter}")]
pub struct NavigationState {
    pub year:    i32,
    pub quarter: Quarter,
}

impl NavigationState {
    pub const fn new(year: i32, quarter: Quarter) -> Self {
        Self { year, quarter }
    }

    /// Starting position: the current year at quarter 0, whatever the current month is
    pub fn initial<D: Datelike>(now: &D) -> Self {
        Self::new(now.year(), Quarter::FIRST)
    }

    pub fn previous_quarter(self) -> Transition<Self> {
        let next = match Quarter::new(self.quarter.get().wrapping_sub(1)) {
            Ok(quarter) => Self::new(self.year, quarter),
            Err(_) => Self::new(self.year.saturating_sub(1), Quarter::LAST),
        };
        Transition::year_step("previous quarter", &self, next, self.year, next.year)
    }

    pub fn next_quarter(self) -> Transition<Self> {
        let next = match Quarter::new(self.quarter.get() + 1) {
            Ok(quarter) => Self::new(self.year, quarter),
            Err(_) => Self::new(self.year.saturating_add(1), Quarter::FIRST),
        };
        Transition::year_step("next quarter", &self, next, self.year, next.year)
    }

    pub fn previous_year(self) -> Transition<Self> {
        let next = Self::new(self.year.saturating_sub(1), self.quarter);
        Transition::year_step("previous year", &self, next, self.year, next.year)
    }

    pub fn next_year(self) -> Transition<Self> {
        let next = Self::new(self.year.saturating_add(1), self.quarter);
        Transition::year_step("next year", &self, next, self.year, next.year)
    }

    /// Asks the owner to open the month view; the year view itself does not move
    pub fn select_month(self, month: Month) -> Transition<Self> {
        let signal = ViewSignal::ShowMonth {
            year: self.year,
            month,
        };
        Transition::new("select month", &self, self, Some(signal))
    }

    /// The four months shown for the current quarter
    pub const fn visible_months(&self) -> [Month; 4] {
        self.quarter.months()
    }

    pub fn matrices(&self) -> Vec<MonthMatrix> {
        self.visible_months()
            .into_iter()
            .map(|month| MonthMatrix::new(self.year, month))
            .collect()
    }
}

/// The year view in either layout. Only the full layout carries a quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "lowercase")]
pub enum YearView {
    Full(NavigationState),
    Compact { year: i32 },
}

impl YearView {
    /// A freshly opened year view; the full layout starts at quarter 0
    pub const fn new(layout: LayoutMode, year: i32) -> Self {
        match layout {
            LayoutMode::Full => Self::Full(NavigationState::new(year, Quarter::FIRST)),
            LayoutMode::Compact => Self::Compact { year },
        }
    }

    /// Initial view for a configuration: the configured year, or the year of `now`
    pub fn from_config<D: Datelike>(config: &CalendarConfig, now: &D) -> Self {
        Self::new(config.layout, config.initial_year.unwrap_or_else(|| now.year()))
    }

    pub const fn layout(&self) -> LayoutMode {
        match self {
            Self::Full(_) => LayoutMode::Full,
            Self::Compact { .. } => LayoutMode::Compact,
        }
    }

    pub const fn year(&self) -> i32 {
        match self {
            Self::Full(state) => state.year,
            Self::Compact { year } => *year,
        }
    }

    pub const fn navigation(&self) -> Option<NavigationState> {
        match self {
            Self::Full(state) => Some(*state),
            Self::Compact { .. } => None,
        }
    }

    /// Switches layout keeping the year. Entering the full layout starts at quarter 0.
    pub const fn with_layout(self, layout: LayoutMode) -> Self {
        match (self, layout) {
            (Self::Full(_), LayoutMode::Full) | (Self::Compact { .. }, LayoutMode::Compact) => self,
            _ => Self::new(layout, self.year()),
        }
    }

    pub fn visible_months(&self) -> Vec<Month> {
        match self {
            Self::Full(state) => state.visible_months().to_vec(),
            Self::Compact { .. } => Month::all().collect(),
        }
    }

    /// One grid per visible month, in display order
    pub fn matrices(&self) -> Vec<MonthMatrix> {
        match self {
            Self::Full(state) => state.matrices(),
            Self::Compact { year } => Month::all().map(|month| MonthMatrix::new(*year, month)).collect(),
        }
    }

    pub fn select_month(self, month: Month) -> Transition<Self> {
        match self {
            Self::Full(state) => {
                let Transition { state, signal } = state.select_month(month);
                Transition {
                    state: Self::Full(state),
                    signal,
                }
            }
            Self::Compact { year } => {
                let signal = ViewSignal::ShowMonth { year, month };
                Transition::new("select month", &self, self, Some(signal))
            }
        }
    }

    /// Applies a command
    ///
    /// # Errors
    /// Returns `NavigationError::Unsupported` for quarter and year steps in the compact layout.
    pub fn apply(self, command: NavCommand) -> Result<Transition<Self>, NavigationError> {
        if let NavCommand::SelectMonth(month) = command {
            return Ok(self.select_month(month));
        }
        let Self::Full(state) = self else {
            return Err(NavigationError::Unsupported {
                command,
                layout: self.layout(),
            });
        };
        let Transition { state, signal } = match command {
            NavCommand::PreviousQuarter => state.previous_quarter(),
            NavCommand::NextQuarter => state.next_quarter(),
            NavCommand::PreviousYear => state.previous_year(),
            NavCommand::NextYear => state.next_year(),
            NavCommand::SelectMonth(month) => state.select_month(month),
        };
        Ok(Transition {
            state: Self::Full(state),
            signal,
        })
    }
}

/// Position of the month view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{month} {year}")]
pub struct MonthViewState {
    pub year:  i32,
    pub month: Month,
}

impl MonthViewState {
    pub const fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// Month view opened by a `ShowMonth` signal; `None` for other signals
    pub const fn from_signal(signal: ViewSignal) -> Option<Self> {
        match signal {
            ViewSignal::ShowMonth { year, month } => Some(Self::new(year, month)),
            ViewSignal::YearChanged { .. } => None,
        }
    }

    pub fn previous_month(self) -> Transition<Self> {
        let (month, wrapped) = self.month.pred_wrapping();
        let year = if wrapped { self.year.saturating_sub(1) } else { self.year };
        let next = Self::new(year, month);
        Transition::year_step("previous month", &self, next, self.year, next.year)
    }

    pub fn next_month(self) -> Transition<Self> {
        let (month, wrapped) = self.month.succ_wrapping();
        let year = if wrapped { self.year.saturating_add(1) } else { self.year };
        let next = Self::new(year, month);
        Transition::year_step("next month", &self, next, self.year, next.year)
    }

    pub fn matrix(&self) -> MonthMatrix {
        MonthMatrix::new(self.year, self.month)
    }

    /// Back to the year view of the same year
    pub const fn to_year_view(self, layout: LayoutMode) -> YearView {
        YearView::new(layout, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_month_matrix;
    use chrono::NaiveDate;

    fn state(year: i32, quarter: u8) -> NavigationState {
        NavigationState::new(year, Quarter::new(quarter).unwrap())
    }

    fn month(index: u8) -> Month {
        Month::new(index).unwrap()
    }

    #[test]
    fn test_next_quarter_wraps_into_next_year() {
        let t = state(2025, 2).next_quarter();
        assert_eq!(t.state, state(2026, 0));
        assert_eq!(t.signal, Some(ViewSignal::YearChanged { year: 2026 }));
    }

    #[test]
    fn test_previous_quarter_wraps_into_previous_year() {
        let t = state(2025, 0).previous_quarter();
        assert_eq!(t.state, state(2024, 2));
        assert_eq!(t.signal, Some(ViewSignal::YearChanged { year: 2024 }));
    }

    #[test]
    fn test_quarter_steps_within_year() {
        let t = state(2025, 0).next_quarter();
        assert_eq!(t.state, state(2025, 1));
        assert_eq!(t.signal, None);

        let t = state(2025, 2).previous_quarter();
        assert_eq!(t.state, state(2025, 1));
        assert_eq!(t.signal, None);
    }

    #[test]
    fn test_year_steps_keep_quarter() {
        let t = state(2025, 1).previous_year();
        assert_eq!(t.state, state(2024, 1));
        assert_eq!(t.signal, Some(ViewSignal::YearChanged { year: 2024 }));

        assert_eq!(state(2025, 2).next_year().state, state(2026, 2));
    }

    #[test]
    fn test_three_quarters_make_a_year() {
        let mut s = state(2025, 1);
        for _ in 0..3 {
            s = s.next_quarter().state;
        }
        assert_eq!(s, state(2025, 1).next_year().state);

        for _ in 0..3 {
            s = s.previous_quarter().state;
        }
        assert_eq!(s, state(2025, 1));
    }

    #[test]
    fn test_select_month_signals_without_moving() {
        let s = state(2025, 0);
        let t = s.select_month(month(9));
        assert_eq!(t.state, s);
        assert_eq!(
            t.signal,
            Some(ViewSignal::ShowMonth {
                year: 2025,
                month: month(9)
            })
        );
    }

    #[test]
    fn test_initial_state_ignores_current_month() {
        let now = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
        assert_eq!(NavigationState::initial(&now), state(2025, 0));
    }

    #[test]
    fn test_visible_months_and_matrices() {
        let s = state(2024, 2);
        let indices: Vec<u8> = s.visible_months().iter().map(|m| m.get()).collect();
        assert_eq!(indices, vec![8, 9, 10, 11]);

        let matrices = s.matrices();
        assert_eq!(matrices.len(), 4);
        for (matrix, index) in matrices.iter().zip(8..) {
            assert_eq!(*matrix, build_month_matrix(2024, index));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(state(2025, 1).to_string(), "2025 May-Aug");
        assert_eq!(MonthViewState::new(2025, month(5)).to_string(), "June 2025");
        assert_eq!(NavCommand::SelectMonth(month(2)).to_string(), "select March");
    }

    #[test]
    fn test_year_view_full_applies_commands() {
        let view = YearView::new(LayoutMode::Full, 2025);
        assert_eq!(view.navigation(), Some(state(2025, 0)));

        let t = view.apply(NavCommand::PreviousQuarter).unwrap();
        assert_eq!(t.state, YearView::Full(state(2024, 2)));
        assert_eq!(t.signal, Some(ViewSignal::YearChanged { year: 2024 }));

        let t = t.state.apply(NavCommand::NextYear).unwrap();
        assert_eq!(t.state.year(), 2025);
        assert_eq!(t.state.navigation().map(|s| s.quarter.get()), Some(2));
    }

    #[test]
    fn test_compact_view_rejects_quarter_and_year_steps() {
        let view = YearView::new(LayoutMode::Compact, 2025);
        for command in [
            NavCommand::PreviousQuarter,
            NavCommand::NextQuarter,
            NavCommand::PreviousYear,
            NavCommand::NextYear,
        ] {
            assert_eq!(
                view.apply(command),
                Err(NavigationError::Unsupported {
                    command,
                    layout: LayoutMode::Compact
                })
            );
        }

        let err = view.apply(NavCommand::NextQuarter).unwrap_err();
        assert_eq!(
            err.to_string(),
            "next quarter is not available in the compact layout"
        );
    }

    #[test]
    fn test_compact_view_shows_all_months() {
        let view = YearView::new(LayoutMode::Compact, 2024);
        assert_eq!(view.navigation(), None);
        assert_eq!(view.visible_months().len(), 12);

        let matrices = view.matrices();
        assert_eq!(matrices.len(), 12);
        for (matrix, index) in matrices.iter().zip(0..) {
            assert_eq!(*matrix, build_month_matrix(2024, index));
        }

        let t = view.apply(NavCommand::SelectMonth(month(1))).unwrap();
        assert_eq!(t.state, view);
        assert_eq!(
            t.signal,
            Some(ViewSignal::ShowMonth {
                year: 2024,
                month: month(1)
            })
        );
    }

    #[test]
    fn test_both_layouts_agree_on_shared_months() {
        let compact = YearView::new(LayoutMode::Compact, 2025).matrices();
        let mut full = YearView::new(LayoutMode::Full, 2025);
        for quarter in 0..3 {
            for (offset, matrix) in full.matrices().into_iter().enumerate() {
                assert_eq!(matrix, compact[quarter * 4 + offset]);
            }
            full = full.apply(NavCommand::NextQuarter).unwrap().state;
        }
    }

    #[test]
    fn test_with_layout() {
        let full = YearView::Full(state(2030, 2));
        let compact = full.with_layout(LayoutMode::Compact);
        assert_eq!(compact, YearView::Compact { year: 2030 });
        assert_eq!(compact.with_layout(LayoutMode::Full), YearView::Full(state(2030, 0)));
        assert_eq!(full.with_layout(LayoutMode::Full), full);
    }

    #[test]
    fn test_month_view_wraps_across_years() {
        let t = MonthViewState::new(2025, Month::DECEMBER).next_month();
        assert_eq!(t.state, MonthViewState::new(2026, Month::JANUARY));
        assert_eq!(t.signal, Some(ViewSignal::YearChanged { year: 2026 }));

        let t = MonthViewState::new(2025, Month::JANUARY).previous_month();
        assert_eq!(t.state, MonthViewState::new(2024, Month::DECEMBER));

        let t = MonthViewState::new(2025, month(6)).next_month();
        assert_eq!(t.state, MonthViewState::new(2025, month(7)));
        assert_eq!(t.signal, None);
    }

    #[test]
    fn test_month_view_round_trip_through_year_view() {
        let t = YearView::new(LayoutMode::Full, 2025).select_month(month(4));
        let month_view = MonthViewState::from_signal(t.signal.unwrap()).unwrap();
        assert_eq!(month_view.matrix(), build_month_matrix(2025, 4));

        assert_eq!(
            month_view.to_year_view(LayoutMode::Full),
            YearView::Full(state(2025, 0))
        );
        assert_eq!(
            MonthViewState::from_signal(ViewSignal::YearChanged { year: 2025 }),
            None
        );
    }

    #[test]
    fn test_year_view_serde() {
        let view = YearView::Full(state(2025, 1));
        let json = serde_json::to_value(view).unwrap();
        assert_eq!(json["layout"], "full");
        assert_eq!(json["year"], 2025);
        assert_eq!(json["quarter"], 1);
        let parsed: YearView = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, view);

        let compact: YearView = serde_json::from_str(r#"{"layout":"compact","year":1999}"#).unwrap();
        assert_eq!(compact, YearView::Compact { year: 1999 });

        let bad: Result<YearView, _> =
            serde_json::from_str(r#"{"layout":"full","year":2025,"quarter":3}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_signal_serde() {
        let json = serde_json::to_string(&ViewSignal::ShowMonth {
            year: 2025,
            month: month(5),
        })
        .unwrap();
        assert_eq!(json, r#"{"signal":"show_month","year":2025,"month":5}"#);
    }
}
