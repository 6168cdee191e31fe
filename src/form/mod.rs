//! Team form module
//!
//! Normalizes match rows to a team's perspective and aggregates rolling form

mod aggregator;
mod metric;
mod ratings;
mod referee;
mod snapshot;
mod view;

pub use aggregator::{
    team_history, FormAggregator, FormError, WindowError, DEFAULT_MIN_REQUIRED, DEFAULT_WINDOW,
};
pub use metric::{Metric, MetricSource};
pub use ratings::TeamRatings;
pub use referee::{RefereeContext, RefereeProfile, RefereeStats, DEFAULT_REFEREE_AVERAGE};
pub use snapshot::TeamFormSnapshot;
pub use view::{normalize, TeamMatchView};
