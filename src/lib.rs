//! Type-safe Rust library for school timetable resolution.
//!
//! Homeroom maps wall-clock time onto a static weekly class schedule and
//! keeps a client informed as the day moves: which class is on now, which
//! break we are in, what comes next, and when to nudge the user that a class
//! is about to start.
//!
//! # Features
//!
//! - **Pure resolution**: deterministic timestamp-to-slot lookups with no
//!   hidden state; weekends, gaps and empty periods are values, not errors
//! - **Live moment feed**: a polled stream of classifications with throttled
//!   subscriptions and a cancellation handle
//! - **Replay**: scripted timestamp sequences that behave like a live feed,
//!   for tests and demos
//! - **Class alerts**: deduplicated start/starting-soon notifications over an
//!   injectable dispatcher
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use homeroom::{Homeroom, RefreshRate};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> homeroom::Result<()> {
//!     let board = Homeroom::open("schedule.json").await?;
//!     let mut moments = board.subscribe(RefreshRate::Schedule);
//!
//!     while let Some(moment) = moments.next().await {
//!         match &moment.active_entry {
//!             Some(entry) => println!("Now: period {} — {}", entry.period, entry.subject),
//!             None => println!("No class right now"),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
pub mod types;

// Pure resolution over the fixed tables
pub mod resolver;

// Dataset loading
pub mod dataset;

// Stream-based moment architecture
pub mod board;
pub mod clock;
pub mod driver;
pub mod provider;
pub mod providers;
pub mod stream;

// Host-facing services
pub mod cache;
pub mod install;
pub mod notify;

// Core exports
pub use error::*;
pub use types::*;

pub use board::Board;
pub use cache::{Fetcher, OfflineCache};
pub use clock::{Clock, FixedClock, SyncPolicy, SyncQuality, SyncSample, SyncedClock, SystemClock};
pub use dataset::{load_entries, parse_entries, validate_entries};
pub use install::{InstallHost, InstallOutcome, InstallService};
pub use notify::{Alert, AlertPolicy, ClassAlerts, NoopNotifier, Notifier, Permission};
pub use provider::MomentProvider;
pub use providers::{LiveProvider, ReplayProvider};
pub use resolver::{
    build_daily_agenda, class_just_started, class_starting_soon, find_active_entry,
    find_next_entry, resolve_current_moment,
};

/// Unified entry point for schedule boards.
///
/// This factory provides a consistent API for opening live boards and
/// scripted replays.
///
/// # Examples
///
/// ## Live board
/// ```rust,no_run
/// use homeroom::Homeroom;
///
/// #[tokio::main]
/// async fn main() -> homeroom::Result<()> {
///     let board = Homeroom::open("schedule.json").await?;
///     // Use board...
///     Ok(())
/// }
/// ```
///
/// ## Scripted replay
/// ```rust,no_run
/// use homeroom::Homeroom;
/// use chrono::NaiveDate;
///
/// #[tokio::main]
/// async fn main() -> homeroom::Result<()> {
///     let monday_morning = NaiveDate::from_ymd_opt(2026, 8, 3)
///         .unwrap()
///         .and_hms_opt(8, 30, 0)
///         .unwrap();
///     let board = Homeroom::replay(vec![], vec![monday_morning]).await?;
///     # let _ = board;
///     Ok(())
/// }
/// ```
pub struct Homeroom;

impl Homeroom {
    /// Open a live board from a JSON dataset file.
    ///
    /// Loads and validates the dataset, spawns the moment feed on the system
    /// clock, and waits for the first resolved moment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a JSON array of
    /// entries, or violates dataset invariants (period range, uniqueness).
    pub async fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Board> {
        Board::open(path).await
    }

    /// Open a board that replays a scripted timestamp sequence.
    ///
    /// The board behaves identically to a live one, including subscriptions
    /// and agenda updates, and ends its feed when the script is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the entries violate dataset invariants.
    pub async fn replay(
        entries: Vec<ScheduleEntry>,
        timestamps: Vec<chrono::NaiveDateTime>,
    ) -> Result<Board> {
        Board::replay(entries, timestamps).await
    }
}
