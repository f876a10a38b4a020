//! Screen workflow services for the POS back-office
//!
//! One service per screen family. A service ties the session guard, the
//! local sheet gates, and the remote API together; it holds no render
//! state. Submissions are fire-once: nothing here retries automatically,
//! and on failure the caller's local state is left untouched.

pub mod count_sheet;
pub mod dashboard;
pub mod receive_sheet;
pub mod worktime;

pub use count_sheet::CountSheetService;
pub use dashboard::DashboardService;
pub use receive_sheet::ReceiveSheetService;
pub use worktime::WorktimeService;

/// Unix seconds now, the clock every session guard reads
fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
