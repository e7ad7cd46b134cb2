pub mod requests;
pub mod responses;

pub use requests::{AttendanceForm, MarksForm};
pub use responses::{RecorderPage, RosterStudent};
