//! Browser wall clock.

use pos_vfs::Clock;

/// Millisecond clock backed by `Date.now()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateClock;

impl Clock for DateClock {
    fn now(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}
