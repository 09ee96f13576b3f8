//! User-facing notices and the rate limit on sync notifications.

use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use rust_decimal::Decimal;

use crate::format::format_payment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A one-shot message for the interface to show, e.g. as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Decides when a Workforce to Opex sync is worth telling the user about.
///
/// The sync itself always happens immediately. Only the notice is limited:
/// one per `interval`, and never for a sync that did not change the value.
pub struct SyncNotifier<C: Clock = DefaultClock> {
    limiter: Option<RateLimiter<NotKeyed, InMemoryState, C, NoOpMiddleware<C::Instant>>>,
}

impl SyncNotifier<DefaultClock> {
    pub fn new(interval: Duration) -> Self {
        Self::with_clock(interval, &DefaultClock::default())
    }
}

impl<C: Clock> SyncNotifier<C> {
    /// A zero `interval` disables rate limiting.
    pub fn with_clock(
        interval: Duration,
        clock: &C,
    ) -> Self {
        let limiter = Quota::with_period(interval).map(|quota| RateLimiter::direct_with_clock(quota, clock));
        Self { limiter }
    }

    /// Returns a notice for a sync from `previous` to `current`, or `None`
    /// when nothing changed or a notice was already issued recently.
    pub fn on_sync(
        &self,
        previous: Decimal,
        current: Decimal,
    ) -> Option<Notice> {
        if previous == current {
            return None;
        }
        if let Some(limiter) = &self.limiter {
            if limiter.check().is_err() {
                tracing::debug!(%current, "workforce sync notice suppressed");
                return None;
            }
        }
        Some(Notice::info(format!(
            "Salaries and Wages updated from workforce data: {} per month",
            format_payment(current)
        )))
    }
}

#[cfg(test)]
mod tests {
    use governor::clock::FakeRelativeClock;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn notifier() -> (SyncNotifier<FakeRelativeClock>, FakeRelativeClock) {
        let clock = FakeRelativeClock::default();
        (SyncNotifier::with_clock(Duration::from_secs(3), &clock), clock)
    }

    #[test]
    fn unchanged_value_never_notifies() {
        let (notifier, _) = notifier();

        assert_eq!(notifier.on_sync(dec!(100), dec!(100)), None);
    }

    #[test]
    fn first_change_notifies() {
        let (notifier, _) = notifier();

        let notice = notifier.on_sync(dec!(100), dec!(5200)).unwrap();

        assert_eq!(notice.level, NoticeLevel::Info);
        assert!(notice.message.contains("$5,200.00"));
    }

    #[test]
    fn rapid_changes_are_suppressed_until_interval_passes() {
        let (notifier, clock) = notifier();

        assert!(notifier.on_sync(dec!(0), dec!(1)).is_some());
        assert!(notifier.on_sync(dec!(1), dec!(2)).is_none());

        clock.advance(Duration::from_secs(1));
        assert!(notifier.on_sync(dec!(2), dec!(3)).is_none());

        clock.advance(Duration::from_secs(3));
        assert!(notifier.on_sync(dec!(3), dec!(4)).is_some());
    }

    #[test]
    fn zero_interval_disables_limit() {
        let notifier = SyncNotifier::with_clock(Duration::ZERO, &FakeRelativeClock::default());

        assert!(notifier.on_sync(dec!(0), dec!(1)).is_some());
        assert!(notifier.on_sync(dec!(1), dec!(2)).is_some());
    }
}
