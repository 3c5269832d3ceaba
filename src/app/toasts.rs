//! Ephemeral toast layer.
//!
//! Three independent channels, each holding at most one self-expiring
//! message: the proposal-screen idle nudge, the background-click counter
//! payoff, and the flash channel used by the question acknowledgments and
//! the return-visit greeting. Channels never queue or dedup across each
//! other; a new post on a channel simply replaces what was there.

/// Qualifying background clicks before the celebratory toast fires.
pub const CLICKS_TO_CELEBRATE: u32 = 5;

/// Banner channels hold messages for this long.
pub const BANNER_TOAST_MS: f64 = 4000.0;
/// The short acknowledgment flash.
pub const FLASH_TOAST_MS: f64 = 2500.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastChannel {
    Idle,
    Clicks,
    Flash,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Toast {
    pub message: &'static str,
    pub expires_at: f64,
}

#[derive(Debug, Default, PartialEq)]
pub struct ToastLayer {
    idle: Option<Toast>,
    clicks: Option<Toast>,
    flash: Option<Toast>,
}

impl ToastLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts a message; returns the expiry instant so the caller can
    /// schedule the matching [`Effect::ExpireToast`](super::sequencer::Effect).
    pub fn post(
        &mut self,
        channel: ToastChannel,
        message: &'static str,
        now: f64,
        duration_ms: f64,
    ) -> f64 {
        let toast = Toast {
            message,
            expires_at: now + duration_ms,
        };
        *self.slot_mut(channel) = Some(toast);
        toast.expires_at
    }

    pub fn clear(&mut self, channel: ToastChannel) {
        *self.slot_mut(channel) = None;
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// The message currently live on a channel, if its expiry has not passed.
    pub fn live(&self, channel: ToastChannel, now: f64) -> Option<&'static str> {
        self.slot(channel)
            .filter(|t| now < t.expires_at)
            .map(|t| t.message)
    }

    fn slot(&self, channel: ToastChannel) -> Option<Toast> {
        match channel {
            ToastChannel::Idle => self.idle,
            ToastChannel::Clicks => self.clicks,
            ToastChannel::Flash => self.flash,
        }
    }

    fn slot_mut(&mut self, channel: ToastChannel) -> &mut Option<Toast> {
        match channel {
            ToastChannel::Idle => &mut self.idle,
            ToastChannel::Clicks => &mut self.clicks,
            ToastChannel::Flash => &mut self.flash,
        }
    }
}

/// Background-click counter. Returns true exactly when the count reaches
/// [`CLICKS_TO_CELEBRATE`], at which point it resets to zero.
pub fn register_background_click(count: &mut u32) -> bool {
    *count += 1;
    if *count == CLICKS_TO_CELEBRATE {
        *count = 0;
        true
    } else {
        false
    }
}
