//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never touches the host page,
//! the network or the frame scheduler directly. It returns a list of
//! [`Action`]s that the host runtime carries out in order.

use crate::slider::StripId;
use crate::worker::WorkerMessage;

/// User-facing notices shown as blocking alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Save was attempted without a stored messaging identity.
    MissingIdentity,
    ListingSaved,
    SaveFailed,
}

impl Notice {
    /// Alert text, in the page's language.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingIdentity => "❗Avval Telegram orqali oching!",
            Self::ListingSaved => "✅ E’lon Telegramga yuborildi!",
            Self::SaveFailed => "❌ Xato! Qayta urinib ko‘ring",
        }
    }
}

/// How the host should open a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOpener {
    /// Through the embedding messaging client's link opener.
    MessagingClient,
    /// Replace the current page location.
    DirectNavigation,
    /// A new browser window or tab.
    NewWindow,
}

/// Commands for the host runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Queue a request for the background worker.
    PostToWorker(WorkerMessage),

    ShowNotice(Notice),

    /// Ask the user to confirm before leaving for the bot.
    ///
    /// On confirmation the host sends
    /// [`Event::DeepLinkConfirmed`](crate::app::Event::DeepLinkConfirmed).
    ConfirmDeepLink { listing_id: i64, prompt: &'static str },

    OpenLink { uri: String, via: LinkOpener },

    CopyToClipboard { text: String },

    /// Deliver [`Event::AnimationFrame`](crate::app::Event::AnimationFrame)
    /// for `strip` on the next rendered frame.
    RequestAnimationFrame { strip: StripId },

    /// Drop a previously requested frame for `strip`.
    CancelAnimationFrame { strip: StripId },
}
