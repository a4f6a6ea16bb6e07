//! Event handling and state transitions.
//!
//! Every page interaction (clicks on popup controls, touch input on a photo
//! strip, animation frames, worker results) arrives as an [`Event`].
//! [`handle_event`] mutates the [`MapSession`] and returns whether the page
//! needs re-rendering plus the [`Action`]s the host must carry out.
//!
//! Slider events never request a re-render: the slider writes the strip's
//! scroll offset and indicator flags directly through its surfaces.
//!
//! # Example
//!
//! ```
//! use listing_map::app::{handle_event, Action, Event, HostCapabilities, MapSession, Notice};
//! use listing_map::Config;
//!
//! let mut session = MapSession::new(&Config::default(), HostCapabilities::default());
//! let (rerender, actions) = handle_event(&mut session, &Event::SaveListing { listing_id: 3 })?;
//! assert!(!rerender);
//! assert_eq!(actions, vec![Action::ShowNotice(Notice::MissingIdentity)]);
//! # Ok::<(), listing_map::domain::ListingMapError>(())
//! ```

use crate::app::actions::{Action, LinkOpener, Notice};
use crate::app::state::{LoadStatus, MapSession};
use crate::domain::contact::{tel_uri, telegram_deep_link};
use crate::domain::error::Result;
use crate::slider::{FrameCommand, GestureInput, StripId};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Asked before sending the user to the bot for listing details.
pub const DEEP_LINK_PROMPT: &str =
    "Batafsil ma'lumot olish uchun Telegram botga yo'naltirilmoqdasiz. Davom etasizmi?";

/// Page interactions and background results.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Start (or restart) loading listings for the session's query.
    ListingsRequested,

    WorkerResponse(WorkerResponse),

    /// The map opened a listing's popup.
    PopupOpened { listing_id: i64 },
    PopupClosed,

    /// The description expand/collapse control was clicked.
    ToggleDescription { listing_id: i64 },

    /// The save button was clicked.
    SaveListing { listing_id: i64 },

    /// The call button was clicked.
    CallOwner { listing_id: i64 },

    /// The user asked for listing details through the bot.
    ShowListingDetails { listing_id: i64 },
    /// The user accepted the deep-link confirmation prompt.
    DeepLinkConfirmed { listing_id: i64 },
    CopyDeepLink,
    CloseDeepLink,

    /// Pointer or touch input on a photo strip.
    Gesture { strip: StripId, input: GestureInput },

    /// A frame requested for `strip` is being rendered.
    AnimationFrame { strip: StripId },

    /// A photo strip scrolled by other means (wheel, keyboard, native fling).
    StripScrolled { strip: StripId },
}

impl Event {
    const fn name(&self) -> &'static str {
        match self {
            Self::ListingsRequested => "listings_requested",
            Self::WorkerResponse(_) => "worker_response",
            Self::PopupOpened { .. } => "popup_opened",
            Self::PopupClosed => "popup_closed",
            Self::ToggleDescription { .. } => "toggle_description",
            Self::SaveListing { .. } => "save_listing",
            Self::CallOwner { .. } => "call_owner",
            Self::ShowListingDetails { .. } => "show_listing_details",
            Self::DeepLinkConfirmed { .. } => "deep_link_confirmed",
            Self::CopyDeepLink => "copy_deep_link",
            Self::CloseDeepLink => "close_deep_link",
            Self::Gesture { .. } => "gesture",
            Self::AnimationFrame { .. } => "animation_frame",
            Self::StripScrolled { .. } => "strip_scrolled",
        }
    }

    /// Slider traffic is too chatty for debug-level spans.
    const fn is_high_frequency(&self) -> bool {
        matches!(
            self,
            Self::Gesture { .. } | Self::AnimationFrame { .. } | Self::StripScrolled { .. }
        )
    }
}

/// Processes one event.
///
/// Returns `(rerender, actions)`.
///
/// # Errors
///
/// Reserved for failures that must abort the host loop; every condition
/// handled today degrades to a notice, a log event or a no-op.
pub fn handle_event(session: &mut MapSession, event: &Event) -> Result<(bool, Vec<Action>)> {
    let span = if event.is_high_frequency() {
        tracing::trace_span!("handle_event", event_type = event.name())
    } else {
        tracing::debug_span!("handle_event", event_type = event.name())
    };
    let _guard = span.entered();

    match event {
        Event::ListingsRequested => {
            session.set_status(LoadStatus::Loading);
            tracing::debug!(query = ?session.query, "requesting listings");
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::load_listings(session.query))],
            ))
        }

        Event::WorkerResponse(response) => Ok(handle_worker_response(session, response)),

        Event::PopupOpened { listing_id } => {
            if session.listing(*listing_id).is_none() {
                tracing::warn!(listing_id, "popup opened for unknown listing");
                return Ok((false, vec![]));
            }
            let actions = session.show_popup(*listing_id);
            Ok((true, actions))
        }

        Event::PopupClosed => {
            let was_open = session.open_popup().is_some();
            let actions = session.close_popup();
            Ok((was_open, actions))
        }

        Event::ToggleDescription { listing_id } => {
            Ok((session.toggle_description(*listing_id), vec![]))
        }

        Event::SaveListing { listing_id } => {
            let Some(user_id) = session.identity() else {
                tracing::info!(listing_id, "save attempted without messaging identity");
                return Ok((false, vec![Action::ShowNotice(Notice::MissingIdentity)]));
            };
            Ok((
                false,
                vec![Action::PostToWorker(WorkerMessage::save_listing(
                    *listing_id,
                    user_id.to_string(),
                ))],
            ))
        }

        Event::CallOwner { listing_id } => {
            let Some(uri) = session
                .listing(*listing_id)
                .and_then(|listing| tel_uri(listing.phone.as_deref()))
            else {
                tracing::debug!(listing_id, "no phone number to call");
                return Ok((false, vec![]));
            };
            let via = if session.capabilities().messaging_link_opener {
                LinkOpener::MessagingClient
            } else {
                LinkOpener::DirectNavigation
            };
            Ok((false, vec![Action::OpenLink { uri, via }]))
        }

        Event::ShowListingDetails { listing_id } => Ok((
            false,
            vec![Action::ConfirmDeepLink {
                listing_id: *listing_id,
                prompt: DEEP_LINK_PROMPT,
            }],
        )),

        Event::DeepLinkConfirmed { listing_id } => {
            session.show_deep_link(*listing_id);
            let uri = telegram_deep_link(session.bot_username(), *listing_id);
            Ok((
                true,
                vec![Action::OpenLink {
                    uri,
                    via: LinkOpener::NewWindow,
                }],
            ))
        }

        Event::CopyDeepLink => {
            let actions = session
                .deep_link_listing()
                .map(|id| Action::CopyToClipboard {
                    text: telegram_deep_link(session.bot_username(), id),
                })
                .into_iter()
                .collect();
            Ok((false, actions))
        }

        Event::CloseDeepLink => Ok((session.close_deep_link(), vec![])),

        Event::Gesture { strip, input } => {
            let command = session.sliders_mut().handle_input(*strip, *input);
            Ok((false, frame_actions(*strip, command)))
        }

        Event::AnimationFrame { strip } => {
            let command = session.sliders_mut().on_frame(*strip);
            Ok((false, frame_actions(*strip, command)))
        }

        Event::StripScrolled { strip } => {
            session.sliders_mut().on_scroll(*strip);
            Ok((false, vec![]))
        }
    }
}

fn handle_worker_response(session: &mut MapSession, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::ListingsLoaded {
            listings,
            rejected,
            malformed,
        } => {
            if *malformed {
                tracing::warn!("listings payload malformed, showing no listings");
            }
            if *rejected > 0 {
                tracing::warn!(rejected, "some listings failed validation");
            }
            if listings.is_empty() {
                tracing::warn!("no listings found");
            }
            let actions = session.apply_listings(listings.clone());
            tracing::info!(count = session.stats_count(), "listings displayed");
            (true, actions)
        }
        WorkerResponse::LoadFailed { message } => {
            tracing::error!(error = %message, "failed to load listings");
            session.set_status(LoadStatus::Failed);
            (true, vec![])
        }
        WorkerResponse::ListingSaved { listing_id } => {
            tracing::info!(listing_id, "listing sent to chat");
            (false, vec![Action::ShowNotice(Notice::ListingSaved)])
        }
        WorkerResponse::SaveFailed { listing_id, message } => {
            tracing::warn!(listing_id, error = %message, "failed to save listing");
            (false, vec![Action::ShowNotice(Notice::SaveFailed)])
        }
    }
}

fn frame_actions(strip: StripId, command: Option<FrameCommand>) -> Vec<Action> {
    match command {
        Some(FrameCommand::Schedule) => vec![Action::RequestAnimationFrame { strip }],
        Some(FrameCommand::Cancel) => vec![Action::CancelAnimationFrame { strip }],
        None => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::HostCapabilities;
    use crate::domain::ListingRecord;
    use crate::slider::{HeadlessIndicators, HeadlessStrip};
    use crate::Config;
    use serde_json::json;

    fn loaded_session(capabilities: HostCapabilities) -> MapSession {
        let mut session = MapSession::new(&Config::default(), capabilities);
        let listing: ListingRecord = serde_json::from_value(json!({
            "id": 4, "latitude": 41.3, "longitude": 69.2, "title": "Flat",
            "price": 1000, "phone": 901234567, "photos": ["p1", "p2", "p3"]
        }))
        .unwrap();
        session.apply_listings(vec![listing]);
        session
    }

    #[test]
    fn listings_request_posts_to_worker() {
        let mut session = MapSession::new(&Config::default(), HostCapabilities::default());
        let (rerender, actions) = handle_event(&mut session, &Event::ListingsRequested).unwrap();
        assert!(rerender);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::LoadListings { .. })]
        ));
    }

    #[test]
    fn load_failure_shows_error_indicator() {
        let mut session = MapSession::new(&Config::default(), HostCapabilities::default());
        let event = Event::WorkerResponse(WorkerResponse::LoadFailed {
            message: "timeout".to_string(),
        });
        handle_event(&mut session, &event).unwrap();

        let page = session.compute_page();
        assert!(page.error_visible);
        assert!(!page.loading_visible);
    }

    #[test]
    fn save_with_identity_posts_request() {
        let mut session = loaded_session(HostCapabilities::default());
        session.set_identity(Some("555".to_string()));

        let (_, actions) = handle_event(&mut session, &Event::SaveListing { listing_id: 4 }).unwrap();
        match actions.as_slice() {
            [Action::PostToWorker(WorkerMessage::SaveListing {
                listing_id, user_id, ..
            })] => {
                assert_eq!(*listing_id, 4);
                assert_eq!(user_id, "555");
            }
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn save_results_map_to_notices() {
        let mut session = MapSession::new(&Config::default(), HostCapabilities::default());
        let (_, ok) = handle_event(
            &mut session,
            &Event::WorkerResponse(WorkerResponse::ListingSaved { listing_id: 1 }),
        )
        .unwrap();
        let (_, failed) = handle_event(
            &mut session,
            &Event::WorkerResponse(WorkerResponse::SaveFailed {
                listing_id: 1,
                message: "500".to_string(),
            }),
        )
        .unwrap();

        assert_eq!(ok, vec![Action::ShowNotice(Notice::ListingSaved)]);
        assert_eq!(failed, vec![Action::ShowNotice(Notice::SaveFailed)]);
    }

    #[test]
    fn call_uses_messaging_opener_when_available() {
        let mut session = loaded_session(HostCapabilities {
            messaging_link_opener: true,
        });
        let (_, actions) = handle_event(&mut session, &Event::CallOwner { listing_id: 4 }).unwrap();
        assert_eq!(
            actions,
            vec![Action::OpenLink {
                uri: "tel:+998901234567".to_string(),
                via: LinkOpener::MessagingClient,
            }]
        );

        let mut plain = loaded_session(HostCapabilities::default());
        let (_, actions) = handle_event(&mut plain, &Event::CallOwner { listing_id: 4 }).unwrap();
        assert!(matches!(
            actions.as_slice(),
            [Action::OpenLink { via: LinkOpener::DirectNavigation, .. }]
        ));
    }

    #[test]
    fn deep_link_flow_confirms_then_shows_modal() {
        let mut session = loaded_session(HostCapabilities::default());

        let (rerender, actions) =
            handle_event(&mut session, &Event::ShowListingDetails { listing_id: 4 }).unwrap();
        assert!(!rerender);
        assert!(matches!(actions.as_slice(), [Action::ConfirmDeepLink { listing_id: 4, .. }]));
        assert!(session.compute_page().deep_link_modal.is_none());

        let (rerender, actions) =
            handle_event(&mut session, &Event::DeepLinkConfirmed { listing_id: 4 }).unwrap();
        assert!(rerender);
        assert!(matches!(actions.as_slice(), [Action::OpenLink { via: LinkOpener::NewWindow, .. }]));

        let (_, actions) = handle_event(&mut session, &Event::CopyDeepLink).unwrap();
        assert!(matches!(actions.as_slice(), [Action::CopyToClipboard { text }] if text.ends_with("listing_4")));

        let (rerender, _) = handle_event(&mut session, &Event::CloseDeepLink).unwrap();
        assert!(rerender);
    }

    #[test]
    fn closing_popup_mid_momentum_cancels_frame() {
        let mut session = loaded_session(HostCapabilities::default());
        handle_event(&mut session, &Event::PopupOpened { listing_id: 4 }).unwrap();
        session.attach_slider(
            StripId(4),
            Box::new(HeadlessStrip::new(3, 300.0)),
            Box::new(HeadlessIndicators::new(3)),
        );

        let strip = StripId(4);
        handle_event(&mut session, &Event::Gesture { strip, input: GestureInput::Start { x: 500.0 } }).unwrap();
        handle_event(&mut session, &Event::Gesture { strip, input: GestureInput::Move { x: 420.0 } }).unwrap();
        let (_, actions) =
            handle_event(&mut session, &Event::Gesture { strip, input: GestureInput::End }).unwrap();
        assert_eq!(actions, vec![Action::RequestAnimationFrame { strip }]);

        let (_, actions) = handle_event(&mut session, &Event::PopupClosed).unwrap();
        assert_eq!(actions, vec![Action::CancelAnimationFrame { strip }]);
        assert!(session.sliders().is_empty());
    }

    #[test]
    fn reload_without_open_listing_closes_popup_and_cancels_frame() {
        let mut session = loaded_session(HostCapabilities::default());
        handle_event(&mut session, &Event::PopupOpened { listing_id: 4 }).unwrap();
        session.attach_slider(
            StripId(4),
            Box::new(HeadlessStrip::new(3, 300.0)),
            Box::new(HeadlessIndicators::new(3)),
        );

        let strip = StripId(4);
        handle_event(&mut session, &Event::Gesture { strip, input: GestureInput::Start { x: 500.0 } }).unwrap();
        handle_event(&mut session, &Event::Gesture { strip, input: GestureInput::Move { x: 420.0 } }).unwrap();
        handle_event(&mut session, &Event::Gesture { strip, input: GestureInput::End }).unwrap();

        let other: ListingRecord = serde_json::from_value(json!({
            "id": 5, "latitude": 41.4, "longitude": 69.3, "title": "House", "price": 2000
        }))
        .unwrap();
        let response = WorkerResponse::ListingsLoaded { listings: vec![other], rejected: 0, malformed: false };
        let (rerender, actions) = handle_event(&mut session, &Event::WorkerResponse(response)).unwrap();

        assert!(rerender);
        assert_eq!(actions, vec![Action::CancelAnimationFrame { strip }]);
        assert!(session.open_popup().is_none());
        assert!(session.sliders().is_empty());
        assert!(session.compute_page().open_popup.is_none());
    }

    #[test]
    fn unknown_popup_is_ignored() {
        let mut session = loaded_session(HostCapabilities::default());
        let (rerender, actions) =
            handle_event(&mut session, &Event::PopupOpened { listing_id: 99 }).unwrap();
        assert!(!rerender);
        assert!(actions.is_empty());
        assert!(session.open_popup().is_none());
    }
}
