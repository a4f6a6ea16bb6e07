//! Phone display, `tel:` URIs and Telegram deep links.
//!
//! Listing owners are in Uzbekistan; the backend stores phone numbers with or
//! without the `+998` country prefix, so every number is normalized to a single
//! `+998…` form before it is shown or dialled.

/// Country calling code prepended to every displayed number.
const COUNTRY_PREFIX: &str = "+998";

/// Shown in place of a phone number when the listing has none.
pub const UNKNOWN_PHONE: &str = "No'malum";

/// Normalizes a stored phone number to `+998XXXXXXXXX`.
///
/// A leading `998` or `+998` is removed before the prefix is applied, so the
/// prefix never appears twice.
///
/// # Examples
///
/// ```
/// use listing_map::domain::contact::display_phone;
///
/// assert_eq!(display_phone(Some("901234567")), "+998901234567");
/// assert_eq!(display_phone(Some("+998901234567")), "+998901234567");
/// assert_eq!(display_phone(None), "No'malum");
/// ```
#[must_use]
pub fn display_phone(phone: Option<&str>) -> String {
    phone.map_or_else(
        || UNKNOWN_PHONE.to_string(),
        |raw| {
            let local = raw.strip_prefix('+').unwrap_or(raw);
            let local = local.strip_prefix("998").unwrap_or(raw);
            format!("{COUNTRY_PREFIX}{local}")
        },
    )
}

/// Builds the `tel:` URI for a listing owner, or `None` when there is no phone.
#[must_use]
pub fn tel_uri(phone: Option<&str>) -> Option<String> {
    phone.map(|p| format!("tel:{}", display_phone(Some(p))))
}

/// Bot command that opens a listing inside the Telegram bot.
#[must_use]
pub fn start_command(listing_id: i64) -> String {
    format!("/start listing_{listing_id}")
}

/// Deep link that opens the bot with the listing preselected.
///
/// # Examples
///
/// ```
/// use listing_map::domain::contact::telegram_deep_link;
///
/// assert_eq!(
///     telegram_deep_link("rent_bot", 42),
///     "https://t.me/rent_bot?start=listing_42"
/// );
/// ```
#[must_use]
pub fn telegram_deep_link(bot_username: &str, listing_id: i64) -> String {
    format!("https://t.me/{bot_username}?start=listing_{listing_id}")
}
