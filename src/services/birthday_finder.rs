/// Upcoming birthday lookup over a snapshot of contacts
use chrono::NaiveDate;

use crate::constants::BIRTHDAY_WINDOW_DAYS;
use crate::models::Contact;
use crate::utils::datetime::days_until_birthday;

/// Contacts whose next birthday is within `BIRTHDAY_WINDOW_DAYS` of `today`
/// (today included), nearest birthday first and ties ordered by id.
pub fn upcoming_birthdays(contacts: Vec<Contact>, today: NaiveDate) -> Vec<Contact> {
    let mut upcoming: Vec<(i64, Contact)> = contacts
        .into_iter()
        .map(|contact| (days_until_birthday(contact.birth_date, today), contact))
        .filter(|(days, _)| (0..BIRTHDAY_WINDOW_DAYS).contains(days))
        .collect();

    upcoming.sort_unstable_by_key(|(days, contact)| (*days, contact.id));
    upcoming.into_iter().map(|(_, contact)| contact).collect()
}
