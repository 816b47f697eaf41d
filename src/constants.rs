/// Number of days (starting today) covered by the upcoming birthday lookup
pub const BIRTHDAY_WINDOW_DAYS: i64 = 7;

/// Default page size when listing contacts
pub const DEFAULT_LIST_LIMIT: u32 = 10;

/// Largest page size a caller may request
pub const MAX_LIST_LIMIT: u32 = 100;

/// Maximum length for first and last names
pub const MAX_NAME_LENGTH: usize = 50;

/// Maximum length for phone numbers
pub const MAX_PHONE_LENGTH: usize = 20;

/// Default address the HTTP server binds to
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Default size of the Postgres connection pool
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default timezone used to decide what "today" is
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Message returned when a contact id does not exist
pub const CONTACT_NOT_FOUND: &str = "Contact not found";

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "contacts_rs=info";
