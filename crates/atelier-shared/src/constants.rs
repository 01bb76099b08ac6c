/// Application name
pub const APP_NAME: &str = "Atelier";

/// Storage key holding the current session user (single JSON object).
pub const KEY_USER: &str = "user";

/// Storage key for the conversations collection.
pub const KEY_CONVERSATIONS: &str = "conversations";

/// Storage key for the messages collection.
pub const KEY_MESSAGES: &str = "messages";

/// Storage key for the orders collection (canonical hire records; a
/// "booking" is the creator-side view of the same record).
pub const KEY_ORDERS: &str = "orders";

/// Storage key for user-created portfolios.
pub const KEY_PORTFOLIOS: &str = "userPortfolios";

/// Storage key for user-created service listings.
pub const KEY_SERVICES: &str = "userServices";

/// Storage key for the reviews collection.
pub const KEY_REVIEWS: &str = "reviews";

/// Budget display value for free-trial bookings.
pub const FREE_TRIAL_BUDGET: &str = "Free trial";

/// Deadline display value when the client leaves the field open.
pub const OPEN_DEADLINE: &str = "To be discussed";

/// Lowest and highest accepted review rating.
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
