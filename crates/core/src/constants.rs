use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Currency of every account in the mock bank
pub const CURRENCY: &str = "CHF";

/// Maximum amount accepted for a single transfer
pub const MAX_TRANSFER_AMOUNT: Decimal = dec!(100000);

/// Fee charged for express transfers
pub const EXPRESS_FEE: Decimal = dec!(10);

/// Fee charged for instant transfers
pub const INSTANT_FEE: Decimal = dec!(25);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Simulated bank processing time for a transfer, in milliseconds
pub const DEFAULT_TRANSFER_PROCESSING_MS: u64 = 3000;

/// Simulated login round-trip, in milliseconds
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1500;

/// Refresh period of the dashboard clock, in milliseconds
pub const DEFAULT_CLOCK_TICK_MS: u64 = 1000;

/// Number of transactions shown on the dashboard
pub const RECENT_TRANSACTIONS_LIMIT: usize = 5;

/// Prefix of generated transaction ids
pub const TRANSACTION_ID_PREFIX: &str = "TXN";
