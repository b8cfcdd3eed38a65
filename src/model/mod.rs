pub mod amount;
pub mod balances;
pub mod binding;
pub mod currency;
pub mod withdrawal;
