pub mod controller;
pub mod conversion;
pub mod currencies;
pub mod market_data;
pub mod notifications;
pub mod shared;
pub mod view;
