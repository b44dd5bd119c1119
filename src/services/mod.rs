pub mod pricing;
pub mod booking;

pub use booking::BookingService;
pub use pricing::PricingPolicy;
