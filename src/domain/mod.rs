// Domain layer - plain value records shared by every component
pub mod category;
pub mod logger;
pub mod reading;
