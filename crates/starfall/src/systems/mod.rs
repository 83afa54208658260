pub mod meteors;
pub mod stars;
