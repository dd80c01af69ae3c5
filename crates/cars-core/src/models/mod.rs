pub mod assessment;
pub mod record;
pub mod risk;
pub mod score;
pub mod subscale;
