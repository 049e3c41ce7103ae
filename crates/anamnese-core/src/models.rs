pub mod assessment;
pub mod phase;
pub mod record;
pub mod response;
pub mod transcript;
