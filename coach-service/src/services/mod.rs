pub mod coach;
pub mod providers;

pub use coach::CoachService;
